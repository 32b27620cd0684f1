use indexmap::IndexMap;
use serde::Serialize;

use super::api::{ApiResource, StageResource};
use super::compute::ComputeUnit;
use super::domain::DomainResources;
use super::permission::PermissionGrant;
use crate::Artifact;
use crate::error::RenderError;
use crate::parse::spec::ApiDocument;

/// Serialization format for rendered artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn render<T: Serialize>(&self, value: &T) -> Result<String, RenderError> {
        match self {
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(value)?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(value)?),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiResources<'a> {
    api: &'a ApiResource,
    stage: &'a StageResource,
}

/// The output of one composition pass, handed to the provisioning layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentBundle {
    pub api: ApiResource,
    pub stage: StageResource,
    /// The fully wired contract document, used as the API body.
    pub document: ApiDocument,
    /// operationId → compute unit, in integration order.
    pub functions: IndexMap<String, ComputeUnit>,
    /// Grant key → permission. Compute unit grants are keyed by operationId.
    pub permissions: IndexMap<String, PermissionGrant>,
    pub domain: Option<DomainResources>,
}

impl DeploymentBundle {
    /// Render every artifact in the given format.
    pub fn to_artifacts(&self, format: OutputFormat) -> Result<Vec<Artifact>, RenderError> {
        let ext = format.extension();
        let mut artifacts = vec![
            Artifact {
                path: format!("openapi.{ext}"),
                content: format.render(&self.document)?,
            },
            Artifact {
                path: format!("resources.{ext}"),
                content: format.render(&ApiResources {
                    api: &self.api,
                    stage: &self.stage,
                })?,
            },
            Artifact {
                path: format!("functions.{ext}"),
                content: format.render(&self.functions)?,
            },
            Artifact {
                path: format!("permissions.{ext}"),
                content: format.render(&self.permissions)?,
            },
        ];

        if let Some(ref domain) = self.domain {
            artifacts.push(Artifact {
                path: format!("domain.{ext}"),
                content: format.render(domain)?,
            });
        }

        Ok(artifacts)
    }
}
