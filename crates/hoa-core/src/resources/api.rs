use serde::Serialize;

use crate::config::BuildConfig;

pub const DEFAULT_STAGE_LOGICAL_ID: &str = "DefaultStage";
pub const DEFAULT_STAGE_NAME: &str = "$default";

/// The HTTP API resource whose body is the composed contract document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub logical_id: String,
    pub name: String,
}

impl ApiResource {
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            logical_id: config.api_logical_id(),
            name: config.function_name_prefix.clone(),
        }
    }

    /// Substitution token resolving to the provisioned API id.
    pub fn reference(&self) -> String {
        format!("${{{}}}", self.logical_id)
    }
}

/// An auto-deploying stage of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageResource {
    pub logical_id: String,
    pub api_id: String,
    pub stage_name: String,
    pub auto_deploy: bool,
}

impl StageResource {
    pub fn default_stage(api: &ApiResource) -> Self {
        Self {
            logical_id: DEFAULT_STAGE_LOGICAL_ID.to_string(),
            api_id: api.reference(),
            stage_name: DEFAULT_STAGE_NAME.to_string(),
            auto_deploy: true,
        }
    }
}
