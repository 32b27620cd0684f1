use std::fs;
use std::path::Path;

use heck::ToPascalCase;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::parse::extension::CorsConfig;

/// Build configuration loaded from `.hoa.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Prefix for every compute unit name: `{prefix}-{operationId}`.
    pub function_name_prefix: String,
    /// Path to the contract document (YAML or JSON).
    pub open_api_spec: String,
    pub integrations: Vec<IntegrationDescriptor>,
    /// ARN of an externally defined authorizer function. When set, every
    /// woven operation is guarded by it.
    pub custom_authorizer_reference: Option<String>,
    pub lambdas_source_path: String,
    pub cors_config: Option<CorsConfig>,
    pub cors_allow_all_origins: bool,
    pub runtime: String,
    pub deployment: Deployment,
    pub custom_domain: Option<CustomDomain>,
    /// Reject contracts declaring the same operationId more than once instead
    /// of keeping the last occurrence.
    pub strict_operation_ids: bool,
    /// Logical id of the API resource; defaults to `{Prefix}HttpApi`.
    pub api_logical_id: Option<String>,
    /// Directory the CLI writes artifacts to.
    pub output: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            function_name_prefix: String::new(),
            open_api_spec: "openapi.yaml".to_string(),
            integrations: Vec::new(),
            custom_authorizer_reference: None,
            lambdas_source_path: DEFAULT_LAMBDAS_SOURCE_PATH.to_string(),
            cors_config: None,
            cors_allow_all_origins: false,
            runtime: DEFAULT_RUNTIME.to_string(),
            deployment: Deployment::default(),
            custom_domain: None,
            strict_operation_ids: false,
            api_logical_id: None,
            output: ".build/api".to_string(),
        }
    }
}

impl BuildConfig {
    /// A config with the given prefix and integrations, everything else default.
    pub fn new(function_name_prefix: impl Into<String>, integrations: Vec<IntegrationDescriptor>) -> Self {
        Self {
            function_name_prefix: function_name_prefix.into(),
            integrations,
            ..Self::default()
        }
    }

    pub fn api_logical_id(&self) -> String {
        self.api_logical_id
            .clone()
            .unwrap_or_else(|| format!("{}HttpApi", self.function_name_prefix.to_pascal_case()))
    }

    /// Check the fields serde cannot: non-empty names and handlers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.function_name_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "functionNamePrefix must not be empty".to_string(),
            ));
        }
        for (idx, integration) in self.integrations.iter().enumerate() {
            if integration.operation_id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "integrations[{idx}].operationId must not be empty"
                )));
            }
            if integration.handler.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "integrations[{idx}].handler must not be empty ({})",
                    integration.operation_id
                )));
            }
        }
        if let Some(ref domain) = self.custom_domain {
            if domain.custom_domain_name.trim().is_empty() || domain.zone_name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "customDomain requires customDomainName and zoneName".to_string(),
                ));
            }
        }
        Ok(())
    }
}

pub const DEFAULT_LAMBDAS_SOURCE_PATH: &str = "./.build/src";
pub const DEFAULT_RUNTIME: &str = "nodejs14.x";

/// One operation-to-handler binding. Handlers are `file.export`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationDescriptor {
    pub operation_id: String,
    pub handler: String,
    #[serde(default)]
    pub timeout_seconds: Option<u32>,
    #[serde(default)]
    pub memory_size: Option<u32>,
    #[serde(default)]
    pub log_retention_days: Option<u32>,
    #[serde(default)]
    pub env: Option<IndexMap<String, String>>,
}

impl IntegrationDescriptor {
    pub fn new(operation_id: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            operation_id: operation_id.into(),
            handler: handler.into(),
            timeout_seconds: None,
            memory_size: None,
            log_retention_days: None,
            env: None,
        }
    }
}

/// Where the API is deployed. Unset values fall back to CloudFormation
/// pseudo parameters, resolved by the provisioning layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Deployment {
    pub partition: String,
    pub region: String,
    pub account: String,
}

impl Default for Deployment {
    fn default() -> Self {
        Self {
            partition: "aws".to_string(),
            region: "${AWS::Region}".to_string(),
            account: "${AWS::AccountId}".to_string(),
        }
    }
}

/// Custom domain binding inputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDomain {
    pub custom_domain_name: String,
    pub certificate_arn: String,
    pub zone_name: String,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".hoa.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<BuildConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: BuildConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })?;
    config.validate()?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# hoa configuration
functionNamePrefix: my-api
openApiSpec: openapi.yaml
output: .build/api
lambdasSourcePath: ./.build/src
runtime: nodejs14.x

integrations:
  - operationId: listItems
    handler: api.listItems
    # timeoutSeconds: 3
    # memorySize: 128
    # logRetentionDays: 90
    # env:
    #   TABLE_NAME: items

# customAuthorizerReference: arn:aws:lambda:eu-west-1:123456789012:function:authorizer

corsAllowAllOrigins: false
# corsConfig:
#   allowCredentials: true
#   allowHeaders: ["*"]
#   allowMethods: ["*"]
#   allowOrigins: ["https://example.com"]

deployment:
  partition: aws
  # region: eu-west-1
  # account: "123456789012"

# customDomain:
#   customDomainName: api.example.com
#   certificateArn: arn:aws:acm:eu-west-1:123456789012:certificate/abc
#   zoneName: example.com

strictOperationIds: false
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.open_api_spec, "openapi.yaml");
        assert_eq!(config.lambdas_source_path, "./.build/src");
        assert_eq!(config.runtime, "nodejs14.x");
        assert_eq!(config.deployment.partition, "aws");
        assert!(config.integrations.is_empty());
        assert!(config.custom_authorizer_reference.is_none());
        assert!(!config.cors_allow_all_origins);
        assert!(!config.strict_operation_ids);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
functionNamePrefix: svc
openApiSpec: ./openapi.yml
integrations:
  - operationId: listItems
    handler: api.list
  - operationId: getItem
    handler: api.get
    timeoutSeconds: 10
    memorySize: 512
    logRetentionDays: 14
    env:
      TABLE: items
customAuthorizerReference: arn:aws:lambda:eu-west-1:123:function:auth
corsConfig:
  allowCredentials: true
  allowOrigins: ["https://example.com"]
deployment:
  region: eu-west-1
  account: "123456789012"
customDomain:
  customDomainName: api.example.com
  certificateArn: arn:aws:acm:eu-west-1:123456789012:certificate/abc
  zoneName: example.com
"#;
        let config: BuildConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.function_name_prefix, "svc");
        assert_eq!(config.open_api_spec, "./openapi.yml");
        assert_eq!(config.integrations.len(), 2);
        assert_eq!(config.integrations[0].timeout_seconds, None);
        let get_item = &config.integrations[1];
        assert_eq!(get_item.timeout_seconds, Some(10));
        assert_eq!(get_item.memory_size, Some(512));
        assert_eq!(get_item.log_retention_days, Some(14));
        assert_eq!(get_item.env.as_ref().unwrap()["TABLE"], "items");
        let cors = config.cors_config.as_ref().unwrap();
        assert_eq!(cors.allow_credentials, Some(true));
        assert_eq!(
            cors.allow_origins.as_deref(),
            Some(&["https://example.com".to_string()][..])
        );
        assert_eq!(config.deployment.region, "eu-west-1");
        // Unset deployment keys keep their defaults
        assert_eq!(config.deployment.partition, "aws");
        assert_eq!(
            config.custom_domain.as_ref().unwrap().zone_name,
            "example.com"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "functionNamePrefix: svc\n";
        let config: BuildConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.function_name_prefix, "svc");
        // Defaults applied
        assert_eq!(config.lambdas_source_path, "./.build/src");
        assert_eq!(config.deployment.region, "${AWS::Region}");
    }

    #[test]
    fn test_api_logical_id() {
        let config = BuildConfig::new("orders-svc", vec![]);
        assert_eq!(config.api_logical_id(), "OrdersSvcHttpApi");

        let config = BuildConfig {
            api_logical_id: Some("Api".to_string()),
            ..config
        };
        assert_eq!(config.api_logical_id(), "Api");
    }

    #[test]
    fn test_validate_rejects_empty_prefix_and_handler() {
        let config = BuildConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = BuildConfig::new("svc", vec![IntegrationDescriptor::new("listItems", "")]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("listItems"));
    }

    #[test]
    fn test_default_config_content_parses() {
        let config: BuildConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.function_name_prefix, "my-api");
        assert_eq!(config.integrations.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }
}
