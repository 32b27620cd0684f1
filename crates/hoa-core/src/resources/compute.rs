use heck::ToPascalCase;
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{BuildConfig, IntegrationDescriptor};

pub const DEFAULT_TIMEOUT_SECONDS: u32 = 3;
pub const DEFAULT_MEMORY_SIZE: u32 = 128;
pub const DEFAULT_LOG_RETENTION_DAYS: u32 = 90;

/// A function-like deployable serving one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeUnit {
    pub logical_id: String,
    pub function_name: String,
    /// Identity the routing extension points at.
    pub arn: String,
    pub handler: String,
    pub runtime: String,
    pub code_path: String,
    pub timeout_seconds: u32,
    pub memory_size: u32,
    pub log_retention_days: u32,
    pub environment: IndexMap<String, String>,
}

impl ComputeUnit {
    /// Resolve an integration into a compute unit, applying resource defaults.
    pub fn from_integration(integration: &IntegrationDescriptor, config: &BuildConfig) -> Self {
        let function_name = function_name(&config.function_name_prefix, &integration.operation_id);
        let deployment = &config.deployment;
        let arn = format!(
            "arn:{}:lambda:{}:{}:function:{}",
            deployment.partition, deployment.region, deployment.account, function_name
        );

        Self {
            logical_id: format!("{}Function", function_name.to_pascal_case()),
            arn,
            handler: integration.handler.clone(),
            runtime: config.runtime.clone(),
            code_path: config.lambdas_source_path.clone(),
            timeout_seconds: integration.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            memory_size: integration.memory_size.unwrap_or(DEFAULT_MEMORY_SIZE),
            log_retention_days: integration
                .log_retention_days
                .unwrap_or(DEFAULT_LOG_RETENTION_DAYS),
            environment: integration.env.clone().unwrap_or_default(),
            function_name,
        }
    }
}

/// `{prefix}-{operationId}`
pub fn function_name(prefix: &str, operation_id: &str) -> String {
    format!("{prefix}-{operation_id}")
}
