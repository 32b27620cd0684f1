use serde::Serialize;

use crate::config::Deployment;

/// Principal the proxy layer invokes functions as.
pub const INVOKE_PRINCIPAL: &str = "apigateway.amazonaws.com";
pub const INVOKE_ACTION: &str = "lambda:InvokeFunction";

/// Permission for the proxy layer to invoke one function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    pub logical_id: String,
    pub principal: String,
    pub action: String,
    /// Function name or ARN being granted.
    pub function_name: String,
    /// Execute-api ARN pattern the grant is scoped to.
    pub source_arn: String,
}

impl PermissionGrant {
    pub fn invoke(
        logical_id: impl Into<String>,
        function_name: impl Into<String>,
        source_arn: impl Into<String>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            principal: INVOKE_PRINCIPAL.to_string(),
            action: INVOKE_ACTION.to_string(),
            function_name: function_name.into(),
            source_arn: source_arn.into(),
        }
    }
}

/// `arn:{partition}:execute-api:{region}:{account}:${Api}/{pattern}`
///
/// The API id only exists once provisioned, so it is written as a
/// substitution token on the API's logical id.
pub fn execute_api_arn(deployment: &Deployment, api_logical_id: &str, pattern: &str) -> String {
    format!(
        "arn:{}:execute-api:{}:{}:${{{}}}/{}",
        deployment.partition, deployment.region, deployment.account, api_logical_id, pattern
    )
}
