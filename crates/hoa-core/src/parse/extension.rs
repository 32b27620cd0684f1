use serde::{Deserialize, Serialize};

/// Operation-level routing extension key.
pub const INTEGRATION_KEY: &str = "x-amazon-apigateway-integration";

/// Security-scheme-level authorizer extension key.
pub const AUTHORIZER_KEY: &str = "x-amazon-apigateway-authorizer";

/// Document-level CORS extension key.
pub const CORS_KEY: &str = "x-amazon-apigateway-cors";

/// Payload format exchanged between the proxy layer and compute units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadFormatVersion {
    #[serde(rename = "1.0")]
    V1,
    #[default]
    #[serde(rename = "2.0")]
    V2,
}

/// How the proxy layer hands a request to the integration target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrationType {
    #[default]
    AwsProxy,
    HttpProxy,
}

/// Method the proxy layer uses to call the compute unit. Function invocation
/// is always a POST regardless of the client method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpstreamMethod {
    #[default]
    Post,
}

/// Routing descriptor written onto a woven operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    #[serde(rename = "type")]
    pub integration_type: IntegrationType,
    pub http_method: UpstreamMethod,
    pub uri: String,
    pub payload_format_version: PayloadFormatVersion,
}

impl Integration {
    /// A proxy integration targeting the given compute unit ARN.
    pub fn proxy(uri: impl Into<String>) -> Self {
        Self {
            integration_type: IntegrationType::AwsProxy,
            http_method: UpstreamMethod::Post,
            uri: uri.into(),
            payload_format_version: PayloadFormatVersion::V2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizerType {
    #[default]
    Request,
    Token,
}

/// External request authorizer invocation, nested inside a security scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerExtension {
    #[serde(rename = "type")]
    pub authorizer_type: AuthorizerType,
    pub identity_source: String,
    pub authorizer_uri: String,
    pub authorizer_payload_format_version: PayloadFormatVersion,
    pub authorizer_result_ttl_in_seconds: u32,
}

/// Document-level CORS configuration, copied verbatim when supplied. Lists
/// are optional so an explicit empty list survives serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expose_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
}

impl CorsConfig {
    /// Allow every header, method and origin.
    pub fn allow_all_origins() -> Self {
        Self {
            allow_headers: Some(vec!["*".to_string()]),
            allow_methods: Some(vec!["*".to_string()]),
            allow_origins: Some(vec!["*".to_string()]),
            ..Self::default()
        }
    }
}
