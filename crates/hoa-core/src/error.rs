use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("contract document must be a mapping at its root")]
    NotAnObject,

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("path item {0} must be a mapping")]
    InvalidPathItem(String),

    #[error("operation {method} {path} must be a mapping")]
    InvalidOperation { path: String, method: String },

    #[error("operation {method} {path} has no operationId")]
    MissingOperationId { path: String, method: String },

    #[error("invalid field {field}: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("there is no path in the contract document matching operationId {0}")]
    UnknownOperation(String),

    #[error("operationId {0} is integrated more than once")]
    DuplicateIntegration(String),

    #[error("operationId {0} clashes with the authorizer's permission key")]
    ReservedOperationId(String),

    #[error("operationIds {first} and {second} both map to logical id {logical_id}")]
    LogicalIdConflict {
        logical_id: String,
        first: String,
        second: String,
    },

    #[error("operationId {operation_id} is declared at both {first} and {second}")]
    DuplicateOperationId {
        operation_id: String,
        first: String,
        second: String,
    },

    #[error("invalid certificate ARN: {0}")]
    InvalidCertificateArn(String),

    #[error("certificate {arn} is in region {found}, expected a regional certificate in {expected}")]
    CertificateRegion {
        arn: String,
        found: String,
        expected: String,
    },

    #[error("domain {domain} is not within hosted zone {zone}")]
    DomainOutsideZone { domain: String, zone: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
