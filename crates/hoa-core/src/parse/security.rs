use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::extension::AuthorizerExtension;

/// A security scheme type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecuritySchemeType {
    ApiKey,
    Http,
    OAuth2,
    OpenIdConnect,
    MutualTLS,
}

/// Location of an API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

/// A header-carried scheme backed by an external authorizer function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizerScheme {
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,

    pub name: String,

    #[serde(rename = "in")]
    pub location: ApiKeyLocation,

    #[serde(rename = "x-amazon-apigateway-authorizer")]
    pub authorizer: AuthorizerExtension,
}

/// A security scheme definition under `components.securitySchemes`.
///
/// Schemes already present in the contract are kept untouched as
/// [`SecurityScheme::Opaque`]; the composer only ever writes authorizer schemes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SecurityScheme {
    Authorizer(AuthorizerScheme),
    Opaque(serde_json::Value),
}

impl SecurityScheme {
    pub fn as_authorizer(&self) -> Option<&AuthorizerScheme> {
        match self {
            SecurityScheme::Authorizer(scheme) => Some(scheme),
            SecurityScheme::Opaque(_) => None,
        }
    }
}

/// A security requirement: map of scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;
