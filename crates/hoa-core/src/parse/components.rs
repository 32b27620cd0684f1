use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::security::SecurityScheme;

/// Components object. Only `securitySchemes` is modelled; schemas, responses
/// and the rest pass through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Components {
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,

    #[serde(rename = "securitySchemes", skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.security_schemes.is_empty()
    }
}
