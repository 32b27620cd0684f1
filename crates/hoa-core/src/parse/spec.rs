use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::components::Components;
use super::extension::CorsConfig;
use super::operation::{HttpMethod, Operation, PathItem};

fn components_is_empty(components: &Option<Components>) -> bool {
    components.as_ref().is_none_or(Components::is_empty)
}

/// The parsed contract document.
///
/// `paths`, `components.securitySchemes` and the CORS extension are typed;
/// every other top-level field (`openapi`, `info`, `servers`, ...) is carried
/// through verbatim in `fields`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ApiDocument {
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,

    pub paths: IndexMap<String, PathItem>,

    #[serde(skip_serializing_if = "components_is_empty")]
    pub components: Option<Components>,

    #[serde(
        rename = "x-amazon-apigateway-cors",
        skip_serializing_if = "Option::is_none"
    )]
    pub cors: Option<CorsConfig>,
}

impl ApiDocument {
    /// Look up the operation at `path` + `method`.
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path)?.operation(method)
    }

    pub fn operation_mut(&mut self, path: &str, method: HttpMethod) -> Option<&mut Operation> {
        self.paths.get_mut(path)?.operation_mut(method)
    }

    /// Iterate every operation in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations
                .iter()
                .map(move |(method, op)| (path.as_str(), *method, op))
        })
    }

    /// The components section, created on first use.
    pub fn components_mut(&mut self) -> &mut Components {
        self.components.get_or_insert_with(Components::default)
    }

    /// Title from `info.title`, if present.
    pub fn title(&self) -> Option<&str> {
        self.fields.get("info")?.get("title")?.as_str()
    }
}
