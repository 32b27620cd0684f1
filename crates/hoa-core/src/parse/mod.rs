pub mod components;
pub mod extension;
pub mod operation;
pub mod security;
pub mod spec;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ParseError;
use components::Components;
use extension::{CORS_KEY, CorsConfig};
use operation::{HttpMethod, Operation, PathItem};
use security::SecurityScheme;
use spec::ApiDocument;

/// Parse a contract document from YAML.
pub fn from_yaml(input: &str) -> Result<ApiDocument, ParseError> {
    let value: Value = serde_yaml_ng::from_str(input)?;
    from_value(value)
}

/// Parse a contract document from JSON.
pub fn from_json(input: &str) -> Result<ApiDocument, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    from_value(value)
}

/// Read and parse a contract document, choosing the format by extension.
/// Anything other than `.json` is read as YAML.
pub fn from_path(path: &Path) -> Result<ApiDocument, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(&content),
        _ => from_yaml(&content),
    }
}

/// Validate a generic document tree into an [`ApiDocument`].
pub fn from_value(value: Value) -> Result<ApiDocument, ParseError> {
    let Value::Object(mut root) = value else {
        return Err(ParseError::NotAnObject);
    };

    let paths = match root.shift_remove("paths") {
        Some(Value::Object(paths)) => parse_paths(paths)?,
        // `paths: ~` is an empty contract, not a missing one
        Some(Value::Null) => IndexMap::new(),
        Some(other) => return Err(invalid_field("paths", other)),
        None => return Err(ParseError::MissingField("paths".to_string())),
    };

    let components = match root.shift_remove("components") {
        Some(Value::Object(components)) => Some(parse_components(components)?),
        Some(Value::Null) | None => None,
        Some(other) => {
            return Err(invalid_field("components", other));
        }
    };

    let cors = root
        .shift_remove(CORS_KEY)
        .map(|v| typed::<CorsConfig>(CORS_KEY, v))
        .transpose()?;

    Ok(ApiDocument {
        fields: root.into_iter().collect(),
        paths,
        components,
        cors,
    })
}

fn parse_paths(paths: Map<String, Value>) -> Result<IndexMap<String, PathItem>, ParseError> {
    let mut parsed = IndexMap::with_capacity(paths.len());
    for (path, item) in paths {
        let Value::Object(item) = item else {
            return Err(ParseError::InvalidPathItem(path));
        };
        let item = parse_path_item(&path, item)?;
        parsed.insert(path, item);
    }
    Ok(parsed)
}

fn parse_path_item(path: &str, item: Map<String, Value>) -> Result<PathItem, ParseError> {
    let mut parsed = PathItem::default();
    for (key, value) in item {
        match HttpMethod::from_key(&key) {
            Some(method) => {
                let operation = parse_operation(path, method, value)?;
                parsed.operations.insert(method, operation);
            }
            None => {
                parsed.fields.insert(key, value);
            }
        }
    }
    Ok(parsed)
}

fn parse_operation(path: &str, method: HttpMethod, value: Value) -> Result<Operation, ParseError> {
    let Value::Object(mut fields) = value else {
        return Err(ParseError::InvalidOperation {
            path: path.to_string(),
            method: method.to_string(),
        });
    };

    let operation_id = match fields.shift_remove("operationId") {
        Some(Value::String(id)) if !id.is_empty() => id,
        _ => {
            return Err(ParseError::MissingOperationId {
                path: path.to_string(),
                method: method.to_string(),
            });
        }
    };

    let security = fields
        .shift_remove("security")
        .map(|v| typed("security", v))
        .transpose()?;

    Ok(Operation {
        operation_id,
        fields: fields.into_iter().collect(),
        security,
        // A pre-existing routing extension stays in `fields` until the
        // operation is woven.
        integration: None,
    })
}

fn parse_components(mut components: Map<String, Value>) -> Result<Components, ParseError> {
    let security_schemes = match components.shift_remove("securitySchemes") {
        Some(Value::Object(schemes)) => schemes
            .into_iter()
            .map(|(key, scheme)| (key, SecurityScheme::Opaque(scheme)))
            .collect(),
        Some(Value::Null) | None => IndexMap::new(),
        Some(other) => return Err(invalid_field("components.securitySchemes", other)),
    };

    Ok(Components {
        fields: components.into_iter().collect(),
        security_schemes,
    })
}

fn typed<T: DeserializeOwned>(field: &str, value: Value) -> Result<T, ParseError> {
    serde_json::from_value(value).map_err(|source| ParseError::InvalidField {
        field: field.to_string(),
        source,
    })
}

fn invalid_field(field: &str, value: Value) -> ParseError {
    // Reuse serde's own message for the shape mismatch.
    let source = serde_json::from_value::<Map<String, Value>>(value)
        .err()
        .unwrap_or_else(|| serde::de::Error::custom("expected a mapping"));
    ParseError::InvalidField {
        field: field.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_paths() {
        let err = from_yaml("openapi: 3.0.0\ninfo: {title: t, version: '1'}\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref f) if f == "paths"));
    }

    #[test]
    fn test_paths_must_be_mapping() {
        let err = from_yaml("paths: [a, b]\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { ref field, .. } if field == "paths"));
    }

    #[test]
    fn test_root_must_be_mapping() {
        let err = from_yaml("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject));
    }

    #[test]
    fn test_missing_operation_id() {
        let yaml = r#"
paths:
  /items:
    get:
      summary: list
"#;
        let err = from_yaml(yaml).unwrap_err();
        match err {
            ParseError::MissingOperationId { path, method } => {
                assert_eq!(path, "/items");
                assert_eq!(method, "GET");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_method_keys_are_preserved() {
        let yaml = r#"
paths:
  /items/{id}:
    summary: one item
    parameters:
      - name: id
        in: path
        required: true
    get:
      operationId: getItem
"#;
        let doc = from_yaml(yaml).unwrap();
        let item = &doc.paths["/items/{id}"];
        assert_eq!(item.operations.len(), 1);
        assert!(item.fields.contains_key("summary"));
        assert!(item.fields.contains_key("parameters"));
    }

    #[test]
    fn test_null_paths_is_empty() {
        let doc = from_yaml("paths: ~\n").unwrap();
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn test_invalid_security_is_rejected() {
        let yaml = r#"
paths:
  /items:
    get:
      operationId: listItems
      security: nope
"#;
        let err = from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { ref field, .. } if field == "security"));
    }

    #[test]
    fn test_json_input() {
        let json = r#"{"openapi":"3.0.0","paths":{"/a":{"post":{"operationId":"createA"}}}}"#;
        let doc = from_json(json).unwrap();
        assert!(doc.operation("/a", HttpMethod::Post).is_some());
        assert_eq!(doc.fields["openapi"], "3.0.0");
    }
}
