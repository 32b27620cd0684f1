use indexmap::IndexMap;
use serde::Serialize;

use crate::parse::operation::HttpMethod;
use crate::parse::spec::ApiDocument;

/// Location of one operation inside the contract document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodMapping {
    pub path: String,
    pub method: HttpMethod,
}

impl std::fmt::Display for MethodMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// An operationId seen at more than one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateOperation {
    pub operation_id: String,
    pub replaced: MethodMapping,
    pub kept: MethodMapping,
}

/// operationId → location lookup, built once before weaving.
///
/// When the same operationId appears more than once, the last occurrence in
/// document order wins; every overwrite is recorded in `duplicates`.
#[derive(Debug, Clone, Default)]
pub struct MethodIndex {
    entries: IndexMap<String, MethodMapping>,
    duplicates: Vec<DuplicateOperation>,
}

impl MethodIndex {
    pub fn build(document: &ApiDocument) -> Self {
        let mut index = Self::default();

        for (path, method, operation) in document.operations() {
            let mapping = MethodMapping {
                path: path.to_string(),
                method,
            };
            if let Some(replaced) = index
                .entries
                .insert(operation.operation_id.clone(), mapping.clone())
            {
                log::warn!(
                    "operationId {} declared at {} is overridden by {}",
                    operation.operation_id,
                    replaced,
                    mapping
                );
                index.duplicates.push(DuplicateOperation {
                    operation_id: operation.operation_id.clone(),
                    replaced,
                    kept: mapping,
                });
            }
        }

        log::debug!("indexed {} operations", index.entries.len());
        index
    }

    pub fn get(&self, operation_id: &str) -> Option<&MethodMapping> {
        self.entries.get(operation_id)
    }

    pub fn entries(&self) -> &IndexMap<String, MethodMapping> {
        &self.entries
    }

    pub fn duplicates(&self) -> &[DuplicateOperation] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
