use indexmap::IndexMap;

use super::authorizer::AUTHORIZER_SCHEME_KEY;
use super::method_index::MethodIndex;
use crate::config::BuildConfig;
use crate::error::ComposeError;
use crate::parse::extension::{INTEGRATION_KEY, Integration};
use crate::parse::security::SecurityRequirement;
use crate::parse::spec::ApiDocument;
use crate::resources::ComputeUnit;

/// Bind every configured integration to its operation.
///
/// Takes ownership of the document and only hands it back once every
/// integration has been woven; any failure drops it.
pub fn weave_integrations(
    mut document: ApiDocument,
    index: &MethodIndex,
    config: &BuildConfig,
) -> Result<(ApiDocument, IndexMap<String, ComputeUnit>), ComposeError> {
    let mut functions: IndexMap<String, ComputeUnit> = IndexMap::new();
    let guarded = config.custom_authorizer_reference.is_some();

    for integration in &config.integrations {
        let operation_id = &integration.operation_id;
        let mapping = index
            .get(operation_id)
            .ok_or_else(|| ComposeError::UnknownOperation(operation_id.clone()))?;

        if functions.contains_key(operation_id) {
            return Err(ComposeError::DuplicateIntegration(operation_id.clone()));
        }

        let unit = ComputeUnit::from_integration(integration, config);
        if let Some((other_id, _)) = functions
            .iter()
            .find(|(_, other)| other.logical_id == unit.logical_id)
        {
            return Err(ComposeError::LogicalIdConflict {
                logical_id: unit.logical_id,
                first: other_id.clone(),
                second: operation_id.clone(),
            });
        }

        let operation = document
            .operation_mut(&mapping.path, mapping.method)
            .ok_or_else(|| ComposeError::UnknownOperation(operation_id.clone()))?;

        if guarded {
            operation.security = Some(vec![authorizer_requirement()]);
        }

        // Replace whatever routing the contract carried with ours.
        operation.fields.shift_remove(INTEGRATION_KEY);
        operation.integration = Some(Integration::proxy(unit.arn.clone()));

        log::debug!(
            "wove {} ({}) to {}",
            operation_id,
            mapping,
            unit.function_name
        );
        functions.insert(operation_id.clone(), unit);
    }

    Ok((document, functions))
}

/// `[{custom_authorizer: []}]` entry.
fn authorizer_requirement() -> SecurityRequirement {
    let mut requirement = SecurityRequirement::new();
    requirement.insert(AUTHORIZER_SCHEME_KEY.to_string(), Vec::new());
    requirement
}
