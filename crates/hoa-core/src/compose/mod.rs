pub mod authorizer;
pub mod cors;
pub mod domain;
pub mod method_index;
pub mod permissions;
pub mod weaver;

use indexmap::IndexMap;

use crate::config::BuildConfig;
use crate::error::ComposeError;
use crate::parse::spec::ApiDocument;
use crate::resources::{ApiResource, DeploymentBundle, StageResource};

pub use authorizer::AUTHORIZER_SCHEME_KEY;
pub use method_index::{MethodIndex, MethodMapping};

/// Compose a deployment bundle from a parsed contract and build config.
///
/// The document moves through each stage in turn and is returned only inside
/// a complete bundle; on error nothing is emitted.
pub fn compose(document: ApiDocument, config: &BuildConfig) -> Result<DeploymentBundle, ComposeError> {
    // Phase 1: Index operations by operationId
    let index = MethodIndex::build(&document);
    if config.strict_operation_ids {
        if let Some(dup) = index.duplicates().first() {
            return Err(ComposeError::DuplicateOperationId {
                operation_id: dup.operation_id.clone(),
                first: dup.replaced.to_string(),
                second: dup.kept.to_string(),
            });
        }
    }

    // The authorizer grant shares the permissions map with per-operation grants.
    if config.custom_authorizer_reference.is_some() {
        if let Some(integration) = config
            .integrations
            .iter()
            .find(|i| i.operation_id == AUTHORIZER_SCHEME_KEY)
        {
            return Err(ComposeError::ReservedOperationId(
                integration.operation_id.clone(),
            ));
        }
    }

    // Phase 2: Weave integrations onto their operations
    let (document, functions) = weaver::weave_integrations(document, &index, config)?;

    // Phase 3: Register the authorizer scheme
    let (document, authorizer_grant) = authorizer::wire_authorizer(document, config);

    // Phase 4: CORS
    let document = cors::annotate_cors(document, config);

    // Phase 5: Invoke permissions
    let mut grants = IndexMap::new();
    if let Some(grant) = authorizer_grant {
        grants.insert(AUTHORIZER_SCHEME_KEY.to_string(), grant);
    }
    grants.extend(permissions::grant_compute_units(&functions, config));

    // Phase 6: API, stage and optional custom domain
    let api = ApiResource::from_config(config);
    let stage = StageResource::default_stage(&api);
    let domain = config
        .custom_domain
        .as_ref()
        .map(|d| domain::bind_custom_domain(d, &api, &stage, &config.deployment))
        .transpose()?;

    log::info!(
        "composed {}: {} functions, {} permissions",
        api.logical_id,
        functions.len(),
        grants.len()
    );

    Ok(DeploymentBundle {
        api,
        stage,
        document,
        functions,
        permissions: grants,
        domain,
    })
}
