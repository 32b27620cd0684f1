use indexmap::IndexMap;

use crate::config::BuildConfig;
use crate::resources::ComputeUnit;
use crate::resources::permission::{PermissionGrant, execute_api_arn};

/// One invoke grant per compute unit, keyed by operationId. The index in the
/// logical id follows compute unit insertion order.
pub fn grant_compute_units(
    functions: &IndexMap<String, ComputeUnit>,
    config: &BuildConfig,
) -> IndexMap<String, PermissionGrant> {
    let source_arn = execute_api_arn(&config.deployment, &config.api_logical_id(), "*/*");

    functions
        .iter()
        .enumerate()
        .map(|(idx, (operation_id, unit))| {
            let grant = PermissionGrant::invoke(
                format!("LambdaPermission{idx}"),
                unit.function_name.clone(),
                source_arn.clone(),
            );
            (operation_id.clone(), grant)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntegrationDescriptor;

    #[test]
    fn test_one_grant_per_unit() {
        let config = BuildConfig::new(
            "svc",
            vec![
                IntegrationDescriptor::new("listItems", "api.list"),
                IntegrationDescriptor::new("getItem", "api.get"),
            ],
        );
        let functions: IndexMap<String, ComputeUnit> = config
            .integrations
            .iter()
            .map(|i| (i.operation_id.clone(), ComputeUnit::from_integration(i, &config)))
            .collect();

        let grants = grant_compute_units(&functions, &config);
        assert_eq!(grants.len(), 2);
        assert_eq!(grants["listItems"].logical_id, "LambdaPermission0");
        assert_eq!(grants["getItem"].logical_id, "LambdaPermission1");
        assert_eq!(grants["getItem"].function_name, "svc-getItem");
        assert_eq!(grants["getItem"].action, "lambda:InvokeFunction");
        assert_eq!(
            grants["getItem"].source_arn,
            "arn:aws:execute-api:${AWS::Region}:${AWS::AccountId}:${SvcHttpApi}/*/*"
        );
    }
}
