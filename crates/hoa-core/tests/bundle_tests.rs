use hoa_core::compose;
use hoa_core::config::{BuildConfig, IntegrationDescriptor};
use hoa_core::parse;
use hoa_core::resources::OutputFormat;

const ITEMS: &str = include_str!("fixtures/items.yaml");

fn bundle() -> hoa_core::resources::DeploymentBundle {
    let doc = parse::from_yaml(ITEMS).unwrap();
    let config = BuildConfig {
        custom_authorizer_reference: Some(
            "arn:aws:lambda:eu-west-1:123456789012:function:auth".to_string(),
        ),
        ..BuildConfig::new("svc", vec![IntegrationDescriptor::new("listItems", "api.list")])
    };
    compose::compose(doc, &config).unwrap()
}

#[test]
fn artifacts_json() {
    let artifacts = bundle().to_artifacts(OutputFormat::Json).unwrap();
    let paths: Vec<&str> = artifacts.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "openapi.json",
            "resources.json",
            "functions.json",
            "permissions.json"
        ]
    );

    let functions: serde_json::Value = serde_json::from_str(&artifacts[2].content).unwrap();
    assert_eq!(functions["listItems"]["functionName"], "svc-listItems");
    assert_eq!(functions["listItems"]["timeoutSeconds"], 3);

    let resources: serde_json::Value = serde_json::from_str(&artifacts[1].content).unwrap();
    assert_eq!(resources["stage"]["stageName"], "$default");
    assert_eq!(resources["stage"]["apiId"], "${SvcHttpApi}");
    assert_eq!(resources["api"]["logicalId"], "SvcHttpApi");
}

#[test]
fn artifacts_yaml_round_trip_through_parser() {
    let artifacts = bundle().to_artifacts(OutputFormat::Yaml).unwrap();
    let openapi = artifacts
        .iter()
        .find(|a| a.path == "openapi.yaml")
        .expect("openapi.yaml");

    // The composed descriptor is itself a valid contract document.
    let reparsed = parse::from_yaml(&openapi.content).unwrap();
    let components = reparsed.components.as_ref().unwrap();
    assert!(components.security_schemes.contains_key("custom_authorizer"));
    assert_eq!(reparsed.operations().count(), 1);
}
