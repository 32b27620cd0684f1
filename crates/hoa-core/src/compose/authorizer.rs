use crate::config::{BuildConfig, Deployment};
use crate::parse::extension::{AuthorizerExtension, AuthorizerType, PayloadFormatVersion};
use crate::parse::security::{ApiKeyLocation, AuthorizerScheme, SecurityScheme, SecuritySchemeType};
use crate::parse::spec::ApiDocument;
use crate::resources::permission::{PermissionGrant, execute_api_arn};

/// Security scheme key every guarded operation references.
pub const AUTHORIZER_SCHEME_KEY: &str = "custom_authorizer";
pub const AUTHORIZER_PERMISSION_LOGICAL_ID: &str = "AuthorizerPermission";
pub const AUTHORIZER_HEADER: &str = "Authorization";
pub const IDENTITY_SOURCE: &str = "$request.header.Authorization";
pub const AUTHORIZER_RESULT_TTL_SECONDS: u32 = 300;

/// Register the external authorizer as a security scheme and grant the proxy
/// layer permission to invoke it. A no-op without an authorizer reference.
pub fn wire_authorizer(
    mut document: ApiDocument,
    config: &BuildConfig,
) -> (ApiDocument, Option<PermissionGrant>) {
    let Some(ref authorizer_arn) = config.custom_authorizer_reference else {
        return (document, None);
    };

    let scheme = authorizer_scheme(authorizer_arn, &config.deployment);
    document
        .components_mut()
        .security_schemes
        .insert(AUTHORIZER_SCHEME_KEY.to_string(), SecurityScheme::Authorizer(scheme));

    let grant = PermissionGrant::invoke(
        AUTHORIZER_PERMISSION_LOGICAL_ID,
        authorizer_arn.clone(),
        execute_api_arn(&config.deployment, &config.api_logical_id(), "*/*/*"),
    );

    log::debug!("wired authorizer {authorizer_arn}");
    (document, Some(grant))
}

/// Header-carried request authorizer invoking `authorizer_arn`.
pub fn authorizer_scheme(authorizer_arn: &str, deployment: &Deployment) -> AuthorizerScheme {
    AuthorizerScheme {
        scheme_type: SecuritySchemeType::ApiKey,
        name: AUTHORIZER_HEADER.to_string(),
        location: ApiKeyLocation::Header,
        authorizer: AuthorizerExtension {
            authorizer_type: AuthorizerType::Request,
            identity_source: IDENTITY_SOURCE.to_string(),
            authorizer_uri: authorizer_uri(authorizer_arn, deployment),
            authorizer_payload_format_version: PayloadFormatVersion::V2,
            authorizer_result_ttl_in_seconds: AUTHORIZER_RESULT_TTL_SECONDS,
        },
    }
}

fn authorizer_uri(authorizer_arn: &str, deployment: &Deployment) -> String {
    format!(
        "arn:{}:apigateway:{}:lambda:path/2015-03-31/functions/{}/invocations",
        deployment.partition, deployment.region, authorizer_arn
    )
}
