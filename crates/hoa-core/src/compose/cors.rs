use crate::config::BuildConfig;
use crate::parse::extension::CorsConfig;
use crate::parse::spec::ApiDocument;

/// CORS to apply: explicit config first, then the allow-all flag.
pub fn resolve_cors(config: &BuildConfig) -> Option<CorsConfig> {
    if let Some(ref cors) = config.cors_config {
        Some(cors.clone())
    } else if config.cors_allow_all_origins {
        Some(CorsConfig::allow_all_origins())
    } else {
        None
    }
}

/// Set the document-level CORS extension. Leaves the document alone when
/// neither option is configured.
pub fn annotate_cors(mut document: ApiDocument, config: &BuildConfig) -> ApiDocument {
    if let Some(cors) = resolve_cors(config) {
        document.cors = Some(cors);
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_configured() {
        let config = BuildConfig::new("svc", vec![]);
        assert_eq!(resolve_cors(&config), None);
        let doc = annotate_cors(ApiDocument::default(), &config);
        assert!(doc.cors.is_none());
    }

    #[test]
    fn test_allow_all_origins() {
        let config = BuildConfig {
            cors_allow_all_origins: true,
            ..BuildConfig::new("svc", vec![])
        };
        let doc = annotate_cors(ApiDocument::default(), &config);
        let value = serde_json::to_value(doc.cors.unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "allowHeaders": ["*"],
                "allowMethods": ["*"],
                "allowOrigins": ["*"]
            })
        );
    }

    #[test]
    fn test_explicit_config_wins() {
        let explicit = CorsConfig {
            allow_credentials: Some(true),
            allow_origins: Some(vec!["https://example.com".to_string()]),
            max_age: Some(600),
            ..CorsConfig::default()
        };
        let config = BuildConfig {
            cors_config: Some(explicit.clone()),
            cors_allow_all_origins: true,
            ..BuildConfig::new("svc", vec![])
        };
        assert_eq!(resolve_cors(&config), Some(explicit));
    }

    #[test]
    fn test_explicit_empty_lists_kept() {
        let explicit: CorsConfig =
            serde_json::from_value(serde_json::json!({"allowHeaders": [], "allowOrigins": ["*"]}))
                .unwrap();
        let config = BuildConfig {
            cors_config: Some(explicit),
            ..BuildConfig::new("svc", vec![])
        };
        let doc = annotate_cors(ApiDocument::default(), &config);
        let value = serde_json::to_value(doc.cors.unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"allowHeaders": [], "allowOrigins": ["*"]})
        );
    }
}
