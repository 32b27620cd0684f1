use crate::config::{CustomDomain, Deployment};
use crate::error::ComposeError;
use crate::resources::domain::{
    AliasRecord, AliasTarget, ApiMappingResource, CertificateImport, DomainNameResource,
    DomainResources, EndpointType, HostedZoneLookup, RecordType,
};
use crate::resources::{ApiResource, StageResource};

/// Bind the API's default stage to a custom domain.
///
/// The certificate must already exist and live in the deployment region; the
/// domain must sit inside the hosted zone its alias records are written to.
pub fn bind_custom_domain(
    domain: &CustomDomain,
    api: &ApiResource,
    stage: &StageResource,
    deployment: &Deployment,
) -> Result<DomainResources, ComposeError> {
    check_certificate(&domain.certificate_arn, deployment)?;
    check_zone(&domain.custom_domain_name, &domain.zone_name)?;

    let certificate = CertificateImport {
        logical_id: "Certificate".to_string(),
        certificate_arn: domain.certificate_arn.clone(),
    };

    let domain_name = DomainNameResource {
        logical_id: "DomainName".to_string(),
        domain_name: domain.custom_domain_name.clone(),
        certificate_arn: certificate.certificate_arn.clone(),
        endpoint_type: EndpointType::Regional,
    };

    let hosted_zone = HostedZoneLookup {
        logical_id: "HostedZone".to_string(),
        zone_name: domain.zone_name.clone(),
    };

    let target = AliasTarget {
        dns_name: domain_name.regional_domain_name(),
        hosted_zone_id: domain_name.regional_hosted_zone_id(),
    };
    let alias = |logical_id: &str, record_type: RecordType| AliasRecord {
        logical_id: logical_id.to_string(),
        record_type,
        record_name: domain.custom_domain_name.clone(),
        hosted_zone: hosted_zone.logical_id.clone(),
        target: target.clone(),
    };
    let a_record = alias("CustomDomainARecord", RecordType::A);
    let aaaa_record = alias("CustomDomainAAAARecord", RecordType::Aaaa);

    // The mapping resolves the API, stage and domain ids, and is only useful
    // once the records route traffic to it.
    let api_mapping = ApiMappingResource {
        logical_id: "ApiMapping".to_string(),
        api_id: api.reference(),
        domain_name: domain.custom_domain_name.clone(),
        stage: stage.stage_name.clone(),
        depends_on: vec![
            api.logical_id.clone(),
            stage.logical_id.clone(),
            domain_name.logical_id.clone(),
            a_record.logical_id.clone(),
            aaaa_record.logical_id.clone(),
        ],
    };

    log::info!(
        "bound {} to stage {} via zone {}",
        domain.custom_domain_name,
        stage.stage_name,
        domain.zone_name
    );

    Ok(DomainResources {
        certificate,
        domain_name,
        hosted_zone,
        a_record,
        aaaa_record,
        api_mapping,
    })
}

/// `arn:{partition}:acm:{region}:{account}:certificate/{id}`
fn check_certificate(arn: &str, deployment: &Deployment) -> Result<(), ComposeError> {
    let parts: Vec<&str> = arn.splitn(6, ':').collect();
    let [prefix, _partition, service, region, _account, resource] = parts[..] else {
        return Err(ComposeError::InvalidCertificateArn(arn.to_string()));
    };
    if prefix != "arn" || service != "acm" || !resource.starts_with("certificate/") {
        return Err(ComposeError::InvalidCertificateArn(arn.to_string()));
    }

    // An unresolved region token cannot be checked until provisioning.
    let expected = deployment.region.as_str();
    if !expected.starts_with("${") && region != expected {
        return Err(ComposeError::CertificateRegion {
            arn: arn.to_string(),
            found: region.to_string(),
            expected: expected.to_string(),
        });
    }
    Ok(())
}

fn check_zone(domain: &str, zone: &str) -> Result<(), ComposeError> {
    let domain_norm = domain.trim_end_matches('.').to_ascii_lowercase();
    let zone_norm = zone.trim_end_matches('.').to_ascii_lowercase();

    let inside = domain_norm == zone_norm || domain_norm.ends_with(&format!(".{zone_norm}"));
    if !inside {
        return Err(ComposeError::DomainOutsideZone {
            domain: domain.to_string(),
            zone: zone.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;

    const CERT: &str = "arn:aws:acm:eu-west-1:123456789012:certificate/0a1b2c";

    fn fixtures() -> (ApiResource, StageResource, Deployment) {
        let api = ApiResource::from_config(&BuildConfig::new("svc", vec![]));
        let stage = StageResource::default_stage(&api);
        let deployment = Deployment {
            region: "eu-west-1".to_string(),
            ..Deployment::default()
        };
        (api, stage, deployment)
    }

    fn custom_domain(name: &str, cert: &str, zone: &str) -> CustomDomain {
        CustomDomain {
            custom_domain_name: name.to_string(),
            certificate_arn: cert.to_string(),
            zone_name: zone.to_string(),
        }
    }

    #[test]
    fn test_mapping_depends_on_everything_it_references() {
        let (api, stage, deployment) = fixtures();
        let domain = custom_domain("api.example.com", CERT, "example.com");
        let resources = bind_custom_domain(&domain, &api, &stage, &deployment).unwrap();

        let deps = &resources.api_mapping.depends_on;
        for id in [
            "SvcHttpApi",
            "DefaultStage",
            "DomainName",
            "CustomDomainARecord",
            "CustomDomainAAAARecord",
        ] {
            assert!(deps.iter().any(|d| d == id), "missing dependency on {id}");
        }

        let order = resources.creation_order();
        assert_eq!(order.last(), Some(&"ApiMapping"));
        assert_eq!(resources.api_mapping.stage, "$default");
        assert_eq!(resources.api_mapping.api_id, "${SvcHttpApi}");
    }

    #[test]
    fn test_alias_records_target_regional_endpoint() {
        let (api, stage, deployment) = fixtures();
        let domain = custom_domain("api.example.com", CERT, "example.com.");
        let resources = bind_custom_domain(&domain, &api, &stage, &deployment).unwrap();

        assert_eq!(resources.a_record.record_type, RecordType::A);
        assert_eq!(resources.aaaa_record.record_type, RecordType::Aaaa);
        assert_eq!(resources.a_record.target, resources.aaaa_record.target);
        assert_eq!(
            resources.a_record.target.dns_name,
            "${DomainName.RegionalDomainName}"
        );
        assert_eq!(resources.a_record.hosted_zone, "HostedZone");
    }

    #[test]
    fn test_certificate_in_other_region_rejected() {
        let (api, stage, deployment) = fixtures();
        let domain = custom_domain(
            "api.example.com",
            "arn:aws:acm:us-east-1:123456789012:certificate/0a1b2c",
            "example.com",
        );
        let err = bind_custom_domain(&domain, &api, &stage, &deployment).unwrap_err();
        assert!(matches!(err, ComposeError::CertificateRegion { ref found, .. } if found == "us-east-1"));
    }

    #[test]
    fn test_malformed_certificate_rejected() {
        let (api, stage, deployment) = fixtures();
        for cert in ["not-an-arn", "arn:aws:iam::123:role/x", "arn:aws:acm:eu-west-1:1:key/x"] {
            let domain = custom_domain("api.example.com", cert, "example.com");
            let err = bind_custom_domain(&domain, &api, &stage, &deployment).unwrap_err();
            assert!(matches!(err, ComposeError::InvalidCertificateArn(_)), "{cert}");
        }
    }

    #[test]
    fn test_domain_outside_zone_rejected() {
        let (api, stage, deployment) = fixtures();
        let domain = custom_domain("api.example.org", CERT, "example.com");
        let err = bind_custom_domain(&domain, &api, &stage, &deployment).unwrap_err();
        assert!(matches!(err, ComposeError::DomainOutsideZone { .. }));

        // Suffix match must fall on a label boundary.
        let domain = custom_domain("api.badexample.com", CERT, "example.com");
        assert!(bind_custom_domain(&domain, &api, &stage, &deployment).is_err());
    }

    #[test]
    fn test_region_token_skips_region_check() {
        let (api, stage, _) = fixtures();
        let domain = custom_domain(
            "api.example.com",
            "arn:aws:acm:ap-south-1:123456789012:certificate/0a1b2c",
            "example.com",
        );
        assert!(bind_custom_domain(&domain, &api, &stage, &Deployment::default()).is_ok());
    }
}
