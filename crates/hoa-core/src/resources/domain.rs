use serde::Serialize;

/// An existing regional certificate, imported by ARN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateImport {
    pub logical_id: String,
    pub certificate_arn: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndpointType {
    Regional,
}

/// Custom domain name bound to the certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainNameResource {
    pub logical_id: String,
    pub domain_name: String,
    pub certificate_arn: String,
    pub endpoint_type: EndpointType,
}

impl DomainNameResource {
    /// Token for the regional target DNS name, resolved at provisioning.
    pub fn regional_domain_name(&self) -> String {
        format!("${{{}.RegionalDomainName}}", self.logical_id)
    }

    pub fn regional_hosted_zone_id(&self) -> String {
        format!("${{{}.RegionalHostedZoneId}}", self.logical_id)
    }
}

/// Hosted zone resolved by name at provisioning time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZoneLookup {
    pub logical_id: String,
    pub zone_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordType {
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasTarget {
    pub dns_name: String,
    pub hosted_zone_id: String,
}

/// Alias record pointing the custom domain at the regional endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasRecord {
    pub logical_id: String,
    pub record_type: RecordType,
    pub record_name: String,
    pub hosted_zone: String,
    pub target: AliasTarget,
}

/// Maps the API's stage onto the custom domain. Must be created after every
/// resource listed in `depends_on`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMappingResource {
    pub logical_id: String,
    pub api_id: String,
    pub domain_name: String,
    pub stage: String,
    pub depends_on: Vec<String>,
}

/// Everything needed to serve the API from a custom domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResources {
    pub certificate: CertificateImport,
    pub domain_name: DomainNameResource,
    pub hosted_zone: HostedZoneLookup,
    pub a_record: AliasRecord,
    pub aaaa_record: AliasRecord,
    pub api_mapping: ApiMappingResource,
}

impl DomainResources {
    /// Logical ids in an order that satisfies every dependency.
    pub fn creation_order(&self) -> Vec<&str> {
        vec![
            self.certificate.logical_id.as_str(),
            self.hosted_zone.logical_id.as_str(),
            self.domain_name.logical_id.as_str(),
            self.a_record.logical_id.as_str(),
            self.aaaa_record.logical_id.as_str(),
            self.api_mapping.logical_id.as_str(),
        ]
    }
}
