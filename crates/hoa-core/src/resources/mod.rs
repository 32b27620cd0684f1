pub mod api;
pub mod bundle;
pub mod compute;
pub mod domain;
pub mod permission;

pub use api::{ApiResource, StageResource};
pub use bundle::{DeploymentBundle, OutputFormat};
pub use compute::ComputeUnit;
pub use domain::DomainResources;
pub use permission::PermissionGrant;
