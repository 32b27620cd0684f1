pub mod compose;
pub mod config;
pub mod error;
pub mod parse;
pub mod resources;

/// A rendered artifact with path and content.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: String,
    pub content: String,
}

/// The external provisioning layer that turns a composed bundle into
/// deployed resources.
pub trait Provisioner {
    type Error: std::error::Error;
    fn provision(&self, bundle: &resources::DeploymentBundle) -> Result<(), Self::Error>;
}
