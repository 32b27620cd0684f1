use std::fs;
use std::io;
use std::path::PathBuf;

use hoa_core::Provisioner;
use hoa_core::resources::{DeploymentBundle, OutputFormat};

/// Hands a bundle to the provisioning layer by writing its artifacts to a
/// directory the deployment tooling picks up.
pub struct ArtifactWriter {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

impl Provisioner for ArtifactWriter {
    type Error = io::Error;

    fn provision(&self, bundle: &DeploymentBundle) -> Result<(), Self::Error> {
        let artifacts = bundle.to_artifacts(self.format).map_err(io::Error::other)?;

        fs::create_dir_all(&self.output_dir)?;
        for artifact in &artifacts {
            let path = self.output_dir.join(&artifact.path);
            fs::write(&path, &artifact.content)?;
            eprintln!("  wrote {}", path.display());
        }
        log::info!(
            "wrote {} artifacts to {}",
            artifacts.len(),
            self.output_dir.display()
        );
        Ok(())
    }
}
