use crate::common::{DomainError, DomainResult};
use crate::domains::containers::{Container, ContainerSnapshot, ContainerSource};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "GIRO_DATA_DIR";

/// Reads the latest container snapshot from a JSON array on disk, the format
/// written by the sensor receiver.
pub struct FilesystemContainerSource {
    base: PathBuf,
    file_name: String,
}

impl FilesystemContainerSource {
    pub fn new(base: Option<PathBuf>, file_name: impl Into<String>) -> Self {
        let base = base.unwrap_or_else(|| {
            if let Ok(v) = env::var(DATA_DIR_ENV) {
                PathBuf::from(v)
            } else {
                PathBuf::from("resources")
            }
        });
        Self {
            base,
            file_name: file_name.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.base.join(&self.file_name)
    }

    /// Write a snapshot in the same format it is read in (creates directories as needed).
    pub fn save_snapshot(&self, containers: &[Container]) -> DomainResult<()> {
        if !self.base.exists() {
            fs::create_dir_all(&self.base).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        }
        let json = serde_json::to_string_pretty(containers)?;
        fs::write(self.path(), json).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        Ok(())
    }
}

pub fn parse_snapshot(json: &str) -> DomainResult<ContainerSnapshot> {
    let containers: Vec<Container> = serde_json::from_str(json)?;
    ContainerSnapshot::new(containers)
}

fn read(path: &Path) -> DomainResult<String> {
    fs::read_to_string(path)
        .map_err(|e| DomainError::InfrastructureError(format!("{}: {}", path.display(), e)))
}

impl ContainerSource for FilesystemContainerSource {
    fn load_snapshot(&self) -> DomainResult<ContainerSnapshot> {
        parse_snapshot(&read(&self.path())?)
    }
}
