use crate::core::ObjectStore;
use crate::utils::error::{CleanerError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Filesystem-backed object store for local runs. Keys are paths relative to
/// `base_path`, so `cleaned/people.csv` lands at `<base_path>/cleaned/people.csv`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl ObjectStore for LocalStorage {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(key);
        match fs::read(&full_path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CleanerError::ObjectNotFoundError {
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn put_object(&self, key: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
