//! Runtime configuration.
//!
//! The only setting is where history lives. Resolution order: explicit
//! path, then the platform data directory (`~/.local/share/qrforge` on
//! Linux), then `./.qrforge`.

use std::path::{Path, PathBuf};

use crate::error::QrForgeError;
use crate::history::FileStore;

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "qrforge";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding persisted history
    pub data_dir: PathBuf,
}

impl Config {
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        Self { data_dir }
    }

    /// Check that `data_dir` is usable (absent is fine, it is created lazily).
    pub fn validate(&self) -> Result<(), QrForgeError> {
        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(QrForgeError::Config(format!(
                "data directory {} exists but is not a directory",
                self.data_dir.display()
            )));
        }
        Ok(())
    }

    pub fn history_store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

pub fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(APP_DIR_NAME),
        None => PathBuf::from(format!(".{}", APP_DIR_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let config = Config::resolve(Some(PathBuf::from("/tmp/qr")));
        assert_eq!(config.data_dir(), Path::new("/tmp/qr"));
    }

    #[test]
    fn test_default_ends_with_app_name() {
        let config = Config::resolve(None);
        let last = config.data_dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(last == "qrforge" || last == ".qrforge");
    }

    #[test]
    fn test_file_in_place_of_dir_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::resolve(Some(file.path().to_path_buf()));
        assert!(matches!(config.validate(), Err(QrForgeError::Config(_))));
    }
}
