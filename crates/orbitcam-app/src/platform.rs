//! OS directory resolution.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Application directory name under the OS base directories.
pub const APP_NAME: &str = "orbitcam";

/// Errors from resolving or creating platform directories.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where `config.ron` and log files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the debug-build log file.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolves the OS-specific directories without creating them.
    ///
    /// Logs go under the OS data directory when one exists, otherwise next
    /// to the config.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_dir = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);
        let log_dir = dirs::data_local_dir()
            .map(|d| d.join(APP_NAME))
            .unwrap_or_else(|| config_dir.clone())
            .join("logs");
        Ok(Self {
            config_dir,
            log_dir,
        })
    }

    /// Directories rooted under `root`, for tests and `--config`.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }

    /// Creates every directory on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if a directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_paths_end_with_app_name() {
        // Headless CI may lack a config dir; only check when resolution works.
        if let Ok(dirs) = PlatformDirs::resolve() {
            assert!(dirs.config_dir.is_absolute());
            assert!(dirs.config_dir.ends_with(APP_NAME));
            assert!(dirs.log_dir.ends_with("logs"));
        }
    }

    #[test]
    fn test_resolve_with_root() {
        let root = Path::new("some").join("root");
        let dirs = PlatformDirs::resolve_with_root(&root);
        assert_eq!(dirs.config_dir, root);
        assert_eq!(dirs.log_dir, root.join("logs"));
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(&tmp.path().join("orbitcam"));
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
        // Idempotent.
        dirs.create_dirs().unwrap();
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PlatformError::NoConfigDir.to_string(),
            "could not determine OS configuration directory"
        );
        let io = PlatformError::from(io::Error::other("disk gone"));
        assert!(io.to_string().contains("disk gone"));
    }
}
