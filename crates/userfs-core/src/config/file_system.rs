//! User file system configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::ByteSize;

/// Settings for the per-user virtual file system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSystemConfig {
    /// Absolute directory under which every user root is created.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Absolute directory used to stage uploads before they are moved in place.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
    /// Per-user quota, as bytes or a `KB`/`MB`/`GB` suffixed string.
    #[serde(default = "default_user_max_space")]
    pub user_max_space: ByteSize,
    /// Maximum number of segments in a virtual path.
    #[serde(default = "default_max_path_depth")]
    pub max_path_depth: usize,
    /// Maximum length of a virtual path in characters.
    #[serde(default = "default_max_path_length")]
    pub max_path_length: usize,
    /// Maximum directory depth listed when browsing.
    #[serde(default = "default_traverse_depth")]
    pub traverse_depth: usize,
    /// Reserved directory names hidden from listings and refused in paths.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Downloads smaller than this report a `Content-Length`.
    #[serde(default = "default_download_length_threshold")]
    pub download_length_threshold: u64,
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            temp_dir: default_temp_dir(),
            user_max_space: default_user_max_space(),
            max_path_depth: default_max_path_depth(),
            max_path_length: default_max_path_length(),
            traverse_depth: default_traverse_depth(),
            exclude: Vec::new(),
            download_length_threshold: default_download_length_threshold(),
        }
    }
}

impl FileSystemConfig {
    /// Build a configuration rooted at `base`, using `base/user` and `base/tmp`.
    pub fn with_base_dir(base: &Path) -> Self {
        Self {
            data_dir: base.join("user"),
            temp_dir: base.join("tmp"),
            ..Self::default()
        }
    }

    /// Check the invariants the file manager relies on.
    pub fn validate(&self) -> AppResult<()> {
        if !self.data_dir.is_absolute() {
            return Err(AppError::configuration(format!(
                "file_system.data_dir must be an absolute path: {}",
                self.data_dir.display()
            )));
        }
        if !self.temp_dir.is_absolute() {
            return Err(AppError::configuration(format!(
                "file_system.temp_dir must be an absolute path: {}",
                self.temp_dir.display()
            )));
        }
        if self.max_path_depth == 0 || self.max_path_length == 0 || self.traverse_depth == 0 {
            return Err(AppError::configuration(
                "file_system path and traversal limits must be positive",
            ));
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("/var/lib/userfs/user")
}

fn default_temp_dir() -> PathBuf {
    PathBuf::from("/var/lib/userfs/tmp")
}

fn default_user_max_space() -> ByteSize {
    ByteSize::mib(20)
}

fn default_max_path_depth() -> usize {
    8
}

fn default_max_path_length() -> usize {
    400
}

fn default_traverse_depth() -> usize {
    8
}

fn default_download_length_threshold() -> u64 {
    1_048_576 // 1 MiB
}
