//! Virtual path validation and normalization.
//!
//! Every check here is purely lexical. Nothing touches the filesystem, so a
//! rejected path never causes a side effect.

use userfs_core::FileSystemError;
use userfs_core::config::FileSystemConfig;
use userfs_core::result::FsResult;

/// Limits applied to every virtual path.
#[derive(Debug, Clone)]
pub struct PathRules {
    /// Maximum number of segments.
    pub max_depth: usize,
    /// Maximum raw length in characters.
    pub max_length: usize,
    /// Reserved segment names.
    pub exclude: Vec<String>,
}

impl Default for PathRules {
    fn default() -> Self {
        Self::from_config(&FileSystemConfig::default())
    }
}

impl PathRules {
    /// Build the rules from the file system configuration.
    pub fn from_config(config: &FileSystemConfig) -> Self {
        Self {
            max_depth: config.max_path_depth,
            max_length: config.max_path_length,
            exclude: config.exclude.clone(),
        }
    }

    /// Validate `raw` and return its segments.
    ///
    /// A leading `/` is optional. Empty and `.` segments are dropped, so the
    /// root is an empty list.
    pub fn segments<'a>(&self, raw: &'a str) -> FsResult<Vec<&'a str>> {
        if raw.chars().count() > self.max_length {
            return Err(FileSystemError::path_max_length(format!(
                "Path length exceeds the maximum of {} characters",
                self.max_length
            )));
        }

        let mut segments = Vec::new();
        for segment in raw.split('/') {
            if segment.is_empty() || segment == "." {
                continue;
            }
            if segment == ".." {
                return Err(FileSystemError::invalid_path(
                    "Parent directory references are not allowed",
                ));
            }
            if !segment.chars().all(is_segment_char) {
                return Err(FileSystemError::invalid_path(format!(
                    "Path segment [{segment}] contains invalid characters"
                )));
            }
            if self.exclude.iter().any(|name| name == segment) {
                return Err(FileSystemError::invalid_path(format!(
                    "Path segment [{segment}] is reserved"
                )));
            }
            segments.push(segment);
        }

        if segments.len() > self.max_depth {
            return Err(FileSystemError::path_max_depth(format!(
                "Path depth exceeds the maximum of {} segments",
                self.max_depth
            )));
        }

        Ok(segments)
    }

    /// Validate `raw` and return its normalized form, e.g. `/a/b`.
    pub fn normalize(&self, raw: &str) -> FsResult<String> {
        let segments = self.segments(raw)?;
        Ok(format!("/{}", segments.join("/")))
    }
}

/// Whether `c` may appear in a path segment.
pub fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}
