use std::path::Path;
use vfs::VfsPath;

use crate::VurifError;

pub const VUE_EXTENSION: &str = "vue";

pub fn is_vue_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        == Some(VUE_EXTENSION)
}

pub fn vue_file_name_or_err(path: &str) -> Result<&str, VurifError> {
    if is_vue_file(path) {
        Ok(path)
    } else {
        Err(VurifError::InvalidInput {
            path: path.to_string(),
        })
    }
}

/// Path of `path` relative to `root`, without a leading slash.
pub fn relative_path(root: &VfsPath, path: &VfsPath) -> String {
    let root_str = root.as_str().trim_end_matches('/');
    path.as_str()
        .strip_prefix(root_str)
        .unwrap_or(path.as_str())
        .trim_start_matches('/')
        .to_string()
}

/// Normalize a user supplied relative path so it can be joined onto a
/// `VfsPath`.
pub fn normalize_path(path: &str) -> &str {
    let mut p = path.trim_end_matches('/');
    while let Some(rest) = p.strip_prefix("./") {
        p = rest;
    }
    if p == "." { "" } else { p }
}
