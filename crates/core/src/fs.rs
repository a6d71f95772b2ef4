//! Filesystem checks

use std::path::Path;

use log::debug;

/// Check if a path points at a regular file
pub fn is_file(path: &str) -> bool {
    let is_file = Path::new(path).is_file();
    debug!("{} is_file: {}", path, is_file);
    is_file
}
