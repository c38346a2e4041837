// Public directory discovery
// Probes the configured candidates in order and picks the first directory that exists

use std::path::{Path, PathBuf};

use super::ConfigError;

/// Find the public directory
///
/// Relative candidates are resolved against `base` (normally the working
/// directory). Absolute candidates are used as-is.
pub fn find_public_dir(candidates: &[String], base: &Path) -> Result<PathBuf, ConfigError> {
    let mut probed: Vec<PathBuf> = candidates.iter().map(|c| base.join(c)).collect();

    match probed.iter().position(|dir| dir.is_dir()) {
        Some(index) => Ok(probed.swap_remove(index)),
        None => Err(ConfigError::PublicDirNotFound(probed)),
    }
}
