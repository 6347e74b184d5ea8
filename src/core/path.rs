//! Home-relative path expansion.
//!
//! Only `~` and `~/...` are expanded. Other relative paths are returned
//! as given; this is not a canonicalizer.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{Error, Result};

/// Expand a leading `~` to the current user's home directory.
///
/// # Errors
///
/// Returns `Error::PathResolution` if the path is home-relative and the
/// home directory cannot be determined.
pub fn expand_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let rest = match path.strip_prefix("~") {
        Ok(rest) => rest,
        Err(_) => return Ok(path.to_path_buf()),
    };

    let home = dirs::home_dir().ok_or_else(|| Error::PathResolution {
        path: path.display().to_string(),
    })?;

    let expanded = if rest.as_os_str().is_empty() {
        home
    } else {
        home.join(rest)
    };
    trace!(from = %path.display(), to = %expanded.display(), "expanded path");
    Ok(expanded)
}
