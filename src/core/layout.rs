//! Directory layout and the encrypted/plaintext suffix pair.
//!
//! ```text
//! <root>/
//! ├── access-list.conf    # one recipient identity per line
//! ├── <name>.txt          # plaintext (encrypt input, decrypt output)
//! └── files/
//!     └── <name>.gpg      # encrypted secrets
//! ```
//!
//! File type is decided by suffix alone, never by content.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Layout convention for a secret tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Subdirectory holding encrypted files
    pub files_dir: String,
    /// Access list file name
    pub access_list: String,
    /// Suffix of encrypted files, without the dot
    pub encrypted_suffix: String,
    /// Suffix of plaintext files, without the dot
    pub plaintext_suffix: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            files_dir: constants::FILES_DIR.to_string(),
            access_list: constants::ACCESS_LIST_FILE.to_string(),
            encrypted_suffix: constants::ENCRYPTED_SUFFIX.to_string(),
            plaintext_suffix: constants::PLAINTEXT_SUFFIX.to_string(),
        }
    }
}

impl Layout {
    /// `<root>/files`
    pub fn files_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.files_dir)
    }

    /// `<root>/access-list.conf`
    pub fn access_list_path(&self, root: &Path) -> PathBuf {
        root.join(&self.access_list)
    }

    /// Whether the path carries the encrypted suffix.
    pub fn is_encrypted(&self, path: &Path) -> bool {
        has_suffix(path, &self.encrypted_suffix)
    }

    /// Whether the path carries the plaintext suffix.
    pub fn is_plaintext(&self, path: &Path) -> bool {
        has_suffix(path, &self.plaintext_suffix)
    }

    /// Where decrypt-root mode writes the plaintext of `encrypted`:
    /// `<root>/<stem>.txt`.
    pub fn plaintext_target(&self, root: &Path, encrypted: &Path) -> PathBuf {
        root.join(with_suffix(encrypted, &self.plaintext_suffix))
    }

    /// Where encrypt-root mode writes the ciphertext of `plaintext`:
    /// `<root>/files/<stem>.gpg`.
    pub fn encrypted_target(&self, root: &Path, plaintext: &Path) -> PathBuf {
        self.files_dir(root)
            .join(with_suffix(plaintext, &self.encrypted_suffix))
    }

    /// Check the layout is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for empty or dotted suffixes,
    /// identical suffixes, or empty/absolute directory names.
    pub fn validate(&self) -> Result<()> {
        for (field, suffix) in [
            ("encrypted_suffix", &self.encrypted_suffix),
            ("plaintext_suffix", &self.plaintext_suffix),
        ] {
            if suffix.is_empty() || suffix.contains('.') || suffix.contains('/') {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("'{}' must be a bare suffix such as 'gpg'", suffix),
                }
                .into());
            }
        }

        if self.encrypted_suffix == self.plaintext_suffix {
            return Err(ConfigError::InvalidValue {
                field: "plaintext_suffix",
                reason: "must differ from encrypted_suffix".to_string(),
            }
            .into());
        }

        for (field, name) in [
            ("files_dir", &self.files_dir),
            ("access_list", &self.access_list),
        ] {
            if name.trim().is_empty() || Path::new(name).is_absolute() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("'{}' must be a relative name", name),
                }
                .into());
            }
        }

        Ok(())
    }
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.extension() == Some(OsStr::new(suffix))
}

/// Swap the last suffix of the file name, keeping inner dots (`a.b.gpg` -> `a.b.txt`).
fn with_suffix(path: &Path, suffix: &str) -> OsString {
    let mut name = path
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    name
}
