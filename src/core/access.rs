//! Access list parsing and recipient resolution.
//!
//! `access-list.conf` names one recipient email per line. Blank lines and
//! `#` comments are skipped. Resolution is all-or-nothing: a single
//! unknown identity aborts before anything is encrypted.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::constants;
use crate::core::keyring::{KeyEntity, KeyRing};
use crate::core::layout::Layout;
use crate::error::{Error, RecipientError, Result};

/// Ordered recipient identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessList {
    identities: Vec<String>,
}

impl AccessList {
    /// Parse access list text, trimming each line and dropping blanks and
    /// comments.
    pub fn parse(text: &str) -> Self {
        let identities = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(constants::COMMENT_PREFIX))
            .map(str::to_string)
            .collect();
        Self { identities }
    }

    /// Read and parse an access list file.
    ///
    /// # Errors
    ///
    /// Returns `RecipientError::AccessListRead` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading access list");
        let text = fs::read_to_string(path).map_err(|source| RecipientError::AccessListRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn identities(&self) -> &[String] {
        &self.identities
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Resolve every identity against `ring`, in file order.
    ///
    /// # Errors
    ///
    /// Returns `RecipientError::Unknown` for the first identity with no
    /// matching entity.
    pub fn resolve(&self, ring: &KeyRing) -> Result<Vec<KeyEntity>> {
        self.identities
            .iter()
            .map(|identity| {
                ring.find_by_email(identity)
                    .cloned()
                    .ok_or_else(|| Error::from(RecipientError::Unknown(identity.clone())))
            })
            .collect()
    }
}

/// Load `<root>/access-list.conf` and resolve it against the public ring.
///
/// # Errors
///
/// Returns `RecipientError::AccessListRead` if the list is missing,
/// `RecipientError::EmptyAccessList` if it names nobody, or
/// `RecipientError::Unknown` on the first unresolvable identity.
pub fn resolve_access_list(
    root: &Path,
    layout: &Layout,
    public_ring: &KeyRing,
) -> Result<Vec<KeyEntity>> {
    let path = layout.access_list_path(root);
    let list = AccessList::load(&path)?;
    if list.is_empty() {
        return Err(RecipientError::EmptyAccessList(path).into());
    }

    let recipients = list.resolve(public_ring)?;
    debug!(recipients = recipients.len(), "access list resolved");
    Ok(recipients)
}
