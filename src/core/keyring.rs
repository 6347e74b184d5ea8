//! Key ring loading and identity lookup.
//!
//! A key ring is a file of OpenPGP certificates, binary or ASCII-armored.
//! The private ring holds transferable secret keys and is used for
//! decryption; the public ring resolves encryption recipients.

use std::fs;
use std::path::{Path, PathBuf};

use sequoia_openpgp as openpgp;

use openpgp::cert::CertParser;
use openpgp::packet::key::{SecretParts, UnspecifiedRole};
use openpgp::packet::Key;
use openpgp::parse::Parse;
use openpgp::{Cert, Fingerprint};
use tracing::{debug, trace, warn};

use crate::core::path::expand_path;
use crate::error::{KeyRingError, Result};

/// One certificate and the identities bound to it.
#[derive(Debug, Clone)]
pub struct KeyEntity {
    cert: Cert,
}

impl KeyEntity {
    pub fn new(cert: Cert) -> Self {
        Self { cert }
    }

    /// The underlying certificate.
    pub fn cert(&self) -> &Cert {
        &self.cert
    }

    /// Primary key fingerprint.
    pub fn fingerprint(&self) -> Fingerprint {
        self.cert.fingerprint()
    }

    /// Raw user-id strings, e.g. `Alice <alice@example.com>`.
    pub fn user_ids(&self) -> Vec<String> {
        self.cert
            .userids()
            .map(|ua| String::from_utf8_lossy(ua.userid().value()).into_owned())
            .collect()
    }

    /// Email addresses parsed from the user-ids, in certificate order.
    pub fn emails(&self) -> Vec<String> {
        self.cert
            .userids()
            .filter_map(|ua| ua.userid().email2().ok().flatten().map(str::to_string))
            .collect()
    }

    /// Short name for messages: the first email, else the fingerprint.
    pub fn label(&self) -> String {
        self.emails()
            .into_iter()
            .next()
            .unwrap_or_else(|| self.fingerprint().to_hex())
    }

    /// Exact comparison against each user-id's email address.
    pub fn has_email(&self, email: &str) -> bool {
        self.cert
            .userids()
            .any(|ua| matches!(ua.userid().email2(), Ok(Some(e)) if e == email))
    }

    /// Whether any key in the certificate carries secret material.
    pub fn has_secret(&self) -> bool {
        self.cert.is_tsk()
    }

    /// Every key with secret material, encrypted or not.
    ///
    /// No policy filtering: expired keys must still open old messages.
    pub fn secret_keys(&self) -> Vec<Key<SecretParts, UnspecifiedRole>> {
        self.cert
            .keys()
            .secret()
            .map(|ka| ka.key().clone())
            .collect()
    }
}

impl From<Cert> for KeyEntity {
    fn from(cert: Cert) -> Self {
        Self::new(cert)
    }
}

/// Ordered collection of key entities loaded from one file.
#[derive(Debug, Clone, Default)]
pub struct KeyRing {
    entities: Vec<KeyEntity>,
    path: PathBuf,
}

impl KeyRing {
    /// Build a ring from already-parsed entities.
    pub fn from_entities(entities: Vec<KeyEntity>) -> Self {
        Self {
            entities,
            path: PathBuf::new(),
        }
    }

    /// Load the private key ring.
    ///
    /// # Errors
    ///
    /// Returns `KeyRingError::Read` or `KeyRingError::Parse` as for
    /// [`KeyRing::load_public`], and `KeyRingError::NoSecretKeys` when the
    /// ring holds only public keys.
    pub fn load_private(path: impl AsRef<Path>) -> Result<Self> {
        let ring = Self::load(path.as_ref())?;

        #[cfg(unix)]
        warn_if_readable_by_others(&ring.path);

        if !ring.iter().any(KeyEntity::has_secret) {
            return Err(KeyRingError::NoSecretKeys(ring.path).into());
        }
        Ok(ring)
    }

    /// Load the public key ring.
    ///
    /// # Errors
    ///
    /// Returns `KeyRingError::Read` if the file is missing or unreadable,
    /// `KeyRingError::Parse` if it holds no well-formed certificate, or
    /// `Error::PathResolution` if `~` cannot be expanded.
    pub fn load_public(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path.as_ref())
    }

    fn load(path: &Path) -> Result<Self> {
        let path = expand_path(path)?;
        debug!(path = %path.display(), "loading key ring");

        let bytes = fs::read(&path).map_err(|source| KeyRingError::Read {
            path: path.clone(),
            source,
        })?;

        let parser = CertParser::from_bytes(&bytes).map_err(|e| parse_error(&path, e))?;
        let mut entities = Vec::new();
        for cert in parser {
            let cert = cert.map_err(|e| parse_error(&path, e))?;
            trace!(fingerprint = %cert.fingerprint(), "parsed certificate");
            entities.push(KeyEntity::new(cert));
        }

        if entities.is_empty() {
            return Err(KeyRingError::Parse {
                path,
                reason: "no certificates found".to_string(),
            }
            .into());
        }

        debug!(entities = entities.len(), "key ring loaded");
        Ok(Self { entities, path })
    }

    /// First entity with a user-id whose email equals `email`.
    ///
    /// When several entities share an identity the one listed first in the
    /// ring file wins.
    pub fn find_by_email(&self, email: &str) -> Option<&KeyEntity> {
        self.iter().find(|entity| entity.has_email(email))
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyEntity> {
        self.entities.iter()
    }

    pub fn entities(&self) -> &[KeyEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// File the ring was loaded from (empty for in-memory rings).
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_error(path: &Path, e: impl std::fmt::Display) -> KeyRingError {
    KeyRingError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(unix)]
fn warn_if_readable_by_others(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "insecure key ring permissions"
            );
        }
    }
}
