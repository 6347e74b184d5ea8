//! Run-scoped secret context.
//!
//! Created once per run and passed by reference into every operation.
//! Loading steps fill in the key rings; the passphrase is attached once.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::cipher::Passphrase;
use crate::core::config::Settings;
use crate::core::keyring::{KeyEntity, KeyRing};
use crate::core::layout::Layout;
use crate::error::{CipherError, KeyRingError, RecipientError, Result};

/// Loaded key material and the tree being operated on.
#[derive(Debug)]
pub struct SecretContext {
    settings: Settings,
    root: PathBuf,
    private_ring: Option<KeyRing>,
    public_ring: Option<KeyRing>,
    passphrase: Option<Passphrase>,
    recipient: Option<String>,
}

impl SecretContext {
    pub fn new(settings: Settings, root: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            root: root.into(),
            private_ring: None,
            public_ring: None,
            passphrase: None,
            recipient: None,
        }
    }

    /// Restrict decryption to the private entity with this email.
    pub fn with_recipient(mut self, recipient: Option<String>) -> Self {
        self.recipient = recipient;
        self
    }

    /// Load the private ring from the configured path.
    ///
    /// # Errors
    ///
    /// See [`KeyRing::load_private`].
    pub fn load_private_ring(&mut self) -> Result<&KeyRing> {
        let ring = KeyRing::load_private(&self.settings.keyring.secret)?;
        Ok(&*self.private_ring.insert(ring))
    }

    /// Load the public ring from the configured path.
    ///
    /// # Errors
    ///
    /// See [`KeyRing::load_public`].
    pub fn load_public_ring(&mut self) -> Result<&KeyRing> {
        let ring = KeyRing::load_public(&self.settings.keyring.public)?;
        Ok(&*self.public_ring.insert(ring))
    }

    pub fn set_private_ring(&mut self, ring: KeyRing) {
        self.private_ring = Some(ring);
    }

    pub fn set_public_ring(&mut self, ring: KeyRing) {
        self.public_ring = Some(ring);
    }

    pub fn set_passphrase(&mut self, passphrase: Passphrase) {
        self.passphrase = Some(passphrase);
    }

    /// The unlock capability backed by the run's passphrase.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::NoPassphrase` if none was set.
    pub fn passphrase(&self) -> Result<&Passphrase> {
        self.passphrase
            .as_ref()
            .ok_or_else(|| CipherError::NoPassphrase.into())
    }

    /// # Errors
    ///
    /// Returns `KeyRingError::NotLoaded` before [`Self::load_private_ring`].
    pub fn private_ring(&self) -> Result<&KeyRing> {
        self.private_ring
            .as_ref()
            .ok_or_else(|| KeyRingError::NotLoaded("private").into())
    }

    /// # Errors
    ///
    /// Returns `KeyRingError::NotLoaded` before [`Self::load_public_ring`].
    pub fn public_ring(&self) -> Result<&KeyRing> {
        self.public_ring
            .as_ref()
            .ok_or_else(|| KeyRingError::NotLoaded("public").into())
    }

    /// Entities tried when decrypting: the whole private ring, or only the
    /// restricted recipient's entity.
    ///
    /// # Errors
    ///
    /// Returns `RecipientError::Invalid` if the restricted recipient is not
    /// in the private ring.
    pub fn decryption_candidates(&self) -> Result<&[KeyEntity]> {
        let ring = self.private_ring()?;
        match self.recipient() {
            None => Ok(ring.entities()),
            Some(email) => {
                let entity = ring
                    .find_by_email(email)
                    .ok_or_else(|| RecipientError::Invalid(email.to_string()))?;
                debug!(recipient = %email, fingerprint = %entity.fingerprint(), "decryption restricted");
                Ok(std::slice::from_ref(entity))
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &Layout {
        &self.settings.layout
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }
}
