//! Key unlock capability.

use sequoia_openpgp as openpgp;

use openpgp::crypto::{KeyPair, Password};
use openpgp::packet::key::{SecretParts, UnspecifiedRole};
use openpgp::packet::Key;
use tracing::trace;

use crate::error::{CipherError, Result};

/// Turns a candidate secret key into a usable key pair.
pub trait Unlock {
    /// Decrypt the candidate's secret material if needed.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Locked` if the key cannot be unlocked.
    fn unlock(&self, candidate: &Key<SecretParts, UnspecifiedRole>) -> Result<KeyPair>;
}

/// Unlocks keys with a single passphrase.
///
/// The passphrase is kept in sequoia's `Password`, which stays encrypted
/// in memory and is wiped on drop.
#[derive(Clone)]
pub struct Passphrase {
    password: Password,
}

impl Passphrase {
    pub fn new(password: impl Into<Password>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase(..)")
    }
}

impl Unlock for Passphrase {
    fn unlock(&self, candidate: &Key<SecretParts, UnspecifiedRole>) -> Result<KeyPair> {
        let keyid = candidate.keyid();
        let key = candidate.clone();

        let key = if key.secret().is_encrypted() {
            trace!(%keyid, "decrypting secret key material");
            key.decrypt_secret(&self.password)
                .map_err(|e| locked(&keyid.to_hex(), e))?
        } else {
            key
        };

        key.into_keypair()
            .map_err(|e| locked(&keyid.to_hex(), e).into())
    }
}

fn locked(keyid: &str, e: impl std::fmt::Display) -> CipherError {
    CipherError::Locked {
        keyid: keyid.to_string(),
        reason: e.to_string(),
    }
}
