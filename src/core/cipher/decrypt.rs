//! Decrypt engine.
//!
//! Opens an (armored) OpenPGP message and yields its plaintext as a
//! forward-only stream. Session keys are unwrapped with the first
//! candidate secret key that the [`Unlock`] capability can open.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sequoia_openpgp as openpgp;

use openpgp::crypto::SessionKey;
use openpgp::packet::key::{SecretParts, UnspecifiedRole};
use openpgp::packet::{Key, PKESK, SKESK};
use openpgp::parse::stream::{
    DecryptionHelper, Decryptor, DecryptorBuilder, MessageStructure, VerificationHelper,
};
use openpgp::parse::Parse;
use openpgp::types::SymmetricAlgorithm;
use openpgp::{Cert, Fingerprint, KeyHandle};
use tracing::{debug, trace};

use super::{Unlock, POLICY};
use crate::core::keyring::KeyEntity;
use crate::error::{CipherError, Error, Result};

/// Plaintext of one decrypted message.
///
/// Single pass: read it to the end once; it cannot seek or rewind.
pub struct PlaintextStream<'u> {
    inner: Decryptor<'static, Helper<'u>>,
}

impl Read for PlaintextStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

/// Decrypt the message stored at `path`.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be opened and
/// `CipherError::DecryptionFailed` if no candidate key opens the message.
pub fn decrypt_file<'u>(
    path: &Path,
    candidates: &[KeyEntity],
    unlocker: &'u dyn Unlock,
) -> Result<PlaintextStream<'u>> {
    debug!(path = %path.display(), "decrypting");
    let file = File::open(path)?;
    decrypt_reader(file, candidates, unlocker)
}

/// Decrypt a message read from `source`. Armor is detected automatically.
///
/// # Errors
///
/// Returns `CipherError::DecryptionFailed` if the message is malformed or
/// no candidate key opens it.
pub fn decrypt_reader<'u, R>(
    source: R,
    candidates: &[KeyEntity],
    unlocker: &'u dyn Unlock,
) -> Result<PlaintextStream<'u>>
where
    R: Read + Send + Sync + 'static,
{
    let helper = Helper {
        candidates: candidates.iter().flat_map(KeyEntity::secret_keys).collect(),
        unlocker,
    };
    trace!(keys = helper.candidates.len(), "candidate secret keys");

    let inner = DecryptorBuilder::from_reader(source)
        .and_then(|builder| builder.with_policy(POLICY, None, helper))
        .map_err(|e| match e.downcast::<Error>() {
            Ok(err) => err,
            Err(e) => Error::from(CipherError::DecryptionFailed(e.to_string())),
        })?;

    Ok(PlaintextStream { inner })
}

struct Helper<'u> {
    candidates: Vec<Key<SecretParts, UnspecifiedRole>>,
    unlocker: &'u dyn Unlock,
}

impl VerificationHelper for Helper<'_> {
    fn get_certs(&mut self, _ids: &[KeyHandle]) -> openpgp::Result<Vec<Cert>> {
        Ok(Vec::new())
    }

    // signatures are not checked; the body is returned unverified
    fn check(&mut self, _structure: MessageStructure) -> openpgp::Result<()> {
        Ok(())
    }
}

impl DecryptionHelper for Helper<'_> {
    fn decrypt<D>(
        &mut self,
        pkesks: &[PKESK],
        _skesks: &[SKESK],
        sym_algo: Option<SymmetricAlgorithm>,
        mut decrypt: D,
    ) -> openpgp::Result<Option<Fingerprint>>
    where
        D: FnMut(SymmetricAlgorithm, &SessionKey) -> bool,
    {
        let mut last_error = None;

        for pkesk in pkesks {
            let recipient = pkesk.recipient();
            for key in &self.candidates {
                if !recipient.is_wildcard() && *recipient != key.keyid() {
                    continue;
                }

                let mut pair = match self.unlocker.unlock(key) {
                    Ok(pair) => pair,
                    Err(e) => {
                        debug!(keyid = %key.keyid(), error = %e, "unlock failed");
                        last_error = Some(e);
                        continue;
                    }
                };

                if let Some((algo, session_key)) = pkesk.decrypt(&mut pair, sym_algo) {
                    if decrypt(algo, &session_key) {
                        trace!(keyid = %key.keyid(), "session key unwrapped");
                        return Ok(Some(key.fingerprint()));
                    }
                }
            }
        }

        let reason = match last_error {
            Some(e) => format!("invalid passphrase or no private key ({})", e),
            None => "no private key for any recipient of this message".to_string(),
        };
        Err(Error::from(CipherError::DecryptionFailed(reason)).into())
    }
}
