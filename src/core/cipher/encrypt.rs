//! Encrypt engine.
//!
//! Produces ASCII-armored OpenPGP messages addressed to every usable
//! encryption subkey of each recipient. Files are written through a
//! sibling temporary file and renamed into place once complete.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use sequoia_openpgp as openpgp;

use openpgp::serialize::stream::{Armorer, Encryptor, LiteralWriter, Message};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::POLICY;
use crate::core::keyring::KeyEntity;
use crate::error::{CipherError, Result};

/// Encrypt the file at `plaintext_path` for `recipients` into `dest`.
///
/// Missing parent directories of `dest` are created. On failure `dest`
/// is left as it was.
///
/// # Errors
///
/// Returns `CipherError::EncryptionFailed` for an empty recipient set or a
/// cryptographic failure, `CipherError::NoEncryptionKey` when a recipient
/// has no usable encryption subkey, and `Error::Io` on filesystem errors.
pub fn encrypt_file(plaintext_path: &Path, recipients: &[KeyEntity], dest: &Path) -> Result<()> {
    debug!(
        from = %plaintext_path.display(),
        to = %dest.display(),
        recipients = recipients.len(),
        "encrypting"
    );

    let plaintext = Zeroizing::new(fs::read(plaintext_path)?);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let partial = partial_path(dest);
    if let Err(e) = write_partial(&partial, &plaintext, recipients) {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }

    fs::rename(&partial, dest)?;
    trace!(bytes = plaintext.len(), "encrypted");
    Ok(())
}

fn write_partial(partial: &Path, plaintext: &[u8], recipients: &[KeyEntity]) -> Result<()> {
    let mut sink = BufWriter::new(File::create(partial)?);
    encrypt_to_writer(&mut &plaintext[..], recipients, &mut sink)?;
    let file = sink.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()?;
    Ok(())
}

/// Encrypt everything read from `source` for `recipients`, writing an
/// armored message to `sink`.
///
/// # Errors
///
/// See [`encrypt_file`].
#[allow(deprecated)]
pub fn encrypt_to_writer<W>(
    source: &mut dyn Read,
    recipients: &[KeyEntity],
    sink: W,
) -> Result<()>
where
    W: Write + Send + Sync,
{
    if recipients.is_empty() {
        return Err(CipherError::EncryptionFailed("no recipients".to_string()).into());
    }

    let mut keys = Vec::new();
    for entity in recipients {
        let before = keys.len();
        keys.extend(
            entity
                .cert()
                .keys()
                .with_policy(POLICY, None)
                .supported()
                .alive()
                .revoked(false)
                .for_storage_encryption()
                .for_transport_encryption(),
        );
        if keys.len() == before {
            return Err(CipherError::NoEncryptionKey(entity.label()).into());
        }
    }
    trace!(keys = keys.len(), "recipient subkeys selected");

    let message = Message::new(sink);
    let message = Armorer::new(message).build().map_err(encryption_failed)?;
    let message = Encryptor::for_recipients(message, keys)
        .build()
        .map_err(encryption_failed)?;
    let mut literal = LiteralWriter::new(message)
        .build()
        .map_err(encryption_failed)?;

    io::copy(source, &mut literal)?;
    literal.finalize().map_err(encryption_failed)?;
    Ok(())
}

fn encryption_failed(e: impl std::fmt::Display) -> CipherError {
    CipherError::EncryptionFailed(e.to_string())
}

/// `dir/.name.partial` next to the final destination.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(dest.file_name().unwrap_or_default());
    name.push(".partial");
    dest.with_file_name(name)
}
