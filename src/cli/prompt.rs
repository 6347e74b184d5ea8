//! Passphrase acquisition.

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher::Passphrase;
use crate::core::constants::{PASSPHRASE_ENV, PASSPHRASE_PROMPT};
use crate::error::{Error, Result};

/// Read the key passphrase once per run.
///
/// `SEALDIR_PASSPHRASE` wins when set; otherwise the terminal is prompted
/// without echo. An empty passphrase is accepted for unprotected keys.
///
/// # Errors
///
/// Returns `Error::Prompt` if the terminal cannot be read.
pub fn passphrase() -> Result<Passphrase> {
    if let Some(value) = std::env::var_os(PASSPHRASE_ENV) {
        debug!(env = PASSPHRASE_ENV, "passphrase from environment");
        let value = Zeroizing::new(value.to_string_lossy().into_owned());
        return Ok(Passphrase::new(value.as_str()));
    }

    let value = Password::new()
        .with_prompt(PASSPHRASE_PROMPT)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| Error::Prompt(e.to_string()))?;
    let value = Zeroizing::new(value);
    Ok(Passphrase::new(value.as_str()))
}
