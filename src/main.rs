//! Sealdir - a directory-scoped OpenPGP secret store.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sealdir::cli::output;
use sealdir::cli::{execute, Cli};
use sealdir::core::constants::LOG_ENV;
use sealdir::error::{CipherError, Error, KeyRingError, RecipientError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sealdir=debug")
        } else {
            EnvFilter::new("sealdir=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::KeyRing(KeyRingError::Read { .. }) => {
                Some("pass --secret-ring / --public-ring or set them in config.toml")
            }
            Error::Cipher(CipherError::DecryptionFailed(_)) => {
                Some("check the passphrase, or restrict keys with --recipient")
            }
            Error::Recipient(RecipientError::Unknown(_)) => {
                Some("import the recipient's public key into the public ring")
            }
            Error::Regex(_) => Some("the -g pattern uses Rust regex syntax"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
