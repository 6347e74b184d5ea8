//! Command-line interface.

pub mod output;
pub mod prompt;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::core::config::Settings;
use crate::core::context::SecretContext;
use crate::core::search::compile_pattern;
use crate::core::walk::{decrypt_tree, encrypt_tree, search_tree};
use crate::error::Result;

/// Sealdir - search, decrypt and re-encrypt a tree of OpenPGP secrets.
#[derive(Parser, Debug)]
#[command(
    name = "sealdir",
    about = "Search, decrypt and re-encrypt a tree of OpenPGP secrets",
    version,
    after_help = "Secrets live in <DIR>/files/*.gpg; recipients in <DIR>/access-list.conf."
)]
pub struct Cli {
    /// Directory root of the secret tree
    #[arg(short = 's', long = "root", value_name = "DIR")]
    pub root: PathBuf,

    /// Print only lines matching this regex (default: print everything)
    #[arg(short, long, value_name = "REGEX")]
    pub grep: Option<String>,

    /// Decrypt files/*.gpg to <DIR>/*.txt
    #[arg(short, long, conflicts_with_all = ["encrypt", "grep"])]
    pub decrypt: bool,

    /// Encrypt <DIR>/*.txt to files/*.gpg for the access list
    #[arg(short, long, conflicts_with = "grep")]
    pub encrypt: bool,

    /// Decrypt only with the private key of this email
    #[arg(short, long, value_name = "EMAIL")]
    pub recipient: Option<String>,

    /// Private key ring (default: ~/.gnupg/secring.gpg)
    #[arg(long, value_name = "PATH")]
    pub secret_ring: Option<PathBuf>,

    /// Public key ring (default: ~/.gnupg/pubring.gpg)
    #[arg(long, value_name = "PATH")]
    pub public_ring: Option<PathBuf>,

    /// Config file (default: <config dir>/sealdir/config.toml)
    #[arg(short, long, value_name = "PATH", env = "SEALDIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a run does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print plaintext, or matching lines when a pattern is set
    Search(Option<String>),
    /// Write plaintext next to the root
    Decrypt,
    /// Encrypt plaintext into files/
    Encrypt,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.decrypt {
            Mode::Decrypt
        } else if self.encrypt {
            Mode::Encrypt
        } else {
            Mode::Search(self.grep.clone())
        }
    }

    /// Config file settings with the ring flags applied on top.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file is unreadable or invalid.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(path) = &self.secret_ring {
            settings.keyring.secret = path.clone();
        }
        if let Some(path) = &self.public_ring {
            settings.keyring.public = path.clone();
        }
        Ok(settings)
    }
}

/// Run the requested mode.
///
/// # Errors
///
/// Returns the first error; every error is fatal.
pub fn execute(cli: Cli) -> Result<()> {
    let mode = cli.mode();
    let settings = cli.settings()?;
    debug!(?mode, root = %cli.root.display(), "starting");

    let mut ctx = SecretContext::new(settings, cli.root).with_recipient(cli.recipient);

    match mode {
        Mode::Search(pattern) => {
            let regex = compile_pattern(pattern.as_deref())?;
            ctx.load_private_ring()?;
            ctx.set_passphrase(prompt::passphrase()?);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            search_tree(&ctx, regex.as_ref(), &mut out)?;
        }
        Mode::Decrypt => {
            ctx.load_private_ring()?;
            ctx.set_passphrase(prompt::passphrase()?);

            let summary = decrypt_tree(&ctx)?;
            output::success(&format!(
                "decrypted {} into {}",
                output::count(summary.processed, "file"),
                output::path(&ctx.root().display().to_string())
            ));
        }
        Mode::Encrypt => {
            ctx.load_public_ring()?;

            let summary = encrypt_tree(&ctx)?;
            output::success(&format!(
                "encrypted {} into {}",
                output::count(summary.processed, "file"),
                output::path(&ctx.layout().files_dir(ctx.root()).display().to_string())
            ));
        }
    }

    Ok(())
}
