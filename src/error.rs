//! Error types.
//!
//! Every failure is fatal to the run; the binary reports the first error
//! and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot resolve {path}: home directory unknown")]
    PathResolution { path: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    KeyRing(#[from] KeyRingError),

    #[error(transparent)]
    Recipient(#[from] RecipientError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("invalid search pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("passphrase prompt failed: {0}")]
    Prompt(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Key ring loading errors.
#[derive(Error, Debug)]
pub enum KeyRingError {
    #[error("failed to read key ring {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed key ring {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("key ring {0} holds no secret keys")]
    NoSecretKeys(PathBuf),

    #[error("{0} key ring not loaded")]
    NotLoaded(&'static str),
}

/// Recipient and access list errors.
#[derive(Error, Debug)]
pub enum RecipientError {
    #[error("unknown recipient: {0} is not in the public key ring")]
    Unknown(String),

    #[error("invalid recipient: {0} is not in the private key ring")]
    Invalid(String),

    #[error("failed to read access list {path}: {source}")]
    AccessListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("access list {0} names no recipients")]
    EmptyAccessList(PathBuf),
}

/// Encryption and decryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("no usable encryption key for {0}")]
    NoEncryptionKey(String),

    #[error("cannot unlock key {keyid}: {reason}")]
    Locked { keyid: String, reason: String },

    #[error("no passphrase available")]
    NoPassphrase,
}

pub type Result<T> = std::result::Result<T, Error>;
