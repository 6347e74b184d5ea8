//! Constants used throughout sealdir.
//!
//! Centralizes default paths and the directory layout convention.

/// Default private key ring (`~/.gnupg/secring.gpg`).
pub const DEFAULT_SECRET_RING: &str = "~/.gnupg/secring.gpg";

/// Default public key ring (`~/.gnupg/pubring.gpg`).
pub const DEFAULT_PUBLIC_RING: &str = "~/.gnupg/pubring.gpg";

/// Subdirectory of the root holding encrypted secrets.
pub const FILES_DIR: &str = "files";

/// Per-project recipient list, relative to the root.
pub const ACCESS_LIST_FILE: &str = "access-list.conf";

/// Suffix marking encrypted files.
pub const ENCRYPTED_SUFFIX: &str = "gpg";

/// Suffix marking plaintext files.
pub const PLAINTEXT_SUFFIX: &str = "txt";

/// Config file location relative to the user config directory.
pub const CONFIG_FILE: &str = "sealdir/config.toml";

/// Environment variable consulted before prompting for a passphrase.
pub const PASSPHRASE_ENV: &str = "SEALDIR_PASSPHRASE";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SEALDIR_LOG";

/// Prompt shown when asking for the key ring passphrase.
pub const PASSPHRASE_PROMPT: &str = "password";

/// Comment marker in the access list.
pub const COMMENT_PREFIX: char = '#';
