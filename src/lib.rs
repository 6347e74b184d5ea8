//! Sealdir - a directory-scoped OpenPGP secret store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── output        # Terminal output helpers
//! │   └── prompt        # Passphrase acquisition
//! └── core/             # Secret-store engine
//!     ├── path          # ~/ expansion
//!     ├── layout        # files/ layout and .gpg/.txt suffix pair
//!     ├── config        # config.toml settings
//!     ├── keyring       # Key ring loading and identity lookup
//!     ├── access        # access-list.conf resolution
//!     ├── context       # Run-scoped secret context
//!     ├── cipher/       # OpenPGP encrypt/decrypt engines
//!     │   └── unlock    # Key unlock capability
//!     ├── search        # Line search over plaintext
//!     └── walk          # Search, decrypt-root and encrypt-root walks
//! ```
//!
//! # Layout
//!
//! ```text
//! <root>/access-list.conf   recipients, one email per line
//! <root>/*.txt              plaintext
//! <root>/files/*.gpg        encrypted secrets
//! ```

pub mod cli;
pub mod core;
pub mod error;
