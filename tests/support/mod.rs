//! Test support utilities for sealdir integration tests.
//!
//! Each test gets a secret tree root, a home directory and a directory
//! holding freshly generated key rings.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::{Path, PathBuf};

use sealdir::core::config::Settings;
use sealdir::core::context::SecretContext;
use sealdir::core::constants::ACCESS_LIST_FILE;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
pub struct Test {
    /// Secret tree root (`-s`)
    pub root: TempDir,
    /// Temporary home directory
    pub home: TempDir,
    /// Key rings
    pub keys: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create temp root");
        let home = TempDir::new().expect("failed to create temp home");
        let keys = TempDir::new().expect("failed to create temp keys");
        fs::create_dir_all(root.path().join("files")).expect("failed to create files/");

        Self { root, home, keys }
    }

    /// Environment with `private` in the private ring and `public` in the
    /// public ring.
    pub fn with_keys(private: &[&Identity], public: &[&Identity]) -> Self {
        let t = Self::new();
        write_private_ring(&t.secret_ring(), private);
        write_public_ring(&t.public_ring(), public);
        t
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn secret_ring(&self) -> PathBuf {
        self.keys.path().join("secring.gpg")
    }

    pub fn public_ring(&self) -> PathBuf {
        self.keys.path().join("pubring.gpg")
    }

    pub fn write_access_list(&self, contents: &str) {
        fs::write(self.root().join(ACCESS_LIST_FILE), contents).expect("failed to write access list");
    }

    /// Write `<root>/<name>` with `contents`.
    pub fn write_plaintext(&self, name: &str, contents: &str) {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create dir");
        }
        fs::write(path, contents).expect("failed to write plaintext");
    }

    /// Encrypt `contents` to `<root>/files/<name>` for `recipients`.
    pub fn write_encrypted(&self, name: &str, contents: &str, recipients: &[&Identity]) {
        let path = self.root().join("files").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create dir");
        }
        fs::write(path, encrypt_for(contents.as_bytes(), recipients)).expect("failed to write ciphertext");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).expect("failed to read file")
    }

    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.keyring.secret = self.secret_ring();
        settings.keyring.public = self.public_ring();
        settings
    }

    /// Context with both rings loaded, no passphrase attached.
    pub fn context(&self) -> SecretContext {
        let mut ctx = SecretContext::new(self.settings(), self.root());
        ctx.load_private_ring().expect("failed to load private ring");
        ctx.load_public_ring().expect("failed to load public ring");
        ctx
    }
}
