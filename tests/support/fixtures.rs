//! Test fixtures: generated identities, key rings and ciphertext.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use sealdir::core::cipher::encrypt_to_writer;
use sealdir::core::keyring::KeyEntity;
use sequoia_openpgp::cert::CertBuilder;
use sequoia_openpgp::serialize::Serialize;
use sequoia_openpgp::Cert;

/// Passphrase protecting every generated secret key.
pub const PASSPHRASE: &str = "correct horse battery staple";

/// Secret file used across the round-trip tests.
pub const SAMPLE_SECRET: &str = "alpha\nbeta\naccountA=xyz\n";

/// A generated certificate with its secret keys.
pub struct Identity {
    pub email: String,
    pub cert: Cert,
}

impl Identity {
    /// Generate a passphrase-protected identity for `email`.
    pub fn generate(email: &str) -> Self {
        let userid = format!("Test <{}>", email);
        let (cert, _) = CertBuilder::general_purpose(None, Some(userid))
            .set_password(Some(PASSPHRASE.into()))
            .generate()
            .expect("failed to generate cert");

        Self {
            email: email.to_string(),
            cert,
        }
    }

    pub fn entity(&self) -> KeyEntity {
        KeyEntity::new(self.cert.clone())
    }
}

/// Write a transferable secret key ring.
pub fn write_private_ring(path: &Path, identities: &[&Identity]) {
    let mut sink = BufWriter::new(File::create(path).expect("failed to create ring"));
    for identity in identities {
        identity
            .cert
            .as_tsk()
            .serialize(&mut sink)
            .expect("failed to serialize secret key");
    }
}

/// Write a public key ring.
pub fn write_public_ring(path: &Path, identities: &[&Identity]) {
    let mut sink = BufWriter::new(File::create(path).expect("failed to create ring"));
    for identity in identities {
        identity
            .cert
            .serialize(&mut sink)
            .expect("failed to serialize public key");
    }
}

/// Armored ciphertext of `plaintext` for `recipients`.
pub fn encrypt_for(plaintext: &[u8], recipients: &[&Identity]) -> Vec<u8> {
    let entities: Vec<KeyEntity> = recipients.iter().map(|r| r.entity()).collect();
    let mut out = Vec::new();
    encrypt_to_writer(&mut &plaintext[..], &entities, &mut out).expect("failed to encrypt");
    out
}
