//! OpenPGP encryption and decryption.
//!
//! The primitives come from `sequoia-openpgp`; this module only wires key
//! material, recipients and files together.
//!
//! ## Unlocking
//!
//! Decryption never touches a passphrase directly. The decrypt engine asks
//! an [`Unlock`] implementation for a usable key pair, once per candidate
//! key addressed by the message. [`Passphrase`] is the implementation used
//! by the binary; tests can inject their own.

use sequoia_openpgp as openpgp;

use openpgp::policy::StandardPolicy;

mod decrypt;
mod encrypt;
mod unlock;

pub use decrypt::{decrypt_file, decrypt_reader, PlaintextStream};
pub use encrypt::{encrypt_file, encrypt_to_writer};
pub use unlock::{Passphrase, Unlock};

/// Policy used for every key validity decision.
pub(crate) const POLICY: &StandardPolicy = &StandardPolicy::new();
