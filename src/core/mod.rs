//! Core library components.
//!
//! The secret-store engine: key rings, recipients, encryption and
//! decryption, and the tree walks that drive them.

pub mod access;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod context;
pub mod keyring;
pub mod layout;
pub mod path;
pub mod search;
pub mod walk;
