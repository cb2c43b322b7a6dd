//! Cryptographic primitives for foyerweb
//!
//! Three concerns live here: AES-256-GCM encryption of stored sheet
//! fields, Argon2id password hashing, and generation/hashing of
//! invitation codes and session tokens. Nothing in this crate touches
//! the database or the network.

pub mod cipher;
pub mod error;
pub mod password;
pub mod tokens;

pub use cipher::FieldCipher;
pub use error::{CryptoError, CryptoErrorCode, CryptoResult};
pub use password::{hash_password, verify_password};
pub use tokens::{
    generate_invite_code, generate_session_token, hash_invite_code, hash_session_token,
};
