//! Invitation codes and session tokens
//!
//! Invitation codes are short and human-typable; session tokens are
//! long and opaque. Neither is stored in clear: the database holds a
//! SHA-256 digest, so a leaked table cannot be replayed.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use sha2::{Digest, Sha256};

/// Alphabet for invitation codes. No lowercase and no ambiguous
/// punctuation so codes survive being read out loud.
const INVITE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of an invitation code
const INVITE_CODE_LEN: usize = 6;

/// Length of a session token in random bytes (hex doubles this)
const SESSION_TOKEN_BYTES: usize = 32;

/// Generate a random 6-character invitation code (A-Z, 0-9).
pub fn generate_invite_code() -> String {
    let mut bytes = [0u8; INVITE_CODE_LEN];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| INVITE_ALPHABET[*b as usize % INVITE_ALPHABET.len()] as char)
        .collect()
}

/// Hash an invitation code with the configured pepper.
///
/// Codes are uppercased before hashing so lookups are
/// case-insensitive.
pub fn hash_invite_code(code: &str, pepper: &str) -> String {
    let material = format!("{}:{}", code.trim().to_uppercase(), pepper);
    hex_digest(material.as_bytes())
}

/// Generate an opaque session token (64 hex characters).
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    to_hex(&bytes)
}

/// Hash a session token for storage.
pub fn hash_session_token(token: &str) -> String {
    hex_digest(token.as_bytes())
}

fn hex_digest(data: &[u8]) -> String {
    to_hex(&Sha256::digest(data))
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_code_shape() {
        let code = generate_invite_code();
        assert_eq!(code.len(), 6);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_invite_hash_case_insensitive() {
        let a = hash_invite_code("abc123", "pepper");
        let b = hash_invite_code("ABC123", "pepper");
        assert_eq!(a, b);
    }

    #[test]
    fn test_invite_hash_uses_pepper() {
        let a = hash_invite_code("ABC123", "pepper");
        let b = hash_invite_code("ABC123", "other");
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_token_shape() {
        let token = generate_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_session_token());
    }

    #[test]
    fn test_session_token_hash_is_stable() {
        let token = generate_session_token();
        assert_eq!(hash_session_token(&token), hash_session_token(&token));
        assert_ne!(hash_session_token(&token), token);
    }
}
