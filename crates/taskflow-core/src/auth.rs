//! Credential validation and password digest.
//!
//! The client hashes the password to SHA-256 hex and sends the hex digest
//! as the credential; the server stores and compares the digest verbatim.
//! Known-weak scheme (the digest itself becomes the password), documented
//! here rather than hardened.

use sha2::{Digest, Sha256};

use crate::error::ValidationError;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 3;

/// Pre-submission username rules: present, no spaces.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    if username.contains(char::is_whitespace) {
        return Err(ValidationError::UsernameWhitespace);
    }
    Ok(())
}

/// Pre-submission password rules: present, at least [`MIN_PASSWORD_LEN`]
/// characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// SHA-256 of the password, lowercase hex. This is the `password_hash`
/// value on the wire.
pub fn password_hash_hex(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
