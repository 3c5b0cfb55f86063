//! Wire types for the signup and login endpoints.

use serde::Deserialize;

/// Body for `/signup` and `/login`.
///
/// The client hashes the password before sending; the server never sees
/// plaintext. Name-for-name this matches the stored column.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password_hash: Option<String>,
}
