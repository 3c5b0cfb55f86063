//! Request and response types for the HTTP API.
//!
//! Request structs model every body field as `Option` so that handlers can
//! report missing fields with the API's own error messages instead of a
//! generic deserialization rejection. Response structs carry the exact
//! field names clients decode.

pub mod auth;
pub mod common;
pub mod tasks;
