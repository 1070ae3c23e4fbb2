//! Identity verification primitives.
//!
//! Tokens are issued by the external identity provider; this module only
//! verifies them. [`jwt::generate_access_token`] exists for tests and
//! local development, signing with the same shared secret.

pub mod jwt;
