//! Credential verifier
//!
//! One-way password hashing and verification. Pure over its inputs; the
//! salt is generated by bcrypt and embedded in the hash.

use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String> {
    hash(password, DEFAULT_COST).context("failed to hash password")
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    verify(password, password_hash).context("failed to verify password")
}
