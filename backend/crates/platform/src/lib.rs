//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256 signing, Base64url, randomness)
//! - Password hashing (Argon2id) and password policy
//! - Cookie management
//! - Flat-file storage primitives (atomic replace)
//! - Environment configuration helpers

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod storage;
