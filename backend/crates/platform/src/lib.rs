//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B flavored policy)
//! - Cookie management
//! - Client origin extraction (IP, User-Agent)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
