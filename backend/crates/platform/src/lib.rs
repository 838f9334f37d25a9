//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, HMAC-SHA256 signing, Base64)
//! - Cookie building and extraction
//! - Client identification from request headers

pub mod client;
pub mod cookie;
pub mod crypto;
