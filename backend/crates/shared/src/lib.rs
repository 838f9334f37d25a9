//! Shared Kernel - Vocabulary shared by every crate in the workspace
//!
//! This crate only holds things whose meaning is the same everywhere:
//! - The unified error type and result alias
//! - The error classification and its HTTP status mapping
//!
//! Nothing here knows about sessions, cookies or the backend API.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
