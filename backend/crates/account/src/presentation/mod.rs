//! Presentation Layer
//!
//! HTTP handlers, forms, views, middleware and the router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use router::{account_router, account_router_generic};
