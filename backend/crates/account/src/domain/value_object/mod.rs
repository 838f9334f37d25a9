//! Value Object Module

pub mod access_token;
pub mod email;
pub mod return_url;

pub use access_token::AccessToken;
pub use email::Email;
pub use return_url::ReturnUrl;
