//! Authentication
//!
//! API-key bearer middleware for protected routes and password hashing for
//! the login flow.

mod api_key;
pub mod password;

pub use api_key::auth_middleware;
