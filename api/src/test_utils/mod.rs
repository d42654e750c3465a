//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - Manual mocks are more explicit and easier to debug
//! - Failure modes (storage errors, failing inserts, undeliverable
//!   notifications) are switched on with builder methods

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
