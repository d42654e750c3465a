//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for external dependencies
//! - `validation`: Field checks shared by entity constructors

pub mod entities;
pub mod ports;
pub mod validation;
