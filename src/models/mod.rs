//! Data Models
//!
//! Serializable shapes shared between services and callers.

pub mod analytics;
pub mod roster;
pub mod summary;

pub use analytics::*;
pub use roster::*;
pub use summary::*;
