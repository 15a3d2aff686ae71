//! # lw-core
//!
//! Shared foundation for LumiWeight: the common error type, the opaque
//! [`EventSource`] handle, and the trait seams toward the external
//! collaborators that load sources and consume weighted events.

#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::{EventConsumer, SourceLoader};
pub use types::EventSource;
