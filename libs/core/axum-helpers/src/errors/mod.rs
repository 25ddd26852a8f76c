//! Router-level error responses.
//!
//! Domain errors are mapped to envelopes by the domain crates themselves;
//! this module only covers requests that never reach a domain handler.

pub mod handlers;

pub use handlers::{method_not_allowed, not_found};
