//! Graph router observability.
//!
//! Provides tracing subscriber setup and a small set of logging macros shared
//! by the router library and its command-line entry point.

pub mod init;
pub mod macros;

pub use init::*;
