//! Application layer - use case orchestration.
//!
//! Handlers wire domain logic to ports. They hold no HTTP or cookie
//! concerns; the request boundary lives in the adapters.

pub mod handlers;
