//! HTTP adapter for the Userline user directory.
//!
//! Translates `/api/v1/users` requests into `userline_core` service calls
//! and service outcomes into JSON envelopes.

pub mod app;
pub mod config;
pub mod http;
pub mod state;

pub use app::build_router;
