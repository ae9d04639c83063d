//! HTTP API Module
//!
//! Axum router, request handlers, and the server wrapper that owns the
//! listener lifecycle.

pub mod rest;
pub mod server;

pub use rest::*;
pub use server::*;
