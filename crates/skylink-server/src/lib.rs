//! SKYLINK telemetry server.
//!
//! Wires the drone simulation to clients over a WebSocket endpoint.
//! Each connection gets its own simulation instance and stream loop.

pub mod config;
pub mod router;
pub mod stream;

pub use router::create_router;
