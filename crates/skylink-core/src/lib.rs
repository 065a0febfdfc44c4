//! Core types and definitions for the SKYLINK telemetry simulator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the drone status machine, client commands, the telemetry wire format,
//! and physics constants. It has no dependency on the simulation engine
//! or any runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod telemetry;
