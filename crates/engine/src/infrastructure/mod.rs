//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod gemini;
pub mod imagen;
pub mod ports;
