//! Utility helpers shared across layers.
//!
//! - [`code_generator`] - Short code generation capability

pub mod code_generator;
