//! Shared utilities for the newsletter assembler
//!
//! This crate provides common functionality used across the workspace:
//! logging setup and text helpers for coping with model output.

pub mod logging;
pub mod text;

pub use logging::{LogFormat, init_tracing};
pub use text::unwrap_fenced_json;
