//! Route handlers
//!
//! - [`health`]: liveness endpoint
//! - [`newsletter`]: newsletter assembly endpoint

pub mod health;
pub mod newsletter;
