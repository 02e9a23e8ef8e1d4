//! HTTP surface for the newsletter assembler
//!
//! - `POST /api/newsletter`: assemble a newsletter for `{company_name, company_data?}`
//! - `GET /health`: liveness probe
//!
//! # Modules
//!
//! - [`app`]: router, middleware and bind configuration
//! - [`state`]: shared, immutable handler state
//! - [`error`]: API error type and its HTTP mapping
//! - [`routes`]: request handlers

pub mod app;
pub mod error;
pub mod routes;
pub mod state;

pub use app::{ServerConfig, create_app};
pub use error::ApiError;
pub use state::AppState;
