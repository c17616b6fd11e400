//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, namely trace
//! correlation and the shared API key.

pub mod api_key;
pub mod trace;

pub use api_key::{API_KEY_HEADER, ApiKey, ApiKeyError, ApiKeyGuard};
pub use trace::Trace;
