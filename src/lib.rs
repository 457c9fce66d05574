//! Helpers shared by web services: API error responses, `host:port` parsing
//! and first-match selection over optional values.

pub mod config;
pub mod errors;
pub mod net;
pub mod utils;
