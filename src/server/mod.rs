//! HTTP server exposing post generation and pattern extraction.
//!
//! # Endpoints
//!
//! - `GET  /health`               - Liveness probe
//! - `POST /api/generate-post`    - Generate a post
//! - `POST /api/extract-patterns` - Extract and store a style profile
//! - `GET  /api/datasets`         - List corpora
//! - `GET  /api/patterns/:style`  - Fetch a stored profile

pub mod routes;

pub use routes::{app_router, ApiError, AppState};
