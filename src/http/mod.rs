//! HTTP API layer
//!
//! Axum router exposing the form schema, the submission intake gated by the
//! validation executor, and paginated submission listing.
//!
//! # Endpoints
//!
//! - `GET /health` - liveness probe
//! - `GET /api/form-schema` - the form definition the renderer consumes
//! - `POST /api/submissions` - validate and store a submission
//! - `GET /api/submissions` - paginated listing, newest first
//! - `GET /api/submissions/{id}` - one stored submission

pub mod config;
pub mod errors;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use pagination::{ListQuery, PageParams};
pub use routes::{api_routes, AppState};
pub use server::HttpServer;
