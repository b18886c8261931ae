//! Echo Forge HTTP presentation layer
//!
//! axum router, handlers, middleware and OpenAPI documentation for the
//! Echo Forge API.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::{cors_layer, create_router};
pub use state::{AppState, ServicePorts};
