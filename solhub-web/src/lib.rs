//! Reusable web middleware and utilities for building the Solhub HTTP
//! API with Axum: error conversion, CORS, request IDs, pagination
//! extraction and response envelopes.

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use errors::{ValidationError, WebError, WebResult};
pub use extractors::PaginationQuery;
pub use middleware::{cors_layer, request_id_middleware, CorsConfig, RequestId};
pub use response::{created, no_content, ok, ApiResponse, ResponseMeta};
