//! Response envelopes shared by all JSON endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use solhub_api_types::{ListResponse, PaginationMeta};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

/// Response metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl<T> ApiResponse<T> {
    /// Create a simple response with just data
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }

    /// Create response with pagination metadata
    pub fn with_pagination(data: T, pagination: PaginationMeta) -> Self {
        Self {
            data,
            meta: Some(ResponseMeta {
                pagination: Some(pagination),
                timestamp: Some(chrono::Utc::now()),
            }),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> From<ListResponse<T>> for ApiResponse<Vec<T>> {
    fn from(list_response: ListResponse<T>) -> Self {
        ApiResponse::with_pagination(list_response.items, list_response.meta)
    }
}

/// Create a successful response with data
pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    ApiResponse::new(data)
}

/// Create a created response (201)
pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::CREATED, ApiResponse::new(data))
}

/// Create a no content response (204)
pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
