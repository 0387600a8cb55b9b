//! Tag management endpoints

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use tracing::info;

use solhub_web::{no_content, ApiResponse};

use crate::{
    context::AppContext,
    errors::RestResult,
    handlers::parse_id,
    models::CreateTagRequest,
};

/// List all tags ordered by name
pub async fn list_tags(State(ctx): State<AppContext>) -> RestResult<impl IntoResponse> {
    let tags = ctx.repositories.tag_repository().find_all().await?;
    Ok(Json(ApiResponse::new(tags)))
}

/// Create a new tag
pub async fn create_tag(
    State(ctx): State<AppContext>,
    Json(request): Json<CreateTagRequest>,
) -> RestResult<impl IntoResponse> {
    info!("Creating tag: {}", request.name);

    let tag = ctx.repositories.tag_repository().create(&request.name).await?;
    Ok((axum::http::StatusCode::CREATED, Json(ApiResponse::new(tag))))
}

/// Delete a tag, detaching it from every parameter
pub async fn delete_tag(
    State(ctx): State<AppContext>,
    Path(tag_id): Path<String>,
) -> RestResult<impl IntoResponse> {
    let id = parse_id(&tag_id, "tag")?;
    info!("Deleting tag {}", id);

    ctx.repositories.tag_repository().delete(id).await?;
    Ok(no_content())
}
