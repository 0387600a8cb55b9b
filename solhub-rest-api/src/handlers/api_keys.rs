//! Per-solution API key management endpoints

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use tracing::info;

use solhub_interfaces::NewApiKey;
use solhub_web::{no_content, ApiResponse};

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    handlers::parse_id,
    keys,
    models::{ApiKeyCreatedResponse, ApiKeyResponse, CreateApiKeyRequest, ToggleApiKeyResponse},
};

/// Create a new API key for a solution
///
/// The response carries the raw token exactly once; afterwards only the
/// digest exists.
pub async fn create_api_key(
    State(ctx): State<AppContext>,
    Path(solution_id): Path<String>,
    Json(request): Json<CreateApiKeyRequest>,
) -> RestResult<impl IntoResponse> {
    let sid = parse_id(&solution_id, "solution")?;

    let key_name = request.key_name.trim().to_string();
    if key_name.is_empty() {
        return Err(RestError::validation_error("keyName must not be empty"));
    }
    info!("Creating API key '{}' for solution {}", key_name, sid);

    let expires_at = request
        .expires_in_days
        .map(|days| Utc::now() + Duration::days(i64::from(days)));

    let minted = keys::mint_key();
    let key = ctx
        .repositories
        .api_key_repository()
        .create_api_key(NewApiKey {
            solution_id: sid,
            key_name,
            key_hash: minted.hash,
            key_prefix: minted.prefix,
            expires_at,
        })
        .await?;

    let response = ApiKeyCreatedResponse {
        api_key: minted.token,
        key: ApiKeyResponse::from(key),
    };
    Ok((axum::http::StatusCode::CREATED, Json(ApiResponse::new(response))))
}

/// List a solution's API keys, newest first, metadata only
pub async fn list_api_keys(
    State(ctx): State<AppContext>,
    Path(solution_id): Path<String>,
) -> RestResult<impl IntoResponse> {
    let sid = parse_id(&solution_id, "solution")?;

    let keys = ctx.repositories.api_key_repository().find_by_solution(sid).await?;
    let items: Vec<ApiKeyResponse> = keys.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::new(items)))
}

/// Delete an API key; tokens presented afterwards are rejected as
/// Unauthorized, not NotFound
pub async fn delete_api_key(
    State(ctx): State<AppContext>,
    Path((solution_id, key_id)): Path<(String, String)>,
) -> RestResult<impl IntoResponse> {
    let (sid, kid) = resolve_scoped_key(&ctx, &solution_id, &key_id).await?;
    info!("Deleting API key {} of solution {}", kid, sid);

    ctx.repositories.api_key_repository().delete(kid).await?;
    Ok(no_content())
}

/// Flip a key's active flag; `expires_at` is left untouched
pub async fn toggle_api_key(
    State(ctx): State<AppContext>,
    Path((solution_id, key_id)): Path<(String, String)>,
) -> RestResult<impl IntoResponse> {
    let (_, kid) = resolve_scoped_key(&ctx, &solution_id, &key_id).await?;

    let key = ctx
        .repositories
        .api_key_repository()
        .find_by_id(kid)
        .await?
        .ok_or_else(|| RestError::not_found("API key", &key_id))?;

    let is_active = !key.is_active;
    ctx.repositories.api_key_repository().set_active(kid, is_active).await?;

    Ok(Json(ApiResponse::new(ToggleApiKeyResponse {
        id: key.id,
        is_active,
    })))
}

/// Check that the key exists and belongs to the solution in the path
async fn resolve_scoped_key(
    ctx: &AppContext,
    solution_id: &str,
    key_id: &str,
) -> RestResult<(i32, i32)> {
    let sid = parse_id(solution_id, "solution")?;
    let kid = parse_id(key_id, "api key")?;

    let key = ctx
        .repositories
        .api_key_repository()
        .find_by_id(kid)
        .await?
        .ok_or_else(|| RestError::not_found("API key", key_id))?;

    if key.solution_id.as_i32() != Some(sid) {
        return Err(RestError::not_found("API key", key_id));
    }
    Ok((sid, kid))
}
