//! Parameter management endpoints
//!
//! Everything returned here is operator-facing, so secret values go
//! through [`ParameterResponse`] and come back masked.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use tracing::info;

use solhub_interfaces::{NewParameter, ParameterFilters, UpdateParameter};
use solhub_web::{no_content, ApiResponse, PaginationQuery};

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    handlers::parse_id,
    models::{
        BulkParameterRequest, BulkParameterResponse, CreateParameterRequest, ParameterResponse,
        SearchParametersRequest, UpdateParameterRequest,
    },
};

/// List all parameters with pagination, ordered by key
pub async fn list_parameters(
    State(ctx): State<AppContext>,
    Query(query): Query<PaginationQuery>,
) -> RestResult<impl IntoResponse> {
    query.validate()?;

    let list = ctx
        .repositories
        .parameter_repository()
        .find_all(query.to_pagination_input())
        .await?;

    let items: Vec<ParameterResponse> = list.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::with_pagination(items, list.meta)))
}

/// Get a specific parameter by ID
pub async fn get_parameter(
    State(ctx): State<AppContext>,
    Path(parameter_id): Path<String>,
) -> RestResult<impl IntoResponse> {
    let id = parse_id(&parameter_id, "parameter")?;

    let parameter = ctx
        .repositories
        .parameter_repository()
        .find_by_id(id)
        .await?
        .ok_or_else(|| RestError::not_found("Parameter", &parameter_id))?;

    Ok(Json(ApiResponse::new(ParameterResponse::from(parameter))))
}

/// Create a new parameter, creating and linking any missing tags
pub async fn create_parameter(
    State(ctx): State<AppContext>,
    Json(request): Json<CreateParameterRequest>,
) -> RestResult<impl IntoResponse> {
    let key = request.key.trim().to_string();
    if key.is_empty() {
        return Err(RestError::validation_error("key must not be empty"));
    }
    info!("Creating parameter: {}", key);

    let parameter = ctx
        .repositories
        .parameter_repository()
        .create(NewParameter {
            name: request.name,
            key,
            value: request.value,
            description: request.description,
            is_secret: request.is_secret,
            tags: request.tags,
        })
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(ApiResponse::new(ParameterResponse::from(parameter))),
    ))
}

/// Update an existing parameter; a tag list replaces the full tag set
pub async fn update_parameter(
    State(ctx): State<AppContext>,
    Path(parameter_id): Path<String>,
    Json(request): Json<UpdateParameterRequest>,
) -> RestResult<impl IntoResponse> {
    let id = parse_id(&parameter_id, "parameter")?;

    if let Some(ref key) = request.key {
        if key.trim().is_empty() {
            return Err(RestError::validation_error("key must not be empty"));
        }
    }

    let parameter = ctx
        .repositories
        .parameter_repository()
        .update(
            id,
            UpdateParameter {
                name: request.name,
                key: request.key.map(|k| k.trim().to_string()),
                value: request.value,
                description: request.description,
                is_secret: request.is_secret,
                tags: request.tags,
            },
        )
        .await?;

    Ok(Json(ApiResponse::new(ParameterResponse::from(parameter))))
}

/// Delete a parameter, detaching it from every solution and tag
pub async fn delete_parameter(
    State(ctx): State<AppContext>,
    Path(parameter_id): Path<String>,
) -> RestResult<impl IntoResponse> {
    let id = parse_id(&parameter_id, "parameter")?;
    info!("Deleting parameter {}", id);

    ctx.repositories.parameter_repository().delete(id).await?;
    Ok(no_content())
}

/// Apply one operation to a set of parameters
///
/// `delete` removes the listed parameters; `tag` create-or-links the
/// named tags onto each of them; `untag` removes those links. Ids with
/// no row are skipped rather than failing the batch.
pub async fn bulk_parameter_operation(
    State(ctx): State<AppContext>,
    Json(request): Json<BulkParameterRequest>,
) -> RestResult<impl IntoResponse> {
    let ids = request
        .parameter_ids
        .iter()
        .map(|id| {
            id.as_i32()
                .ok_or_else(|| RestError::bad_request(format!("Invalid parameter ID: '{}'", id)))
        })
        .collect::<RestResult<Vec<i32>>>()?;

    let repo = ctx.repositories.parameter_repository();
    let affected = match request.operation.as_str() {
        "delete" => repo.bulk_delete(&ids).await?,
        "tag" | "untag" => {
            if request.tags.is_empty() {
                return Err(RestError::validation_error(
                    "tags are required for tag and untag operations",
                ));
            }
            if request.operation == "tag" {
                repo.bulk_tag(&ids, &request.tags).await?
            } else {
                repo.bulk_untag(&ids, &request.tags).await?
            }
        }
        other => {
            return Err(RestError::validation_error(format!(
                "unknown bulk operation '{}', accepted operations are delete, tag, untag",
                other
            )))
        }
    };
    info!(
        "Bulk {} across {} parameter(s), {} affected",
        request.operation,
        ids.len(),
        affected
    );

    Ok(Json(ApiResponse::new(BulkParameterResponse {
        operation: request.operation,
        affected,
    })))
}

/// Search parameters with composable filters, ordered by key
pub async fn search_parameters(
    State(ctx): State<AppContext>,
    Json(request): Json<SearchParametersRequest>,
) -> RestResult<impl IntoResponse> {
    let parameters = ctx
        .repositories
        .parameter_repository()
        .search(ParameterFilters {
            solution_id: request.solution_id,
            tags: request.tags,
            key_contains: request.key_contains,
            is_secret: request.is_secret,
        })
        .await?;

    let items: Vec<ParameterResponse> = parameters.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::new(items)))
}

/// List parameters not assigned to any solution
pub async fn list_unassigned_parameters(
    State(ctx): State<AppContext>,
) -> RestResult<impl IntoResponse> {
    let parameters = ctx.repositories.parameter_repository().find_unassigned().await?;

    let items: Vec<ParameterResponse> = parameters.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::new(items)))
}
