//! Solution management endpoints

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use tracing::info;

use solhub_interfaces::{NewSolution, UpdateSolution};
use solhub_web::{no_content, ApiResponse, PaginationQuery};

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    handlers::parse_id,
    models::{CreateSolutionRequest, UpdateSolutionRequest},
};

/// List all solutions with pagination, ordered by name
pub async fn list_solutions(
    State(ctx): State<AppContext>,
    Query(query): Query<PaginationQuery>,
) -> RestResult<impl IntoResponse> {
    query.validate()?;

    let list = ctx
        .repositories
        .solution_repository()
        .find_all(query.to_pagination_input())
        .await?;

    Ok(Json(ApiResponse::from(list)))
}

/// Get a specific solution by ID
pub async fn get_solution(
    State(ctx): State<AppContext>,
    Path(solution_id): Path<String>,
) -> RestResult<impl IntoResponse> {
    let id = parse_id(&solution_id, "solution")?;

    let solution = ctx
        .repositories
        .solution_repository()
        .find_by_id(id)
        .await?
        .ok_or_else(|| RestError::not_found("Solution", &solution_id))?;

    Ok(Json(ApiResponse::new(solution)))
}

/// Create a new solution
pub async fn create_solution(
    State(ctx): State<AppContext>,
    Json(request): Json<CreateSolutionRequest>,
) -> RestResult<impl IntoResponse> {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(RestError::validation_error("name must not be empty"));
    }
    info!("Creating solution: {}", name);

    let solution = ctx
        .repositories
        .solution_repository()
        .create(NewSolution {
            name,
            description: request.description,
        })
        .await?;

    Ok((axum::http::StatusCode::CREATED, Json(ApiResponse::new(solution))))
}

/// Update an existing solution
pub async fn update_solution(
    State(ctx): State<AppContext>,
    Path(solution_id): Path<String>,
    Json(request): Json<UpdateSolutionRequest>,
) -> RestResult<impl IntoResponse> {
    let id = parse_id(&solution_id, "solution")?;

    if let Some(ref name) = request.name {
        if name.trim().is_empty() {
            return Err(RestError::validation_error("name must not be empty"));
        }
    }

    let solution = ctx
        .repositories
        .solution_repository()
        .update(
            id,
            UpdateSolution {
                name: request.name.map(|n| n.trim().to_string()),
                description: request.description,
            },
        )
        .await?;

    Ok(Json(ApiResponse::new(solution)))
}

/// Delete a solution
///
/// Refused with 409 while parameters are still assigned; the error names
/// the current count.
pub async fn delete_solution(
    State(ctx): State<AppContext>,
    Path(solution_id): Path<String>,
) -> RestResult<impl IntoResponse> {
    let id = parse_id(&solution_id, "solution")?;
    info!("Deleting solution {}", id);

    ctx.repositories.solution_repository().delete(id).await?;
    Ok(no_content())
}

/// Assign a parameter to a solution; repeating the call is a no-op
pub async fn assign_parameter(
    State(ctx): State<AppContext>,
    Path((solution_id, parameter_id)): Path<(String, String)>,
) -> RestResult<impl IntoResponse> {
    let sid = parse_id(&solution_id, "solution")?;
    let pid = parse_id(&parameter_id, "parameter")?;

    ctx.repositories
        .solution_repository()
        .assign_parameter(sid, pid)
        .await?;
    Ok(no_content())
}

/// Remove a parameter from a solution; removing an absent pair is a no-op
pub async fn unassign_parameter(
    State(ctx): State<AppContext>,
    Path((solution_id, parameter_id)): Path<(String, String)>,
) -> RestResult<impl IntoResponse> {
    let sid = parse_id(&solution_id, "solution")?;
    let pid = parse_id(&parameter_id, "parameter")?;

    ctx.repositories
        .solution_repository()
        .unassign_parameter(sid, pid)
        .await?;
    Ok(no_content())
}
