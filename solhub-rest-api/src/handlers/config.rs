//! Configuration export endpoints
//!
//! Two surfaces render the same flat map: the key-gated public endpoint
//! exports secret values in plaintext (possession of a valid key is the
//! authorization), while the operator-side export masks them.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use solhub_api_types::{ApiId, UnifiedParameter, UnifiedSolution};
use solhub_export::{ConfigMap, ExportFormat};
use solhub_interfaces::ParameterFilters;

use crate::{
    context::AppContext,
    errors::{RestError, RestResult},
    handlers::parse_id,
    keys::{self, INVALID_KEY_MESSAGE},
    models::SECRET_MASK,
};

/// Query parameters for the public config endpoint
#[derive(Debug, Deserialize)]
pub struct PublicConfigQuery {
    pub api_key: Option<String>,
    pub format: Option<String>,
}

/// Query parameters for the operator export endpoint
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// Rejection for a missing `format` selector on the public endpoint
const FORMAT_REQUIRED_MESSAGE: &str =
    "format is required, accepted formats are json, yaml, env, properties";

/// Public, key-gated configuration export
///
/// `GET /api/public/solutions/config?api_key=<token>&format=<f>`. The
/// format selector is mandatory here; an absent one is a 400 like an
/// unrecognized one. The 401 message is deliberately identical for
/// missing, unknown, disabled and expired keys.
pub async fn public_solution_config(
    State(ctx): State<AppContext>,
    Query(query): Query<PublicConfigQuery>,
) -> RestResult<Response> {
    let format = match query.format.as_deref() {
        Some(raw) => parse_format(raw)?,
        None => return Err(RestError::validation_error(FORMAT_REQUIRED_MESSAGE)),
    };
    let token = query
        .api_key
        .ok_or_else(|| RestError::unauthorized(INVALID_KEY_MESSAGE))?;

    let key = keys::validate_and_resolve(ctx.repositories.clone(), &token).await?;

    let solution_id = key
        .solution_id
        .as_i32()
        .ok_or_else(|| RestError::unauthorized(INVALID_KEY_MESSAGE))?;
    let solution = ctx
        .repositories
        .solution_repository()
        .find_by_id(solution_id)
        .await?
        .ok_or_else(|| RestError::unauthorized(INVALID_KEY_MESSAGE))?;
    info!("Exporting config for solution {} as {}", solution.name, format);

    let parameters = assigned_parameters(&ctx, &key.solution_id).await?;
    let map = build_config_map(parameters, false);

    render_export(&solution, format, &map)
}

/// Operator-side export of a solution's configuration, secrets masked.
/// Unlike the public path, an absent format defaults to json.
pub async fn export_solution_config(
    State(ctx): State<AppContext>,
    Path(solution_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> RestResult<Response> {
    let format = parse_format(query.format.as_deref().unwrap_or("json"))?;
    let id = parse_id(&solution_id, "solution")?;

    let solution = ctx
        .repositories
        .solution_repository()
        .find_by_id(id)
        .await?
        .ok_or_else(|| RestError::not_found("Solution", &solution_id))?;

    let parameters = assigned_parameters(&ctx, &solution.id).await?;
    let map = build_config_map(parameters, true);

    render_export(&solution, format, &map)
}

fn parse_format(raw: &str) -> RestResult<ExportFormat> {
    raw.parse::<ExportFormat>()
        .map_err(|e| RestError::bad_request(e.to_string()))
}

async fn assigned_parameters(
    ctx: &AppContext,
    solution_id: &ApiId,
) -> RestResult<Vec<UnifiedParameter>> {
    Ok(ctx
        .repositories
        .parameter_repository()
        .search(ParameterFilters {
            solution_id: Some(solution_id.clone()),
            ..Default::default()
        })
        .await?)
}

/// Flatten parameters into the export map; unset values become empty
/// strings so every assigned key appears in the document
fn build_config_map(parameters: Vec<UnifiedParameter>, mask_secrets: bool) -> ConfigMap {
    parameters
        .into_iter()
        .map(|p| {
            let value = if mask_secrets && p.is_secret {
                SECRET_MASK.to_string()
            } else {
                p.value.unwrap_or_default()
            };
            (p.key, value)
        })
        .collect()
}

fn render_export(
    solution: &UnifiedSolution,
    format: ExportFormat,
    map: &ConfigMap,
) -> RestResult<Response> {
    let body = format
        .render(map)
        .map_err(|e| RestError::internal_error(e.to_string()))?;

    let filename = format!(
        "{}_config.{}",
        solution.name.replace(' ', "_"),
        format.file_extension()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn parameter(key: &str, value: Option<&str>, is_secret: bool) -> UnifiedParameter {
        UnifiedParameter {
            id: ApiId::from_i32(1),
            uuid: Uuid::new_v4(),
            name: None,
            key: key.to_string(),
            value: value.map(str::to_string),
            description: None,
            is_secret,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: vec![],
        }
    }

    #[test]
    fn unset_values_export_as_empty_strings() {
        let map = build_config_map(vec![parameter("DB_HOST", None, false)], false);
        assert_eq!(map["DB_HOST"], "");
    }

    #[test]
    fn secrets_are_plaintext_only_on_the_public_path() {
        let params = || vec![parameter("API_TOKEN", Some("s3cr3t"), true)];
        let public = build_config_map(params(), false);
        assert_eq!(public["API_TOKEN"], "s3cr3t");

        let operator = build_config_map(params(), true);
        assert_eq!(operator["API_TOKEN"], SECRET_MASK);
    }
}
