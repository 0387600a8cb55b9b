//! Main application configuration and router setup

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use solhub_web::middleware::{cors_layer_with_config, request_id_middleware, CorsConfig};

use crate::{context::AppContext, handlers};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// CORS settings applied when CORS is enabled
    pub cors: CorsConfig,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// API path prefix
    pub api_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors: CorsConfig::default(),
            enable_request_id: true,
            enable_tracing: true,
            api_prefix: "/api".to_string(),
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(context: AppContext, config: AppConfig) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health_check))
        .nest(&config.api_prefix, create_api_router())
        .with_state(context);

    if config.enable_cors {
        app = app.layer(cors_layer_with_config(config.cors.clone()));
    }

    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

/// Create the API router mounted under the prefix
fn create_api_router() -> Router<AppContext> {
    Router::new()
        // Public, key-gated configuration export
        .route("/public/solutions/config", get(handlers::public_solution_config))
        // Solution endpoints
        .route(
            "/solutions",
            get(handlers::list_solutions).post(handlers::create_solution),
        )
        .route(
            "/solutions/{id}",
            get(handlers::get_solution)
                .patch(handlers::update_solution)
                .delete(handlers::delete_solution),
        )
        .route("/solutions/{id}/export", get(handlers::export_solution_config))
        .route(
            "/solutions/{id}/parameters/{param_id}",
            post(handlers::assign_parameter).delete(handlers::unassign_parameter),
        )
        // API key endpoints
        .route(
            "/solutions/{id}/api-keys",
            get(handlers::list_api_keys).post(handlers::create_api_key),
        )
        .route(
            "/solutions/{id}/api-keys/{key_id}",
            axum::routing::delete(handlers::delete_api_key),
        )
        .route(
            "/solutions/{id}/api-keys/{key_id}/toggle",
            axum::routing::patch(handlers::toggle_api_key),
        )
        // Parameter endpoints
        .route(
            "/parameters",
            get(handlers::list_parameters).post(handlers::create_parameter),
        )
        .route("/parameters/unassigned", get(handlers::list_unassigned_parameters))
        .route("/parameters/search", post(handlers::search_parameters))
        .route("/parameters/bulk", post(handlers::bulk_parameter_operation))
        .route(
            "/parameters/{id}",
            get(handlers::get_parameter)
                .patch(handlers::update_parameter)
                .delete(handlers::delete_parameter),
        )
        // Tag endpoints
        .route("/tags", get(handlers::list_tags).post(handlers::create_tag))
        .route("/tags/{id}", axum::routing::delete(handlers::delete_tag))
}
