//! REST API endpoint handlers

pub mod api_keys;
pub mod config;
pub mod health;
pub mod parameters;
pub mod solutions;
pub mod tags;

pub use api_keys::{create_api_key, delete_api_key, list_api_keys, toggle_api_key};
pub use config::{export_solution_config, public_solution_config};
pub use health::health_check;
pub use parameters::{
    bulk_parameter_operation, create_parameter, delete_parameter, get_parameter, list_parameters,
    list_unassigned_parameters, search_parameters, update_parameter,
};
pub use solutions::{
    assign_parameter, create_solution, delete_solution, get_solution, list_solutions,
    unassign_parameter, update_solution,
};
pub use tags::{create_tag, delete_tag, list_tags};

use crate::errors::{RestError, RestResult};

/// Parse a path segment as a database ID
pub(crate) fn parse_id(raw: &str, resource: &str) -> RestResult<i32> {
    raw.parse()
        .map_err(|_| RestError::bad_request(format!("Invalid {} ID: '{}'", resource, raw)))
}
