//! Request and response models for the REST API

pub mod api_keys;
pub mod common;
pub mod parameters;
pub mod solutions;
pub mod tags;

pub use api_keys::{ApiKeyCreatedResponse, ApiKeyResponse, CreateApiKeyRequest, ToggleApiKeyResponse};
pub use common::{HealthResponse, SECRET_MASK};
pub use parameters::{
    BulkParameterRequest, BulkParameterResponse, CreateParameterRequest, ParameterResponse,
    SearchParametersRequest, UpdateParameterRequest,
};
pub use solutions::{CreateSolutionRequest, UpdateSolutionRequest};
pub use tags::CreateTagRequest;
