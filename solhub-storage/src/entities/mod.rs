pub mod parameter_tags;
pub mod parameters;
pub mod solution_api_keys;
pub mod solution_parameters;
pub mod solutions;
pub mod tags;

pub use parameter_tags::{
    ActiveModel as ParameterTagActiveModel, Column as ParameterTagColumn, Entity as ParameterTags,
    Model as ParameterTag,
};
pub use parameters::{
    ActiveModel as ParameterActiveModel, Column as ParameterColumn, Entity as Parameters,
    Model as Parameter,
};
pub use solution_api_keys::{
    ActiveModel as SolutionApiKeyActiveModel, Column as SolutionApiKeyColumn,
    Entity as SolutionApiKeys, Model as SolutionApiKey,
};
pub use solution_parameters::{
    ActiveModel as SolutionParameterActiveModel, Column as SolutionParameterColumn,
    Entity as SolutionParameters, Model as SolutionParameter,
};
pub use solutions::{
    ActiveModel as SolutionActiveModel, Column as SolutionColumn, Entity as Solutions,
    Model as Solution,
};
pub use tags::{ActiveModel as TagActiveModel, Column as TagColumn, Entity as Tags, Model as Tag};
