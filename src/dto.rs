use utoipa::OpenApi;

mod todo;

pub use todo::*;

/// Collects the schemas of every DTO so they can be merged into the API documentation
#[derive(OpenApi)]
#[openapi(components(
    schemas(Todo, NewTodo, InsertedTodo),
    responses(crate::routing_utils::BasicErrorResponse)
))]
pub struct OpenApiSchemas;
