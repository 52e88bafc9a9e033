use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// DTO for a todo returned from the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct Todo {
    #[serde(rename = "_id")]
    #[schema(example = "58af3a600343927e48e87335")]
    pub id: String,
    #[schema(example = "Blanche")]
    pub owner: String,
    #[schema(example = false)]
    pub status: bool,
    #[schema(example = "In sunt ex non tempor cillum commodo amet incididunt anim qui commodo quis.")]
    pub body: String,
    #[schema(example = "software design")]
    pub category: String,
}

impl From<domain::todo::Todo> for Todo {
    fn from(value: domain::todo::Todo) -> Self {
        Todo {
            id: value.id.to_string(),
            owner: value.owner,
            status: value.status,
            body: value.body,
            category: value.category,
        }
    }
}

/// DTO for creating a new todo via the API. Fields are optional here so a missing field is
/// reported along with every other problem instead of as a JSON parse failure.
#[derive(Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTodo {
    #[schema(example = "Blanche")]
    pub owner: Option<String>,
    /// Kept as raw JSON so a non-boolean status is reported alongside the other field problems
    #[schema(value_type = Option<bool>, example = false)]
    pub status: Option<serde_json::Value>,
    #[schema(example = "In sunt ex non tempor cillum commodo amet incididunt anim qui commodo quis.")]
    pub body: Option<String>,
    #[schema(example = "software design")]
    pub category: Option<String>,
}

impl From<NewTodo> for domain::todo::validation::CreateTodo {
    fn from(value: NewTodo) -> Self {
        domain::todo::validation::CreateTodo {
            owner: value.owner,
            status: value.status,
            body: value.body,
            category: value.category,
        }
    }
}

/// DTO containing the ID of a todo that was created via the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct InsertedTodo {
    #[schema(example = "58af3a600343927e48e87335")]
    pub id: String,
}
