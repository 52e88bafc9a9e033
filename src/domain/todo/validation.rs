use crate::domain::todo::NewTodo;
use serde_json::Value;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// A todo as submitted for creation. Nothing has been checked yet, so every field may be
/// missing and `status` may not even be a boolean.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CreateTodo {
    #[validate(
        required(message = "Todos must have a non-empty owner"),
        length(min = 1, message = "Todos must have a non-empty owner")
    )]
    pub owner: Option<String>,
    #[validate(required(message = "Todos must have a status"), custom = "boolean_status")]
    pub status: Option<Value>,
    #[validate(
        required(message = "Todos must have a non-empty body"),
        length(min = 1, message = "Todos must have a non-empty body")
    )]
    pub body: Option<String>,
    #[validate(
        required(message = "Todos must have a non-empty category"),
        length(min = 1, message = "Todos must have a non-empty category")
    )]
    pub category: Option<String>,
}

fn boolean_status(status: &Value) -> Result<(), ValidationError> {
    if status.is_boolean() {
        return Ok(());
    }

    let mut error = ValidationError::new("boolean");
    error.message = Some(Cow::Borrowed("Todos must have a status"));
    Err(error)
}

/// Checks a creation payload and turns it into a [NewTodo] ready to be stored.
///
/// Every check runs even after one fails, and the returned [ValidationErrors] lists each
/// failure under the name of the offending field.
pub fn validate_new_todo(candidate: CreateTodo) -> Result<NewTodo, ValidationErrors> {
    candidate.validate()?;

    // Every field is present and well-formed past this point
    Ok(NewTodo {
        owner: candidate.owner.unwrap_or_default(),
        status: candidate.status.and_then(|status| status.as_bool()).unwrap_or_default(),
        body: candidate.body.unwrap_or_default(),
        category: candidate.category.unwrap_or_default(),
    })
}
