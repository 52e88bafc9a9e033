use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::FromRequest;

use serde::Serialize;
use tracing::error;
use utoipa::openapi::{RefOr, Schema};
use utoipa::{ToResponse, ToSchema, openapi};

use validator::ValidationErrors;

use crate::domain::todo::driving_ports::TodoError;

/// Contains diagnostic information about an API failure
#[derive(Serialize, Debug, ToResponse)]
#[response(examples(
    ("Not Found" = (
        summary = "Todo could not be found (404)",
        value = json!({
            "error_code": "not_found",
            "error_description": "The requested todo could not be found.",
            "extra_info": null
        })
    )),

    ("Internal Failure" = (
        summary = "Something unexpected went wrong inside the server (500)",
        value = json!({
            "error_code": "internal_error",
            "error_description": "Could not access data to complete your request",
            "extra_info": null
        })
    )),

    ("Invalid ID" = (
        summary = "The todo ID in the path was not a legal ID (400)",
        value = json!({
            "error_code": "invalid_id",
            "error_description": "The requested todo ID wasn't a legal ID.",
            "extra_info": "bad"
        })
    )),

    ("Invalid Query Parameter" = (
        summary = "A filter in the query string had an unusable value (400)",
        value = json!({
            "error_code": "invalid_parameter",
            "error_description": "A query parameter had an invalid value.",
            "extra_info": "query parameter \"status\" had an unusable value: whatever"
        })
    )),

    ("Invalid Input" = (
        summary = "Invalid request body was passed (400)",
        value = json!({
            "error_code": "invalid_input",
            "error_description": "Submitted data was invalid.",
            "extra_info": {
                "owner": [
                    {
                        "code": "length",
                        "message": "Todos must have a non-empty owner",
                        "params": { "min": 1, "value": "" }
                    }
                ]
            }
        })
    )),

    ("Malformed JSON" = (
        summary = "Invalid JSON passed to server (400)",
        value = json!({
            "error_code": "invalid_json",
            "error_description": "The passed request body contained malformed or unreadable JSON.",
            "extra_info": "Failed to parse the request body as JSON: EOF while parsing an object at line 1 column 22"
        })
    ))
))]
pub struct BasicErrorResponse {
    error_code: String,
    error_description: String,
    extra_info: Option<ExtraInfo>,
}

impl BasicErrorResponse {
    fn new(error_code: &str, error_description: &str, extra_info: Option<ExtraInfo>) -> Self {
        BasicErrorResponse {
            error_code: error_code.into(),
            error_description: error_description.into(),
            extra_info,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum ExtraInfo {
    ValidationIssues(ValidationErrorSchema),
    Message(String),
}

/// Stand-in OpenAPI schema for [ValidationErrors] which just provides an empty object
#[derive(Serialize, Debug)]
#[serde(transparent)]
pub struct ValidationErrorSchema(ValidationErrors);

impl<'schem> ToSchema<'schem> for ValidationErrorSchema {
    fn schema() -> (&'schem str, RefOr<Schema>) {
        (
            "ValidationErrorSchema",
            openapi::ObjectBuilder::new().into(),
        )
    }
}

/// Response type that turns failures from the todo domain into [BasicErrorResponse]s
pub struct TodoErrorResponse(pub TodoError);

impl IntoResponse for TodoErrorResponse {
    fn into_response(self) -> Response {
        match self.0 {
            bad_param @ TodoError::InvalidParameter { .. } => (
                StatusCode::BAD_REQUEST,
                Json(BasicErrorResponse::new(
                    "invalid_parameter",
                    "A query parameter had an invalid value.",
                    Some(ExtraInfo::Message(bad_param.to_string())),
                )),
            )
                .into_response(),

            TodoError::InvalidIdentifier(raw_id) => (
                StatusCode::BAD_REQUEST,
                Json(BasicErrorResponse::new(
                    "invalid_id",
                    "The requested todo ID wasn't a legal ID.",
                    Some(ExtraInfo::Message(raw_id)),
                )),
            )
                .into_response(),

            TodoError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(BasicErrorResponse::new(
                    "not_found",
                    "The requested todo could not be found.",
                    None,
                )),
            )
                .into_response(),

            TodoError::Invalid(validation_errors) => {
                ValidationErrorResponse::from(validation_errors).into_response()
            }

            TodoError::PortError(cause) => {
                error!("Todo store failure: {cause:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(BasicErrorResponse::new(
                        "internal_error",
                        "Could not access data to complete your request",
                        None,
                    )),
                )
                    .into_response()
            }
        }
    }
}

impl From<TodoError> for TodoErrorResponse {
    fn from(value: TodoError) -> Self {
        Self(value)
    }
}

/// Response type that wraps validation errors and turns them into [BasicErrorResponse]s
pub struct ValidationErrorResponse(ValidationErrors);

impl IntoResponse for ValidationErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(BasicErrorResponse::new(
                "invalid_input",
                "Submitted data was invalid.",
                Some(ExtraInfo::ValidationIssues(ValidationErrorSchema(self.0))),
            )),
        )
            .into_response()
    }
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(value: ValidationErrors) -> Self {
        Self(value)
    }
}

/// Wrapper for [axum::Json] which customizes the error response to use our
/// data structure for API errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonErrorResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Response type representing JSON parse errors
pub struct JsonErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for JsonErrorResponse {
    fn from(value: JsonRejection) -> Self {
        JsonErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(BasicErrorResponse::new(
                "invalid_json",
                "The passed request body contained malformed or unreadable JSON.",
                Some(ExtraInfo::Message(self.parse_problem)),
            )),
        )
            .into_response()
    }
}
