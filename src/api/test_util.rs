use axum::body;
use axum::http::StatusCode;
use axum::response::Response;
use serde::de::DeserializeOwned;

/// Used in tests to both extract the raw bytes from the HTTP response body and then deserialize them into the
/// requested type. Will panic and fail the test if either step fails somehow.
pub async fn deserialize_body<T: DeserializeOwned>(response_body: body::Body) -> T {
    let bytes = body::to_bytes(response_body, usize::MAX)
        .await
        .expect("Could not read data from response body!");

    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "Could not parse body content into data structure! Error: {}, Received body: {:?}",
            err, bytes
        )
    })
}

/// Pulls the status and the "error_code" field out of an error response
pub async fn error_code_of(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body: serde_json::Value = deserialize_body(response.into_body()).await;
    let error_code = body["error_code"]
        .as_str()
        .unwrap_or_else(|| panic!("Response had no error code: {body}"))
        .to_owned();

    (status, error_code)
}
