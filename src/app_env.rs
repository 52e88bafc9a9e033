/// Connection string for the MongoDB deployment holding the todos
pub const MONGO_URL: &str = "MONGO_URL";
/// Name of the database inside the MongoDB deployment which holds the "todos" collection
pub const MONGO_DB: &str = "MONGO_DB";
/// Address and port the HTTP server listens on
pub const SERVER_ADDR: &str = "SERVER_ADDR";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_MONGO_DB: &str = "dev";
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:4567";

/// Reads an environment variable, falling back to [default] if it's unset or not valid unicode
pub fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}
