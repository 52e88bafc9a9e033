use axum::Router;
use axum::extract::State;
use std::sync::Arc;

pub mod api;
pub mod app_env;
pub mod db;
pub mod domain;
pub mod dto;
pub mod logging;
pub mod persistence;
pub mod routing_utils;


/// Data shared by every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

/// Extractor for the application state in route handlers
pub type AppState = State<Arc<SharedData>>;

/// Assembles the todo routes, API documentation, and request tracing into the application router
pub fn build_router(shared_data: Arc<SharedData>) -> Router {
    let router = Router::new()
        .merge(api::todo::todo_routes())
        .merge(api::swagger_main::build_documentation())
        .with_state(shared_data);

    logging::attach_tracing_http(router)
}
