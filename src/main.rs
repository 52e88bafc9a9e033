use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use todo_rest::{SharedData, app_env, db, logging, persistence};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    let otel_exporters = logging::exporters_from_env()?;
    logging::setup_logging_and_tracing(logging::init_env_filter()?, otel_exporters);

    let mongo_url = app_env::var_or(app_env::MONGO_URL, app_env::DEFAULT_MONGO_URL);
    let mongo_db = app_env::var_or(app_env::MONGO_DB, app_env::DEFAULT_MONGO_DB);
    let database = db::connect_mongo(&mongo_url, &mongo_db).await?;
    db::verify_connection(&database).await?;

    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(database),
    });
    let app = todo_rest::build_router(shared_data);

    let server_addr = app_env::var_or(app_env::SERVER_ADDR, app_env::DEFAULT_SERVER_ADDR);
    let listener = TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("binding to {server_addr}"))?;

    info!("Starting server on {server_addr}.");
    axum::serve(listener, app)
        .await
        .context("serving HTTP requests")?;

    Ok(())
}
