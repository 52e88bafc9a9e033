use anyhow::Context;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;
use tracing::info;

/// Name the service identifies itself with in MongoDB server logs
const APP_NAME: &str = "todo-rest";

/// Builds a pooled MongoDB client for [url] and returns a handle to the [db_name] database.
/// Connections are made lazily, so this succeeds even if the server is down.
pub async fn connect_mongo(url: &str, db_name: &str) -> Result<Database, anyhow::Error> {
    let mut client_options = ClientOptions::parse(url)
        .await
        .context("parsing the MongoDB connection string")?;
    client_options.app_name = Some(APP_NAME.to_owned());
    client_options.max_pool_size = Some(20);
    client_options.server_selection_timeout = Some(Duration::from_secs(2));

    let client = Client::with_options(client_options).context("building the MongoDB client")?;

    Ok(client.database(db_name))
}

/// Round-trips a ping to the database so startup fails fast on a bad connection
pub async fn verify_connection(db: &Database) -> Result<(), anyhow::Error> {
    db.run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("pinging MongoDB database {}", db.name()))?;
    info!(database = db.name(), "Connected to MongoDB");

    Ok(())
}
