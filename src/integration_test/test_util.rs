use crate::app_env;
use dotenv::dotenv;
use lazy_static::lazy_static;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use rand::{Rng, thread_rng};
use std::env;
use std::future::Future;
use std::panic;
use tokio::runtime::Runtime;

lazy_static! {
    static ref TOKIO_RT: Runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Tokio runtime failed to initialize");
}

struct TestDatabase {
    database: Database,
}

impl TestDatabase {
    async fn create(base_url: &str) -> Result<Self, mongodb::error::Error> {
        let mut rng = thread_rng();
        let db_id: u32 = rng.gen_range(10_000..99_999);
        let db_name = format!("test_db_{}", db_id);

        let client = Client::with_uri_str(base_url).await?;
        let database = client.database(&db_name);
        database.run_command(doc! { "ping": 1 }).await?;

        Ok(Self { database })
    }

    async fn drop_database(&self) {
        if let Err(db_err) = self.database.drop().await {
            println!(
                "Failed to drop test database {}, please remove it manually. Error: {}",
                self.database.name(),
                db_err
            );
        }
    }
}

/// Creates a uniquely named database for a test, runs the test against it, then drops the
/// database whether or not the test passed.
///
/// Expects that the TEST_MONGO_URL environment variable is populated
pub fn prepare_db_and_test<F, R>(test_fn: F)
where
    R: Future<Output = ()> + Send + 'static,
    F: FnOnce(Database) -> R,
{
    if dotenv().is_err() {
        println!("Test is running without .env file.");
    }

    TOKIO_RT.block_on(async move {
        let mongo_base_url = env::var(app_env::test::TEST_MONGO_URL)
            .expect("You must provide the TEST_MONGO_URL environment variable as the base MongoDB connection string");
        let test_db = match TestDatabase::create(&mongo_base_url).await {
            Ok(tdb) => tdb,
            Err(db_err) => panic!("Failed to start test database: {}", db_err),
        };

        let test_result = tokio::spawn(test_fn(test_db.database.clone())).await;
        test_db.drop_database().await;

        if let Err(join_err) = test_result {
            if join_err.is_panic() {
                panic::resume_unwind(join_err.into_panic());
            }
            panic!("Test task did not finish: {}", join_err);
        }
    });
}
