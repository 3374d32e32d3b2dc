//! Database Test Utilities
//!
//! Starts a throwaway PostgreSQL container per test and prepares the finance
//! schema in it. Every test gets its own container: pooled connections are
//! bound to the runtime that opened them, and `#[tokio::test]` builds a new
//! runtime per test.

use infra_db::{PostgresDatastore, SchemaManager};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "finance_test";
const READY_MESSAGE: &str = "database system is ready to accept connections";

/// Entity tables, children first
const TABLES: [&str; 4] = ["records", "asset_values", "assets", "accounts"];

/// Configuration for test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A wrapper around a PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container with the finance schema created
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or schema creation fails
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let test_db = Self::empty().await?;
        SchemaManager::new(test_db.pool.clone()).create_tables().await?;
        Ok(test_db)
    }

    /// Starts a new PostgreSQL container without creating any schema
    pub async fn empty() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(READY_MESSAGE))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = container.get_host().await?.to_string();

        let config = TestDatabaseConfig {
            host,
            port,
            ..TestDatabaseConfig::default()
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.connection_url())
            .await?;

        Ok(Self {
            _container: container,
            config,
            pool,
        })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns a datastore over this database's pool
    pub fn datastore(&self) -> PostgresDatastore {
        PostgresDatastore::new(self.pool.clone())
    }

    /// Clears all rows while preserving the schema
    pub async fn clear_data(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(&format!(
            "TRUNCATE TABLE {} RESTART IDENTITY CASCADE",
            TABLES.join(", ")
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Creates an isolated test database for a single test
pub async fn create_isolated_test_database(
) -> Result<TestDatabase, Box<dyn std::error::Error + Send + Sync>> {
    TestDatabase::new().await
}

/// Helper macro for running database tests
///
/// The body sees `db: TestDatabase` and `store: PostgresDatastore`. Tests are
/// ignored by default because they need a Docker daemon; run them with
/// `cargo test -- --ignored`.
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$db:ident, $store:ident| $body:block) => {
        #[tokio::test]
        #[ignore = "requires a Docker daemon"]
        async fn $name() {
            let $db = $crate::database::create_isolated_test_database()
                .await
                .expect("Failed to create test database");
            let $store = $db.datastore();
            let _ = &$db;
            $body
        }
    };
}
