use crate::{Result, TestInfraError};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_IMAGE_TAG: &str = "8.4";
const CONNECT_ATTEMPTS: u32 = 20;
const CONNECT_BACKOFF: Duration = Duration::from_millis(500);

#[derive(TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "atlas".to_string())]
    database: String,
    #[builder(default = "atlas".to_string())]
    username: String,
    #[builder(default = "atlas".to_string())]
    password: String,
    /// DDL applied once the server accepts connections. Leave unset for
    /// tests that bootstrap the schema themselves.
    #[builder(default, setter(strip_option))]
    schema: Option<String>,
    #[builder(default = 5)]
    max_connections: u32,
}

/// Disposable MySQL server with a connection pool that is ready to use.
///
/// The server keeps booting for a moment after the image logs readiness,
/// so construction retries the first pool connection with a short backoff,
/// then applies the configured schema. Tests never see a half-started
/// database.
pub struct MySqlServer {
    container: ContainerAsync<GenericImage>,
    pool: MySqlPool,
    database_url: String,
}

impl MySqlServer {
    pub async fn new(config: MysqlConfig) -> Result<Self> {
        let container = GenericImage::new("mysql", MYSQL_IMAGE_TAG)
            .with_exposed_port(3306_u16.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root")
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(3306).await?;
        let database_url = format!(
            "mysql://{}:{}@{host}:{port}/{}",
            config.username, config.password, config.database
        );

        let pool = connect_with_retry(&database_url, config.max_connections).await?;
        if let Some(ddl) = &config.schema {
            sqlx::query(ddl).execute(&pool).await?;
        }

        Ok(Self {
            container,
            pool,
            database_url,
        })
    }

    /// Pool connected to the containerized server.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the underlying container reference.
    pub fn container(&self) -> &ContainerAsync<GenericImage> {
        &self.container
    }
}

async fn connect_with_retry(url: &str, max_connections: u32) -> Result<MySqlPool> {
    let mut last_error = None;

    for _ in 0..CONNECT_ATTEMPTS {
        match MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(CONNECT_BACKOFF).await;
            }
        }
    }

    Err(TestInfraError::Database(
        last_error.expect("at least one connection attempt"),
    ))
}
