#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, DbConn, DbErr};

/// Configuration for the post store connection.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// The store client: a single connection pool opened once at startup and
/// closed explicitly on shutdown.
#[cfg(feature = "postgres")]
pub struct Database {
    pub conn: DbConn,
}

#[cfg(feature = "postgres")]
impl Database {
    /// Open the connection pool. A failure here is fatal to startup; there
    /// is no retry.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!(url = %config.url, "Connecting to the post store...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = sea_orm::Database::connect(opts).await?;
        tracing::info!("Post store connected (pool: {})", config.max_connections);

        Ok(Self { conn })
    }

    /// Close the pool. Clones of the inner connection handed to repositories
    /// share the pool, so this tears down the whole client.
    pub async fn close(self) -> Result<(), DbErr> {
        self.conn.close().await
    }
}
