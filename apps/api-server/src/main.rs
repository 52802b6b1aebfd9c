//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting blog API server on {}:{}",
        config.host,
        config.port
    );

    // Open the post store. A connection failure here is fatal; the process
    // is expected to terminate and be restarted.
    #[cfg(feature = "postgres")]
    let db = blog_infra::database::Database::connect(&config.database)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to the post store: {e}");
            std::io::Error::other(e)
        })?;

    #[cfg(feature = "postgres")]
    let state = AppState::new(&db);

    #[cfg(not(feature = "postgres"))]
    let state = {
        tracing::warn!("Built without the postgres feature - posts are held in memory");
        AppState::in_memory()
    };

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    // Teardown: close the store client once the server has stopped.
    #[cfg(feature = "postgres")]
    if let Err(e) = db.close().await {
        tracing::warn!("Error while closing the post store: {e}");
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,blog_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
