use std::sync::Arc;
use tokio::signal;
use tracing::info;

use guess_persistence::{KeyValueStore, SqlStore, connection::connect_and_migrate};
use guess_server::{
    auth::AuthService,
    config::Config,
    create_routes,
    puzzle_source::{HttpPuzzleFeed, PuzzleFeed},
    service::GameService,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Subreddit Guess server...");

    let config = Config::new();

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };
    let store: Arc<dyn KeyValueStore> = Arc::new(SqlStore::new(db));

    let feed = match &config.puzzle_feed_url {
        Some(url) => {
            info!("Loading puzzles from feed at {}", url);
            Some(Arc::new(HttpPuzzleFeed::new(url.clone())) as Arc<dyn PuzzleFeed>)
        }
        None => {
            info!("PUZZLE_FEED_URL not set, puzzles come from the admin API only");
            None
        }
    };
    if !config.use_fallback {
        info!("Fallback puzzle disabled, missing puzzles return 404");
    }

    if config.auth_dev_mode {
        info!("Starting in development authentication mode - token validation disabled");
    }
    let auth_service = match AuthService::from_config(&config) {
        Ok(auth_service) => Arc::new(auth_service),
        Err(e) => {
            tracing::error!("Failed to configure authentication: {}", e);
            std::process::exit(1);
        }
    };

    if config.admin_users.is_empty() {
        tracing::warn!("ADMIN_USERS is empty, admin endpoints will reject every caller");
    }

    let service = Arc::new(GameService::new(store, feed, &config));
    let routes = create_routes(service, auth_service);

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
                .expect("Failed to install SIGINT handler");
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler");

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
