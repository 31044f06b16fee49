use std::net::SocketAddr;
use std::sync::Arc;

use blueflights_api::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "blueflights_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = blueflights_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Blueflights API on port {}", config.server.port);

    // Postgres Connection
    let db = blueflights_store::DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    // Amadeus Client
    let amadeus = Arc::new(blueflights_provider::AmadeusClient::new(
        &config.amadeus.base_url,
        &config.amadeus.api_key,
        &config.amadeus.api_secret,
    ));

    let app_state = AppState {
        locations: amadeus.clone(),
        flights: amadeus,
        history: Arc::new(blueflights_store::PostgresSearchHistoryRepository {
            pool: db.pool.clone(),
        }),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
