use gudang_api::config;
use gudang_api::database::manager::DatabaseManager;
use gudang_api::routes;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Gudang API in {:?} mode", config.environment);

    // Idempotent table creation. A failure here leaves the server up but
    // degraded; /health keeps reporting the database state.
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::error!("Database migration failed: {}", e);
    }

    let app = routes::app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Gudang API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
