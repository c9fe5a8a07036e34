use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod advice;
mod config;
mod controller;
mod db;
mod error;
mod handlers;
mod mapper;
mod models;
mod store;

use advice::AdviceClient;
use config::Config;
use controller::MoodController;
use store::MoodStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub controller: MoodController,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dailymood_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let db = db::create_pool(&config.database_url).await;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let store = MoodStore::new(db.clone())
        .await
        .expect("Failed to load mood store");
    let advice_client = AdviceClient::new(
        config.advice_url.clone(),
        Duration::from_secs(config.advice_timeout_secs),
    )
    .expect("Failed to build advice client");
    let controller = MoodController::new(store, advice_client);

    let state = AppState {
        db,
        config: config.clone(),
        controller,
    };

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Moods
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/moods", post(handlers::moods::create_mood))
        .route("/api/moods", delete(handlers::moods::delete_all_moods))
        .route("/api/moods/summary", get(handlers::moods::mood_summary))
        .route("/api/moods/:id", delete(handlers::moods::delete_mood))
        // Advice
        .route("/api/advice", get(handlers::advice::get_advice))
        .route("/api/advice/refresh", post(handlers::advice::refresh_advice))
        // Live mood list push
        .route("/ws", get(handlers::ws::ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
