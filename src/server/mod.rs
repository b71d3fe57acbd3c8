use axum::{
    routing::{get, post, put, delete},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::output::is_quiet;
use crate::storage::QuoteRepository;

pub mod routes;

/// Every route is mounted under this prefix
pub const BASE_PATH: &str = "/api/Quotes";

/// Server state
pub struct AppState {
    pub repo: Arc<dyn QuoteRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn QuoteRepository>) -> Self {
        Self { repo }
    }
}

/// Build the API router with its CORS and tracing layers
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/AllQuotes", get(routes::list_quotes))
        .route("/GetQuotesbyId/{id}", get(routes::get_quote))
        .route("/CreateQuotesbyId/{id}", post(routes::create_quote))
        .route("/UpdateQuotesbyId/{id}", put(routes::update_quote))
        .route("/DeleteQuotesbyId/{id}", delete(routes::delete_quote))
        .route("/SearchQuotes", get(routes::search_quotes));

    Router::new()
        .nest(BASE_PATH, api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, repo: Arc<dyn QuoteRepository>) -> anyhow::Result<()> {
    let app = router(Arc::new(AppState::new(repo)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!("Starting server on {}", local);
    if !is_quiet() {
        println!("🌍 Server running at http://{}{}", local, BASE_PATH);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
