use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use dues_tracker_backend::domain::{AllocationPolicy, ContributionService, MemberService};
use dues_tracker_backend::io::rest::{create_router, AppState};
use dues_tracker_backend::CsvConnection;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up storage");
    let csv_conn = Arc::new(CsvConnection::new_default()?);

    let member_service = MemberService::new(csv_conn.clone());
    let contribution_service = ContributionService::new(csv_conn, AllocationPolicy::default());
    let state = AppState::new(member_service, contribution_service);

    // CORS setup to allow a browser frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new().nest("/api", create_router(state)).layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
