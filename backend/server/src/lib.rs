//! Quick-commerce analytics backend.
//!
//! Seeds a document store with a fixed sample of customers, orders, competitor prices and city
//! metrics, then serves read-only aggregates over it plus a what-if profitability calculator.
//!
//!
//!
//! # Routes
//!
//! Everything lives under `/api`.
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | POST | `/initialize-data` | wipes and reseeds all four collections |
//! | GET | `/customers` | every customer |
//! | GET | `/customer-segments` | customers bucketed by segment plus per-segment averages |
//! | GET | `/competitor-prices` | every competitor price point |
//! | GET | `/city-analysis` | every city |
//! | GET | `/orders` | every order |
//! | POST | `/profitability-scenario` | projected monthly P&L for the given inputs |
//! | GET | `/retention-analysis` | retention bands and delivery time |
//! | GET | `/price-gaps` | our price versus the cheapest competitor |
//! | GET | `/overview` | headline KPIs |
//! | GET | `/health` | store connectivity |
//!
//!
//!
//! # Environment
//!
//! | Variable | Default |
//! |----------|---------|
//! | `RUST_PORT` | `8001` |
//! | `REDIS_URL` | `redis://127.0.0.1:6379`, or `memory://` for an in-process store |
//! | `DB_NAME` | `quickcommerce` |
//! | `CORS_ORIGINS` | `*`, otherwise a comma separated list |
//! | `RUST_LOG` | unset, e.g. `insights=info,tower_http=debug` |
//!
//! A `.env` in the working directory is read before the process environment.
//!
//!
//!
//! # Setup
//!
//! Run against a local Redis.
//! ```sh
//! docker run -p 6379:6379 redis
//! RUST_LOG=info cargo run
//! curl -X POST localhost:8001/api/initialize-data
//! ```
//!
//! Run without Redis.
//! ```sh
//! REDIS_URL=memory:// cargo run
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod analytics;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use config::{Config, CorsOrigins};
use routes::{
    city_analysis_handler, competitor_prices_handler, customers_handler, health_handler,
    initialize_handler, orders_handler, overview_handler, price_gaps_handler,
    profitability_handler, retention_handler, segments_handler,
};
use state::State;

pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config).await?;

    info!("Starting server...");
    let app = create_router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn create_router(state: Arc<State>) -> Router {
    let api = Router::new()
        .route("/initialize-data", post(initialize_handler))
        .route("/customers", get(customers_handler))
        .route("/customer-segments", get(segments_handler))
        .route("/competitor-prices", get(competitor_prices_handler))
        .route("/city-analysis", get(city_analysis_handler))
        .route("/orders", get(orders_handler))
        .route("/profitability-scenario", post(profitability_handler))
        .route("/retention-analysis", get(retention_handler))
        .route("/price-gaps", get(price_gaps_handler))
        .route("/overview", get(overview_handler))
        .route("/health", get(health_handler));

    Router::new()
        .nest("/api", api)
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let cors = CorsLayer::new().max_age(Duration::from_secs(60 * 60));

    match origins {
        CorsOrigins::Any => cors.allow_origin(Any).allow_methods(Any).allow_headers(Any),
        // credentials are only allowed alongside explicit origins
        CorsOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| {
                    origin
                        .parse()
                        .map_err(|e| warn!("Skipping invalid CORS origin {origin}: {e}"))
                        .ok()
                })
                .collect();

            cors.allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
