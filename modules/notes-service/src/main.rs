//! Notes Service — standalone binary serving a CRUD API for text notes.
//!
//! Notes live in memory only and are lost on restart.
//! Default: http://127.0.0.1:8080/api/v1/notes

mod config;
mod error;
mod middleware;
mod routes;
mod store;

use config::Config;
use routes::AppState;
use std::sync::Arc;
use store::{MemNoteStore, NoteRepository};
use tower_http::catch_panic::CatchPanicLayer;

fn api_routes<R: NoteRepository>() -> axum::Router<Arc<AppState<R>>> {
    axum::Router::new()
        .route(
            "/api/v1/notes",
            axum::routing::get(routes::list_notes::<R>).post(routes::create_note::<R>),
        )
        .route(
            "/api/v1/notes/:id",
            axum::routing::get(routes::get_note::<R>)
                .patch(routes::patch_note::<R>)
                .delete(routes::delete_note::<R>),
        )
        .route("/api/v1/status", axum::routing::get(routes::status::<R>))
        .route("/health", axum::routing::get(routes::health))
}

/// Panic recovery sits inside request logging so recovered 500s still get a log line.
fn with_layers(app: axum::Router, cors_permissive: bool) -> axum::Router {
    let app = app
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(axum::middleware::from_fn(middleware::log_requests));

    if cors_permissive {
        app.layer(tower_http::cors::CorsLayer::permissive())
    } else {
        app
    }
}

fn build_router<R: NoteRepository>(state: Arc<AppState<R>>) -> axum::Router {
    let cors_permissive = state.config.cors_permissive;
    with_layers(api_routes::<R>().with_state(state), cors_permissive)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    log::info!(
        "Config: cors_permissive={}, max_page_size={}",
        config.cors_permissive,
        config.max_page_size
    );

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(Arc::new(MemNoteStore::new()), config));
    let app = build_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    log::info!("Notes Service listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
