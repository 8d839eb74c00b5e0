//! HTTP surface: settings and release CRUD, the generate action, and the
//! static front-end shell.

mod error;
mod handlers;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::context::AppContext;
use crate::error::AppResult;

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/settings",
            get(handlers::get_settings).post(handlers::save_settings),
        )
        .route(
            "/api/releases",
            get(handlers::list_releases).post(handlers::create_release),
        )
        .route(
            "/api/releases/{id}",
            get(handlers::get_release)
                .put(handlers::update_release)
                .delete(handlers::delete_release),
        )
        .route("/api/releases/{id}/generate", post(handlers::generate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

pub async fn serve(ctx: AppContext, addr: SocketAddr) -> AppResult<()> {
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "server listening");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
