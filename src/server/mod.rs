//! HTTP server

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cache::ResponseCache;
use crate::generator::Generator;
use crate::Blog;

/// Server state
struct ServerState {
    generator: Generator,
    cache: ResponseCache,
}

/// Build the application router
pub fn router(blog: &Blog) -> Result<Router> {
    let state = Arc::new(ServerState {
        generator: Generator::new(blog)?,
        cache: ResponseCache::new(Duration::from_secs(blog.config.cache_ttl_secs)),
    });

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/post/:slug", get(post_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/robots.txt", get(robots_handler))
        .nest_service("/assets", ServeDir::new(&blog.assets_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.generator.render_index() {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error("index", e),
    }
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.generator.render_post(&slug) {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => not_found().await.into_response(),
        Err(e) => internal_error("post", e),
    }
}

async fn sitemap_handler(State(state): State<Arc<ServerState>>) -> Response {
    let body = state
        .cache
        .get_or_insert_with("/sitemap.xml", || state.generator.render_sitemap());
    match body {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
        Err(e) => internal_error("sitemap", e),
    }
}

async fn robots_handler(State(state): State<Arc<ServerState>>) -> Response {
    let body = state
        .cache
        .get_or_insert_with("/robots.txt", || Ok(state.generator.render_robots()));
    match body {
        Ok(text) => ([(header::CONTENT_TYPE, "text/plain")], text).into_response(),
        Err(e) => internal_error("robots", e),
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html("<h1>404 Not Found</h1>"))
}

fn internal_error(what: &str, e: anyhow::Error) -> Response {
    tracing::error!("Failed to render {}: {:#}", what, e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
