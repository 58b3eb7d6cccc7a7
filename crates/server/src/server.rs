use axum::{
    Router,
    http::{HeaderName, Method, header},
    routing::get,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use std::sync::Arc;

use crate::{admin, auth, games};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Uniform CORS policy for the browser storefront: it is served from a
/// different origin and preflights every mutating request.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-user-id")])
        .max_age(std::time::Duration::from_secs(86_400))
}

/// Builds the storefront router.
///
/// Unknown methods on a known route answer 405 from the router itself;
/// unknown `action` values are rejected by the typed extractors.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/auth",
            get(auth::lookup)
                .post(auth::submit)
                .put(auth::update)
                .delete(auth::uninstall_frame),
        )
        .route(
            "/games",
            get(games::list)
                .post(games::create)
                .put(games::set_status)
                .delete(games::revoke),
        )
        .route(
            "/admin",
            get(admin::lookup).post(admin::create).put(admin::update),
        )
        .layer(cors_layer())
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
