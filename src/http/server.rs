//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: two exact control routes + catch-all forwarder
//! - Hold shared state (target store, upstream client)
//! - Serve connections with graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, routing::any, Router};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::control::{self, handlers};
use crate::proxy::forward::forward_request;
use crate::proxy::target::TargetStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub targets: Arc<TargetStore>,
    pub client: Client<HttpConnector, Body>,
    pub upstream_timeout: Option<Duration>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            targets: Arc::new(TargetStore::new()),
            client,
            upstream_timeout: config.timeouts.upstream_secs.map(Duration::from_secs),
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router.
    ///
    /// The control routes are registered with `any` and enforce their method
    /// in the handler, so a wrong verb gets a 405 with a message rather than
    /// being forwarded. Every unmatched path, trailing-slash and case
    /// variants of the control paths included, falls through to the
    /// forwarder.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route(control::SET_TARGET_PATH, any(handlers::set_target))
            .route(control::GET_TARGET_PATH, any(handlers::get_target))
            .fallback(forward_request)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown future resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
