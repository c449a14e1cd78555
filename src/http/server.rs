//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: health route plus the edge fallback handler
//! - Wire up middleware (preflight, limits, panic recovery, request ID, tracing)
//! - Serve on a listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::assets::AssetResolver;
use crate::config::EdgeConfig;
use crate::error::EdgeError;
use crate::handlers::{edge_handler, health, ApiPassthrough};
use crate::http::cache::CacheRules;
use crate::http::middleware::preflight_middleware;
use crate::http::request::EdgeRequestId;
use crate::routing::RouteClassifier;
use crate::security::headers::SecurityHeaders;

/// Application state injected into handlers.
///
/// Built once at startup; immutable and shared by every request.
#[derive(Clone)]
pub struct EdgeState {
    pub classifier: Arc<RouteClassifier>,
    pub assets: AssetResolver,
    pub cache: Arc<CacheRules>,
    pub security: Arc<SecurityHeaders>,
    pub shell_key: Arc<str>,
    pub api: ApiPassthrough,
    /// Upper bound on classifying and answering one request.
    pub request_timeout: Duration,
}

impl EdgeState {
    /// Build the lookup tables from config around already-constructed collaborators.
    pub fn new(config: &EdgeConfig, assets: AssetResolver, api: ApiPassthrough) -> Self {
        Self {
            classifier: Arc::new(RouteClassifier::from_config(&config.assets, &config.api)),
            assets,
            cache: Arc::new(CacheRules::from_config(&config.cache)),
            security: Arc::new(SecurityHeaders::from_config(&config.security)),
            shell_key: Arc::from(config.assets.shell.as_str()),
            api,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        }
    }
}

/// HTTP server for the edge router.
pub struct EdgeServer {
    router: Router,
}

impl EdgeServer {
    /// Create a new server from configuration and prepared state.
    pub fn new(config: &EdgeConfig, state: EdgeState) -> Self {
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request timeout lives in the edge handler so that running out of
    /// time still renders a response for the route class.
    fn build_router(config: &EdgeConfig, state: EdgeState) -> Router {
        let mut router = Router::new();
        if config.health.enabled {
            router = router.route(&config.health.path, get(health::liveness));
        }

        router
            .fallback(edge_handler)
            .with_state(state)
            .layer(middleware::from_fn(preflight_middleware))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(EdgeRequestId))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Render a handler panic as the fallback page instead of a bare 500.
fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");
    axum::response::IntoResponse::into_response(EdgeError::Internal(detail.to_string()))
}
