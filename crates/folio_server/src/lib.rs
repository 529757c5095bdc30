//! HTTP server wiring for Folio (API, handlers, and shared state).

/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for issue, article, member and gate endpoints.
pub mod handlers;

pub use folio_core::{
    config, db, editorial, gate, models, AppError, Config, Database, GateStatusCache,
    DEFAULT_PORT,
};

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post, put},
    Router,
};
use folio_core::roster::{ChefredSource, HttpChefredClient};
use folio_core::HttpGateClient;
use hyper::header::{self, HeaderValue};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
    pub gate: Arc<GateStatusCache>,
    /// Names the current editors-in-chief for the roster.
    pub chefreds: Arc<dyn ChefredSource>,
}

impl AppState {
    /// Construct shared application state with HTTP clients built from `config`.
    ///
    /// # Returns
    /// A new [`AppState`].
    pub fn new(config: Config, db: Database) -> Self {
        let client = HttpGateClient::new(
            config.gate_url.clone(),
            Duration::from_secs(config.gate_timeout_secs),
        );
        let gate = Arc::new(GateStatusCache::new(Arc::new(client)));
        Self::with_gate(config, db, gate)
    }

    /// Construct shared application state around an existing gate cache.
    ///
    /// # Returns
    /// A new [`AppState`] wired to the provided gate.
    pub fn with_gate(config: Config, db: Database, gate: Arc<GateStatusCache>) -> Self {
        let chefreds = Arc::new(HttpChefredClient::new(
            config.dfunkt_url.clone(),
            Duration::from_secs(config.gate_timeout_secs),
        ));
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
            gate,
            chefreds,
        }
    }

    /// Replace the chefred source.
    pub fn with_chefreds(mut self, chefreds: Arc<dyn ChefredSource>) -> Self {
        self.chefreds = chefreds;
        self
    }
}

/// Address the server listens on.
///
/// Loopback only, unless public access is allowed.
pub fn bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    if allow_public_access {
        SocketAddr::from(([0, 0, 0, 0], config.port))
    } else {
        SocketAddr::from(([127, 0, 0, 1], config.port))
    }
}

fn cors_layer(port: u16, allow_public_access: bool) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    if allow_public_access {
        return CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any);
    }
    let origins: Vec<HeaderValue> = [
        format!("http://localhost:{}", port),
        format!("http://127.0.0.1:{}", port),
    ]
    .into_iter()
    .filter_map(|origin| HeaderValue::from_str(&origin).ok())
    .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState, allow_public_access: bool) -> Router {
    let cors = cors_layer(state.config.port, allow_public_access);
    let max_body = state.config.max_form_size;

    Router::new()
        .route(
            "/api/issues",
            get(handlers::issue::list_issues).post(handlers::issue::create_issue),
        )
        .route(
            "/api/issue/:issue",
            get(handlers::issue::get_issue).delete(handlers::issue::delete_issue),
        )
        .route("/api/issue/:issue/edit", get(handlers::issue::edit_issue))
        .route("/api/issue/:issue/save", post(handlers::issue::save_issue))
        .route("/api/issue/:issue/:article", get(handlers::article::get_article))
        .route(
            "/api/article/:article/authors",
            put(handlers::article::set_authors),
        )
        .route("/api/members", get(handlers::member::roster))
        .route("/api/members/:kth_id", put(handlers::member::upsert_member))
        .route("/api/gate", get(handlers::gate::gate_status))
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(max_body))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors)
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::bind_address;
    use folio_core::Config;
    use std::net::SocketAddr;

    fn config(port: u16) -> Config {
        Config {
            db_path: String::from("/tmp/folio-db"),
            port,
            gate_url: String::new(),
            gate_timeout_secs: 1,
            max_form_size: 1024,
            dfunkt_url: String::new(),
        }
    }

    #[test]
    fn binds_loopback_unless_public() {
        let config = config(4040);
        assert_eq!(
            bind_address(&config, false),
            SocketAddr::from(([127, 0, 0, 1], 4040))
        );
        let public = bind_address(&config, true);
        assert!(public.ip().is_unspecified());
        assert_eq!(public.port(), 4040);
    }
}
