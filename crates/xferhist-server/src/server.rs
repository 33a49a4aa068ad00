use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use xferhist_core::DefaultMetaMerger;
use xferhist_search::SearchEngine;

use crate::{chain_rpc::ChainRpcClient, config::AppConfig, elastic::ElasticBackend, handlers};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

impl AppState {
    /// Wire the HTTP collaborators described by `cfg` into a search engine.
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let backend = ElasticBackend::new(&cfg.elastic)?;
        let chain = ChainRpcClient::new(&cfg.chain_rpc)?;
        let engine = SearchEngine::new(
            Arc::new(backend),
            Arc::new(chain),
            Arc::new(DefaultMetaMerger),
            cfg.search_config(),
        );
        Ok(Self {
            engine: Arc::new(engine),
        })
    }
}

pub struct XferhistServer {
    addr: SocketAddr,
    app: Router,
}

pub fn build_app(cfg: &AppConfig, state: AppState) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/v2/history/get_transfers", get(handlers::get_transfers))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = tracing::field::Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub fn build(self) -> anyhow::Result<XferhistServer> {
        let state = AppState::from_config(&self.config)?;
        let app = build_app(&self.config, state);

        Ok(XferhistServer {
            addr: self.addr,
            app,
        })
    }
}

impl XferhistServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
