pub mod chain_rpc;
pub mod config;
pub mod elastic;
pub mod handlers;
pub mod observability;
pub mod server;

pub use chain_rpc::ChainRpcClient;
pub use config::{AppConfig, ChainRpcConfig, ElasticConfig, LoggingConfig, SearchSettings, ServerConfig};
pub use elastic::ElasticBackend;
pub use observability::init_tracing;
pub use server::{AppState, ServerBuilder, XferhistServer, build_app};
