//! Chain node client used for the last irreversible block.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use xferhist_storage::{ChainInfo, StorageError};

use crate::config::ChainRpcConfig;

#[derive(Debug, Deserialize)]
struct GetInfoResponse {
    last_irreversible_block_num: u64,
}

/// Calls `POST /v1/chain/get_info` on a chain API node.
#[derive(Debug, Clone)]
pub struct ChainRpcClient {
    http: Client,
    base_url: String,
}

impl ChainRpcClient {
    pub fn new(cfg: &ChainRpcConfig) -> Result<Self, StorageError> {
        let http = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| StorageError::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: cfg.url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChainInfo for ChainRpcClient {
    async fn last_irreversible_block(&self) -> Result<u64, StorageError> {
        let resp = self
            .http
            .post(format!("{}/v1/chain/get_info", self.base_url))
            .send()
            .await
            .map_err(|e| StorageError::connection_error(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(StorageError::backend_error(status.as_u16(), text));
        }

        let info: GetInfoResponse = resp
            .json()
            .await
            .map_err(|e| StorageError::malformed_response(e.to_string()))?;
        Ok(info.last_irreversible_block_num)
    }
}
