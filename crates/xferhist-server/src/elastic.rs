//! Search backend speaking the Elasticsearch `_search` API over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use xferhist_storage::{SearchBackend, SearchHits, SearchRequest, StorageError};

use crate::config::ElasticConfig;

#[derive(Debug, Clone)]
struct BasicAuth {
    user: String,
    password: String,
}

/// HTTP client for the action indices.
#[derive(Debug, Clone)]
pub struct ElasticBackend {
    http: Client,
    base_url: String,
    auth: Option<BasicAuth>,
}

impl ElasticBackend {
    pub fn new(cfg: &ElasticConfig) -> Result<Self, StorageError> {
        let http = Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| StorageError::internal(format!("failed to build HTTP client: {e}")))?;

        let auth = match (&cfg.user, &cfg.password) {
            (Some(user), Some(password)) => Some(BasicAuth {
                user: user.clone(),
                password: password.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            http,
            base_url: cfg.url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn search_url(&self, index: &str) -> String {
        format!("{}/{}/_search", self.base_url, index)
    }
}

#[async_trait]
impl SearchBackend for ElasticBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchHits, StorageError> {
        let mut req = self
            .http
            .post(self.search_url(&request.index))
            .query(&[("from", request.from), ("size", request.size)])
            .json(&request.body);
        if let Some(auth) = &self.auth {
            req = req.basic_auth(&auth.user, Some(&auth.password));
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::connection_error(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), index = %request.index, "search backend rejected query");
            return Err(StorageError::backend_error(status.as_u16(), text));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| StorageError::malformed_response(e.to_string()))?;
        SearchHits::from_response(&body)
    }

    fn backend_name(&self) -> &'static str {
        "elasticsearch"
    }
}
