//! Collaborator traits consumed by the query engine.

use async_trait::async_trait;

use crate::StorageResult;
use crate::types::{SearchHits, SearchRequest};

/// Executes compiled queries against the action index.
///
/// Implementations must be thread-safe (`Send + Sync`); one handle is shared
/// by all requests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Runs one search and returns the hits page.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConnectionError` if the backend is unreachable,
    /// `StorageError::BackendError` for non-success answers and
    /// `StorageError::MalformedResponse` if a hit cannot be decoded.
    async fn search(&self, request: &SearchRequest) -> StorageResult<SearchHits>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Reads chain state from a node's RPC endpoint.
#[async_trait]
pub trait ChainInfo: Send + Sync {
    /// Returns the last irreversible block number.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be reached or answers garbage.
    async fn last_irreversible_block(&self) -> StorageResult<u64>;
}
