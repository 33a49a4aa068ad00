//! # xferhist-storage
//!
//! Collaborator seams for the transfer history core.
//!
//! This crate defines the traits that the query engine talks to. It does not
//! contain any network code; HTTP implementations live in the server crate.
//!
//! - [`SearchBackend`] executes a compiled query against the action index.
//! - [`ChainInfo`] reports the last irreversible block of the chain.
//!
//! ## Example
//!
//! ```ignore
//! use xferhist_storage::{SearchBackend, SearchRequest, StorageError};
//!
//! async fn count(backend: &dyn SearchBackend, body: serde_json::Value) -> Result<usize, StorageError> {
//!     let request = SearchRequest::new("eos-action-*", body).with_page(0, 10);
//!     Ok(backend.search(&request).await?.hits.len())
//! }
//! ```

mod error;
mod traits;
mod types;

pub use error::{ErrorCategory, StorageError};
pub use traits::{ChainInfo, SearchBackend};
pub use types::{SearchHits, SearchRequest};

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Shared search backend handle.
pub type DynSearchBackend = std::sync::Arc<dyn SearchBackend>;

/// Shared chain RPC handle.
pub type DynChainInfo = std::sync::Arc<dyn ChainInfo>;
