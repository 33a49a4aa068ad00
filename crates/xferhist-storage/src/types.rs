//! Request and response types exchanged with the search backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use xferhist_core::ActionRecord;

use crate::error::StorageError;

/// One search invocation: the compiled body plus paging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Index pattern to search (e.g. `eos-action-*`).
    pub index: String,
    /// Number of hits to skip.
    pub from: u64,
    /// Maximum number of hits to return.
    pub size: u64,
    /// The query body: `track_total_hits`, `query` and `sort`.
    pub body: Value,
}

impl SearchRequest {
    /// Creates a request for the first default-sized page.
    #[must_use]
    pub fn new(index: impl Into<String>, body: Value) -> Self {
        Self {
            index: index.into(),
            from: 0,
            size: 10,
            body,
        }
    }

    /// Sets the page window.
    #[must_use]
    pub fn with_page(mut self, from: u64, size: u64) -> Self {
        self.from = from;
        self.size = size;
        self
    }
}

/// The `hits` section of a search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchHits {
    /// Total-hits descriptor as returned by the backend (`{value, relation}`).
    pub total: Value,
    /// Hit sources in backend order.
    pub hits: Vec<ActionRecord>,
}

impl SearchHits {
    /// Parses the `hits` object of a raw search response body.
    ///
    /// Each hit's `_source` must be a valid action record.
    pub fn from_response(body: &Value) -> Result<Self, StorageError> {
        let hits = body
            .get("hits")
            .ok_or_else(|| StorageError::malformed_response("missing `hits` in search response"))?;
        let total = hits.get("total").cloned().unwrap_or(Value::Null);
        let raw = match hits.get("hits") {
            Some(Value::Array(items)) => items.as_slice(),
            None => &[],
            Some(_) => {
                return Err(StorageError::malformed_response(
                    "`hits.hits` is not an array",
                ));
            }
        };

        let mut records = Vec::with_capacity(raw.len());
        for hit in raw {
            let source = hit
                .get("_source")
                .cloned()
                .ok_or_else(|| StorageError::malformed_response("hit without `_source`"))?;
            records.push(ActionRecord::from_source(source)?);
        }

        Ok(Self {
            total,
            hits: records,
        })
    }

    /// Returns the number of hits in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if there are no hits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
