use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use xferhist_core::{ActionMetaMerger, Projection, ProjectionOptions, ResultProjector};
use xferhist_storage::{DynChainInfo, DynSearchBackend, StorageError};

use crate::compiler::QueryCompiler;
use crate::error::QueryError;
use crate::params::{RawQuery, ResponseFlags};

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Chain name; actions are searched in `<chain>-action-*`.
    pub chain: String,
    /// Upper bound applied to `limit`.
    pub max_results: u64,
}

impl SearchConfig {
    pub fn action_index(&self) -> String {
        format!("{}-action-*", self.chain)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            chain: "eos".to_string(),
            max_results: 1000,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(#[from] QueryError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl EngineError {
    /// Offending query parameter for validation failures.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => Some(e.parameter()),
            Self::Storage(_) => None,
        }
    }
}

/// One page of projected transfer history.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPage {
    /// Last irreversible block, 0 when not requested.
    pub lib: u64,
    /// Total-hits descriptor as reported by the backend.
    pub total: Value,
    pub projection: Projection,
}

pub struct SearchEngine {
    backend: DynSearchBackend,
    chain: DynChainInfo,
    merger: Arc<dyn ActionMetaMerger>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(
        backend: DynSearchBackend,
        chain: DynChainInfo,
        merger: Arc<dyn ActionMetaMerger>,
        config: SearchConfig,
    ) -> Self {
        Self {
            backend,
            chain,
            merger,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Compile, search, and project one transfer history request.
    ///
    /// The LIB lookup runs alongside the search when `checkLib` is set; a
    /// failure of either aborts the request.
    pub async fn get_transfers(&self, raw: &RawQuery) -> Result<TransferPage, EngineError> {
        let compiled = QueryCompiler::compile(raw)?;
        let flags = ResponseFlags::from_query(raw)?;
        let request =
            compiled.to_search_request(&self.config.action_index(), self.config.max_results);

        tracing::debug!(
            backend = self.backend.backend_name(),
            index = %request.index,
            from = request.from,
            size = request.size,
            body = %request.body,
            "executing transfer search"
        );

        let (hits, lib) = if flags.check_lib {
            let (hits, lib) = tokio::try_join!(
                self.backend.search(&request),
                self.chain.last_irreversible_block()
            )?;
            (hits, Some(lib))
        } else {
            (self.backend.search(&request).await?, None)
        };

        let options = ProjectionOptions {
            simple: flags.simple,
            no_binary: flags.no_binary,
            lib,
        };
        let projection = ResultProjector::new(self.merger.as_ref(), options).project(hits.hits);

        Ok(TransferPage {
            lib: lib.unwrap_or(0),
            total: hits.total,
            projection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::block_on;
    use xferhist_core::{ActionRecord, DefaultMetaMerger};
    use xferhist_storage::{ChainInfo, SearchBackend, SearchHits, SearchRequest};

    fn record(block: u64, trx: &str) -> ActionRecord {
        ActionRecord::from_source(json!({
            "@timestamp": "2021-03-01T10:00:00.000",
            "block_num": block,
            "trx_id": trx,
            "act": {
                "account": "eosio.token",
                "name": "transfer",
                "data": { "memo": "x".repeat(300) },
                "authorization": [ { "actor": "alice", "permission": "active" } ]
            },
            "notified": ["eosio.token", "alice"],
            "@transfer": { "from": "alice", "to": "bob" }
        }))
        .unwrap()
    }

    #[derive(Default)]
    struct RecordingBackend {
        requests: Mutex<Vec<SearchRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl SearchBackend for RecordingBackend {
        async fn search(&self, request: &SearchRequest) -> Result<SearchHits, StorageError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(StorageError::connection_error("refused"));
            }
            Ok(SearchHits {
                total: json!({ "value": 2, "relation": "eq" }),
                hits: vec![record(90, "t1"), record(120, "t2")],
            })
        }

        fn backend_name(&self) -> &'static str {
            "recording"
        }
    }

    #[derive(Default)]
    struct CountingChain {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChainInfo for CountingChain {
        async fn last_irreversible_block(&self) -> Result<u64, StorageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(100)
        }
    }

    fn engine(backend: Arc<RecordingBackend>, chain: Arc<CountingChain>) -> SearchEngine {
        SearchEngine::new(
            backend,
            chain,
            Arc::new(DefaultMetaMerger),
            SearchConfig {
                chain: "wax".to_string(),
                max_results: 50,
            },
        )
    }

    #[test]
    fn simple_request_end_to_end() {
        let backend = Arc::new(RecordingBackend::default());
        let chain = Arc::new(CountingChain::default());
        let engine = engine(backend.clone(), chain.clone());

        let page = block_on(engine.get_transfers(&RawQuery::parse("symbol=WAX&limit=500&skip=3")))
            .unwrap();

        assert_eq!(page.lib, 0);
        assert_eq!(page.total["value"], 2);
        let Projection::Simple(records) = &page.projection else {
            panic!("expected simple projection");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].transaction_id, "t1");
        assert_eq!(records[0].irreversible, None);
        assert_eq!(records[0].data["to"], "bob");
        assert_eq!(chain.calls.load(Ordering::SeqCst), 0);

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].index, "wax-action-*");
        assert_eq!(requests[0].from, 3);
        assert_eq!(requests[0].size, 50);
    }

    #[test]
    fn check_lib_fetches_once_and_annotates() {
        let backend = Arc::new(RecordingBackend::default());
        let chain = Arc::new(CountingChain::default());
        let engine = engine(backend, chain.clone());

        let page = block_on(engine.get_transfers(&RawQuery::parse("checkLib=true&noBinary=true")))
            .unwrap();

        assert_eq!(page.lib, 100);
        assert_eq!(chain.calls.load(Ordering::SeqCst), 1);
        let Projection::Simple(records) = &page.projection else {
            panic!("expected simple projection");
        };
        assert_eq!(records[0].irreversible, Some(true));
        assert_eq!(records[1].irreversible, Some(false));
        assert_eq!(records[0].data["memo"].as_str().unwrap().len(), 35);
    }

    #[test]
    fn full_mode_returns_actions() {
        let engine = engine(Arc::default(), Arc::default());
        let page = block_on(engine.get_transfers(&RawQuery::parse("simple=false"))).unwrap();
        let Projection::Full(records) = &page.projection else {
            panic!("expected full projection");
        };
        assert_eq!(records[1].trx_id, "t2");
    }

    #[test]
    fn validation_errors_never_reach_backend() {
        let backend = Arc::new(RecordingBackend::default());
        let engine = engine(backend.clone(), Arc::default());

        for (query, parameter) in [
            ("skip=-5", "skip"),
            ("limit=0", "limit"),
            ("sort=up", "sort"),
            ("checkLib=perhaps", "checkLib"),
        ] {
            let err = block_on(engine.get_transfers(&RawQuery::parse(query))).unwrap_err();
            assert!(matches!(err, EngineError::Validation(_)), "{query}");
            assert_eq!(err.parameter(), Some(parameter), "{query}");
        }
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn backend_failure_aborts_request() {
        let backend = Arc::new(RecordingBackend {
            fail: true,
            ..Default::default()
        });
        let engine = engine(backend, Arc::default());
        let err = block_on(engine.get_transfers(&RawQuery::parse("checkLib=1"))).unwrap_err();
        assert!(matches!(err, EngineError::Storage(_)));
        assert_eq!(err.parameter(), None);
    }
}
