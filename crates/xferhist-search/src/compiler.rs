//! Compiles a [`RawQuery`] into the search request body.
//!
//! Stage order is fixed: pagination, sort direction, token shortcuts,
//! generic filters, time window, total-hits tracking. Validation errors
//! therefore surface in that order as well.

use serde::Serialize;
use serde_json::{Value, json};
use xferhist_storage::SearchRequest;

use crate::clause::BooleanQuery;
use crate::error::QueryError;
use crate::filter::apply_generic_filters;
use crate::pagination::{PageSpec, get_skip_limit};
use crate::params::RawQuery;
use crate::sort::{SortSpec, get_sort_dir, resolve_sort};
use crate::time_window::apply_time_window;
use crate::token::apply_token_filters;

pub const DEFAULT_TRACK_TOTAL_HITS: u64 = 10_000;

/// How precisely the backend should count matching documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TrackTotalHits {
    Bool(bool),
    Count(u64),
}

impl TrackTotalHits {
    /// `track=true|false|<positive integer>`, default 10000. Integers are
    /// read by their leading digits.
    pub fn from_query(raw: &RawQuery) -> Result<Self, QueryError> {
        match raw.get("track") {
            None => Ok(Self::Count(DEFAULT_TRACK_TOTAL_HITS)),
            Some("true") => Ok(Self::Bool(true)),
            Some("false") => Ok(Self::Bool(false)),
            Some(_) => match raw.int("track") {
                Some(n) if n > 0 => Ok(Self::Count(n as u64)),
                _ => Err(QueryError::InvalidTrack),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub page: PageSpec,
    pub track_total_hits: TrackTotalHits,
    pub query: BooleanQuery,
    pub sort: SortSpec,
}

impl CompiledQuery {
    /// `{ track_total_hits, query: { bool: ... }, sort: { field: direction } }`
    pub fn body(&self) -> Value {
        json!({
            "track_total_hits": self.track_total_hits,
            "query": self.query.to_value(),
            "sort": self.sort.to_value(),
        })
    }

    pub fn to_search_request(&self, index: &str, max_results: u64) -> SearchRequest {
        SearchRequest::new(index, self.body())
            .with_page(self.page.skip, self.page.effective_limit(max_results))
    }
}

pub struct QueryCompiler;

impl QueryCompiler {
    pub fn compile(raw: &RawQuery) -> Result<CompiledQuery, QueryError> {
        let page = get_skip_limit(raw)?;
        let direction = get_sort_dir(raw)?;

        let mut query = BooleanQuery::new();
        let consumed = apply_token_filters(raw, &mut query);
        apply_generic_filters(raw, &consumed, &mut query);
        apply_time_window(raw, &mut query);

        let track_total_hits = TrackTotalHits::from_query(raw)?;
        let sort = resolve_sort(raw, direction);

        Ok(CompiledQuery {
            page,
            track_total_hits,
            query,
            sort,
        })
    }
}
