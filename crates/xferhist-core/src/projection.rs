//! Reshapes raw action records into response records.
//!
//! Two projections exist: the compact [`SimpleRecord`] and the full enriched
//! [`ActionRecord`]. Output order always equals input order.

use serde::Serialize;
use serde_json::Value;

use crate::action::ActionRecord;
use crate::meta::ActionMetaMerger;

/// String payload fields longer than this are truncated under `noBinary`.
pub const BINARY_THRESHOLD: usize = 256;
/// Number of leading characters kept from a truncated field.
pub const TRUNCATED_PREFIX: usize = 32;
pub const ELLIPSIS: &str = "...";

/// Compact response record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleRecord {
    pub block: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irreversible: Option<bool>,
    pub timestamp: String,
    pub transaction_id: String,
    pub actors: String,
    pub notified: String,
    pub contract: String,
    pub action: String,
    pub data: Value,
}

/// Projected records, serialized under `simple_actions` or `actions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Projection {
    #[serde(rename = "simple_actions")]
    Simple(Vec<SimpleRecord>),
    #[serde(rename = "actions")]
    Full(Vec<ActionRecord>),
}

impl Projection {
    pub fn len(&self) -> usize {
        match self {
            Self::Simple(records) => records.len(),
            Self::Full(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-request projection switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionOptions {
    pub simple: bool,
    pub no_binary: bool,
    /// Last irreversible block; `Some` only when the caller asked for `checkLib`.
    pub lib: Option<u64>,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            simple: true,
            no_binary: false,
            lib: None,
        }
    }
}

pub struct ResultProjector<'a> {
    merger: &'a dyn ActionMetaMerger,
    options: ProjectionOptions,
}

impl<'a> ResultProjector<'a> {
    pub fn new(merger: &'a dyn ActionMetaMerger, options: ProjectionOptions) -> Self {
        Self { merger, options }
    }

    pub fn project(&self, records: Vec<ActionRecord>) -> Projection {
        let enriched = records.into_iter().map(|mut record| {
            self.merger.merge(&mut record);
            if self.options.no_binary {
                truncate_binary_fields(&mut record.act.data);
            }
            record
        });

        if self.options.simple {
            Projection::Simple(enriched.map(|r| self.to_simple(r)).collect())
        } else {
            Projection::Full(enriched.collect())
        }
    }

    fn to_simple(&self, record: ActionRecord) -> SimpleRecord {
        SimpleRecord {
            block: record.block_num,
            irreversible: self.options.lib.map(|lib| record.block_num < lib),
            actors: record.actors(),
            notified: record.notified.join(","),
            timestamp: record.timestamp,
            transaction_id: record.trx_id,
            contract: record.act.account,
            action: record.act.name,
            data: record.act.data,
        }
    }
}

/// Shortens oversized string fields of an action payload in place.
pub fn truncate_binary_fields(data: &mut Value) {
    let Value::Object(fields) = data else {
        return;
    };
    for value in fields.values_mut() {
        if let Value::String(s) = value
            && s.chars().count() > BINARY_THRESHOLD
        {
            let mut short: String = s.chars().take(TRUNCATED_PREFIX).collect();
            short.push_str(ELLIPSIS);
            *s = short;
        }
    }
}
