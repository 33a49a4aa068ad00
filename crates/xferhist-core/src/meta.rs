//! Metadata enrichment of action records.
//!
//! The indexer stores decoded action fields for well-known actions under a
//! derived top-level key (`@transfer`, `@newaccount`, ...). Merging folds
//! that object back into `act.data` before a record is projected.

use serde_json::Value;

use crate::action::ActionRecord;

/// Enriches an action record in place before projection.
pub trait ActionMetaMerger: Send + Sync {
    fn merge(&self, record: &mut ActionRecord);
}

/// Folds `@<action name>` into `act.data` and sets `timestamp` from
/// `@timestamp`.
///
/// Keys already present in `act.data` win over the derived object; a stored
/// `timestamp` field is always replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMetaMerger;

impl ActionMetaMerger for DefaultMetaMerger {
    fn merge(&self, record: &mut ActionRecord) {
        let key = format!("@{}", record.act.name);
        if matches!(record.extra.get(&key), Some(Value::Object(_)))
            && let Some(Value::Object(meta)) = record.extra.remove(&key)
        {
            match &mut record.act.data {
                Value::Object(data) => {
                    for (k, v) in meta {
                        data.entry(k).or_insert(v);
                    }
                }
                Value::Null => record.act.data = Value::Object(meta),
                // opaque payloads (hex strings) stay as indexed
                _ => {}
            }
        }

        record.extra.insert(
            "timestamp".to_string(),
            Value::String(record.timestamp.clone()),
        );
    }
}
