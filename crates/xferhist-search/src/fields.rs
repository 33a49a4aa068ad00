//! Which query parameters are filters, and where they live in the index.
//!
//! A parameter is a filter when its name is qualified (contains a dot) or
//! is one of the top-level [`PRIMARY_TERMS`]. Qualified names whose first
//! segment is one of [`EXTENDED_ACTIONS`] are stored under a derived
//! `@<action>` namespace and get an `@` prefix.

use indexmap::IndexSet;

use crate::params::RawQuery;

/// Top-level record fields that may be filtered on directly.
pub const PRIMARY_TERMS: &[&str] = &[
    "notified",
    "block_num",
    "global_sequence",
    "producer",
    "@timestamp",
    "creator_action_ordinal",
    "action_ordinal",
    "cpu_usage_us",
    "net_usage_words",
    "trx_id",
];

/// Actions whose decoded data is materialized under `@<action>`.
pub const EXTENDED_ACTIONS: &[&str] = &[
    "transfer",
    "newaccount",
    "updateauth",
    "buyram",
    "buyrambytes",
    "delegatebw",
    "undelegatebw",
];

/// A filter-eligible parameter resolved to its storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField<'q> {
    /// Parameter name as supplied by the caller.
    pub param: &'q str,
    /// Field name in the index.
    pub storage_key: String,
    /// Raw filter expression.
    pub value: &'q str,
}

/// Storage key for a parameter name, or `None` if it is not a filter.
pub fn storage_key(name: &str) -> Option<String> {
    match name.split_once('.') {
        Some((namespace, _)) if EXTENDED_ACTIONS.contains(&namespace) => Some(format!("@{name}")),
        Some(_) => Some(name.to_string()),
        None if PRIMARY_TERMS.contains(&name) => Some(name.to_string()),
        None => None,
    }
}

/// Resolve every filter parameter not in `consumed`, in query order.
pub fn resolve_filter_fields<'q>(
    query: &'q RawQuery,
    consumed: &IndexSet<&'static str>,
) -> Vec<FilterField<'q>> {
    query
        .iter()
        .filter(|(name, _)| !consumed.contains(*name))
        .filter_map(|(param, value)| {
            storage_key(param).map(|storage_key| FilterField {
                param,
                storage_key,
                value,
            })
        })
        .collect()
}
