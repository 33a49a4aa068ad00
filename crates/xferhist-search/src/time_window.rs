use crate::clause::{BooleanQuery, QueryClause};
use crate::params::RawQuery;

pub const TIMESTAMP_FIELD: &str = "@timestamp";
const OPEN_START: &str = "0";
const OPEN_END: &str = "now";

/// Append a UTC marker unless the value already ends with one.
fn with_zone(value: &str) -> String {
    if value.ends_with('Z') {
        value.to_string()
    } else {
        format!("{value}Z")
    }
}

/// Restrict results to `[after, before]` as a non-scoring filter.
///
/// Missing ends default to `0` and `now`; those defaults are not zone-completed.
pub fn apply_time_window(raw: &RawQuery, query: &mut BooleanQuery) {
    let after = raw.get("after");
    let before = raw.get("before");
    if after.is_none() && before.is_none() {
        return;
    }

    let gte = after.map_or_else(|| OPEN_START.to_string(), with_zone);
    let lte = before.map_or_else(|| OPEN_END.to_string(), with_zone);
    query
        .filter
        .push(QueryClause::range(TIMESTAMP_FIELD, gte, lte));
}
