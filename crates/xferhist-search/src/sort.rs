use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::QueryError;
use crate::params::RawQuery;

/// Monotonic ordering key used when no explicit sort field is requested.
pub const CANONICAL_SORT_FIELD: &str = "global_sequence";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort field and direction as sent to the backend.
///
/// The direction is text because `sortedBy` passes it through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: String,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: direction.into(),
        }
    }

    /// `{"<field>": "<direction>"}`
    pub fn to_value(&self) -> Value {
        let mut sort = Map::new();
        sort.insert(self.field.clone(), Value::String(self.direction.clone()));
        Value::Object(sort)
    }
}

/// Resolve the `sort` parameter: `asc|1`, `desc|-1`, default `desc`.
pub fn get_sort_dir(raw: &RawQuery) -> Result<SortDirection, QueryError> {
    match raw.get("sort") {
        None => Ok(SortDirection::Desc),
        Some("asc" | "1") => Ok(SortDirection::Asc),
        Some("desc" | "-1") => Ok(SortDirection::Desc),
        Some(_) => Err(QueryError::InvalidSortDirection),
    }
}

/// `sortedBy=field:direction` wins; otherwise the canonical field in `direction`.
///
/// A `sortedBy` without a direction part falls back to `direction`.
pub fn resolve_sort(raw: &RawQuery, direction: SortDirection) -> SortSpec {
    match raw.get("sortedBy") {
        Some(sorted_by) => {
            let mut parts = sorted_by.split(':');
            let field = parts.next().unwrap_or_default();
            let dir = parts.next().unwrap_or(direction.as_str());
            SortSpec::new(field, dir)
        }
        None => SortSpec::new(CANONICAL_SORT_FIELD, direction.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dir(value: &str) -> Result<SortDirection, QueryError> {
        get_sort_dir(&RawQuery::new().with_param("sort", value))
    }

    #[test]
    fn default_direction_is_desc() {
        assert_eq!(get_sort_dir(&RawQuery::new()), Ok(SortDirection::Desc));
    }

    #[test]
    fn accepted_directions() {
        assert_eq!(dir("asc"), Ok(SortDirection::Asc));
        assert_eq!(dir("1"), Ok(SortDirection::Asc));
        assert_eq!(dir("desc"), Ok(SortDirection::Desc));
        assert_eq!(dir("-1"), Ok(SortDirection::Desc));
    }

    #[test]
    fn other_directions_are_rejected() {
        for value in ["ASC", "up", "0", "2", "descending"] {
            assert_eq!(dir(value), Err(QueryError::InvalidSortDirection), "{value}");
        }
    }

    #[test]
    fn canonical_sort_uses_global_sequence() {
        let spec = resolve_sort(&RawQuery::new(), SortDirection::Asc);
        assert_eq!(spec.to_value(), json!({ "global_sequence": "asc" }));
    }

    #[test]
    fn sorted_by_passes_direction_through() {
        let raw = RawQuery::new().with_param("sortedBy", "block_num:whatever");
        let spec = resolve_sort(&raw, SortDirection::Desc);
        assert_eq!(spec, SortSpec::new("block_num", "whatever"));
    }

    #[test]
    fn sorted_by_without_direction_uses_resolved_one() {
        let raw = RawQuery::new().with_param("sortedBy", "@timestamp");
        let spec = resolve_sort(&raw, SortDirection::Asc);
        assert_eq!(spec, SortSpec::new("@timestamp", "asc"));
    }
}
