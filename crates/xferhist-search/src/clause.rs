//! Boolean query model handed to the search backend.
//!
//! Clauses render to the backend's query DSL:
//!
//! ```text
//! Term  -> {"term":  {"<field>": "<value>"}}
//! Range -> {"range": {"<field>": {"gte": "<lower>", "lte": "<upper>"}}}
//! Or    -> {"bool":  {"should": [ ... ]}}
//! ```

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// A single match clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryClause {
    /// Exact equality on one field.
    Term { field: String, value: String },
    /// Inclusive bounds on one field. Bounds are kept verbatim.
    Range {
        field: String,
        gte: String,
        lte: String,
    },
    /// Matches when any of the inner clauses matches.
    Or(Vec<QueryClause>),
}

impl QueryClause {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(field: impl Into<String>, gte: impl Into<String>, lte: impl Into<String>) -> Self {
        Self::Range {
            field: field.into(),
            gte: gte.into(),
            lte: lte.into(),
        }
    }

    /// OR of one term per value, all on the same field.
    pub fn any_of<'a>(field: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        Self::Or(values.into_iter().map(|v| Self::term(field, v)).collect())
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Term { field, value } => {
                let mut inner = Map::new();
                inner.insert(field.clone(), Value::String(value.clone()));
                json!({ "term": inner })
            }
            Self::Range { field, gte, lte } => {
                let mut inner = Map::new();
                inner.insert(field.clone(), json!({ "gte": gte, "lte": lte }));
                json!({ "range": inner })
            }
            Self::Or(clauses) => {
                let should: Vec<Value> = clauses.iter().map(Self::to_value).collect();
                json!({ "bool": { "should": should } })
            }
        }
    }
}

impl Serialize for QueryClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// `must` and `must_not` take part in scoring; `filter` never does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanQuery {
    pub must: Vec<QueryClause>,
    pub must_not: Vec<QueryClause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<QueryClause>,
    pub boost: f64,
}

impl BooleanQuery {
    pub fn new() -> Self {
        Self {
            must: Vec::new(),
            must_not: Vec::new(),
            filter: Vec::new(),
            boost: 1.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.must_not.is_empty() && self.filter.is_empty()
    }

    /// The `{"bool": {...}}` wrapper used as the top-level `query`.
    pub fn to_value(&self) -> Value {
        json!({ "bool": self })
    }
}

impl Default for BooleanQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_renders_field_value() {
        let c = QueryClause::term("act.name", "transfer");
        assert_eq!(c.to_value(), json!({ "term": { "act.name": "transfer" } }));
    }

    #[test]
    fn range_renders_inclusive_bounds() {
        let c = QueryClause::range("global_sequence", "100", "200");
        assert_eq!(
            c.to_value(),
            json!({ "range": { "global_sequence": { "gte": "100", "lte": "200" } } })
        );
    }

    #[test]
    fn or_renders_should_list() {
        let c = QueryClause::any_of("act.name", ["transfer", "issue"]);
        assert_eq!(
            c.to_value(),
            json!({ "bool": { "should": [
                { "term": { "act.name": "transfer" } },
                { "term": { "act.name": "issue" } }
            ] } })
        );
    }

    #[test]
    fn empty_filter_is_omitted() {
        let mut q = BooleanQuery::new();
        q.must.push(QueryClause::term("producer", "eosnation"));
        assert!(!q.is_empty());
        assert_eq!(
            q.to_value(),
            json!({ "bool": {
                "must": [ { "term": { "producer": "eosnation" } } ],
                "must_not": [],
                "boost": 1.0
            } })
        );
    }

    #[test]
    fn filter_is_rendered_when_present() {
        let mut q = BooleanQuery::new();
        q.filter.push(QueryClause::range("@timestamp", "0", "now"));
        let v = q.to_value();
        assert_eq!(v["bool"]["filter"][0]["range"]["@timestamp"]["lte"], "now");
    }
}
