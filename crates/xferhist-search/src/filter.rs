//! Generic field filters.
//!
//! # Value syntax
//!
//! ```text
//! lo-hi     range, inclusive bounds
//! a,b       a OR b
//! a,!b      a AND NOT b
//! !a,!b     NOT (a OR b)
//! a b       a AND b (one term per word)
//! !a        NOT a
//! a         a
//! ```
//!
//! Forms are tried in that order, so a value containing a hyphen is always a
//! range, even if it also contains commas or spaces.

use indexmap::IndexSet;

use crate::clause::{BooleanQuery, QueryClause};
use crate::fields::{FilterField, resolve_filter_fields};
use crate::params::RawQuery;

const NEGATION: char = '!';

/// Parse `lower-upper` into a range clause, or `None` without a hyphen.
///
/// The lower bound is the text before the first hyphen and the upper bound
/// the text between the first and second hyphen; anything after a second
/// hyphen is dropped. `-5-10` therefore becomes `["", "5"]`.
pub fn parse_range(field: &str, value: &str) -> Option<QueryClause> {
    if !value.contains('-') {
        return None;
    }
    let mut parts = value.split('-');
    let lower = parts.next().unwrap_or_default();
    let upper = parts.next().unwrap_or_default();
    Some(QueryClause::range(field, lower, upper))
}

/// OR across positive tokens, OR across negated tokens, AND NOT between them.
pub fn resolve_multi_values(query: &mut BooleanQuery, field: &str, tokens: &[&str]) {
    let (negated, positive): (Vec<&str>, Vec<&str>) =
        tokens.iter().copied().partition(|t| t.starts_with(NEGATION));
    let negated: Vec<&str> = negated
        .into_iter()
        .map(|t| t.strip_prefix(NEGATION).unwrap_or(t))
        .collect();

    if let Some(clause) = group(field, &positive) {
        query.must.push(clause);
    }
    if let Some(clause) = group(field, &negated) {
        query.must_not.push(clause);
    }
}

fn group(field: &str, values: &[&str]) -> Option<QueryClause> {
    match values {
        [] => None,
        [single] => Some(QueryClause::term(field, *single)),
        many => Some(QueryClause::any_of(field, many.iter().copied())),
    }
}

/// Append the clauses for one filter field.
pub fn translate_field(query: &mut BooleanQuery, field: &FilterField<'_>) {
    let key = field.storage_key.as_str();
    let value = field.value;

    if let Some(range) = parse_range(key, value) {
        query.must.push(range);
        return;
    }

    let alternatives: Vec<&str> = value.split(',').collect();
    if alternatives.len() > 1 {
        resolve_multi_values(query, key, &alternatives);
        return;
    }

    let words: Vec<&str> = value.split(' ').collect();
    if words.len() > 1 {
        query
            .must
            .extend(words.into_iter().map(|w| QueryClause::term(key, w)));
        return;
    }

    match value.strip_prefix(NEGATION) {
        Some(negated) => query.must_not.push(QueryClause::term(key, negated)),
        None => query.must.push(QueryClause::term(key, value)),
    }
}

/// Translate every filter parameter that was not consumed by an earlier stage.
pub fn apply_generic_filters(
    raw: &RawQuery,
    consumed: &IndexSet<&'static str>,
    query: &mut BooleanQuery,
) {
    for field in resolve_filter_fields(raw, consumed) {
        translate_field(query, &field);
    }
}
