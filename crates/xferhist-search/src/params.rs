use indexmap::IndexMap;
use url::form_urlencoded;

use crate::error::QueryError;

/// Caller-supplied query parameters, in query-string order.
///
/// The map is never mutated after construction. Components that consume a
/// parameter report it instead, and later stages skip it by exclusion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawQuery {
    params: IndexMap<String, String>,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an application/x-www-form-urlencoded query string.
    /// Example: "act.name=transfer,issue&after=2021-01-01&limit=5"
    ///
    /// A repeated key keeps its first position and its last value.
    pub fn parse(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Value of a parameter, treating an empty value as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All parameters in query-string order, empty values included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Leading integer of a parameter: optional sign then decimal digits,
    /// trailing text ignored. `None` when there are no leading digits.
    ///
    /// `"20abc"` is 20, `"-5x"` is -5, `"1.5"` is 1, `"x1"` is `None`.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(leading_int)
    }

    /// Parse a boolean-like parameter (`true|false|1|0`).
    pub fn flag(&self, name: &str, default: bool) -> Result<bool, QueryError> {
        match self.get(name) {
            None => Ok(default),
            Some("true" | "1") => Ok(true),
            Some("false" | "0") => Ok(false),
            Some(_) => Err(QueryError::invalid_flag(name)),
        }
    }
}

fn leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = IndexMap::new();
        for (k, v) in iter {
            params.insert(k.into(), v.into());
        }
        Self { params }
    }
}

/// Response shaping switches carried on the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFlags {
    /// Compact records (default) or full records.
    pub simple: bool,
    /// Annotate records with reversibility against the chain's LIB.
    pub check_lib: bool,
    /// Truncate oversized string payload fields.
    pub no_binary: bool,
}

impl ResponseFlags {
    pub fn from_query(query: &RawQuery) -> Result<Self, QueryError> {
        Ok(Self {
            simple: query.flag("simple", true)?,
            check_lib: query.flag("checkLib", false)?,
            no_binary: query.flag("noBinary", false)?,
        })
    }
}

impl Default for ResponseFlags {
    fn default() -> Self {
        Self {
            simple: true,
            check_lib: false,
            no_binary: false,
        }
    }
}
