use crate::error::QueryError;
use crate::params::RawQuery;

pub const DEFAULT_LIMIT: u64 = 10;

/// Validated page window. The backend maximum is applied separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub skip: u64,
    pub limit: u64,
}

impl PageSpec {
    /// `min(limit, max)`
    pub fn effective_limit(&self, max: u64) -> u64 {
        self.limit.min(max)
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Validate `skip` (>= 0) and `limit` (>= 1).
///
/// Values are read by their leading integer; values without one fall back
/// to the defaults.
pub fn get_skip_limit(raw: &RawQuery) -> Result<PageSpec, QueryError> {
    let mut page = PageSpec::default();

    if let Some(skip) = raw.int("skip") {
        page.skip = u64::try_from(skip).map_err(|_| QueryError::InvalidSkip)?;
    }
    if let Some(limit) = raw.int("limit") {
        if limit < 1 {
            return Err(QueryError::InvalidLimit);
        }
        page.limit = limit as u64;
    }

    Ok(page)
}
