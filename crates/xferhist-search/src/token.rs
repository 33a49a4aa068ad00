//! Token transfer shortcuts.
//!
//! These parameters map to fixed clauses and are reported as consumed so
//! that the generic filter pass never sees them.

use indexmap::IndexSet;

use crate::clause::{BooleanQuery, QueryClause};
use crate::params::RawQuery;

pub const ACTION_ACCOUNT_FIELD: &str = "act.account";
pub const TRANSFER_FROM_FIELD: &str = "@transfer.from";
pub const TRANSFER_TO_FIELD: &str = "@transfer.to";
pub const TRANSFER_SYMBOL_FIELD: &str = "@transfer.symbol";

/// Apply `smAccount`, `canAccount` and `symbol`, in that order.
///
/// Returns the names of the parameters that were applied.
pub fn apply_token_filters(raw: &RawQuery, query: &mut BooleanQuery) -> IndexSet<&'static str> {
    let mut consumed = IndexSet::new();

    if let Some(contract) = raw.get("smAccount") {
        query
            .must
            .push(QueryClause::term(ACTION_ACCOUNT_FIELD, contract));
        consumed.insert("smAccount");
    }

    // either side of the transfer
    if let Some(account) = raw.get("canAccount") {
        query.must.push(QueryClause::Or(vec![
            QueryClause::term(TRANSFER_FROM_FIELD, account),
            QueryClause::term(TRANSFER_TO_FIELD, account),
        ]));
        consumed.insert("canAccount");
    }

    if let Some(symbol) = raw.get("symbol") {
        query
            .must
            .push(QueryClause::term(TRANSFER_SYMBOL_FIELD, symbol));
        consumed.insert("symbol");
    }

    consumed
}
