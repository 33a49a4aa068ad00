//! Historical action records as stored by the search backend.
//!
//! Only the fields the projector reads are typed. Everything else is kept in
//! `extra` maps so that full-mode responses return the record as indexed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

/// One `actor@permission` pair from an action's authorization list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub actor: String,
    pub permission: String,
}

impl std::fmt::Display for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.actor, self.permission)
    }
}

/// The `act` object of a record: contract, action name, payload and signers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub account: String,
    pub name: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub authorization: Vec<Authorization>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A raw historical action record (the `_source` of a search hit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    pub block_num: u64,
    pub trx_id: String,
    pub act: ActionDescriptor,
    #[serde(default)]
    pub notified: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_sequence: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActionRecord {
    /// Build a record from a search hit `_source` document.
    pub fn from_source(source: Value) -> Result<Self> {
        if !source.is_object() {
            return Err(CoreError::invalid_record("hit source is not a JSON object"));
        }
        serde_json::from_value(source).map_err(|e| CoreError::invalid_record(e.to_string()))
    }

    /// Comma-joined `actor@permission` list, in authorization order.
    pub fn actors(&self) -> String {
        self.act
            .authorization
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "@timestamp": "2021-03-01T10:00:00.000",
            "block_num": 120,
            "trx_id": "abc123",
            "act": {
                "account": "eosio.token",
                "name": "transfer",
                "data": { "memo": "hi" },
                "authorization": [
                    { "actor": "a", "permission": "active" },
                    { "actor": "b", "permission": "owner" }
                ]
            },
            "notified": ["eosio.token", "alice"],
            "global_sequence": 777,
            "cpu_usage_us": 150,
            "@transfer": { "from": "alice", "to": "bob" }
        })
    }

    #[test]
    fn parses_typed_and_passthrough_fields() {
        let record = ActionRecord::from_source(sample()).unwrap();
        assert_eq!(record.block_num, 120);
        assert_eq!(record.act.account, "eosio.token");
        assert_eq!(record.notified, vec!["eosio.token", "alice"]);
        assert_eq!(record.global_sequence, Some(777));
        assert_eq!(record.extra.get("cpu_usage_us"), Some(&json!(150)));
        assert!(record.extra.contains_key("@transfer"));
    }

    #[test]
    fn actors_preserve_authorization_order() {
        let record = ActionRecord::from_source(sample()).unwrap();
        assert_eq!(record.actors(), "a@active,b@owner");
    }

    #[test]
    fn serializing_keeps_passthrough_fields() {
        let record = ActionRecord::from_source(sample()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["@timestamp"], "2021-03-01T10:00:00.000");
        assert_eq!(value["cpu_usage_us"], 150);
        assert_eq!(value["act"]["authorization"][1]["actor"], "b");
    }

    #[test]
    fn rejects_non_object_source() {
        let err = ActionRecord::from_source(json!([1, 2])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { .. }));
    }

    #[test]
    fn rejects_record_without_act() {
        let err = ActionRecord::from_source(json!({
            "@timestamp": "2021-03-01T10:00:00.000",
            "block_num": 1,
            "trx_id": "x"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("act"));
    }
}
