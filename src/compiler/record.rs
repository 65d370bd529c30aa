//! Insertion records
//!
//! The unit of the compiler's output: one sanitized row bound for one
//! table, plus the name of the foreign-key field the execution layer must
//! back-fill once the parent row has been inserted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One sanitized row ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertRecord {
    /// Target table
    pub table: String,
    /// Schema-projected, validated, defaulted row
    pub body: Map<String, Value>,
    /// Foreign-key field awaiting the parent row's generated id; `None`
    /// for the root or when the document already supplied a valid value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_link: Option<String>,
}

impl InsertRecord {
    pub fn new(table: impl Into<String>, body: Map<String, Value>) -> Self {
        Self {
            table: table.into(),
            body,
            parent_link: None,
        }
    }
}

/// Ordered sequence of insertion records. A record never precedes its
/// ancestor's record; application order is front to back.
pub type InsertStack = Vec<InsertRecord>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serialization_omits_absent_link() {
        let record = InsertRecord::new("orders", json!({"customer_id": 7}).as_object().cloned().unwrap());
        let text = serde_json::to_string(&record).unwrap();
        assert!(!text.contains("parent_link"));
    }

    #[test]
    fn test_record_serialization_keeps_pending_link() {
        let mut record = InsertRecord::new("items", Map::new());
        record.parent_link = Some("order_id".into());

        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains("\"parent_link\":\"order_id\""));
    }
}
