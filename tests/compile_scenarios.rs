//! End-to-end compilation scenarios
//!
//! Each test drives `StackCompiler::compile` over a seeded in-memory
//! store, covering the happy path and every hard-failure kind.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use rowstack::compiler::{CompileError, StackCompiler};
use rowstack::document::default_date;
use rowstack::schema::TableSchema;
use rowstack::store::InMemoryStore;

// =============================================================================
// Helper Functions
// =============================================================================

fn as_map(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

/// Order domain: orders (with a customer reference and nested items) and
/// users (with a unique email).
fn seeded_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();

    store
        .register_schema(
            TableSchema::new("orders", vec!["customer_id", "warehouse_id", "date"])
                .with_required(vec!["customer_id", "date"])
                .with_id_fields(vec!["customer_id", "warehouse_id"])
                .with_tables(vec!["items"]),
        )
        .unwrap();
    store
        .register_schema(
            TableSchema::new("items", vec!["sku", "qty", "order_id"])
                .with_required(vec!["sku", "qty"]),
        )
        .unwrap();
    store
        .register_schema(
            TableSchema::new("users", vec!["name", "email", "password", "date"])
                .with_required(vec!["name", "email"])
                .with_unique(vec!["email"]),
        )
        .unwrap();

    store.insert_row("customers", as_map(json!({"id": 7}))).unwrap();
    store
        .insert_row("users", as_map(json!({"name": "Ada", "email": "a@b.com"})))
        .unwrap();

    store
}

fn compiler() -> StackCompiler {
    let store = Arc::new(seeded_store());
    StackCompiler::new(store.clone(), store.clone(), store)
}

// =============================================================================
// Scenario A: happy path
// =============================================================================

#[tokio::test]
async fn test_order_with_items_compiles_to_two_records() {
    let compiler = compiler();

    let body = json!({
        "customer_id": 7,
        "items": [{"sku": "A1", "qty": 2}]
    });

    let stack = compiler.compile("orders", &body).await.unwrap();

    assert_eq!(stack.len(), 2);

    assert_eq!(stack[0].table, "orders");
    assert_eq!(stack[0].body.get("customer_id"), Some(&json!(7)));
    assert_eq!(stack[0].body.get("date"), Some(&json!(default_date())));
    assert_eq!(stack[0].parent_link, None);

    assert_eq!(stack[1].table, "items");
    assert_eq!(stack[1].body.get("sku"), Some(&json!("A1")));
    assert_eq!(stack[1].body.get("qty"), Some(&json!(2)));
    // order_id is pending: the execution layer back-fills it
    assert!(!stack[1].body.contains_key("order_id"));
    assert_eq!(stack[1].parent_link, Some("order_id".to_string()));
}

// =============================================================================
// Scenario B: missing required field
// =============================================================================

#[tokio::test]
async fn test_missing_customer_rejects_whole_document() {
    let compiler = compiler();

    let err = compiler
        .compile("orders", &json!({"items": []}))
        .await
        .unwrap_err();

    match err {
        CompileError::MissingRequired {
            table,
            required,
            missing,
        } => {
            assert_eq!(table, "orders");
            assert_eq!(required, vec!["customer_id", "date"]);
            assert_eq!(missing, vec!["customer_id"]);
        }
        other => panic!("expected MissingRequired, got {:?}", other),
    }
}

// =============================================================================
// Scenario C: uniqueness collision
// =============================================================================

#[tokio::test]
async fn test_taken_email_rejects_user() {
    let compiler = compiler();

    let err = compiler
        .compile("users", &json!({"name": "Eve", "email": "a@b.com"}))
        .await
        .unwrap_err();

    match err {
        CompileError::UniqueConflict {
            table,
            unique,
            colliding,
        } => {
            assert_eq!(table, "users");
            assert_eq!(unique, vec!["email"]);
            assert_eq!(colliding, vec!["email"]);
        }
        other => panic!("expected UniqueConflict, got {:?}", other),
    }
}

// =============================================================================
// Scenario D: dangling reference degrades to an absent field
// =============================================================================

#[tokio::test]
async fn test_dangling_warehouse_reference_dropped() {
    let compiler = compiler();

    let body = json!({"customer_id": 7, "warehouse_id": 999});
    let stack = compiler.compile("orders", &body).await.unwrap();

    assert_eq!(stack.len(), 1);
    assert_eq!(stack[0].body.get("customer_id"), Some(&json!(7)));
    assert!(!stack[0].body.contains_key("warehouse_id"));
}

// =============================================================================
// Scenario E: nested failure voids the valid root
// =============================================================================

#[tokio::test]
async fn test_invalid_item_voids_valid_order() {
    let compiler = compiler();

    let body = json!({
        "customer_id": 7,
        "items": [
            {"sku": "A1", "qty": 2},
            {"sku": "B2"}
        ]
    });

    let err = compiler.compile("orders", &body).await.unwrap_err();

    match err {
        CompileError::MissingRequired { table, missing, .. } => {
            assert_eq!(table, "items");
            assert_eq!(missing, vec!["qty"]);
        }
        other => panic!("expected MissingRequired from the nested item, got {:?}", other),
    }
}

// =============================================================================
// Rejection vs fault classification at the boundary
// =============================================================================

#[tokio::test]
async fn test_hard_failures_classify_as_rejections() {
    let compiler = compiler();

    let err = compiler.compile("orders", &json!({})).await.unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(err.code(), "MISSING_REQUIRED_FIELDS");

    let err = compiler.compile("nonexistent", &json!({})).await.unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(err.code(), "UNKNOWN_TABLE");
}
