//! Integration tests for SqliteLedger
//!
//! These tests verify all ILedger methods using an in-memory SQLite
//! database. Each test function creates a fresh database to ensure test
//! isolation. Durability across reopen is covered with a file-backed
//! database in a temporary directory.

use lnxcrash_core::ports::ILedger;
use lnxcrash_ledger::SqliteLedger;

// ============================================================================
// Test helpers
// ============================================================================

/// Create a fresh in-memory ledger for each test
async fn setup() -> SqliteLedger {
    SqliteLedger::open_in_memory()
        .await
        .expect("Failed to create in-memory ledger")
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Processed flag
// ============================================================================

#[tokio::test]
async fn test_unknown_file_is_not_processed() {
    let ledger = setup().await;

    assert!(!ledger.is_processed("never-seen.crash").await.unwrap());
}

#[tokio::test]
async fn test_mark_and_query_processed() {
    let ledger = setup().await;

    ledger
        .mark_processed(&names(&["a.crash", "b.crash"]))
        .await
        .unwrap();

    assert!(ledger.is_processed("a.crash").await.unwrap());
    assert!(ledger.is_processed("b.crash").await.unwrap());
    assert!(!ledger.is_processed("c.crash").await.unwrap());
}

#[tokio::test]
async fn test_mark_processed_is_idempotent() {
    let ledger = setup().await;

    ledger.mark_processed(&names(&["a.crash"])).await.unwrap();
    ledger.mark_processed(&names(&["a.crash"])).await.unwrap();

    assert!(ledger.is_processed("a.crash").await.unwrap());
    let processed = ledger.processed_names().await.unwrap();
    assert_eq!(processed.len(), 1);
}

#[tokio::test]
async fn test_mark_processed_empty_batch_is_noop() {
    let ledger = setup().await;

    ledger.mark_processed(&[]).await.unwrap();

    assert!(ledger.processed_names().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_processed_names_returns_all_marked() {
    let ledger = setup().await;

    ledger
        .mark_processed(&names(&["a.crash", "b.crash", "c.crash"]))
        .await
        .unwrap();
    // A comment-only row must not show up as processed.
    ledger.store_comment("d.crash", "just a note").await.unwrap();

    let processed = ledger.processed_names().await.unwrap();
    assert_eq!(processed.len(), 3);
    assert!(processed.contains("a.crash"));
    assert!(processed.contains("b.crash"));
    assert!(processed.contains("c.crash"));
    assert!(!processed.contains("d.crash"));
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_store_and_read_comment() {
    let ledger = setup().await;

    ledger
        .store_comment("a.crash", "crashed while saving")
        .await
        .unwrap();

    assert_eq!(
        ledger.comment("a.crash").await.unwrap(),
        Some("crashed while saving".to_string())
    );
    assert_eq!(ledger.comment("b.crash").await.unwrap(), None);
}

#[tokio::test]
async fn test_store_comment_overwrites() {
    let ledger = setup().await;

    ledger.store_comment("a.crash", "first").await.unwrap();
    ledger.store_comment("a.crash", "second").await.unwrap();

    assert_eq!(
        ledger.comment("a.crash").await.unwrap(),
        Some("second".to_string())
    );
}

#[tokio::test]
async fn test_store_comment_does_not_flip_processed_flag() {
    let ledger = setup().await;

    ledger.mark_processed(&names(&["a.crash"])).await.unwrap();
    ledger.store_comment("a.crash", "late comment").await.unwrap();

    assert!(ledger.is_processed("a.crash").await.unwrap());
    assert_eq!(
        ledger.comment("a.crash").await.unwrap(),
        Some("late comment".to_string())
    );
}

#[tokio::test]
async fn test_mark_processed_preserves_comment() {
    let ledger = setup().await;

    ledger
        .store_comment("a.crash", "steps to reproduce")
        .await
        .unwrap();
    ledger.mark_processed(&names(&["a.crash"])).await.unwrap();

    assert!(ledger.is_processed("a.crash").await.unwrap());
    assert_eq!(
        ledger.comment("a.crash").await.unwrap(),
        Some("steps to reproduce".to_string())
    );
}

// ============================================================================
// Durability
// ============================================================================

#[tokio::test]
async fn test_state_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("ledger.db");

    {
        let ledger = SqliteLedger::open(&db_path).await.unwrap();
        ledger.mark_processed(&names(&["a.crash"])).await.unwrap();
        ledger.store_comment("b.crash", "pending note").await.unwrap();
        ledger.close().await;
    }

    let ledger = SqliteLedger::open(&db_path).await.unwrap();

    assert!(ledger.is_processed("a.crash").await.unwrap());
    assert!(!ledger.is_processed("b.crash").await.unwrap());
    assert_eq!(
        ledger.comment("b.crash").await.unwrap(),
        Some("pending note".to_string())
    );
}

#[tokio::test]
async fn test_open_creates_parent_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("deep").join("nested").join("ledger.db");

    let ledger = SqliteLedger::open(&db_path).await.unwrap();
    ledger.mark_processed(&names(&["a.crash"])).await.unwrap();

    assert!(db_path.exists());
}
