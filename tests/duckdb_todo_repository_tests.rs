use chrono::Utc;
use todolist::{DuckdbTodoRepository, Todo, TransactionManager, TransactionMode};

#[tokio::test]
async fn duckdb_transaction_roundtrip_insert_and_find() {
    let store = DuckdbTodoRepository::in_memory().expect("duckdb init");
    let todo = Todo::new("Buy milk");

    let tx = store.begin(TransactionMode::ReadWrite).await.expect("begin");
    tx.insert(&todo).await.expect("insert");
    tx.commit().await.expect("commit");

    let tx = store.begin(TransactionMode::ReadOnly).await.expect("begin");
    let found = tx
        .find_by_id(todo.id())
        .await
        .expect("find_by_id")
        .expect("todo exists");
    assert_eq!(found, todo);
    assert_eq!(tx.count_unfinished().await.expect("count"), 1);
    assert!(tx.find_by_id("missing").await.expect("find_by_id").is_none());
}

#[tokio::test]
async fn duckdb_insert_duplicate_id_is_storage_error() {
    let store = DuckdbTodoRepository::in_memory().expect("duckdb init");
    let todo = Todo::new("A");

    let tx = store.begin(TransactionMode::ReadWrite).await.expect("begin");
    tx.insert(&todo).await.expect("insert");
    let err = tx.insert(&todo).await.expect_err("duplicate");

    assert!(err.is_storage_error());
}

#[tokio::test]
async fn duckdb_update_missing_is_storage_error() {
    let store = DuckdbTodoRepository::in_memory().expect("duckdb init");

    let tx = store.begin(TransactionMode::ReadWrite).await.expect("begin");
    let err = tx.update(&Todo::new("ghost")).await.expect_err("missing");

    assert!(err.is_storage_error());
}

#[tokio::test]
async fn duckdb_rollback_discards_writes() {
    let store = DuckdbTodoRepository::in_memory().expect("duckdb init");

    let tx = store.begin(TransactionMode::ReadWrite).await.expect("begin");
    tx.insert(&Todo::new("A")).await.expect("insert");
    tx.rollback().await.expect("rollback");

    {
        let tx = store.begin(TransactionMode::ReadWrite).await.expect("begin");
        tx.insert(&Todo::new("B")).await.expect("insert");
        // dropped without commit
    }

    let tx = store.begin(TransactionMode::ReadOnly).await.expect("begin");
    assert!(tx.find_all().await.expect("find_all").is_empty());
}

#[tokio::test]
async fn duckdb_update_and_list_in_creation_order() {
    let store = DuckdbTodoRepository::in_memory().expect("duckdb init");
    let first = Todo::reconstitute(
        "b".to_string(),
        "first".to_string(),
        false,
        Utc::now() - chrono::Duration::seconds(10),
    );
    let mut second = Todo::new("second");

    let tx = store.begin(TransactionMode::ReadWrite).await.expect("begin");
    tx.insert(&second).await.expect("insert second");
    tx.insert(&first).await.expect("insert first");
    second.mark_finished();
    tx.update(&second).await.expect("update");
    tx.commit().await.expect("commit");

    let tx = store.begin(TransactionMode::ReadOnly).await.expect("begin");
    let todos = tx.find_all().await.expect("find_all");
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].id(), "b");
    assert!(todos[1].is_finished());
    assert_eq!(tx.count_unfinished().await.expect("count"), 1);
}

#[tokio::test]
async fn duckdb_read_only_transaction_rejects_writes() {
    let store = DuckdbTodoRepository::in_memory().expect("duckdb init");

    let tx = store.begin(TransactionMode::ReadOnly).await.expect("begin");
    let err = tx.delete_by_id("any").await.expect_err("read-only");

    assert!(err.is_storage_error());
}
