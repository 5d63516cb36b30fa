//! End-to-end behaviour of the todo service over both storage backends.

use std::sync::Arc;

use tempfile::tempdir;
use todolist::{
    DuckdbTodoRepository, InMemoryTodoRepository, TodoService, TodoServiceConfig,
    TransactionManager,
};

fn build_service(store: Arc<dyn TransactionManager>, max_unfinished: u64) -> TodoService {
    TodoService::new(store, TodoServiceConfig { max_unfinished })
}

async fn run_limit_scenario(service: &TodoService) {
    let mut created = Vec::new();
    for title in ["A", "B", "C", "D", "E"] {
        created.push(service.create(title).await.expect("create within limit"));
    }

    let err = service.create("F").await.expect_err("sixth create over limit");
    assert!(err.is_business_rule_violation());
    assert_eq!(service.find_all().await.expect("find_all").len(), 5);

    let finished = service.finish(created[0].id()).await.expect("finish A");
    assert!(finished.is_finished());

    let sixth = service.create("F").await.expect("create after finishing A");
    assert!(!sixth.is_finished());
    assert_eq!(service.find_all().await.expect("find_all").len(), 6);
}

#[tokio::test]
async fn limit_scenario_in_memory() {
    let service = build_service(Arc::new(InMemoryTodoRepository::new()), 5);
    run_limit_scenario(&service).await;
}

#[tokio::test]
async fn limit_scenario_duckdb() {
    let dir = tempdir().expect("tempdir");
    let store = DuckdbTodoRepository::new(&dir.path().join("todolist.duckdb")).expect("duckdb init");
    let service = build_service(Arc::new(store), 5);
    run_limit_scenario(&service).await;
}

#[tokio::test]
async fn duckdb_todos_survive_reopen() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("todolist.duckdb");

    let created = {
        let service = build_service(Arc::new(DuckdbTodoRepository::new(&db_path).expect("open")), 5);
        let todo = service.create("Persist me").await.expect("create");
        service.finish(todo.id()).await.expect("finish")
    };

    let service = build_service(Arc::new(DuckdbTodoRepository::new(&db_path).expect("reopen")), 5);
    let reloaded = service.find_one(created.id()).await.expect("find_one");

    assert_eq!(reloaded, created);
}

#[tokio::test]
async fn duckdb_delete_then_find_is_not_found() {
    let store = DuckdbTodoRepository::in_memory().expect("duckdb init");
    let service = build_service(Arc::new(store), 5);

    let todo = service.create("Temporary").await.expect("create");
    service.delete(todo.id()).await.expect("delete");

    let err = service.find_one(todo.id()).await.expect_err("deleted");
    assert!(err.is_not_found());
    assert!(service.delete(todo.id()).await.expect_err("deleted").is_not_found());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_never_exceed_limit() {
    let service = Arc::new(build_service(Arc::new(InMemoryTodoRepository::new()), 5));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.create(&format!("todo {}", i)).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => succeeded += 1,
            Err(e) => assert!(e.is_business_rule_violation()),
        }
    }

    assert_eq!(succeeded, 5);
    assert_eq!(service.find_all().await.expect("find_all").len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_never_exceed_limit_duckdb() {
    let store = DuckdbTodoRepository::in_memory().expect("duckdb init");
    let service = Arc::new(build_service(Arc::new(store), 3));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.create(&format!("todo {}", i)).await })
        })
        .collect();

    for handle in handles {
        let _ = handle.await.expect("task panicked");
    }

    assert_eq!(service.find_all().await.expect("find_all").len(), 3);
}
