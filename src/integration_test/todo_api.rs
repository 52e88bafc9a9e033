use super::test_util;
use crate::api::test_util::{deserialize_body, error_code_of};
use crate::persistence::ExternalConnectivity;
use crate::persistence::db_todo_driven_ports::TODO_COLLECTION;
use crate::{SharedData, build_router, dto};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use mongodb::Database;
use mongodb::bson::{Document, doc};
use std::sync::Arc;
use tower::ServiceExt;

async fn seed_todos(db: &Database) {
    let todos: Vec<Document> = [
        ("TestOne", true, "one"),
        ("TestTwo", true, "two"),
        ("TestThree", false, "three"),
        ("TestFour", false, "four"),
    ]
    .into_iter()
    .map(|(owner, status, number)| {
        doc! {
            "owner": owner,
            "status": status,
            "body": format!("This is the test {number}"),
            "category": format!("test {number}"),
        }
    })
    .collect();

    db.collection::<Document>(TODO_COLLECTION)
        .insert_many(todos)
        .await
        .expect("Failed to seed todos");
}

async fn stored_todo_count(db: &Database) -> u64 {
    db.collection::<Document>(TODO_COLLECTION)
        .count_documents(doc! {})
        .await
        .expect("Failed to count todos")
}

fn router_for(db: &Database) -> Router {
    build_router(Arc::new(SharedData {
        ext_cxn: ExternalConnectivity::new(db.clone()),
    }))
}

async fn send(db: &Database, method: &str, uri: &str, body: Option<&str>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |json| Body::from(json.to_owned())))
        .expect("Failed to build request");

    router_for(db)
        .oneshot(request)
        .await
        .expect("Router failed to respond")
}

async fn list_owners(db: &Database, uri: &str) -> Vec<String> {
    let response = send(db, "GET", uri, None).await;
    assert_eq!(StatusCode::OK, response.status());

    let todos: Vec<dto::Todo> = deserialize_body(response.into_body()).await;
    todos.into_iter().map(|todo| todo.owner).collect()
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn filters_by_status() {
    test_util::prepare_db_and_test(|db| async move {
        seed_todos(&db).await;

        let mut owners = list_owners(&db, "/api/todos?status=true").await;
        owners.sort();
        assert_eq!(["TestOne", "TestTwo"], owners.as_slice());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn combines_status_and_category_filters() {
    test_util::prepare_db_and_test(|db| async move {
        seed_todos(&db).await;

        let owners = list_owners(&db, "/api/todos?status=true&category=test%20two").await;
        assert_eq!(["TestTwo"], owners.as_slice());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn text_filters_are_literal_and_ignore_case() {
    test_util::prepare_db_and_test(|db| async move {
        seed_todos(&db).await;

        let owners = list_owners(&db, "/api/todos?owner=TESTO").await;
        assert_eq!(["TestOne"], owners.as_slice());

        let owners = list_owners(&db, "/api/todos?owner=Test.*").await;
        assert!(owners.is_empty(), "pattern matched: {owners:?}");
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn sorts_by_requested_field() {
    test_util::prepare_db_and_test(|db| async move {
        seed_todos(&db).await;

        let owners = list_owners(&db, "/api/todos?sortby=owner&sortorder=desc").await;
        assert_eq!(["TestTwo", "TestThree", "TestOne", "TestFour"], owners.as_slice());

        let owners = list_owners(&db, "/api/todos?sortby=owner").await;
        assert_eq!(["TestFour", "TestOne", "TestThree", "TestTwo"], owners.as_slice());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn created_todo_can_be_fetched() {
    test_util::prepare_db_and_test(|db| async move {
        let response = send(
            &db,
            "POST",
            "/api/todos",
            Some(r#"{"owner": "TestFive", "status": true, "body": "This is test five", "category": "test five"}"#),
        )
        .await;
        assert_eq!(StatusCode::OK, response.status());
        let inserted: dto::InsertedTodo = deserialize_body(response.into_body()).await;

        let response = send(&db, "GET", &format!("/api/todos/{}", inserted.id), None).await;
        assert_eq!(StatusCode::OK, response.status());
        let fetched: dto::Todo = deserialize_body(response.into_body()).await;
        assert_eq!(
            dto::Todo {
                id: inserted.id,
                owner: "TestFive".to_owned(),
                status: true,
                body: "This is test five".to_owned(),
                category: "test five".to_owned(),
            },
            fetched
        );
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn invalid_todo_is_not_stored() {
    test_util::prepare_db_and_test(|db| async move {
        seed_todos(&db).await;

        let response = send(
            &db,
            "POST",
            "/api/todos",
            Some(r#"{"owner": "TestFive", "status": true, "body": "", "category": "test five"}"#),
        )
        .await;
        let (status, error_code) = error_code_of(response).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("invalid_input", error_code);
        assert_eq!(4, stored_todo_count(&db).await);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn missing_todo_is_not_found() {
    test_util::prepare_db_and_test(|db| async move {
        seed_todos(&db).await;

        let response = send(&db, "GET", "/api/todos/58af3a600343927e48e87335", None).await;
        let (status, error_code) = error_code_of(response).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("not_found", error_code);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn delete_is_idempotent() {
    test_util::prepare_db_and_test(|db| async move {
        let response = send(
            &db,
            "POST",
            "/api/todos",
            Some(r#"{"owner": "TestFive", "status": false, "body": "Doomed", "category": "test five"}"#),
        )
        .await;
        let inserted: dto::InsertedTodo = deserialize_body(response.into_body()).await;
        seed_todos(&db).await;
        let todo_uri = format!("/api/todos/{}", inserted.id);

        let response = send(&db, "DELETE", &todo_uri, None).await;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!(4, stored_todo_count(&db).await);

        let response = send(&db, "GET", &todo_uri, None).await;
        assert_eq!(StatusCode::NOT_FOUND, response.status());

        let response = send(&db, "DELETE", &todo_uri, None).await;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!(4, stored_todo_count(&db).await);
    });
}
