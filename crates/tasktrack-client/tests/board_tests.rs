/*
[INPUT]:  Mock task API and a TaskBoard
[OUTPUT]: Verification of reload-after-write, failure isolation and single-flight
[POS]:    Integration tests - task list screen state
[UPDATE]: When board actions or refresh policy change
*/

use std::time::Duration;

use tasktrack_adapter::{ClientConfig, SessionStore, TaskStatus, TasktrackClient, TasktrackError};
use tasktrack_client::TaskBoard;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn board_for(server: &MockServer) -> TaskBoard {
    let session = SessionStore::in_memory();
    session.set_token("abc123").unwrap();
    let client =
        TasktrackClient::with_config(ClientConfig::default().with_base_url(server.uri()), session)
            .unwrap();
    TaskBoard::new(client)
}

fn task_json(id: i64, title: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": format!("{title} details"),
        "status": status,
    })
}

async fn count(server: &MockServer, verb: &str, url_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|req| req.method.as_str() == verb && req.url.path() == url_path)
        .count()
}

#[tokio::test]
async fn test_create_is_followed_by_exactly_one_reload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(header("authorization", "Bearer abc123"))
        .and(body_json(serde_json::json!({
            "title": "Buy milk",
            "description": "Two litres",
            "status": "IN_PROGRESS",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(1, "Buy milk", "IN_PROGRESS")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([task_json(1, "Buy milk", "IN_PROGRESS")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let board = board_for(&server);
    let tasks = assert_ok!(board.create("Buy milk", "Two litres").await);

    assert_eq!(tasks.len(), 1);
    assert_eq!(board.tasks(), tasks);
    assert!(board.last_refreshed().is_some());
}

#[tokio::test]
async fn test_toggle_then_reload_shows_server_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([task_json(4, "Write", "IN_PROGRESS")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([task_json(4, "Write", "COMPLETED")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/tasks/4"))
        .and(body_json(serde_json::json!({
            "title": "Write",
            "description": "Write details",
            "status": "COMPLETED",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json(4, "Write", "COMPLETED")))
        .expect(1)
        .mount(&server)
        .await;

    let board = board_for(&server);
    assert_ok!(board.refresh().await);
    assert_eq!(board.tasks()[0].status, TaskStatus::InProgress);

    let tasks = assert_ok!(board.toggle(4).await);
    assert_eq!(tasks[0].status, TaskStatus::Completed);
    assert_eq!(board.tasks()[0].status, TaskStatus::Completed);
    assert_eq!(count(&server, "GET", "/tasks").await, 2);
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            task_json(1, "a", "IN_PROGRESS"),
            task_json(2, "b", "COMPLETED"),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let board = board_for(&server);
    let before = assert_ok!(board.refresh().await);
    let refreshed_at = board.last_refreshed();

    let err = board.refresh().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(board.tasks(), before);
    assert_eq!(board.last_refreshed(), refreshed_at);
}

#[tokio::test]
async fn test_failed_delete_does_not_reload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([task_json(8, "x", "PENDING")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/8"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let board = board_for(&server);
    assert_ok!(board.refresh().await);

    let removal = board.request_removal(8).unwrap();
    assert_eq!(removal.task().title, "x");
    assert!(board.remove(removal.confirm()).await.is_err());

    assert_eq!(count(&server, "GET", "/tasks").await, 1);
    assert_eq!(board.tasks().len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_reloads_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([task_json(8, "x", "PENDING")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/8"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let board = board_for(&server);
    assert_ok!(board.refresh().await);

    let tasks = assert_ok!(board.remove(board.request_removal(8).unwrap().confirm()).await);
    assert!(tasks.is_empty());
    assert_eq!(count(&server, "GET", "/tasks").await, 2);
}

#[tokio::test]
async fn test_unknown_task_is_rejected_locally() {
    let server = MockServer::start().await;
    let board = board_for(&server);

    assert!(board.toggle(42).await.unwrap_err().is_validation_error());
    assert!(board.request_removal(42).unwrap_err().is_validation_error());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_second_trigger_while_in_flight_is_busy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(task_json(1, "slow", "IN_PROGRESS"))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let board = board_for(&server);
    let (first, second) = tokio::join!(board.create("slow", "request"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let busy = board.is_busy();
        (busy, board.refresh().await)
    });

    assert_ok!(first);
    let (was_busy, second) = second;
    assert!(was_busy);
    assert!(matches!(second, Err(TasktrackError::Busy)));
    assert!(!board.is_busy());
}
