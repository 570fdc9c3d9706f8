/*
[INPUT]:  Mock sign-in endpoint and the login screen
[OUTPUT]: Verification of form validation, token storage and error mapping
[POS]:    Integration tests - login screen
[UPDATE]: When login flow or messages change
*/

use tasktrack_client::{Action, AppConfig, AppContext, LoginForm, Screen, user_message};
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context_for(server: &MockServer, dir: &std::path::Path) -> AppContext {
    let mut config = AppConfig::default();
    config.api.base_url = format!("{}/api", server.uri());
    config.storage.credentials_path = Some(dir.join("credentials.json"));
    AppContext::from_config(config).unwrap()
}

#[tokio::test]
async fn test_login_then_tasks_use_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "accessToken": "abc123",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let ctx = context_for(&server, dir.path());
    assert_eq!(ctx.initial_screen(), Screen::Login);

    let session = assert_ok!(ctx.login_screen().submit(&LoginForm::new("maria", "pw")).await);
    assert_eq!(session.token, "abc123");
    assert_eq!(ctx.initial_screen(), Screen::Tasks);

    let board = ctx.board();
    assert_ok!(board.refresh().await);

    // A fresh process picks the persisted token back up
    let restarted = context_for(&server, dir.path());
    assert_eq!(restarted.session.current_token().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_blank_form_never_reaches_server() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let ctx = context_for(&server, dir.path());

    let err = ctx
        .login_screen()
        .submit(&LoginForm::new("", "pw"))
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert_eq!(user_message(&err, Action::SignIn).body, "Username is required");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_wrong_credentials_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Unauthorized",
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let ctx = context_for(&server, dir.path());
    let err = ctx
        .login_screen()
        .submit(&LoginForm::new("maria", "nope"))
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    let message = user_message(&err, Action::SignIn);
    assert_eq!(message.title, "Sign-in failed");
    assert_eq!(message.body, "Incorrect username and/or password.");
    assert_eq!(ctx.initial_screen(), Screen::Login);
}
