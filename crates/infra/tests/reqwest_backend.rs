//! The blocking reqwest backend against a real HTTP server.
//!
//! The client is blocking, so every scenario runs inside `spawn_blocking`
//! while wiremock serves from the async runtime.

mod support;

use std::sync::Arc;

use helpscout_domain::{ClientConfig, HelpScoutError, User};
use helpscout_infra::testing::RecordingSleeper;
use helpscout_infra::{HelpScoutClient, ListOutcome, ReqwestBackend};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        api_base_url: format!("{}/v2", server.uri()),
        auth_url: format!("{}/v2/oauth2/token", server.uri()),
        ..ClientConfig::new("wire-id", "wire-key")
    }
}

fn client_for(config: &ClientConfig, sleeper: Arc<RecordingSleeper>) -> HelpScoutClient {
    let backend = ReqwestBackend::with_timeouts(
        config.connect_timeout(),
        config.request_timeout(),
        Some("helpscout-client-tests"),
    )
    .expect("reqwest backend");
    HelpScoutClient::with_backend(config, Arc::new(backend), sleeper)
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v2/oauth2/token"))
        .and(body_json(json!({
            "client_id": "wire-id",
            "client_secret": "wire-key",
            "grant_type": "client_credentials"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "wire-token",
            "token_type": "bearer",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn users_page(ids: &[u64], number: u32, total_pages: u32) -> serde_json::Value {
    let users: Vec<_> = ids.iter().map(|id| json!({"id": id, "first": format!("User{id}")})).collect();
    json!({
        "_embedded": {"users": users},
        "page": {"size": ids.len(), "totalElements": 3, "totalPages": total_pages, "number": number}
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn lists_users_over_http() {
    support::init_tracing();
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/users"))
        .and(header("authorization", "Bearer wire-token"))
        .and(header("accept", "application/json"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                users_page(&[1, 2], 1, 2).to_string(),
                "application/hal+json;charset=UTF-8",
            ),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/users"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_page(&[3], 2, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (outcome, names) = tokio::task::spawn_blocking(move || {
        let mut client = client_for(&config, Arc::new(RecordingSleeper::new()));
        let mut names = Vec::new();
        let outcome = client.list_users(|user| {
            names.push(user.first_name);
            true
        });
        outcome.map(|outcome| (outcome, names))
    })
    .await
    .expect("blocking task")
    .expect("listing succeeds");

    assert_eq!(outcome, ListOutcome::Completed);
    assert_eq!(names, vec!["User1", "User2", "User3"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn rate_limited_request_is_retried() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/users"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_page(&[1], 1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let sleeper = Arc::new(RecordingSleeper::new());
    let task_sleeper = sleeper.clone();
    let count = tokio::task::spawn_blocking(move || {
        let mut client = client_for(&config, task_sleeper);
        client.users().collect::<Result<Vec<_>, _>>().map(|users| users.len())
    })
    .await
    .expect("blocking task")
    .expect("listing succeeds");

    assert_eq!(count, 1);
    assert_eq!(sleeper.count(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn conversation_creation_and_validation_errors() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/v2/conversations"))
        .and(body_json(json!({
            "type": "email",
            "customer": {"email": "a@example.com"},
            "subject": "Hello",
            "mailboxId": 12,
            "tags": ["upstream"],
            "status": "active",
            "user": 5,
            "threads": [{
                "type": "reply",
                "text": "Body",
                "cc": ["b@example.com"],
                "bcc": [],
                "customer": {"email": "a@example.com"}
            }]
        })))
        .respond_with(ResponseTemplate::new(201).insert_header("Resource-ID", "991"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/conversations"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Bad request",
            "_embedded": {"errors": [{"path": "subject", "message": "may not be empty", "source": "JSON"}]}
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (created, rejected) = tokio::task::spawn_blocking(move || {
        let mut client = client_for(&config, Arc::new(RecordingSleeper::new()));
        let sender = User { id: 5, ..Default::default() };
        let to = vec!["a@example.com".to_string(), "b@example.com".to_string()];
        let created = client.create_conversation(&sender, 12, &to, &[], &[], "Hello", "Body");
        let rejected = client.create_conversation(&sender, 12, &to, &[], &[], "", "Body");
        (created, rejected)
    })
    .await
    .expect("blocking task");

    assert!(created.is_ok(), "creation failed: {created:?}");
    let rejected = rejected.expect_err("empty subject is rejected");
    assert!(rejected.to_string().starts_with("Unable to process request POST /conversations: "));
    match rejected.root_cause() {
        HelpScoutError::Remote { status: 400, details: Some(details) } => {
            assert_eq!(details.message, "Bad request");
            assert_eq!(details.embedded.errors[0].path, "subject");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn non_json_success_is_rejected() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/users"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = tokio::task::spawn_blocking(move || {
        let mut client = client_for(&config, Arc::new(RecordingSleeper::new()));
        client.list_users(|_| true)
    })
    .await
    .expect("blocking task");

    let err = result.expect_err("HTML is not a JSON answer");
    assert!(matches!(err.root_cause(), HelpScoutError::InvalidResponse(msg) if msg.contains("text/html")));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_credentials_surface_as_credentials_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/oauth2/token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = tokio::task::spawn_blocking(move || {
        let mut client = client_for(&config, Arc::new(RecordingSleeper::new()));
        client.list_users(|_| true)
    })
    .await
    .expect("blocking task");

    assert!(matches!(result, Err(HelpScoutError::Credentials(_))));
}
