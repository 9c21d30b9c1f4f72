//! End-to-end flows through the authenticator, facade and pagination
//! against a scripted backend.

mod support;

use chrono::{Duration, Utc};
use helpscout_domain::{ConditionType, ConversationFilter, ConversationStatus, HelpScoutError, User};
use helpscout_infra::testing::{api_url, page_json, TEST_AUTH_URL};
use helpscout_infra::ListOutcome;
use serde_json::json;
use support::Harness;

#[test]
fn token_is_fetched_once_for_a_multi_page_listing() {
    let mut h = Harness::new();
    let url = api_url("/users");
    h.backend.push_json(&url, 200, &page_json("users", json!([{"id": 1}]), 1, 2));
    h.backend.push_json(&url, 200, &page_json("users", json!([{"id": 2}]), 2, 2));

    let mut ids = Vec::new();
    let outcome = h
        .client
        .list_users(|u| {
            ids.push(u.id);
            true
        })
        .unwrap();

    assert_eq!(outcome, ListOutcome::Completed);
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(h.token_requests(), 1);
    assert_eq!(h.bearer_tokens(&url), vec!["Bearer token-1", "Bearer token-1"]);
}

#[test]
fn unauthorized_mid_listing_refreshes_token_once() {
    let mut h = Harness::new();
    h.backend.push_token(TEST_AUTH_URL, "token-2", 7200);
    let url = api_url("/users");
    h.backend.push_json(&url, 200, &page_json("users", json!([{"id": 1}]), 1, 2));
    h.backend.push_status(&url, 401);
    h.backend.push_json(&url, 200, &page_json("users", json!([{"id": 2}]), 2, 2));

    let users: Vec<User> = h.client.users().collect::<Result<_, _>>().unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(h.token_requests(), 2);
    assert_eq!(
        h.bearer_tokens(&url),
        vec!["Bearer token-1", "Bearer token-1", "Bearer token-2"]
    );
    assert_eq!(h.client.token().unwrap().value, "token-2");
}

#[test]
fn three_unauthorized_answers_exhaust_authorization() {
    let mut h = Harness::new();
    h.backend.push_token(TEST_AUTH_URL, "token-2", 7200);
    h.backend.push_token(TEST_AUTH_URL, "token-3", 7200);
    let url = api_url("/conversations/9/threads");
    for _ in 0..3 {
        h.backend.push_status(&url, 401);
    }

    let err = h.client.list_threads(9, |_| true).unwrap_err();

    assert!(matches!(err, HelpScoutError::AuthorizationExhausted { attempts: 3 }));
    assert_eq!(h.token_requests(), 3);
    assert_eq!(h.bearer_tokens(&url), vec!["Bearer token-1", "Bearer token-2", "Bearer token-3"]);
}

#[test]
fn rate_limits_are_absorbed_with_sleeps() {
    let mut h = Harness::new();
    let url = api_url("/users");
    h.backend.push_status(&url, 429);
    h.backend.push_status(&url, 429);
    h.backend.push_json(&url, 200, &page_json("users", json!([{"id": 1}]), 1, 1));

    let count = h.client.users().count();

    assert_eq!(count, 1);
    assert_eq!(h.sleeper.count(), 2);
}

#[test]
fn injected_token_skips_the_token_endpoint() {
    let mut h = Harness::new();
    h.client.set_token("persisted", Utc::now() + Duration::hours(2));
    let url = api_url("/users");
    h.backend.push_json(&url, 200, &page_json("users", json!([]), 0, 0));

    let outcome = h.client.list_users(|_| true).unwrap();

    assert_eq!(outcome, ListOutcome::Completed);
    assert_eq!(h.token_requests(), 0);
    assert_eq!(h.bearer_tokens(&url), vec!["Bearer persisted"]);
}

#[test]
fn forced_token_fetch_replaces_valid_token() {
    let mut h = Harness::new();
    h.backend.push_token(TEST_AUTH_URL, "token-2", 7200);

    assert_eq!(h.client.get_token(false).unwrap(), "token-1");
    assert_eq!(h.client.get_token(false).unwrap(), "token-1");
    assert_eq!(h.client.get_token(true).unwrap(), "token-2");
    assert_eq!(h.token_requests(), 2);
}

#[test]
fn filtered_conversation_listing_then_reply() {
    let mut h = Harness::new();
    let url = api_url("/conversations");
    for id in [10, 20, 30] {
        h.backend.push_json(&url, 200, &page_json("conversations", json!([{"id": id, "mailboxId": 4}]), 1, 1));
    }
    h.backend.push_status(&url, 201);

    let filter = ConversationFilter::new()
        .mailbox_ids([4], ConditionType::Inclusive)
        .statuses([ConversationStatus::Open, ConversationStatus::Closed], ConditionType::Exclusive);

    let mut ids = Vec::new();
    let outcome = h
        .client
        .list_conversations(&filter, |c| {
            ids.push(c.id);
            true
        })
        .unwrap();
    assert_eq!(outcome, ListOutcome::Completed);
    assert_eq!(ids, vec![10, 20, 30]);

    let sender = User { id: 1, ..Default::default() };
    h.client
        .create_conversation(&sender, 4, &["customer@example.com".to_string()], &[], &[], "Follow-up", "Hello")
        .unwrap();

    let requests = h.backend.requests_to(&url);
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[3].method, reqwest::Method::POST);
    assert_eq!(h.token_requests(), 1);
}
