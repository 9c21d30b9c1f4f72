//! Users resource

use helpscout_domain::{EmbeddedItems, QueryParams, Result, User};
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};
use tracing::instrument;

use super::auth::AccessTokenProvider;
use super::client::ApiClient;
use super::pagination::{ListOutcome, Paginator};

const USERS_RESOURCE: &str = "/users";

/// `_embedded` of `GET /users`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct UsersEmbedded {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub users: Vec<User>,
}

impl EmbeddedItems for UsersEmbedded {
    type Item = User;

    fn into_items(self) -> Vec<User> {
        self.users
    }
}

impl<P: AccessTokenProvider> ApiClient<P> {
    /// Lazily iterate over every user of the account.
    pub fn users(&mut self) -> Paginator<'_, P, UsersEmbedded> {
        Paginator::new(self, USERS_RESOURCE, QueryParams::new())
    }

    /// Feed every user to `on_user` until it returns `false`.
    #[instrument(skip_all)]
    pub fn list_users(&mut self, on_user: impl FnMut(User) -> bool) -> Result<ListOutcome> {
        self.users().for_each_until(on_user)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::testing::{api_url, mock_client, page_json, MockBackend, RecordingSleeper, TEST_AUTH_URL};

    #[test]
    fn lists_users_across_pages() {
        let backend = Arc::new(MockBackend::new());
        let sleeper = Arc::new(RecordingSleeper::new());
        backend.push_token(TEST_AUTH_URL, "token", 7200);
        let url = api_url("/users");
        backend.push_json(
            &url,
            200,
            &page_json("users", json!([{"id": 1, "first": "Ann", "last": "Agent"}]), 1, 2),
        );
        backend.push_json(&url, 200, &page_json("users", json!([{"id": 2, "email": "bo@example.com"}]), 2, 2));

        let mut client = mock_client(&backend, &sleeper);
        let mut users = Vec::new();
        let outcome = client
            .list_users(|user| {
                users.push(user);
                true
            })
            .unwrap();

        assert_eq!(outcome, ListOutcome::Completed);
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].full_name(), "Ann Agent");
        assert_eq!(users[1].email, "bo@example.com");
    }

    #[test]
    fn missing_embedded_means_no_users() {
        let backend = Arc::new(MockBackend::new());
        let sleeper = Arc::new(RecordingSleeper::new());
        backend.push_token(TEST_AUTH_URL, "token", 7200);
        backend.push_json(&api_url("/users"), 200, &json!({"page": {"totalPages": 0}}));

        let mut client = mock_client(&backend, &sleeper);
        let mut calls = 0;
        let outcome = client.list_users(|_| {
            calls += 1;
            true
        });

        assert_eq!(outcome.unwrap(), ListOutcome::Completed);
        assert_eq!(calls, 0);
    }

    #[test]
    fn null_user_fields_do_not_break_the_listing() {
        let backend = Arc::new(MockBackend::new());
        let sleeper = Arc::new(RecordingSleeper::new());
        backend.push_token(TEST_AUTH_URL, "token", 7200);
        backend.push_json(
            &api_url("/users"),
            200,
            &page_json("users", json!([{"id": 1, "first": null, "last": "Agent", "email": null}, {"id": 2}]), 1, 1),
        );

        let mut client = mock_client(&backend, &sleeper);
        let users: Vec<User> = client.users().collect::<Result<_>>().unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].full_name(), "Agent");
        assert!(users[0].email.is_empty());
    }
}
