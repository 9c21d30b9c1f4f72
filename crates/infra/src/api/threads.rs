//! Threads resource

use helpscout_domain::{EmbeddedItems, QueryParams, Result, Thread};
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};
use tracing::instrument;

use super::auth::AccessTokenProvider;
use super::client::ApiClient;
use super::pagination::{ListOutcome, Paginator};

/// `_embedded` of `GET /conversations/{id}/threads`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ThreadsEmbedded {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub threads: Vec<Thread>,
}

impl EmbeddedItems for ThreadsEmbedded {
    type Item = Thread;

    fn into_items(self) -> Vec<Thread> {
        self.threads
    }
}

fn threads_resource(conversation_id: u64) -> String {
    format!("/conversations/{conversation_id}/threads")
}

impl<P: AccessTokenProvider> ApiClient<P> {
    /// Lazily iterate over the threads of a conversation.
    pub fn threads(&mut self, conversation_id: u64) -> Paginator<'_, P, ThreadsEmbedded> {
        Paginator::new(self, threads_resource(conversation_id), QueryParams::new())
    }

    /// Feed every thread of `conversation_id` to `on_thread` until it
    /// returns `false`.
    #[instrument(skip(self, on_thread))]
    pub fn list_threads(
        &mut self,
        conversation_id: u64,
        on_thread: impl FnMut(Thread) -> bool,
    ) -> Result<ListOutcome> {
        self.threads(conversation_id).for_each_until(on_thread)
    }
}
