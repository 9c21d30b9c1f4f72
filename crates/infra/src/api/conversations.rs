//! Conversations resource

use helpscout_domain::constants::QUERY_PARAM_STATUS;
use helpscout_domain::{
    Conversation, ConversationCreateRequest, ConversationFilter, EmbeddedItems, QueryParams,
    Result, User,
};
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};
use tracing::{debug, info, instrument};

use super::auth::AccessTokenProvider;
use super::client::ApiClient;
use super::pagination::{ListOutcome, Paginator};

const CONVERSATIONS_RESOURCE: &str = "/conversations";

/// `_embedded` of `GET /conversations`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ConversationsEmbedded {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub conversations: Vec<Conversation>,
}

impl EmbeddedItems for ConversationsEmbedded {
    type Item = Conversation;

    fn into_items(self) -> Vec<Conversation> {
        self.conversations
    }
}

/// Query of every traversal needed for `filter`: one per resolved status,
/// or a single one when statuses are not filtered.
fn traversal_queries(filter: &ConversationFilter) -> Vec<QueryParams> {
    let base = filter.to_query_params();
    match filter.statuses_to_traverse() {
        Some(statuses) => statuses
            .into_iter()
            .map(|status| {
                let mut query = base.clone();
                query.set(QUERY_PARAM_STATUS, status.as_str());
                query
            })
            .collect(),
        None => vec![base],
    }
}

impl<P: AccessTokenProvider> ApiClient<P> {
    /// Lazily iterate over the conversations matching `filter`.
    ///
    /// With a status filter the listing is repeated once per status.
    /// Nothing is de-duplicated across statuses.
    pub fn conversations(
        &mut self,
        filter: &ConversationFilter,
    ) -> Paginator<'_, P, ConversationsEmbedded> {
        let passes = traversal_queries(filter);
        debug!(passes = passes.len(), query = ?filter.search_query(), "listing conversations");
        Paginator::with_passes(self, CONVERSATIONS_RESOURCE, passes)
    }

    /// Feed every conversation matching `filter` to `on_conversation` until
    /// it returns `false`. Stopping inside one status traversal stops the
    /// whole listing.
    #[instrument(skip_all)]
    pub fn list_conversations(
        &mut self,
        filter: &ConversationFilter,
        on_conversation: impl FnMut(Conversation) -> bool,
    ) -> Result<ListOutcome> {
        self.conversations(filter).for_each_until(on_conversation)
    }

    /// Create an outgoing email conversation on behalf of `sender`.
    ///
    /// `to[0]` becomes the customer; further recipients are copied.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `to` is empty, otherwise any error of the call.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, sender, to, cc, bcc, subject, body), fields(sender_id = sender.id))]
    pub fn create_conversation(
        &mut self,
        sender: &User,
        mailbox_id: u64,
        to: &[String],
        cc: &[String],
        bcc: &[String],
        subject: &str,
        body: &str,
    ) -> Result<()> {
        let request =
            ConversationCreateRequest::email(sender, mailbox_id, to, cc, bcc, subject, body)?;
        self.post(CONVERSATIONS_RESOURCE, &request)?;
        info!(mailbox_id, recipients = to.len(), "conversation created");
        Ok(())
    }
}
