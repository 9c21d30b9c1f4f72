//! Page-by-page traversal of list endpoints
//!
//! A [`Paginator`] walks one or more passes over a resource. Each pass
//! starts without a `page` parameter, then requests pages 2, 3, ... until
//! the server reports the last page. Pages are fetched lazily, so a
//! consumer that stops early never triggers further requests.

use std::collections::VecDeque;
use std::marker::PhantomData;

use helpscout_domain::constants::QUERY_PARAM_PAGE;
use helpscout_domain::{EmbeddedItems, ListEnvelope, QueryParams, Result};
use tracing::debug;

use super::auth::AccessTokenProvider;
use super::client::ApiClient;

/// How a callback-driven listing ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ListOutcome {
    /// Every item was delivered.
    Completed,
    /// The callback returned `false`.
    Interrupted,
}

impl ListOutcome {
    /// The callback stopped the listing.
    pub fn is_interrupted(self) -> bool {
        self == Self::Interrupted
    }
}

struct Pass {
    query: QueryParams,
    page: u32,
}

/// Lazy iterator over the items of a list endpoint.
///
/// Yields an error at most once; the iterator is exhausted afterwards.
pub struct Paginator<'a, P: AccessTokenProvider, E: EmbeddedItems> {
    client: &'a mut ApiClient<P>,
    resource: String,
    passes: VecDeque<QueryParams>,
    current: Option<Pass>,
    buffer: VecDeque<E::Item>,
    finished: bool,
    _embedded: PhantomData<E>,
}

impl<'a, P: AccessTokenProvider, E: EmbeddedItems> Paginator<'a, P, E> {
    /// Single traversal of `resource` with `query`.
    pub fn new(client: &'a mut ApiClient<P>, resource: impl Into<String>, query: QueryParams) -> Self {
        Self::with_passes(client, resource, [query])
    }

    /// One full traversal per query, in order. Items are not de-duplicated
    /// across passes.
    pub fn with_passes(
        client: &'a mut ApiClient<P>,
        resource: impl Into<String>,
        passes: impl IntoIterator<Item = QueryParams>,
    ) -> Self {
        Self {
            client,
            resource: resource.into(),
            passes: passes.into_iter().collect(),
            current: None,
            buffer: VecDeque::new(),
            finished: false,
            _embedded: PhantomData,
        }
    }

    /// Feed every item to `on_item` until it returns `false`.
    ///
    /// # Errors
    ///
    /// The first error raised while fetching a page.
    pub fn for_each_until(self, on_item: impl FnMut(E::Item) -> bool) -> Result<ListOutcome> {
        drive(self, on_item)
    }

    fn start_next_pass(&mut self) -> bool {
        match self.passes.pop_front() {
            Some(mut query) => {
                query.remove(QUERY_PARAM_PAGE);
                self.current = Some(Pass { query, page: 1 });
                true
            }
            None => false,
        }
    }

    fn fetch_page(&mut self) -> Result<()> {
        let Some(pass) = self.current.as_mut() else {
            return Ok(());
        };

        let envelope: ListEnvelope<E> = self.client.get(&self.resource, &pass.query)?;
        let page = envelope.page;
        debug!(
            resource = %self.resource,
            requested = pass.page,
            number = page.number,
            total_pages = page.total_pages,
            "fetched page"
        );

        if page.is_empty() {
            self.current = None;
            return Ok(());
        }

        self.buffer.extend(envelope.embedded.into_items());

        if page.is_last() {
            self.current = None;
        } else {
            pass.page += 1;
            pass.query.set(QUERY_PARAM_PAGE, pass.page.to_string());
        }
        Ok(())
    }
}

impl<P: AccessTokenProvider, E: EmbeddedItems> Iterator for Paginator<'_, P, E> {
    type Item = Result<E::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            if self.current.is_none() && !self.start_next_pass() {
                self.finished = true;
                return None;
            }
            if let Err(err) = self.fetch_page() {
                self.finished = true;
                self.passes.clear();
                self.current = None;
                return Some(Err(err));
            }
        }
    }
}

/// Deliver items to `on_item` until it returns `false` or `items` ends.
///
/// # Errors
///
/// The first error yielded by `items`.
pub fn drive<T>(
    items: impl IntoIterator<Item = Result<T>>,
    mut on_item: impl FnMut(T) -> bool,
) -> Result<ListOutcome> {
    for item in items {
        if !on_item(item?) {
            return Ok(ListOutcome::Interrupted);
        }
    }
    Ok(ListOutcome::Completed)
}
