//! Conversation lookup filter
//!
//! Every dimension is optional and carries its own [`ConditionType`].
//! Dimensions are ANDed together, values inside a dimension are ORed.
//!
//! Mailboxes, types, states and time periods are rendered into the single
//! `query` search expression, exclusive dimensions as a `NOT` clause.
//! Statuses are not: the listing runs one full
//! traversal per resolved status with the `status` parameter set, see
//! [`ConversationFilter::statuses_to_traverse`].

use chrono::{DateTime, Utc};

use crate::constants::{QUERY_PARAM_QUERY, QUERY_TIME_FORMAT};
use crate::types::{ConversationState, ConversationStatus, ConversationType, QueryParams};

/// Whether the listed values are wanted or unwanted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConditionType {
    #[default]
    Inclusive,
    Exclusive,
}

/// A set of values for one filter dimension, tagged with how they apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterValues<T> {
    pub condition: ConditionType,
    pub values: Vec<T>,
}

impl<T: Copy + PartialEq> FilterValues<T> {
    /// Inclusive values as given; exclusive values as the complement of
    /// `universe`, in universe order.
    pub fn resolve(&self, universe: &[T]) -> Vec<T> {
        match self.condition {
            ConditionType::Inclusive => self.values.clone(),
            ConditionType::Exclusive => {
                universe.iter().copied().filter(|v| !self.values.contains(v)).collect()
            }
        }
    }
}

/// Time range with optional open ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePeriod {
    pub condition: ConditionType,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimePeriod {
    /// `[from TO to]`, with `*` for an open end.
    fn render_range(&self) -> String {
        let bound = |t: Option<DateTime<Utc>>| {
            t.map_or_else(|| "*".to_string(), |t| t.format(QUERY_TIME_FORMAT).to_string())
        };
        format!("[{} TO {}]", bound(self.from), bound(self.to))
    }

    fn render(&self, field: &str) -> String {
        negate_if(self.condition, format!("{field}:{}", self.render_range()))
    }
}

/// Criteria of a conversation listing.
///
/// Dimensions are combined with AND; the values of one dimension with OR.
/// Unset dimensions do not restrict the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationFilter {
    mailbox_ids: Option<FilterValues<u64>>,
    statuses: Option<FilterValues<ConversationStatus>>,
    types: Option<FilterValues<ConversationType>>,
    states: Option<FilterValues<ConversationState>>,
    created: Option<TimePeriod>,
    modified: Option<TimePeriod>,
}

impl ConversationFilter {
    /// Filter that matches every conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to (or exclude) the given mailboxes.
    pub fn mailbox_ids(
        mut self,
        ids: impl IntoIterator<Item = u64>,
        condition: ConditionType,
    ) -> Self {
        self.mailbox_ids = Some(FilterValues { condition, values: ids.into_iter().collect() });
        self
    }

    /// Restrict to (or exclude) the given statuses. Each resolved status is
    /// listed in its own traversal.
    pub fn statuses(
        mut self,
        statuses: impl IntoIterator<Item = ConversationStatus>,
        condition: ConditionType,
    ) -> Self {
        self.statuses = Some(FilterValues { condition, values: statuses.into_iter().collect() });
        self
    }

    /// Restrict to (or exclude) the given conversation types.
    pub fn types(
        mut self,
        types: impl IntoIterator<Item = ConversationType>,
        condition: ConditionType,
    ) -> Self {
        self.types = Some(FilterValues { condition, values: types.into_iter().collect() });
        self
    }

    /// Restrict to (or exclude) the given conversation states.
    pub fn states(
        mut self,
        states: impl IntoIterator<Item = ConversationState>,
        condition: ConditionType,
    ) -> Self {
        self.states = Some(FilterValues { condition, values: states.into_iter().collect() });
        self
    }

    /// Restrict by creation time. `None` leaves that end of the range open.
    pub fn created_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        condition: ConditionType,
    ) -> Self {
        self.created = Some(TimePeriod { condition, from, to });
        self
    }

    /// Restrict by last modification time. `None` leaves that end open.
    pub fn modified_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        condition: ConditionType,
    ) -> Self {
        self.modified = Some(TimePeriod { condition, from, to });
        self
    }

    /// Whether statuses were filtered at all.
    pub fn has_status_filter(&self) -> bool {
        self.statuses.is_some()
    }

    /// Statuses to run one traversal each for, or `None` when statuses are
    /// not filtered at all.
    ///
    /// Exclusive filters resolve to the complement of the known statuses.
    /// Duplicates given by the caller are kept.
    pub fn statuses_to_traverse(&self) -> Option<Vec<ConversationStatus>> {
        self.statuses.as_ref().map(|s| s.resolve(ConversationStatus::ALL))
    }

    /// The boolean search expression for the `query` parameter, or `None`
    /// when no dimension contributes a clause.
    pub fn search_query(&self) -> Option<String> {
        let mut clauses = Vec::new();

        if let Some(mailboxes) = &self.mailbox_ids {
            let values: Vec<String> = mailboxes.values.iter().map(|id| id.to_string()).collect();
            if let Some(clause) = any_of("mailboxid", &values) {
                clauses.push(negate_if(mailboxes.condition, clause));
            }
        }

        if let Some(types) = &self.types {
            let values: Vec<String> =
                types.values.iter().map(|t| t.as_str().to_string()).collect();
            if let Some(clause) = any_of("type", &values) {
                clauses.push(negate_if(types.condition, clause));
            }
        }

        if let Some(states) = &self.states {
            let values: Vec<String> =
                states.values.iter().map(|s| s.as_str().to_string()).collect();
            if let Some(clause) = any_of("state", &values) {
                clauses.push(negate_if(states.condition, clause));
            }
        }

        if let Some(period) = &self.created {
            clauses.push(period.render("createdAt"));
        }

        if let Some(period) = &self.modified {
            clauses.push(period.render("modifiedAt"));
        }

        if clauses.is_empty() {
            None
        } else {
            Some(format!("({})", clauses.join(" AND ")))
        }
    }

    /// Base query parameters for a conversation listing.
    pub fn to_query_params(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(expression) = self.search_query() {
            query.set(QUERY_PARAM_QUERY, expression);
        }
        query
    }
}

fn any_of(field: &str, values: &[String]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let terms: Vec<String> = values.iter().map(|v| format!("{field}:{v}")).collect();
    Some(format!("({})", terms.join(" OR ")))
}

fn negate_if(condition: ConditionType, clause: String) -> String {
    match condition {
        ConditionType::Inclusive => clause,
        ConditionType::Exclusive => format!("NOT {clause}"),
    }
}
