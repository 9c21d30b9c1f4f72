//! URL query parameters
//!
//! Single-valued and ordered by key, so the encoded query string is stable
//! across calls.

use std::collections::BTreeMap;

use serde::Serialize;

/// Query string parameters, kept sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// No parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// No parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_previous_value() {
        let mut query = QueryParams::new();
        query.set("page", "1").set("page", "2");

        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn iterates_in_key_order() {
        let query: QueryParams = [("status", "open"), ("page", "3"), ("query", "(x)")]
            .into_iter()
            .collect();

        let keys: Vec<&str> = query.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["page", "query", "status"]);
    }

    #[test]
    fn serializes_as_flat_map() {
        let query: QueryParams = [("page", "2")].into_iter().collect();
        assert_eq!(serde_json::to_string(&query).unwrap(), r#"{"page":"2"}"#);
    }
}
