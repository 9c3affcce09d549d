//! Deterministic query keys for the caching/dedup layer.

use serde::Serialize;

use crate::pagination::PaginationState;

/// Wire query parameters derived from pagination state.
///
/// `search` is dropped entirely when empty so the request never carries
/// `search=`. `page` is one-based on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct QueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: usize,
    pub limit: usize,
}

/// Composite identity of one data request.
///
/// Value equality is the caching contract: two equal keys describe the same
/// request, and a fetch is only issued when the key changes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct QueryKey {
    pub endpoint: String,
    pub params: QueryParams,
}

impl QueryKey {
    /// Builds the key for one page of `endpoint`, normalizing the settled
    /// search text: blank search is absent, not empty.
    pub fn for_page(
        endpoint: impl Into<String>,
        state: &PaginationState,
        settled_search: &str,
    ) -> Self {
        let search = settled_search.trim();

        Self {
            endpoint: endpoint.into(),
            params: QueryParams {
                search: (!search.is_empty()).then(|| search.to_string()),
                page: state.page + 1,
                limit: state.page_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_is_omitted() {
        let state = PaginationState::default();
        let key = QueryKey::for_page("/orders", &state, "");
        assert_eq!(key.endpoint, "/orders");
        assert_eq!(key.params.search, None);
        assert_eq!(key.params.page, 1);
        assert_eq!(key.params.limit, 10);
    }

    #[test]
    fn blank_search_is_omitted() {
        let state = PaginationState::default();
        let key = QueryKey::for_page("/orders", &state, "   ");
        assert_eq!(key.params.search, None);
    }

    #[test]
    fn page_is_one_based_and_limit_tracks_page_size() {
        let state = PaginationState {
            search: "x".to_string(),
            page: 2,
            page_size: 5,
        };
        let key = QueryKey::for_page("/orders", &state, "x");
        assert_eq!(key.params.search.as_deref(), Some("x"));
        assert_eq!(key.params.page, 3);
        assert_eq!(key.params.limit, 5);
    }

    #[test]
    fn equal_inputs_produce_equal_keys() {
        let state = PaginationState {
            search: "bob".to_string(),
            page: 1,
            page_size: 25,
        };
        assert_eq!(
            QueryKey::for_page("/orders", &state, "bob"),
            QueryKey::for_page("/orders", &state, "bob"),
        );
    }

    #[test]
    fn search_omission_serializes_without_the_field() {
        let state = PaginationState::default();
        let key = QueryKey::for_page("/orders", &state, "");
        let json = serde_json::to_value(&key.params).unwrap();
        assert_eq!(json, serde_json::json!({"page": 1, "limit": 10}));
    }
}
