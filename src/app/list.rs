//! Page and search term state for one list, and the view state derived from
//! the cache.

use crate::cache::QuerySnapshot;
use crate::domain::{Entity, ListQuery, ListResult, QueryKey};
use std::sync::Arc;

/// What the list area shows, in priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Nothing has been requested yet (movies before the first search).
    Idle,
    /// A fetch is in flight and there is no data from any key to show.
    InitialLoading,
    /// Data is shown while a fetch is in flight. `from_previous_query` is set
    /// when the data belongs to a previously observed key.
    Updating {
        result: Arc<ListResult<T>>,
        from_previous_query: bool,
    },
    Error { message: String },
    Empty,
    Ready { result: Arc<ListResult<T>> },
}

impl<T> ViewState<T> {
    /// The result currently on screen, if any.
    #[must_use]
    pub fn result(&self) -> Option<&Arc<ListResult<T>>> {
        match self {
            Self::Updating { result, .. } | Self::Ready { result } => Some(result),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

/// View state plus pagination control, if one should be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub state: ViewState<T>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone)]
pub struct ListViewController {
    entity: Entity,
    page: u32,
    search_term: String,
    per_page: u32,
}

impl ListViewController {
    #[must_use]
    pub fn new(entity: Entity, per_page: u32) -> Self {
        Self {
            entity,
            page: 1,
            search_term: String::new(),
            per_page: per_page.max(1),
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Cache key for the current `(page, search_term)`.
    #[must_use]
    pub fn key(&self) -> QueryKey {
        QueryKey::new(
            self.entity,
            ListQuery::new(self.page, self.per_page, self.search_term.clone()),
        )
    }

    /// Moves to `page`, keeping the search term. Pages outside
    /// `1..=total_pages` are ignored when the total is known.
    ///
    /// Returns whether the page changed.
    pub fn set_page(&mut self, page: u32, total_pages: Option<u32>) -> bool {
        let in_range = page >= 1 && total_pages.map_or(true, |total| page <= total.max(1));
        if !in_range {
            tracing::debug!(page, ?total_pages, "page request out of range ignored");
            return false;
        }
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self, total_pages: Option<u32>) -> bool {
        self.set_page(self.page.saturating_add(1), total_pages)
    }

    pub fn prev_page(&mut self, total_pages: Option<u32>) -> bool {
        self.set_page(self.page.saturating_sub(1), total_pages)
    }

    /// Applies a settled search term. Always resets the page to 1.
    pub fn apply_search_term(&mut self, term: String) {
        self.page = 1;
        self.search_term = term;
    }

    /// Derives the view from the observed key's snapshot.
    #[must_use]
    pub fn view_state<T>(&self, snapshot: Option<&QuerySnapshot<T>>) -> ListView<T> {
        let Some(snapshot) = snapshot else {
            return ListView {
                state: ViewState::Idle,
                pagination: None,
            };
        };

        let state = if snapshot.is_loading {
            ViewState::InitialLoading
        } else if let (true, Some(result)) = (snapshot.is_fetching, &snapshot.data) {
            ViewState::Updating {
                result: Arc::clone(result),
                from_previous_query: snapshot.is_placeholder,
            }
        } else if let Some(error) = &snapshot.error {
            ViewState::Error {
                message: error.to_string(),
            }
        } else {
            match &snapshot.data {
                Some(result) if !result.is_empty() => ViewState::Ready {
                    result: Arc::clone(result),
                },
                _ => ViewState::Empty,
            }
        };

        let pagination = match state {
            ViewState::Idle | ViewState::InitialLoading | ViewState::Error { .. } => None,
            _ => snapshot
                .data
                .as_ref()
                .filter(|result| result.total_pages > 1)
                .map(|result| Pagination {
                    page: self.page,
                    total_pages: result.total_pages,
                }),
        };

        ListView { state, pagination }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use rstest::rstest;

    fn snapshot(
        controller: &ListViewController,
        data: Option<ListResult<u8>>,
        is_placeholder: bool,
        is_fetching: bool,
        error: Option<&str>,
    ) -> QuerySnapshot<u8> {
        let data = data.map(Arc::new);
        QuerySnapshot {
            key: controller.key(),
            is_loading: is_fetching && data.is_none(),
            data,
            is_placeholder,
            is_fetching,
            error: error.map(|m| DomainError::Transport(m.to_string())),
        }
    }

    #[test]
    fn page_change_keeps_term_and_search_resets_page() {
        let mut list = ListViewController::new(Entity::Notes, 12);
        list.apply_search_term("milk".to_string());
        assert!(list.set_page(3, Some(5)));
        assert_eq!(list.key().query.search_term(), "milk");

        list.apply_search_term("eggs".to_string());
        assert_eq!(list.page(), 1);
    }

    #[rstest]
    #[case(0, Some(5))]
    #[case(6, Some(5))]
    #[case(2, Some(0))]
    fn out_of_range_pages_are_ignored(#[case] page: u32, #[case] total: Option<u32>) {
        let mut list = ListViewController::new(Entity::Notes, 12);
        assert!(!list.set_page(page, total));
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn unknown_total_allows_any_positive_page() {
        let mut list = ListViewController::new(Entity::Notes, 12);
        assert!(list.set_page(4, None));
        assert!(list.prev_page(None));
        assert_eq!(list.page(), 3);
    }

    #[test]
    fn nothing_observed_is_idle() {
        let list = ListViewController::new(Entity::Movies, 20);
        assert_eq!(list.view_state::<u8>(None).state, ViewState::Idle);
    }

    #[test]
    fn loading_and_fetching_never_render_empty() {
        let list = ListViewController::new(Entity::Notes, 12);

        let loading = snapshot(&list, None, false, true, None);
        assert_eq!(list.view_state(Some(&loading)).state, ViewState::InitialLoading);

        let refetching = snapshot(&list, Some(ListResult::new(vec![], 1)), false, true, None);
        assert!(matches!(
            list.view_state(Some(&refetching)).state,
            ViewState::Updating { from_previous_query: false, .. }
        ));

        let settled = snapshot(&list, Some(ListResult::new(vec![], 1)), false, false, None);
        assert_eq!(list.view_state(Some(&settled)).state, ViewState::Empty);
    }

    #[test]
    fn error_outranks_empty() {
        let list = ListViewController::new(Entity::Notes, 12);
        let errored = snapshot(&list, None, false, false, Some("Request failed with status code 500"));

        let view = list.view_state(Some(&errored));
        assert_eq!(
            view.state,
            ViewState::Error {
                message: "Request failed with status code 500".to_string()
            }
        );
        assert!(view.pagination.is_none());
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(2, true)]
    fn pagination_only_with_multiple_pages(#[case] total_pages: u32, #[case] shown: bool) {
        let list = ListViewController::new(Entity::Notes, 12);
        let ready = snapshot(&list, Some(ListResult::new(vec![1], total_pages)), false, false, None);

        assert_eq!(list.view_state(Some(&ready)).pagination.is_some(), shown);
    }
}
