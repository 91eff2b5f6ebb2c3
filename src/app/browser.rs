//! Search, pagination and caching for one searchable list.
//!
//! [`Browser`] wires a [`SearchController`], a [`ListViewController`] and a
//! [`QueryCache`] together. Both applications embed one; they differ only in
//! the search policy, the labels, and how an item is rendered.

use crate::app::list::{ListView, ListViewController, ViewState};
use crate::app::notify::Notification;
use crate::app::search::{SearchController, SearchPolicy, Submission};
use crate::app::Action;
use crate::cache::{CacheOptions, QueryCache};
use crate::domain::{DomainError, Entity, ListResult, QueryKey};
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, ModalInfo, PaginationInfo, SearchBarInfo,
    StatusKind, StatusLine, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::sync::Arc;
use std::time::Duration;

/// User-facing strings of one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserLabels {
    pub title: &'static str,
    pub search_placeholder: &'static str,
    pub idle: &'static str,
    pub empty: &'static str,
    pub load_failed: &'static str,
}

/// Static construction parameters of a [`Browser`].
#[derive(Debug, Clone, Copy)]
pub struct BrowserSettings {
    pub entity: Entity,
    pub per_page: u32,
    pub policy: SearchPolicy,
    pub debounce: Duration,
    pub cache: CacheOptions,
    pub labels: BrowserLabels,
}

#[derive(Debug)]
pub struct Browser<T> {
    search: SearchController,
    list: ListViewController,
    cache: QueryCache<T>,
    labels: BrowserLabels,
    entity: Entity,
    fetch_when_blank: bool,
}

impl<T> Browser<T> {
    #[must_use]
    pub fn new(settings: BrowserSettings) -> Self {
        Self {
            search: SearchController::new(settings.policy, settings.debounce),
            list: ListViewController::new(settings.entity, settings.per_page),
            cache: QueryCache::new(settings.cache),
            labels: settings.labels,
            entity: settings.entity,
            fetch_when_blank: settings.policy == SearchPolicy::AllowEmpty,
        }
    }

    #[must_use]
    pub const fn search(&self) -> &SearchController {
        &self.search
    }

    #[must_use]
    pub const fn list(&self) -> &ListViewController {
        &self.list
    }

    #[must_use]
    pub const fn cache(&self) -> &QueryCache<T> {
        &self.cache
    }

    /// Observes the current key, returning the fetch it needs (if any).
    fn refresh(&mut self) -> Vec<Action> {
        if !self.fetch_when_blank && self.list.search_term().trim().is_empty() {
            return vec![];
        }
        let key = self.list.key();
        self.cache.observe(&key).map(Action::Fetch).into_iter().collect()
    }

    pub fn start(&mut self) -> Vec<Action> {
        self.refresh()
    }

    pub fn submit(&mut self, text: &str) -> Vec<Action> {
        match self.search.submit_raw_input(text) {
            Submission::Scheduled { generation, delay } => {
                vec![Action::ScheduleDebounce { generation, delay }]
            }
            Submission::Rejected(error) => vec![Action::Notify(Notification::error(error.to_string()))],
            Submission::Ignored => vec![],
        }
    }

    /// Applies a settled search term; the page resets to 1 before the fetch
    /// for the new key is issued.
    pub fn settle(&mut self, generation: u64) -> (bool, Vec<Action>) {
        let Some(term) = self.search.settle(generation) else {
            return (false, vec![]);
        };
        tracing::debug!(entity = %self.entity, term = %term, "search term settled");
        self.list.apply_search_term(term);
        (true, self.refresh())
    }

    /// Total pages of the data currently shown, if any.
    fn known_total_pages(&self) -> Option<u32> {
        self.cache
            .snapshot()
            .and_then(|snapshot| snapshot.data.map(|data| data.total_pages))
    }

    fn after_page_change(&mut self, changed: bool) -> (bool, Vec<Action>) {
        if changed {
            (true, self.refresh())
        } else {
            (false, vec![])
        }
    }

    pub fn go_to_page(&mut self, page: u32) -> (bool, Vec<Action>) {
        if self.cache.observed().is_none() {
            return (false, vec![]);
        }
        let total = self.known_total_pages();
        let changed = self.list.set_page(page, total);
        self.after_page_change(changed)
    }

    pub fn next_page(&mut self) -> (bool, Vec<Action>) {
        self.go_to_page(self.list.page().saturating_add(1))
    }

    pub fn prev_page(&mut self) -> (bool, Vec<Action>) {
        self.go_to_page(self.list.page().saturating_sub(1))
    }

    /// Applies a fetch outcome. Emits the load-failure notification once per
    /// failed response of the observed key.
    pub fn on_fetched(
        &mut self,
        key: &QueryKey,
        seq: u64,
        result: Result<ListResult<T>, DomainError>,
    ) -> (bool, Vec<Action>) {
        let failed = result.is_err();
        if !self.cache.resolve(key, seq, result) {
            return (false, vec![]);
        }

        let observed = self.cache.observed() == Some(key);
        let actions = if failed && observed {
            vec![Action::Notify(Notification::error(self.labels.load_failed))]
        } else {
            vec![]
        };
        (observed, actions)
    }

    /// Invalidates every list entry of this browser's entity.
    pub fn invalidate_all(&mut self) -> Vec<Action> {
        self.cache
            .invalidate(QueryKey::all_of(self.entity))
            .into_iter()
            .map(Action::Fetch)
            .collect()
    }

    pub fn dispose(&mut self) -> Vec<Action> {
        self.search.dispose();
        vec![Action::CancelDebounce]
    }

    #[must_use]
    pub fn view(&self) -> ListView<T> {
        self.list.view_state(self.cache.snapshot().as_ref())
    }

    /// Items currently on screen.
    #[must_use]
    pub fn displayed(&self) -> Option<Arc<ListResult<T>>> {
        self.view().state.result().cloned()
    }

    /// Builds the full view model around the list.
    ///
    /// `display_item` renders one item given the settled search term (for
    /// highlighting) and the available width.
    pub fn compute_viewmodel(
        &self,
        rows: usize,
        cols: usize,
        keybindings: &str,
        modal: Option<ModalInfo>,
        display_item: impl Fn(&T, &str, usize) -> DisplayItem,
    ) -> UIViewModel {
        let view = self.view();
        let search_term = self.list.search_term();

        let (status, empty_state) = match &view.state {
            ViewState::Idle => (
                None,
                Some(EmptyState {
                    message: self.labels.idle.to_string(),
                    subtitle: "Type /<query> and press Enter to search".to_string(),
                }),
            ),
            ViewState::InitialLoading => (Some(StatusLine::new(StatusKind::Loading, "Loading...")), None),
            ViewState::Updating { .. } => (Some(StatusLine::new(StatusKind::Updating, "Updating...")), None),
            ViewState::Error { message } => (
                Some(StatusLine::new(
                    StatusKind::Error,
                    format!("{} {message}", self.labels.load_failed),
                )),
                None,
            ),
            ViewState::Empty => (
                None,
                Some(EmptyState {
                    message: self.labels.empty.to_string(),
                    subtitle: "Try a different search".to_string(),
                }),
            ),
            ViewState::Ready { .. } => (None, None),
        };

        let available_rows = calculate_available_rows(rows);
        let display_items = view
            .state
            .result()
            .map(|result| {
                result
                    .items
                    .iter()
                    .take(available_rows)
                    .map(|item| display_item(item, search_term, cols))
                    .collect()
            })
            .unwrap_or_default();

        UIViewModel {
            header: HeaderInfo {
                title: format!(" {} ", self.labels.title),
            },
            search_bar: SearchBarInfo {
                query: self.search.input().to_string(),
                placeholder: self.labels.search_placeholder.to_string(),
                is_pending: self.search.is_pending(),
            },
            status,
            display_items,
            empty_state,
            pagination: view.pagination.map(|p| PaginationInfo {
                page: p.page,
                total_pages: p.total_pages,
            }),
            modal,
            footer: FooterInfo {
                keybindings: keybindings.to_string(),
            },
        }
    }
}

/// Rows left for list items after the chrome drawn by
/// [`render_layout`](crate::ui::components::render_layout).
const fn calculate_available_rows(total_rows: usize) -> usize {
    let rows = total_rows.saturating_sub(crate::ui::components::CHROME_ROWS);
    if rows == 0 {
        1
    } else {
        rows
    }
}

/// Character index ranges of `text` matching `query`, coalesced into
/// contiguous `(start, end)` runs with exclusive ends.
#[must_use]
pub fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let query = query.trim();
    if query.is_empty() {
        return vec![];
    }

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Shortens `text` to at most `max_chars` characters, ending in `...`.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
