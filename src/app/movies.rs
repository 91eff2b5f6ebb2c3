//! The movie browser.
//!
//! Nothing is fetched until the first non-blank search settles. Blank
//! submissions are rejected with a notification. Selecting a listed movie
//! opens its detail view.

use crate::app::browser::{compute_highlight_ranges, truncate, Browser, BrowserLabels, BrowserSettings};
use crate::app::search::{SearchPolicy, DEFAULT_DEBOUNCE};
use crate::app::{Action, App, Event};
use crate::cache::CacheOptions;
use crate::domain::error::Result;
use crate::domain::{Entity, ItemId, ListResult, Movie};
use crate::ui::viewmodel::{DisplayItem, ModalInfo, UIViewModel};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::sync::Arc;
use std::time::Duration;

/// Results per page of the TMDB search endpoint. Fixed by the API.
pub const TMDB_PAGE_SIZE: u32 = 20;

const LABELS: BrowserLabels = BrowserLabels {
    title: "Movies",
    search_placeholder: "Search movies",
    idle: "Search for a movie to get started",
    empty: "No movies found for your request.",
    load_failed: "Failed to load movies.",
};

const KEYBINDINGS: &str = "/text: search  :page N  :next  :prev  :open ID  :q: quit";
const DETAIL_KEYBINDINGS: &str = ":close: back to results  :q: quit";

#[derive(Debug, Clone, Copy)]
pub struct MoviesSettings {
    pub debounce: Duration,
    pub cache: CacheOptions,
}

impl Default for MoviesSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            cache: CacheOptions::default(),
        }
    }
}

#[derive(Debug)]
pub struct MoviesApp {
    browser: Browser<Movie>,
    selected: Option<Movie>,
}

impl MoviesApp {
    #[must_use]
    pub fn new(settings: MoviesSettings) -> Self {
        Self {
            browser: Browser::new(BrowserSettings {
                entity: Entity::Movies,
                per_page: TMDB_PAGE_SIZE,
                policy: SearchPolicy::RejectBlank,
                debounce: settings.debounce,
                cache: settings.cache,
                labels: LABELS,
            }),
            selected: None,
        }
    }

    #[must_use]
    pub const fn browser(&self) -> &Browser<Movie> {
        &self.browser
    }

    /// The movie whose detail view is open.
    #[must_use]
    pub const fn selected(&self) -> Option<&Movie> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn displayed(&self) -> Option<Arc<ListResult<Movie>>> {
        self.browser.displayed()
    }

    fn select(&mut self, id: &ItemId) -> bool {
        let found = self
            .displayed()
            .and_then(|result| result.items.iter().find(|movie| &movie.id == id).cloned());

        match found {
            Some(movie) => {
                tracing::debug!(id = %id, title = %movie.title, "movie selected");
                self.selected = Some(movie);
                true
            }
            None => {
                tracing::debug!(id = %id, "selected movie is not on screen");
                false
            }
        }
    }

    fn display_item(movie: &Movie, search_term: &str, cols: usize, matcher: &SkimMatcherV2) -> DisplayItem {
        let title = truncate(movie.display_title(), 48);
        let detail_width = cols.saturating_sub(title.chars().count() + 20).max(10);

        DisplayItem {
            id: movie.id.to_string(),
            highlight_ranges: compute_highlight_ranges(&title, search_term, matcher),
            title,
            detail: truncate(&movie.formatted_release_date(), detail_width),
            badge: movie.vote_average.map(|vote| format!("{vote:.1}")),
            is_busy: false,
        }
    }
}

impl Default for MoviesApp {
    fn default() -> Self {
        Self::new(MoviesSettings::default())
    }
}

impl App for MoviesApp {
    fn handle_event(&mut self, event: &Event) -> Result<(bool, Vec<Action>)> {
        let _span = tracing::debug_span!("handle_event", app = "movies", event_type = ?event).entered();

        match event {
            Event::Start => Ok((true, self.browser.start())),
            Event::SearchInput(text) => Ok((true, self.browser.submit(text))),
            Event::DebounceElapsed { generation } => Ok(self.browser.settle(*generation)),
            Event::PageChange(page) => Ok(self.browser.go_to_page(*page)),
            Event::NextPage => Ok(self.browser.next_page()),
            Event::PrevPage => Ok(self.browser.prev_page()),
            Event::SelectItem(id) => Ok((self.select(id), vec![])),
            Event::CloseModal => Ok((self.selected.take().is_some(), vec![])),
            Event::MoviesFetched { key, seq, result } => {
                Ok(self.browser.on_fetched(key, *seq, result.clone()))
            }
            Event::Dispose => Ok((false, self.browser.dispose())),
            Event::OpenCreateForm
            | Event::CreateItem(_)
            | Event::DeleteItem(_)
            | Event::NotesFetched { .. }
            | Event::NoteCreated(_)
            | Event::NoteDeleted { .. } => Ok((false, vec![])),
        }
    }

    fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let matcher = SkimMatcherV2::default();
        let (modal, keybindings) = self.selected.as_ref().map_or((None, KEYBINDINGS), |movie| {
            (
                Some(ModalInfo::MovieDetail {
                    title: movie.display_title().to_string(),
                    image: movie
                        .image_url()
                        .unwrap_or_else(|| "No image available".to_string()),
                    overview: movie.display_overview().to_string(),
                    release_date: movie.formatted_release_date(),
                    rating: movie.rating_text(),
                }),
                DETAIL_KEYBINDINGS,
            )
        });

        self.browser
            .compute_viewmodel(rows, cols, keybindings, modal, |movie, term, cols| {
                Self::display_item(movie, term, cols, &matcher)
            })
    }
}
