//! The notes manager.
//!
//! Lists notes with debounced search and pagination, creates notes from a
//! form, and deletes notes by id. Every successful mutation invalidates all
//! notes list entries so the visible page is refetched.

use crate::app::browser::{compute_highlight_ranges, truncate, Browser, BrowserLabels, BrowserSettings};
use crate::app::mutation::MutationController;
use crate::app::search::{SearchPolicy, DEFAULT_DEBOUNCE};
use crate::app::{Action, App, Event};
use crate::cache::CacheOptions;
use crate::domain::error::Result;
use crate::domain::{Entity, ItemId, ListResult, Note, NoteTag};
use crate::ui::viewmodel::{DisplayItem, ModalInfo, UIViewModel};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::sync::Arc;
use std::time::Duration;

/// Page size of the notes list.
pub const DEFAULT_PER_PAGE: u32 = 12;

const LABELS: BrowserLabels = BrowserLabels {
    title: "NoteHub",
    search_placeholder: "Search notes",
    idle: "No notes loaded",
    empty: "No notes found.",
    load_failed: "Failed to load notes.",
};

const KEYBINDINGS: &str =
    "/text: search  :page N  :next  :prev  :new title | content | tag  :del ID  :q: quit";
const FORM_KEYBINDINGS: &str = ":new title | content | tag: create  :close: cancel";

/// Settings for [`NotesApp::new`].
#[derive(Debug, Clone, Copy)]
pub struct NotesSettings {
    pub per_page: u32,
    pub debounce: Duration,
    pub cache: CacheOptions,
}

impl Default for NotesSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            debounce: DEFAULT_DEBOUNCE,
            cache: CacheOptions::default(),
        }
    }
}

#[derive(Debug)]
pub struct NotesApp {
    browser: Browser<Note>,
    mutations: MutationController,
    form_open: bool,
}

impl NotesApp {
    #[must_use]
    pub fn new(settings: NotesSettings) -> Self {
        Self {
            browser: Browser::new(BrowserSettings {
                entity: Entity::Notes,
                per_page: settings.per_page,
                policy: SearchPolicy::AllowEmpty,
                debounce: settings.debounce,
                cache: settings.cache,
                labels: LABELS,
            }),
            mutations: MutationController::new(),
            form_open: false,
        }
    }

    #[must_use]
    pub const fn browser(&self) -> &Browser<Note> {
        &self.browser
    }

    #[must_use]
    pub const fn mutations(&self) -> &MutationController {
        &self.mutations
    }

    #[must_use]
    pub const fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Notes currently on screen.
    #[must_use]
    pub fn displayed(&self) -> Option<Arc<ListResult<Note>>> {
        self.browser.displayed()
    }

    fn display_item(&self, note: &Note, search_term: &str, cols: usize, matcher: &SkimMatcherV2) -> DisplayItem {
        let title = truncate(&note.title, 40);
        let detail_width = cols.saturating_sub(title.chars().count() + 24).max(10);

        DisplayItem {
            id: note.id.to_string(),
            highlight_ranges: compute_highlight_ranges(&title, search_term, matcher),
            title,
            detail: truncate(&note.content.replace('\n', " "), detail_width),
            badge: Some(note.tag.to_string()),
            is_busy: self.mutations.is_deleting(&note.id),
        }
    }

    fn create(&mut self, payload: &crate::domain::CreateNotePayload) -> Vec<Action> {
        if self.mutations.begin_create() {
            vec![Action::CreateNote(payload.clone())]
        } else {
            vec![]
        }
    }

    fn delete(&mut self, id: &ItemId) -> Vec<Action> {
        if self.mutations.begin_delete(id) {
            vec![Action::DeleteNote(id.clone())]
        } else {
            vec![]
        }
    }
}

impl Default for NotesApp {
    fn default() -> Self {
        Self::new(NotesSettings::default())
    }
}

impl App for NotesApp {
    fn handle_event(&mut self, event: &Event) -> Result<(bool, Vec<Action>)> {
        let _span = tracing::debug_span!("handle_event", app = "notes", event_type = ?event).entered();

        match event {
            Event::Start => Ok((true, self.browser.start())),
            Event::SearchInput(text) => Ok((true, self.browser.submit(text))),
            Event::DebounceElapsed { generation } => Ok(self.browser.settle(*generation)),
            Event::PageChange(page) => Ok(self.browser.go_to_page(*page)),
            Event::NextPage => Ok(self.browser.next_page()),
            Event::PrevPage => Ok(self.browser.prev_page()),
            Event::OpenCreateForm => {
                self.form_open = true;
                Ok((true, vec![]))
            }
            Event::CloseModal => {
                let was_open = std::mem::replace(&mut self.form_open, false);
                Ok((was_open, vec![]))
            }
            Event::CreateItem(payload) => Ok((true, self.create(payload))),
            Event::DeleteItem(id) => Ok((true, self.delete(id))),
            Event::NotesFetched { key, seq, result } => {
                Ok(self.browser.on_fetched(key, *seq, result.clone()))
            }
            Event::NoteCreated(result) => {
                let outcome = self.mutations.finish_create(result);
                if result.is_ok() {
                    self.form_open = false;
                }
                let mut actions = vec![Action::Notify(outcome.notification)];
                if outcome.invalidate {
                    actions.extend(self.browser.invalidate_all());
                }
                Ok((true, actions))
            }
            Event::NoteDeleted { id, result } => {
                let outcome = self.mutations.finish_delete(id, result);
                let mut actions = vec![Action::Notify(outcome.notification)];
                if outcome.invalidate {
                    actions.extend(self.browser.invalidate_all());
                }
                Ok((true, actions))
            }
            Event::Dispose => Ok((false, self.browser.dispose())),
            Event::SelectItem(_) | Event::MoviesFetched { .. } => Ok((false, vec![])),
        }
    }

    fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let matcher = SkimMatcherV2::default();
        let (modal, keybindings) = if self.form_open {
            (
                Some(ModalInfo::NoteForm {
                    tags: NoteTag::ALL.iter().map(ToString::to_string).collect(),
                    is_submitting: self.mutations.is_creating(),
                }),
                FORM_KEYBINDINGS,
            )
        } else {
            (None, KEYBINDINGS)
        };

        self.browser
            .compute_viewmodel(rows, cols, keybindings, modal, |note, term, cols| {
                self.display_item(note, term, cols, &matcher)
            })
    }
}
