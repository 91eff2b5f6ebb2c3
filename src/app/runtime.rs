//! The single-threaded event loop.
//!
//! [`Runtime`] owns one [`App`], the notification sink and the API clients.
//! Events are handled one at a time. Actions that need I/O or time become
//! futures in a local [`FuturesUnordered`] set; each resolves to the event
//! that reports its outcome, which is then handled like any other event. All
//! state mutation therefore happens inside [`Runtime::dispatch`].
//!
//! Debounce timers are wrapped in [`Abortable`] so a new submission can abort
//! the previous one. Fetches are never aborted: a superseded response still
//! arrives and is discarded by the cache's sequence check.

use crate::api::{FetchNotesParams, SearchMoviesParams, Services};
use crate::app::notify::NotificationSink;
use crate::app::{Action, App, Event};
use crate::cache::FetchRequest;
use crate::domain::error::Result;
use crate::domain::{DomainError, Entity};
use futures_util::future::{self, AbortHandle, Abortable, FutureExt, LocalBoxFuture};
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

type PendingEvent = LocalBoxFuture<'static, Option<Event>>;

pub struct Runtime<A, S> {
    app: A,
    sink: S,
    services: Services,
    pending: FuturesUnordered<PendingEvent>,
    debounce: Option<AbortHandle>,
}

impl<A: App, S: NotificationSink> Runtime<A, S> {
    pub fn new(app: A, sink: S, services: Services) -> Self {
        Self {
            app,
            sink,
            services,
            pending: FuturesUnordered::new(),
            debounce: None,
        }
    }

    pub const fn app(&self) -> &A {
        &self.app
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Number of timers and requests not yet reported back.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Handles one event and executes the resulting actions.
    ///
    /// Returns whether the view should be re-rendered.
    ///
    /// # Errors
    ///
    /// Propagates errors returned by [`App::handle_event`].
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let (render, actions) = self.app.handle_event(&event)?;
        for action in actions {
            self.execute(action);
        }
        Ok(render)
    }

    fn execute(&mut self, action: Action) {
        tracing::debug!(action = ?action, "executing action");
        match action {
            Action::Fetch(request) => self.spawn_fetch(request),
            Action::ScheduleDebounce { generation, delay } => self.schedule_debounce(generation, delay),
            Action::CancelDebounce => {
                if let Some(handle) = self.debounce.take() {
                    handle.abort();
                }
            }
            Action::CreateNote(payload) => {
                let task = match self.services.notes.clone() {
                    Some(api) => async move { Some(Event::NoteCreated(api.create_note(&payload).await)) }
                        .boxed_local(),
                    None => future::ready(Some(Event::NoteCreated(Err(missing_service(Entity::Notes)))))
                        .boxed_local(),
                };
                self.pending.push(task);
            }
            Action::DeleteNote(id) => {
                let task = match self.services.notes.clone() {
                    Some(api) => async move {
                        let result = api.delete_note(&id).await;
                        Some(Event::NoteDeleted { id, result })
                    }
                    .boxed_local(),
                    None => future::ready(Some(Event::NoteDeleted {
                        id,
                        result: Err(missing_service(Entity::Notes)),
                    }))
                    .boxed_local(),
                };
                self.pending.push(task);
            }
            Action::Notify(notification) => self.sink.notify(&notification),
        }
    }

    fn schedule_debounce(&mut self, generation: u64, delay: Duration) {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.debounce.replace(handle) {
            previous.abort();
        }

        let timer = Abortable::new(tokio::time::sleep(delay), registration);
        self.pending.push(
            async move {
                timer
                    .await
                    .ok()
                    .map(|()| Event::DebounceElapsed { generation })
            }
            .boxed_local(),
        );
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let FetchRequest { key, seq } = request;
        let task = match key.entity {
            Entity::Notes => match self.services.notes.clone() {
                Some(api) => async move {
                    let params = FetchNotesParams::from_query(&key.query);
                    let result = api.fetch_notes(&params).await;
                    Some(Event::NotesFetched { key, seq, result })
                }
                .boxed_local(),
                None => future::ready(Some(Event::NotesFetched {
                    key,
                    seq,
                    result: Err(missing_service(Entity::Notes)),
                }))
                .boxed_local(),
            },
            Entity::Movies => match self.services.movies.clone() {
                Some(api) => async move {
                    let params = SearchMoviesParams::from_query(&key.query);
                    let result = api.search_movies(&params).await;
                    Some(Event::MoviesFetched { key, seq, result })
                }
                .boxed_local(),
                None => future::ready(Some(Event::MoviesFetched {
                    key,
                    seq,
                    result: Err(missing_service(Entity::Movies)),
                }))
                .boxed_local(),
            },
        };
        self.pending.push(task);
    }

    /// Waits for the next completed timer or request.
    ///
    /// Aborted timers are skipped. Returns `None` when nothing is pending.
    pub async fn next_event(&mut self) -> Option<Event> {
        while let Some(outcome) = self.pending.next().await {
            if let Some(event) = outcome {
                return Some(event);
            }
        }
        None
    }

    /// Dispatches completion events until nothing is pending.
    ///
    /// # Errors
    ///
    /// Propagates errors returned by [`App::handle_event`].
    pub async fn run_until_idle(&mut self) -> Result<()> {
        while let Some(event) = self.next_event().await {
            self.dispatch(event)?;
        }
        Ok(())
    }

    /// Runs until [`Event::Dispose`] is handled or the input channel closes,
    /// interleaving user events with completion events.
    ///
    /// When input closes without a dispose, outstanding timers and requests
    /// are still run to completion before returning.
    ///
    /// `on_render` is called after every event that changed the view.
    ///
    /// # Errors
    ///
    /// Propagates errors returned by [`App::handle_event`].
    pub async fn run(
        &mut self,
        mut input: mpsc::Receiver<Event>,
        mut on_render: impl FnMut(&A, &S),
    ) -> Result<()> {
        if self.dispatch(Event::Start)? {
            on_render(&self.app, &self.sink);
        }

        let mut input_open = true;
        loop {
            let next = tokio::select! {
                received = input.recv() => {
                    input_open = received.is_some();
                    received
                }
                Some(outcome) = self.pending.next(), if !self.pending.is_empty() => outcome,
            };

            if !input_open {
                break;
            }
            let Some(event) = next else {
                continue;
            };

            let quit = matches!(event, Event::Dispose);
            if self.dispatch(event)? {
                on_render(&self.app, &self.sink);
            }
            if quit {
                break;
            }
        }

        if !input_open {
            tracing::debug!(pending = self.pending.len(), "input closed, draining");
            while let Some(event) = self.next_event().await {
                if self.dispatch(event)? {
                    on_render(&self.app, &self.sink);
                }
            }
        }

        tracing::info!(pending = self.pending.len(), "event loop stopped");
        Ok(())
    }
}

fn missing_service(entity: Entity) -> DomainError {
    DomainError::Transport(format!("{entity} API is not configured"))
}
