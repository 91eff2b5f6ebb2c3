//! Debounced search input.
//!
//! Raw keystrokes are never applied directly. Each submission bumps a
//! generation counter and asks the runtime to schedule a timer carrying that
//! generation; only the timer of the latest generation may settle the term.
//! Late timers from superseded submissions are therefore harmless even if the
//! runtime fails to abort them.

use crate::domain::DomainError;
use std::time::Duration;

/// Quiescence window before a submitted term settles.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Message shown when a movie search is submitted without a query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter your search query.";

/// How blank input is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPolicy {
    /// Blank input settles as "no filter" (notes).
    AllowEmpty,
    /// Blank input is rejected up front and the settled term is trimmed
    /// (movies).
    RejectBlank,
}

/// Result of [`SearchController::submit_raw_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A timer for `generation` must fire after `delay`.
    Scheduled { generation: u64, delay: Duration },
    /// Input refused; nothing was scheduled and the pending term is untouched.
    Rejected(DomainError),
    /// The controller has been disposed.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSearch {
    generation: u64,
    term: String,
}

#[derive(Debug, Clone)]
pub struct SearchController {
    policy: SearchPolicy,
    delay: Duration,
    generation: u64,
    input: String,
    pending: Option<PendingSearch>,
    disposed: bool,
}

impl SearchController {
    #[must_use]
    pub fn new(policy: SearchPolicy, delay: Duration) -> Self {
        Self {
            policy,
            delay,
            generation: 0,
            input: String::new(),
            pending: None,
            disposed: false,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> SearchPolicy {
        self.policy
    }

    /// The text last accepted from the user, settled or not.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Accepts a raw keystroke result and restarts the debounce window.
    pub fn submit_raw_input(&mut self, text: &str) -> Submission {
        if self.disposed {
            return Submission::Ignored;
        }

        if self.policy == SearchPolicy::RejectBlank && text.trim().is_empty() {
            tracing::debug!("blank search rejected");
            return Submission::Rejected(DomainError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
        }

        self.generation += 1;
        self.input = text.to_string();
        self.pending = Some(PendingSearch {
            generation: self.generation,
            term: text.to_string(),
        });

        tracing::debug!(generation = self.generation, "search debounce scheduled");
        Submission::Scheduled {
            generation: self.generation,
            delay: self.delay,
        }
    }

    /// Settles the pending term if `generation` is the latest submission.
    ///
    /// Returns the term exactly once per submission; timers from earlier
    /// generations get `None`.
    pub fn settle(&mut self, generation: u64) -> Option<String> {
        if self.pending.as_ref()?.generation != generation {
            tracing::debug!(generation, latest = self.generation, "stale debounce timer ignored");
            return None;
        }

        let pending = self.pending.take()?;
        let term = match self.policy {
            // Blank means "no filter" and shares the unfiltered key.
            SearchPolicy::AllowEmpty if pending.term.trim().is_empty() => String::new(),
            SearchPolicy::AllowEmpty => pending.term,
            SearchPolicy::RejectBlank => pending.term.trim().to_string(),
        };
        Some(term)
    }

    /// Drops any pending emission; later submissions are ignored.
    pub fn dispose(&mut self) {
        self.pending = None;
        self.disposed = true;
    }
}
