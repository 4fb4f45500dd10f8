use tracing::{info, warn};

use crate::io::gateway::SuggestError;
use crate::model::{
    GroundingSource, ProfileDraft, RecipientProfile, SuggestionBatch, SuggestionId,
    ValidationErrors,
};
use crate::ops::queue::{Decision, FavouritesSet, Resolution, SuggestionQueue};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Loading,
    Suggestions,
    Favourites,
}

/// Message shown on the loading screen once a request has finished badly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A failed request, with the user-facing error text
    Error(String),
    /// The request worked but produced no ideas and no sources
    NoResults,
}

pub const NO_RESULTS_MESSAGE: &str =
    "No gift ideas found this time. Try adjusting your search criteria or broadening your budget!";

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Error(msg) => msg,
            Notice::NoResults => NO_RESULTS_MESSAGE,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Handed out by [`Session::submit`]; the caller runs the request and
/// reports back with the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub profile: RecipientProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("the form can only be submitted from the form view")]
    NotOnForm,
    #[error("{0}")]
    Invalid(ValidationErrors),
}

/// What happened to a delivered result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Suggestions (or sources) arrived and are now showing
    Showing,
    /// Nothing came back; the loading view shows the no-results notice
    Empty,
    /// The request failed; the loading view shows the error
    Failed,
    /// The result belonged to a cancelled or superseded request and was dropped
    Stale,
}

/// Outcome of a swipe on the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Wrong view or wrong card; nothing changed
    Ignored,
    /// The card was resolved and more remain
    Resolved,
    /// That was the last card; the session moved to the favourites view
    Exhausted,
}

/// All application state that outlives a single screen: the form,
/// the current batch, and the favourites.
#[derive(Debug, Clone)]
pub struct Session {
    draft: ProfileDraft,
    view: View,
    loading: bool,
    notice: Option<Notice>,
    queue: SuggestionQueue,
    favourites: FavouritesSet,
    sources: Vec<GroundingSource>,
    generation: u64,
    in_flight: Option<u64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            draft: ProfileDraft::default(),
            view: View::Form,
            loading: false,
            notice: None,
            queue: SuggestionQueue::default(),
            favourites: FavouritesSet::default(),
            sources: Vec::new(),
            generation: 0,
            in_flight: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn queue(&self) -> &SuggestionQueue {
        &self.queue
    }

    pub fn favourites(&self) -> &FavouritesSet {
        &self.favourites
    }

    pub fn sources(&self) -> &[GroundingSource] {
        &self.sources
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    /// Generation of the request whose result is still wanted, if any
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Validate the form and move to the loading view
    pub fn submit(&mut self, current_year: i32) -> Result<RequestTicket, SubmitError> {
        if self.view != View::Form {
            return Err(SubmitError::NotOnForm);
        }
        let profile = self.draft.validate(current_year).map_err(SubmitError::Invalid)?;

        self.notice = None;
        self.queue.clear();
        self.sources.clear();
        self.loading = true;
        self.view = View::Loading;
        self.generation += 1;
        self.in_flight = Some(self.generation);

        info!(generation = self.generation, "submitted gift request");
        Ok(RequestTicket {
            generation: self.generation,
            profile,
        })
    }

    /// Deliver the result of the request started with `generation`
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<SuggestionBatch, SuggestError>,
    ) -> Completion {
        if self.in_flight != Some(generation) || self.view != View::Loading {
            warn!(
                generation,
                current = ?self.in_flight,
                "discarding result of a cancelled or superseded request"
            );
            return Completion::Stale;
        }
        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(batch) if batch.is_empty() => {
                info!(generation, "request returned no ideas");
                self.notice = Some(Notice::NoResults);
                Completion::Empty
            }
            Ok(batch) => {
                info!(
                    generation,
                    suggestions = batch.suggestions.len(),
                    sources = batch.sources.len(),
                    "showing suggestions"
                );
                self.queue = SuggestionQueue::from_batch(batch.suggestions);
                self.sources = batch.sources;
                self.view = View::Suggestions;
                Completion::Showing
            }
            Err(e) => {
                warn!(generation, error = %e, "gift request failed");
                self.notice = Some(Notice::Error(e.to_string()));
                Completion::Failed
            }
        }
    }

    /// Return to the form. Any request still running is abandoned.
    pub fn back_to_form(&mut self) {
        self.view = View::Form;
        self.notice = None;
        self.loading = false;
        self.in_flight = None;
    }

    /// Cancel from the loading view (same as going back to the form)
    pub fn cancel(&mut self) {
        self.back_to_form();
    }

    pub fn show_favourites(&mut self) {
        if self.in_flight.take().is_some() {
            self.loading = false;
            info!("left loading view; pending request abandoned");
        }
        self.view = View::Favourites;
    }

    pub fn dismiss(&mut self, id: SuggestionId) -> SwipeOutcome {
        self.decide(id, Decision::Dismiss)
    }

    pub fn favourite(&mut self, id: SuggestionId) -> SwipeOutcome {
        self.decide(id, Decision::Favourite)
    }

    /// Apply a swipe decision to the card `id`
    pub fn decide(&mut self, id: SuggestionId, decision: Decision) -> SwipeOutcome {
        if self.view != View::Suggestions {
            return SwipeOutcome::Ignored;
        }
        match self.queue.resolve(id, decision, &mut self.favourites) {
            Resolution::Ignored => SwipeOutcome::Ignored,
            Resolution::Resolved { exhausted: false } => SwipeOutcome::Resolved,
            Resolution::Resolved { exhausted: true } => {
                self.view = View::Favourites;
                SwipeOutcome::Exhausted
            }
        }
    }

    /// Remove a favourite; returns false if it was not one
    pub fn unfavourite(&mut self, id: SuggestionId) -> bool {
        self.favourites.remove(id).is_some()
    }
}
