//! Form state controller
//!
//! Owns the raw field values, touched/error bookkeeping and the result of
//! the last search. All transitions go through `&self`, so the controller
//! can be shared between the UI and a pending submit; the state lock is
//! never held across the network call.

use std::collections::BTreeSet;

use parking_lot::Mutex;
use serde::Serialize;

use crate::api::{Character, CharacterSource, Lookup};
use crate::filter::filter_by_min_episodes;
use crate::query::build_query;
use crate::schema::{self, Field, FieldErrors, FieldValue, FormInput};
use crate::SchemaError;

/// Message shown for any transport, status or decode failure.
pub const FETCH_ERROR_MESSAGE: &str =
    "Could not fetch data. Check your connection or try different filters.";

/// Placeholder shown when the result list is empty and nothing is loading.
pub const EMPTY_RESULTS_MESSAGE: &str = "No results yet.";

/// Query execution phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Empty,
    Error,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Success | Phase::Empty | Phase::Error)
    }
}

/// Snapshot of everything the screen renders.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FormState {
    pub input: FormInput,
    pub touched: BTreeSet<Field>,
    pub errors: FieldErrors,
    pub phase: Phase,
    pub results: Vec<Character>,
    pub error_message: String,
    pub in_flight: bool,
}

impl FormState {
    fn refresh_error(&mut self, field: Field) {
        match schema::validate_field(field, &self.input) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Leaves a finished search behind when the user starts something new.
    fn settle(&mut self) {
        if self.phase.is_terminal() {
            self.phase = Phase::Idle;
        }
    }
}

/// What a call to [`FormController::submit`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A search was already in flight; nothing happened.
    Busy,
    /// Validation failed; no request was made.
    Invalid(FieldErrors),
    /// The search ran to the given terminal phase.
    Finished(Phase),
}

pub struct FormController<S> {
    source: S,
    state: Mutex<FormState>,
}

impl<S: CharacterSource> FormController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(FormState::default()),
        }
    }

    pub fn snapshot(&self) -> FormState {
        self.state.lock().clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Updates a field. Touched fields are re-validated immediately.
    pub fn set_field(&self, field: Field, value: impl Into<FieldValue>) -> Result<(), SchemaError> {
        let mut state = self.state.lock();
        state.input.set(field, value.into())?;
        if state.touched.contains(&field) {
            state.refresh_error(field);
        }
        Ok(())
    }

    /// Marks a field as touched (blur). The first touch validates it.
    pub fn touch(&self, field: Field) {
        let mut state = self.state.lock();
        if state.touched.insert(field) {
            state.refresh_error(field);
        }
    }

    /// Validates the whole form and, if valid, runs the search.
    pub async fn submit(&self) -> SubmitOutcome {
        let values = {
            let mut state = self.state.lock();
            if state.in_flight {
                tracing::debug!("submit ignored, search already in flight");
                return SubmitOutcome::Busy;
            }
            state.settle();

            match schema::validate(&state.input) {
                Ok(values) => {
                    state.errors.clear();
                    state.in_flight = true;
                    state.phase = Phase::Loading;
                    state.results.clear();
                    state.error_message.clear();
                    values
                }
                Err(errors) => {
                    state.touched.extend(Field::ALL);
                    state.errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        let guard = InFlight { state: &self.state };
        let params = build_query(&values);
        tracing::debug!(params = ?params.pairs(), min_episodes = values.min_episodes, "submitting search");

        let fetched = self.source.fetch(&params).await;

        let mut state = guard.finish();
        match fetched {
            Ok(Lookup::Found(page)) => {
                let received = page.results.as_ref().map_or(0, Vec::len);
                let results = filter_by_min_episodes(page.into_results(), values.min_episodes);
                tracing::info!(received, kept = results.len(), "search finished");
                state.phase = Phase::Success;
                state.results = results;
            }
            Ok(Lookup::NotFound) => {
                tracing::info!("search matched no characters");
                state.phase = Phase::Empty;
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                state.phase = Phase::Error;
                state.error_message = FETCH_ERROR_MESSAGE.to_string();
            }
        }
        SubmitOutcome::Finished(state.phase)
    }

    /// Restores defaults and forgets errors and results.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        let in_flight = state.in_flight;
        *state = FormState {
            in_flight,
            phase: if in_flight { Phase::Loading } else { Phase::Idle },
            ..FormState::default()
        };
    }
}

/// Clears the in-flight flag on every exit path, including a dropped
/// submit future.
struct InFlight<'a> {
    state: &'a Mutex<FormState>,
}

impl<'a> InFlight<'a> {
    fn finish(self) -> parking_lot::MutexGuard<'a, FormState> {
        let mutex = self.state;
        std::mem::forget(self);
        let mut state = mutex.lock();
        state.in_flight = false;
        state
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.in_flight = false;
        if state.phase == Phase::Loading {
            state.phase = Phase::Idle;
        }
    }
}
