//! Listing & filter controller.
//!
//! Owns the roster, the current filter selection, the filter vocabulary and
//! the single pending-export slot. Every roster-replacing fetch carries a
//! generation number; a fetch that finishes after a newer one started is
//! discarded instead of clobbering fresh state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::api::models::{FilterSelection, FilterVocabulary, Student};
use crate::api::StudentApi;

#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    #[error("Failed to fetch students")]
    RosterFetch,
    #[error("No record found")]
    FilteredFetch,
    #[error("an export is already pending for student {0}")]
    ExportPending(i64),
}

/// Per-operation fetch lifecycle: Idle -> Loading -> (Loaded | Error).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

#[derive(Debug, Default)]
struct RosterState {
    students: Vec<Student>,
    selection: FilterSelection,
    vocabulary: FilterVocabulary,
    fetch: FetchState,
}

pub struct RosterController {
    api: Arc<dyn StudentApi>,
    state: RwLock<RosterState>,
    generation: AtomicU64,
    pending_export: Mutex<Option<i64>>,
}

impl RosterController {
    pub fn new(api: Arc<dyn StudentApi>) -> Self {
        Self {
            api,
            state: RwLock::new(RosterState::default()),
            generation: AtomicU64::new(0),
            pending_export: Mutex::new(None),
        }
    }

    fn begin_fetch(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().fetch = FetchState::Loading;
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Fetch the full roster, replacing the current one wholesale.
    ///
    /// On failure the roster is cleared and the error state carries the
    /// display message `Failed to fetch students`.
    pub async fn load_roster(&self) -> Result<(), RosterError> {
        let generation = self.begin_fetch();
        let fetched = self.api.fetch_all_students().await;

        if !self.is_current(generation) {
            log::debug!("discarding stale roster fetch (generation {generation})");
            return Ok(());
        }

        match fetched {
            Ok(students) => {
                log::info!("loaded roster with {} students", students.len());
                let mut state = self.state.write();
                state.students = students;
                state.fetch = FetchState::Loaded;
                Ok(())
            }
            Err(err) => {
                log::error!("roster fetch failed: {err}");
                let mut state = self.state.write();
                state.students.clear();
                state.fetch = FetchState::Error(RosterError::RosterFetch.to_string());
                Err(RosterError::RosterFetch)
            }
        }
    }

    /// Fetch the four filter reference lists concurrently. Each list is
    /// best-effort: a failure is logged and leaves that list empty without
    /// affecting the others.
    pub async fn load_filter_vocabulary(&self) {
        let (ages, states, levels, genders) = futures::join!(
            self.api.fetch_ages(),
            self.api.fetch_states(),
            self.api.fetch_levels(),
            self.api.fetch_genders(),
        );

        let mut state = self.state.write();
        match ages {
            Ok(options) => state.vocabulary.ages = options,
            Err(err) => log::warn!("failed to fetch age options: {err}"),
        }
        match states {
            Ok(options) => state.vocabulary.states = options,
            Err(err) => log::warn!("failed to fetch state options: {err}"),
        }
        match levels {
            Ok(options) => state.vocabulary.levels = options,
            Err(err) => log::warn!("failed to fetch level options: {err}"),
        }
        match genders {
            Ok(options) => state.vocabulary.genders = options,
            Err(err) => log::warn!("failed to fetch gender options: {err}"),
        }
    }

    /// Submit the selection to the filter endpoint and replace the roster
    /// with the server's answer (an empty answer is still a success).
    ///
    /// A fully unset selection is a no-op: no network call, roster unchanged.
    pub async fn apply_filters(&self, selection: FilterSelection) -> Result<(), RosterError> {
        if selection.is_unset() {
            log::debug!("all filters unset, skipping filter fetch");
            return Ok(());
        }

        self.state.write().selection = selection.clone();

        let generation = self.begin_fetch();
        let fetched = self.api.filter_students(&selection).await;

        if !self.is_current(generation) {
            log::debug!("discarding stale filtered fetch (generation {generation})");
            return Ok(());
        }

        match fetched {
            Ok(students) => {
                log::info!("filter matched {} students", students.len());
                let mut state = self.state.write();
                state.students = students;
                state.fetch = FetchState::Loaded;
                Ok(())
            }
            Err(err) => {
                log::error!("filtered fetch failed: {err}");
                self.state.write().fetch =
                    FetchState::Error(RosterError::FilteredFetch.to_string());
                Err(RosterError::FilteredFetch)
            }
        }
    }

    /// Clear the selection and any error state, then refetch the unfiltered
    /// roster unconditionally.
    pub async fn reset_filters(&self) -> Result<(), RosterError> {
        {
            let mut state = self.state.write();
            state.selection = FilterSelection::default();
            state.fetch = FetchState::Idle;
        }
        self.load_roster().await
    }

    /// Record a student as the pending export target.
    ///
    /// Only one export may be pending at a time; selecting another student
    /// while one is in flight is rejected, not queued.
    pub fn select_for_export(&self, student_id: i64) -> Result<(), RosterError> {
        let mut pending = self.pending_export.lock();
        if let Some(current) = *pending {
            return Err(RosterError::ExportPending(current));
        }
        *pending = Some(student_id);
        Ok(())
    }

    /// Completion signal from the assembler: clears the pending slot.
    pub fn complete_export(&self) {
        *self.pending_export.lock() = None;
    }

    pub fn pending_export(&self) -> Option<i64> {
        *self.pending_export.lock()
    }

    pub fn students(&self) -> Vec<Student> {
        self.state.read().students.clone()
    }

    pub fn selection(&self) -> FilterSelection {
        self.state.read().selection.clone()
    }

    pub fn vocabulary(&self) -> FilterVocabulary {
        self.state.read().vocabulary.clone()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.state.read().fetch.clone()
    }
}
