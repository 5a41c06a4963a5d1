//! Search and detail orchestration.
//!
//! A [`SearchSession`] drives the presentation layer through the
//! [`SearchView`] port. Each search and each detail lookup is tagged with a
//! generation number; a response that arrives after a newer request started
//! is dropped without touching the view.
//!
//! Searches and detail lookups share one loading indicator. It stays up
//! while either of them is in flight.

use log::{debug, error, info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::{RecipeDetail, RecipeSummary};
use crate::query::{validate_input, IngredientQuery};
use crate::search::RecipeSearch;
use crate::ErrorKind;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter at least one ingredient!";
pub const SEARCH_FAILED_MESSAGE: &str =
    "Failed to fetch recipes. Please check your internet connection and try again.";
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load recipe details. Please try again.";

pub fn not_found_message(query: &IngredientQuery) -> String {
    format!(
        "No recipes found containing: {}. Try different ingredients!",
        query.display()
    )
}

/// Presentation port the session renders through
pub trait SearchView: Send + Sync {
    fn show_loading(&self);
    fn hide_loading(&self);
    /// Remove every result card
    fn clear_results(&self);
    fn show_results(&self, recipes: &[RecipeSummary]);
    /// Single-line error region; replaces any previous message
    fn show_error(&self, kind: ErrorKind, message: &str);
    fn hide_error(&self);
    fn show_detail(&self, recipe: &RecipeDetail);
    fn close_detail(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading,
    Success(Vec<RecipeSummary>),
    Empty,
    Failed(ErrorKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Closed,
    Loading,
    Open(RecipeDetail),
    Failed(ErrorKind),
}

/// How the user dismissed the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    /// Click outside the detail surface
    Backdrop,
    Escape,
}

/// What became of a search or detail request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input failed validation; no request was made
    Rejected,
    /// The result was shown
    Completed,
    /// A newer request superseded this one and its result was dropped
    Stale,
}

/// Which requests currently hold the loading indicator
#[derive(Debug, Default)]
struct Loading {
    search: bool,
    detail: bool,
}

impl Loading {
    fn any(&self) -> bool {
        self.search || self.detail
    }
}

#[derive(Debug, Clone, Copy)]
enum Activity {
    Search,
    Detail,
}

pub struct SearchSession<V> {
    search: RecipeSearch,
    view: V,
    search_generation: AtomicU64,
    detail_generation: AtomicU64,
    state: Mutex<SearchState>,
    detail: Mutex<DetailState>,
    loading: Mutex<Loading>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<V: SearchView> SearchSession<V> {
    pub fn new(search: RecipeSearch, view: V) -> Self {
        Self {
            search,
            view,
            search_generation: AtomicU64::new(0),
            detail_generation: AtomicU64::new(0),
            state: Mutex::new(SearchState::Idle),
            detail: Mutex::new(DetailState::Closed),
            loading: Mutex::new(Loading::default()),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn state(&self) -> SearchState {
        lock(&self.state).clone()
    }

    pub fn detail_state(&self) -> DetailState {
        lock(&self.detail).clone()
    }

    /// Run a search for comma-separated ingredient input.
    ///
    /// Blank input shows the validation message and leaves the state alone.
    /// Otherwise previous results are cleared before the request goes out.
    pub async fn search(&self, raw: &str) -> Outcome {
        let query = match validate_input(raw).and_then(IngredientQuery::parse) {
            Ok(query) => query,
            Err(e) => {
                debug!("Rejected search input {:?}: {}", raw, e);
                self.view.show_error(ErrorKind::Validation, EMPTY_INPUT_MESSAGE);
                return Outcome::Rejected;
            }
        };

        let generation = {
            let mut state = lock(&self.state);
            let generation = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SearchState::Loading;
            self.view.clear_results();
            self.view.hide_error();
            self.set_loading(Activity::Search, true);
            generation
        };
        debug!("Search #{} for [{}]", generation, query.display());

        let result = self.search.find(&query).await;

        let mut state = lock(&self.state);
        if self.search_generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale results of search #{}", generation);
            return Outcome::Stale;
        }

        self.set_loading(Activity::Search, false);
        *state = match result {
            Ok(recipes) if recipes.is_empty() => {
                info!("No recipes contain all of [{}]", query.display());
                self.view
                    .show_error(ErrorKind::NotFound, &not_found_message(&query));
                SearchState::Empty
            }
            Ok(recipes) => {
                info!("Found {} recipes for [{}]", recipes.len(), query.display());
                self.view.show_results(&recipes);
                SearchState::Success(recipes)
            }
            Err(e) => {
                error!("Search for [{}] failed: {}", query.display(), e);
                self.view.show_error(e.kind(), SEARCH_FAILED_MESSAGE);
                SearchState::Failed(e.kind())
            }
        };
        Outcome::Completed
    }

    /// Drop results and messages and return to `Idle`.
    ///
    /// Any search still in flight becomes stale.
    pub fn reset(&self) {
        let mut state = lock(&self.state);
        self.search_generation.fetch_add(1, Ordering::SeqCst);
        if *state == SearchState::Loading {
            self.set_loading(Activity::Search, false);
        }
        *state = SearchState::Idle;
        self.view.clear_results();
        self.view.hide_error();
    }

    /// Fetch a recipe and show it in the detail view.
    ///
    /// On failure the detail view stays closed and the error region
    /// reports it.
    pub async fn open_detail(&self, id: &str) -> Outcome {
        let generation = {
            let mut detail = lock(&self.detail);
            let generation = self.detail_generation.fetch_add(1, Ordering::SeqCst) + 1;
            *detail = DetailState::Loading;
            self.set_loading(Activity::Detail, true);
            generation
        };

        let result = self.search.detail(id).await;

        let mut detail = lock(&self.detail);
        if self.detail_generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale detail of recipe {}", id);
            return Outcome::Stale;
        }

        self.set_loading(Activity::Detail, false);
        *detail = match result {
            Ok(recipe) => {
                self.view.show_detail(&recipe);
                DetailState::Open(recipe)
            }
            Err(e) => {
                error!("Loading recipe {} failed: {}", id, e);
                self.view.close_detail();
                self.view.show_error(ErrorKind::Remote, DETAIL_FAILED_MESSAGE);
                DetailState::Failed(e.kind())
            }
        };
        Outcome::Completed
    }

    /// Close the detail view. A lookup still in flight is discarded.
    pub fn close_detail(&self, reason: CloseReason) {
        let mut detail = lock(&self.detail);
        self.detail_generation.fetch_add(1, Ordering::SeqCst);
        if *detail == DetailState::Closed {
            return;
        }
        debug!("Closing detail view ({:?})", reason);
        if *detail == DetailState::Loading {
            self.set_loading(Activity::Detail, false);
        }
        *detail = DetailState::Closed;
        self.view.close_detail();
    }

    /// Show the indicator when the first request starts and hide it when
    /// the last one finishes.
    fn set_loading(&self, activity: Activity, active: bool) {
        let mut loading = lock(&self.loading);
        let was_shown = loading.any();
        match activity {
            Activity::Search => loading.search = active,
            Activity::Detail => loading.detail = active,
        }
        match (was_shown, loading.any()) {
            (false, true) => self.view.show_loading(),
            (true, false) => self.view.hide_loading(),
            _ => {}
        }
    }
}
