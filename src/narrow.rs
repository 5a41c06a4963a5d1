use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use crate::model::RecipeSummary;
use crate::query::IngredientQuery;
use crate::source::RecipeSource;
use crate::SearchError;

/// Tuning for multi-ingredient narrowing
#[derive(Debug, Clone, PartialEq)]
pub struct NarrowOptions {
    /// Maximum number of detail lookups in flight at once
    pub concurrency: usize,
    /// Fraction of failed lookups above which narrowing gives up
    pub max_failure_ratio: f64,
}

impl Default for NarrowOptions {
    fn default() -> Self {
        Self {
            concurrency: 6,
            max_failure_ratio: 0.5,
        }
    }
}

/// Keep only the candidates whose ingredient list covers every query name.
///
/// A single-ingredient query is returned untouched, since the filter
/// endpoint already matched on it. Otherwise each candidate's detail is
/// looked up concurrently and the output keeps the candidates' order.
///
/// Lookups that fail drop their candidate. If every lookup fails, or more
/// than `options.max_failure_ratio` of them do, the whole call fails with
/// `SearchError::NarrowingFailed`.
pub async fn narrow(
    source: &dyn RecipeSource,
    candidates: Vec<RecipeSummary>,
    query: &IngredientQuery,
    options: &NarrowOptions,
) -> Result<Vec<RecipeSummary>, SearchError> {
    if query.len() <= 1 || candidates.is_empty() {
        return Ok(candidates);
    }

    let total = candidates.len();
    debug!(
        "Narrowing {} candidates to [{}] via {}",
        total,
        query.display(),
        source.source_name()
    );

    let checked: Vec<(RecipeSummary, Result<bool, SearchError>)> = stream::iter(candidates)
        .map(move |candidate| async move {
            let matched = source
                .lookup(&candidate.id)
                .await
                .map(|detail| query.is_satisfied_by(&detail));
            (candidate, matched)
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    let mut failed = 0;
    let mut narrowed = Vec::new();
    for (candidate, matched) in checked {
        match matched {
            Ok(true) => narrowed.push(candidate),
            Ok(false) => {}
            Err(e) => {
                warn!("Lookup of recipe {} failed: {}", candidate.id, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        let ratio = failed as f64 / total as f64;
        // Nothing was checked, so an empty result would claim "no matches"
        if failed == total || ratio > options.max_failure_ratio {
            return Err(SearchError::NarrowingFailed { failed, total });
        }
        info!(
            "Narrowed over {} of {} candidates, {} lookups failed",
            total - failed,
            total,
            failed
        );
    }

    Ok(narrowed)
}
