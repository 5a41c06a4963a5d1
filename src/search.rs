use log::debug;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::model::{RecipeDetail, RecipeSummary};
use crate::narrow::{narrow, NarrowOptions};
use crate::query::IngredientQuery;
use crate::source::{MealDbSource, RecipeSource, DEFAULT_BASE_URL};
use crate::SearchError;

/// Ingredient search pipeline: fetch by the first ingredient, then narrow.
///
/// Holds no per-search state, so one instance can serve any number of
/// searches.
pub struct RecipeSearch {
    source: Arc<dyn RecipeSource>,
    options: NarrowOptions,
}

impl RecipeSearch {
    /// Creates a new builder for configuring a search
    ///
    /// # Example
    /// ```
    /// use mealfinder::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder();
    /// ```
    pub fn builder() -> RecipeSearchBuilder {
        RecipeSearchBuilder::default()
    }

    pub fn new(source: Arc<dyn RecipeSource>, options: NarrowOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &NarrowOptions {
        &self.options
    }

    /// Recipes containing every ingredient in `query`, in source order.
    ///
    /// An empty list means nothing matched; it is not an error.
    pub async fn find(&self, query: &IngredientQuery) -> Result<Vec<RecipeSummary>, SearchError> {
        let candidates = self.source.filter_by_ingredient(query.first()).await?;
        debug!(
            "{} candidates for '{}' from {}",
            candidates.len(),
            query.first(),
            self.source.source_name()
        );
        narrow(self.source.as_ref(), candidates, query, &self.options).await
    }

    /// Full record for one recipe
    pub async fn detail(&self, id: &str) -> Result<RecipeDetail, SearchError> {
        self.source.lookup(id).await
    }
}

/// Builder for configuring a [`RecipeSearch`]
#[derive(Default)]
pub struct RecipeSearchBuilder {
    source: Option<Arc<dyn RecipeSource>>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    concurrency: Option<usize>,
    max_failure_ratio: Option<f64>,
}

impl RecipeSearchBuilder {
    /// Take every setting from a loaded configuration
    pub fn from_config(config: &SearchConfig) -> Self {
        RecipeSearchBuilder::default()
            .base_url(config.base_url.clone())
            .timeout(Duration::from_secs(config.timeout))
            .concurrency(config.concurrency)
            .max_failure_ratio(config.max_failure_ratio)
    }

    /// Use a custom recipe source instead of TheMealDB
    ///
    /// `base_url` and `timeout` are ignored when a source is given.
    pub fn source(mut self, source: Arc<dyn RecipeSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the API base URL
    ///
    /// # Example
    /// ```
    /// use mealfinder::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .base_url("http://localhost:8080/api/json/v1/1");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for each HTTP request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Limit how many detail lookups run at once while narrowing
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.concurrency = Some(limit);
        self
    }

    /// Fraction of failed detail lookups tolerated before narrowing fails
    pub fn max_failure_ratio(mut self, ratio: f64) -> Self {
        self.max_failure_ratio = Some(ratio);
        self
    }

    /// Build the search pipeline
    ///
    /// # Errors
    /// Returns `SearchError::BuilderError` if the concurrency limit or the
    /// timeout is zero or the failure ratio is outside `0.0..=1.0`, and
    /// `SearchError::FetchError` if the HTTP client cannot be created.
    pub fn build(self) -> Result<RecipeSearch, SearchError> {
        let defaults = NarrowOptions::default();
        let options = NarrowOptions {
            concurrency: self.concurrency.unwrap_or(defaults.concurrency),
            max_failure_ratio: self.max_failure_ratio.unwrap_or(defaults.max_failure_ratio),
        };

        if options.concurrency == 0 {
            return Err(SearchError::BuilderError(
                "Concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(SearchError::BuilderError(
                "Timeout must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&options.max_failure_ratio) {
            return Err(SearchError::BuilderError(format!(
                "Failure ratio must be between 0 and 1, got {}",
                options.max_failure_ratio
            )));
        }

        let source: Arc<dyn RecipeSource> = match self.source {
            Some(source) => source,
            None => {
                let base_url = self
                    .base_url
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                Arc::new(MealDbSource::with_base_url(base_url, self.timeout)?)
            }
        };

        Ok(RecipeSearch::new(source, options))
    }
}
