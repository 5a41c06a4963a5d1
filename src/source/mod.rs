mod mealdb;
mod wire;

pub use mealdb::{MealDbSource, DEFAULT_BASE_URL};

use async_trait::async_trait;

use crate::model::{RecipeDetail, RecipeSummary};
use crate::SearchError;

/// Remote recipe database the search pipeline talks to
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name (e.g., "themealdb")
    fn source_name(&self) -> &str;

    /// Recipes containing a single ingredient. No matches is an empty list.
    async fn filter_by_ingredient(&self, name: &str) -> Result<Vec<RecipeSummary>, SearchError>;

    /// Full recipe record for an id
    async fn lookup(&self, id: &str) -> Result<RecipeDetail, SearchError>;
}
