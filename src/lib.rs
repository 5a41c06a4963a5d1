pub mod config;
pub mod error;
pub mod model;
pub mod narrow;
pub mod query;
pub mod search;
pub mod session;
pub mod source;
pub mod terminal;

pub use crate::config::SearchConfig;
pub use error::{ErrorKind, SearchError};
pub use model::{IngredientLine, RecipeDetail, RecipeSummary};
pub use narrow::{narrow, NarrowOptions};
pub use query::{validate_input, IngredientQuery};
pub use search::{RecipeSearch, RecipeSearchBuilder};
pub use session::{CloseReason, DetailState, Outcome, SearchSession, SearchState, SearchView};
pub use source::{MealDbSource, RecipeSource};
pub use terminal::TerminalView;

/// Search recipes for comma-separated ingredient input
///
/// Settings are loaded from `mealfinder.toml` and `MEALFINDER__*`
/// environment variables.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = mealfinder::search_recipes("chicken, garlic").await?;
/// for recipe in recipes {
///     println!("{}", recipe.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(input: &str) -> Result<Vec<RecipeSummary>, SearchError> {
    let query = IngredientQuery::parse(validate_input(input)?)?;
    let config = SearchConfig::load()?;
    RecipeSearchBuilder::from_config(&config)
        .build()?
        .find(&query)
        .await
}

/// Fetch the full record of one recipe
pub async fn lookup_recipe(id: &str) -> Result<RecipeDetail, SearchError> {
    let config = SearchConfig::load()?;
    RecipeSearchBuilder::from_config(&config)
        .build()?
        .detail(id)
        .await
}
