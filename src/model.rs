use serde::Serialize;

/// Minimal recipe record returned by the filter endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: Option<String>,
}

/// One `measure ingredient` pair from a recipe detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientLine {
    pub ingredient: String,
    /// Empty when the source gives no measure
    pub measure: String,
}

/// Full recipe record from the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: String,
    pub ingredient_lines: Vec<IngredientLine>,
    pub video_url: Option<String>,
}

impl RecipeDetail {
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredient_lines.iter().map(|l| l.ingredient.as_str())
    }
}
