use std::collections::HashSet;

use crate::model::RecipeDetail;
use crate::SearchError;

/// Reject input that is empty after trimming.
///
/// This runs before any search starts, so a rejected input never reaches
/// the loading state.
pub fn validate_input(raw: &str) -> Result<&str, SearchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SearchError::EmptyInput);
    }
    Ok(trimmed)
}

/// Ordered, non-empty list of trimmed ingredient names.
///
/// The first name drives the remote filter request, the rest are used to
/// narrow the candidates. Duplicates are kept as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientQuery {
    names: Vec<String>,
}

impl IngredientQuery {
    /// Parse comma-separated user input.
    ///
    /// # Errors
    /// Returns `SearchError::EmptyInput` when no ingredient name is left
    /// after splitting and trimming (e.g. `""` or `" , ,"`).
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let names: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();

        if names.is_empty() {
            return Err(SearchError::EmptyInput);
        }
        Ok(IngredientQuery { names })
    }

    pub fn first(&self) -> &str {
        &self.names[0]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Never true for a parsed query.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names joined with `", "`, as echoed back in messages.
    pub fn display(&self) -> String {
        self.names.join(", ")
    }

    /// True if the recipe lists every requested ingredient.
    ///
    /// Names are compared case-insensitively after trimming, on whole-name
    /// equality.
    pub fn is_satisfied_by(&self, detail: &RecipeDetail) -> bool {
        let available: HashSet<String> = detail
            .ingredient_names()
            .map(normalize)
            .collect();
        self.names.iter().all(|name| available.contains(&normalize(name)))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
