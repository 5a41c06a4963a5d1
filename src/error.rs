use thiserror::Error;

/// User-facing category of a failure, as shown in the error region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was empty after trimming
    Validation,
    /// The recipe source could not be reached or answered badly
    Remote,
    /// The search worked but nothing matched every ingredient
    NotFound,
}

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum SearchError {
    /// No ingredient was entered
    #[error("Please enter at least one ingredient")]
    EmptyInput,

    /// Network failure or timeout talking to the recipe source
    #[error("Failed to reach recipe source: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The recipe source answered with a non-success status
    #[error("Recipe source returned status {0}")]
    StatusError(reqwest::StatusCode),

    /// The response body did not have the expected shape
    #[error("Malformed response from recipe source: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The lookup endpoint returned no record for this id
    #[error("No recipe found with id {0}")]
    MissingRecipe(String),

    /// Too many per-candidate detail lookups failed while narrowing
    #[error("Narrowing failed: {failed} of {total} recipe lookups failed")]
    NarrowingFailed { failed: usize, total: usize },

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl SearchError {
    /// Map the error onto the category the presentation layer reports.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::EmptyInput => ErrorKind::Validation,
            _ => ErrorKind::Remote,
        }
    }
}
