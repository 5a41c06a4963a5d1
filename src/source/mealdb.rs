use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::wire::{MealRecord, MealSummary, MealsEnvelope};
use super::RecipeSource;
use crate::model::{RecipeDetail, RecipeSummary};
use crate::SearchError;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Client for the public TheMealDB JSON API
pub struct MealDbSource {
    client: Client,
    base_url: String,
}

impl MealDbSource {
    pub fn new(timeout: Option<Duration>) -> Result<Self, SearchError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Point the client at another host, e.g. a mock server in tests.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SearchError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(10));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mealfinder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_meals<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        param: &str,
    ) -> Result<Vec<T>, SearchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} i={}", url, param);

        let response = self.client.get(&url).query(&[("i", param)]).send().await?;

        if !response.status().is_success() {
            return Err(SearchError::StatusError(response.status()));
        }

        let body = response.text().await?;
        let envelope: MealsEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.into_meals())
    }
}

#[async_trait]
impl RecipeSource for MealDbSource {
    fn source_name(&self) -> &str {
        "themealdb"
    }

    async fn filter_by_ingredient(&self, name: &str) -> Result<Vec<RecipeSummary>, SearchError> {
        let meals: Vec<MealSummary> = self.get_meals("filter.php", name).await?;
        debug!("{} recipes contain '{}'", meals.len(), name);
        Ok(meals.into_iter().map(RecipeSummary::from).collect())
    }

    async fn lookup(&self, id: &str) -> Result<RecipeDetail, SearchError> {
        let meals: Vec<MealRecord> = self.get_meals("lookup.php", id).await?;
        meals
            .into_iter()
            .next()
            .map(RecipeDetail::from)
            .ok_or_else(|| SearchError::MissingRecipe(id.to_string()))
    }
}
