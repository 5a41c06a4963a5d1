//! JSON shapes returned by TheMealDB.
//!
//! Both endpoints wrap their records in `{ "meals": [...] }`, and both use
//! `"meals": null` when there is nothing to return.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::model::{IngredientLine, RecipeDetail, RecipeSummary};

/// The source stores ingredients in fixed slots `strIngredient1..20`.
const INGREDIENT_SLOTS: usize = 20;

#[derive(Debug, Deserialize)]
pub(crate) struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

impl<T> MealsEnvelope<T> {
    pub(crate) fn into_meals(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MealSummary {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
}

impl From<MealSummary> for RecipeSummary {
    fn from(meal: MealSummary) -> Self {
        RecipeSummary {
            id: meal.id,
            name: meal.name,
            thumbnail_url: meal.thumbnail.unwrap_or_default(),
            category: non_blank(meal.category),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MealRecord {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    /// Ingredient and measure slots, plus every field we ignore
    #[serde(flatten)]
    slots: HashMap<String, Value>,
}

impl MealRecord {
    fn slot(&self, prefix: &str, index: usize) -> Option<&str> {
        self.slots
            .get(&format!("{prefix}{index}"))
            .and_then(Value::as_str)
            .map(str::trim)
    }

    /// Scan slots in ascending order, stopping at the first blank ingredient.
    fn ingredient_lines(&self) -> Vec<IngredientLine> {
        let mut lines = Vec::new();
        for index in 1..=INGREDIENT_SLOTS {
            let ingredient = match self.slot("strIngredient", index) {
                Some(name) if !name.is_empty() => name,
                _ => break,
            };
            lines.push(IngredientLine {
                ingredient: ingredient.to_string(),
                measure: self.slot("strMeasure", index).unwrap_or("").to_string(),
            });
        }
        lines
    }
}

impl From<MealRecord> for RecipeDetail {
    fn from(meal: MealRecord) -> Self {
        let ingredient_lines = meal.ingredient_lines();
        RecipeDetail {
            id: meal.id,
            name: meal.name,
            thumbnail_url: meal.thumbnail.unwrap_or_default(),
            category: non_blank(meal.category),
            area: non_blank(meal.area),
            instructions: meal.instructions.unwrap_or_default(),
            ingredient_lines,
            video_url: non_blank(meal.youtube),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_detail(json: &str) -> RecipeDetail {
        let envelope: MealsEnvelope<MealRecord> = serde_json::from_str(json).unwrap();
        envelope.into_meals().into_iter().next().unwrap().into()
    }

    #[test]
    fn test_null_meals_is_empty() {
        let envelope: MealsEnvelope<MealSummary> =
            serde_json::from_str(r#"{"meals": null}"#).unwrap();
        assert!(envelope.into_meals().is_empty());
    }

    #[test]
    fn test_missing_meals_field_is_empty() {
        let envelope: MealsEnvelope<MealSummary> = serde_json::from_str("{}").unwrap();
        assert!(envelope.into_meals().is_empty());
    }

    #[test]
    fn test_summary_without_category() {
        let envelope: MealsEnvelope<MealSummary> = serde_json::from_str(
            r#"{"meals": [{"idMeal": "52940", "strMeal": "Brown Stew Chicken", "strMealThumb": "https://img/1.jpg"}]}"#,
        )
        .unwrap();
        let summaries: Vec<RecipeSummary> =
            envelope.into_meals().into_iter().map(Into::into).collect();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, "52940");
        assert_eq!(summaries[0].thumbnail_url, "https://img/1.jpg");
        assert!(summaries[0].category.is_none());
    }

    #[test]
    fn test_ingredient_scan_stops_at_first_blank_slot() {
        let detail = parse_detail(
            r#"{"meals": [{
                "idMeal": "1", "strMeal": "Cake",
                "strIngredient1": "flour", "strMeasure1": "200g",
                "strIngredient2": "", "strMeasure2": "",
                "strIngredient3": "sugar", "strMeasure3": "100g"
            }]}"#,
        );
        assert_eq!(
            detail.ingredient_lines,
            vec![IngredientLine {
                ingredient: "flour".to_string(),
                measure: "200g".to_string(),
            }]
        );
    }

    #[test]
    fn test_ingredient_scan_stops_at_null_slot_and_trims() {
        let detail = parse_detail(
            r#"{"meals": [{
                "idMeal": "1", "strMeal": "Omelette",
                "strIngredient1": " Eggs ", "strMeasure1": " 3 ",
                "strIngredient2": "Milk", "strMeasure2": null,
                "strIngredient3": null,
                "strIngredient4": "Salt", "strMeasure4": "pinch"
            }]}"#,
        );
        let names: Vec<&str> = detail.ingredient_names().collect();
        assert_eq!(names, vec!["Eggs", "Milk"]);
        assert_eq!(detail.ingredient_lines[0].measure, "3");
        assert_eq!(detail.ingredient_lines[1].measure, "");
    }

    #[test]
    fn test_ingredient_scan_reads_at_most_twenty_slots() {
        let mut fields = vec![
            r#""idMeal": "1""#.to_string(),
            r#""strMeal": "Feast""#.to_string(),
        ];
        for i in 1..=21 {
            fields.push(format!(r#""strIngredient{i}": "item{i}""#));
        }
        let json = format!(r#"{{"meals": [{{{}}}]}}"#, fields.join(","));
        let detail = parse_detail(&json);
        assert_eq!(detail.ingredient_lines.len(), 20);
        assert_eq!(detail.ingredient_lines[19].ingredient, "item20");
    }

    #[test]
    fn test_blank_video_is_absent() {
        let detail = parse_detail(
            r#"{"meals": [{"idMeal": "1", "strMeal": "Soup", "strYoutube": "", "strArea": "British", "strCategory": "Starter", "strInstructions": "Boil."}]}"#,
        );
        assert!(detail.video_url.is_none());
        assert_eq!(detail.area.as_deref(), Some("British"));
        assert_eq!(detail.category.as_deref(), Some("Starter"));
        assert_eq!(detail.instructions, "Boil.");
        assert!(detail.ingredient_lines.is_empty());
    }
}
