use log::warn;
use std::io::{self, Write};
use std::sync::Mutex;

use crate::model::{RecipeDetail, RecipeSummary};
use crate::session::SearchView;
use crate::ErrorKind;

struct Screen<W> {
    out: W,
    cards: Vec<RecipeSummary>,
}

/// Plain-text presentation of search results and recipe details
pub struct TerminalView<W> {
    screen: Mutex<Screen<W>>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            screen: Mutex::new(Screen {
                out,
                cards: Vec::new(),
            }),
        }
    }

    /// Id of the card shown at 1-based position `number`
    pub fn card_id(&self, number: usize) -> Option<String> {
        let screen = self.screen.lock().ok()?;
        number
            .checked_sub(1)
            .and_then(|index| screen.cards.get(index))
            .map(|card| card.id.clone())
    }

    /// Recipe id for a `view` target.
    ///
    /// A number picks a card from the last results and `id:<recipe id>`
    /// names a recipe directly. Any other text is taken as an id. Returns
    /// `None` for a card number that is not on screen.
    pub fn view_target(&self, target: &str) -> Option<String> {
        let target = target.trim();
        if let Some(id) = target.strip_prefix("id:") {
            let id = id.trim();
            return (!id.is_empty()).then(|| id.to_string());
        }
        match target.parse::<usize>() {
            Ok(number) => self.card_id(number),
            Err(_) => Some(target.to_string()),
        }
    }

    pub fn into_inner(self) -> W {
        let screen = self
            .screen
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        screen.out
    }

    fn draw<F>(&self, paint: F)
    where
        F: FnOnce(&mut Screen<W>) -> io::Result<()>,
    {
        let mut screen = match self.screen.lock() {
            Ok(screen) => screen,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = paint(&mut *screen).and_then(|_| screen.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

fn write_card(out: &mut impl Write, number: usize, recipe: &RecipeSummary) -> io::Result<()> {
    writeln!(out, "[{}] {}", number, recipe.name)?;
    writeln!(
        out,
        "    Category: {}",
        recipe.category.as_deref().unwrap_or("Unknown")
    )?;
    if !recipe.thumbnail_url.is_empty() {
        writeln!(out, "    Image: {}", recipe.thumbnail_url)?;
    }
    writeln!(out, "    View Recipe: view {}", number)
}

fn write_detail(out: &mut impl Write, recipe: &RecipeDetail) -> io::Result<()> {
    writeln!(out, "==== {} ====", recipe.name)?;
    if !recipe.thumbnail_url.is_empty() {
        writeln!(out, "Image: {}", recipe.thumbnail_url)?;
    }
    writeln!(
        out,
        "Category: {}",
        recipe.category.as_deref().unwrap_or("Unknown")
    )?;
    writeln!(out, "Area: {}", recipe.area.as_deref().unwrap_or("Unknown"))?;
    writeln!(out)?;
    writeln!(out, "Ingredients:")?;
    for line in &recipe.ingredient_lines {
        if line.measure.is_empty() {
            writeln!(out, "  - {}", line.ingredient)?;
        } else {
            writeln!(out, "  - {} {}", line.measure, line.ingredient)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Instructions:")?;
    writeln!(out, "{}", recipe.instructions.trim())?;
    if let Some(video) = &recipe.video_url {
        writeln!(out)?;
        writeln!(out, "Video Tutorial: Watch on YouTube {}", video)?;
    }
    writeln!(out, "(close with `close` or `esc`)")
}

impl<W: Write + Send> SearchView for TerminalView<W> {
    fn show_loading(&self) {
        self.draw(|s| writeln!(s.out, "Loading..."));
    }

    fn hide_loading(&self) {}

    fn clear_results(&self) {
        self.draw(|s| {
            s.cards.clear();
            Ok(())
        });
    }

    fn show_results(&self, recipes: &[RecipeSummary]) {
        self.draw(|s| {
            s.cards = recipes.to_vec();
            writeln!(s.out, "Found {} recipes:", recipes.len())?;
            for (index, recipe) in recipes.iter().enumerate() {
                write_card(&mut s.out, index + 1, recipe)?;
            }
            Ok(())
        });
    }

    fn show_error(&self, _kind: ErrorKind, message: &str) {
        self.draw(|s| writeln!(s.out, "Error: {}", message));
    }

    fn hide_error(&self) {}

    fn show_detail(&self, recipe: &RecipeDetail) {
        self.draw(|s| write_detail(&mut s.out, recipe));
    }

    fn close_detail(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientLine;

    fn render<F: FnOnce(&TerminalView<Vec<u8>>)>(f: F) -> String {
        let view = TerminalView::new(Vec::new());
        f(&view);
        String::from_utf8(view.into_inner()).unwrap()
    }

    fn summary(id: &str, name: &str, category: Option<&str>) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail_url: format!("https://img/{id}.jpg"),
            category: category.map(String::from),
        }
    }

    #[test]
    fn test_cards_are_numbered_and_remembered() {
        let view = TerminalView::new(Vec::new());
        view.show_results(&[
            summary("52795", "Chicken Handi", Some("Chicken")),
            summary("52945", "Kung Pao Chicken", None),
        ]);

        assert_eq!(view.card_id(1).as_deref(), Some("52795"));
        assert_eq!(view.card_id(2).as_deref(), Some("52945"));
        assert_eq!(view.card_id(0), None);
        assert_eq!(view.card_id(3), None);

        let output = String::from_utf8(view.into_inner()).unwrap();
        assert!(output.contains("[1] Chicken Handi"));
        assert!(output.contains("Category: Chicken"));
        assert!(output.contains("[2] Kung Pao Chicken"));
        assert!(output.contains("Category: Unknown"));
        assert!(output.contains("Image: https://img/52945.jpg"));
    }

    #[test]
    fn test_view_target_resolution() {
        let view = TerminalView::new(Vec::new());
        view.show_results(&[
            summary("52795", "Chicken Handi", None),
            summary("52945", "Kung Pao Chicken", None),
            summary("52940", "Brown Stew Chicken", None),
        ]);

        assert_eq!(view.view_target("2").as_deref(), Some("52945"));
        assert_eq!(view.view_target("7"), None);
        assert_eq!(view.view_target("0"), None);
        assert_eq!(view.view_target("52772"), None);
        assert_eq!(view.view_target("id:52772").as_deref(), Some("52772"));
        assert_eq!(view.view_target("id: 52772 ").as_deref(), Some("52772"));
        assert_eq!(view.view_target("id:"), None);
        assert_eq!(view.view_target("abc").as_deref(), Some("abc"));
    }

    #[test]
    fn test_clear_forgets_cards() {
        let view = TerminalView::new(Vec::new());
        view.show_results(&[summary("1", "Soup", None)]);
        view.clear_results();
        assert_eq!(view.card_id(1), None);
    }

    #[test]
    fn test_detail_rendering() {
        let recipe = RecipeDetail {
            id: "52772".to_string(),
            name: "Teriyaki Chicken Casserole".to_string(),
            thumbnail_url: "https://img/teriyaki.jpg".to_string(),
            category: Some("Chicken".to_string()),
            area: Some("Japanese".to_string()),
            instructions: "Preheat oven to 350.\nBake.".to_string(),
            ingredient_lines: vec![
                IngredientLine {
                    ingredient: "soy sauce".to_string(),
                    measure: "3/4 cup".to_string(),
                },
                IngredientLine {
                    ingredient: "garlic".to_string(),
                    measure: String::new(),
                },
            ],
            video_url: Some("https://www.youtube.com/watch?v=4aZr5hZXP_s".to_string()),
        };

        let output = render(|view| view.show_detail(&recipe));

        assert!(output.contains("==== Teriyaki Chicken Casserole ===="));
        assert!(output.contains("Area: Japanese"));
        assert!(output.contains("  - 3/4 cup soy sauce\n"));
        assert!(output.contains("  - garlic\n"));
        assert!(output.contains("Preheat oven to 350.\nBake."));
        assert!(output.contains("Watch on YouTube https://www.youtube.com/watch?v=4aZr5hZXP_s"));
    }

    #[test]
    fn test_detail_without_video() {
        let recipe = RecipeDetail {
            id: "1".to_string(),
            name: "Toast".to_string(),
            thumbnail_url: String::new(),
            category: None,
            area: None,
            instructions: "Toast the bread.".to_string(),
            ingredient_lines: Vec::new(),
            video_url: None,
        };

        let output = render(|view| view.show_detail(&recipe));

        assert!(!output.contains("YouTube"));
        assert!(!output.contains("Image:"));
    }

    #[test]
    fn test_error_line() {
        let output = render(|view| {
            view.show_error(ErrorKind::Validation, "Please enter at least one ingredient!")
        });
        assert_eq!(output, "Error: Please enter at least one ingredient!\n");
    }
}
