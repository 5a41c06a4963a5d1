use log::debug;
use std::env;
use tokio::io::{AsyncBufReadExt, BufReader};

use mealfinder::{
    CloseReason, ErrorKind, RecipeSearchBuilder, SearchConfig, SearchSession, SearchView,
    TerminalView,
};

const HELP: &str = "Enter ingredients separated by commas (e.g. chicken, garlic).
Commands: view <number>, view id:<recipe id>, close, esc, quit";

enum Command<'a> {
    Search(&'a str),
    View(&'a str),
    Close(CloseReason),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    match trimmed {
        "quit" | "exit" => Command::Quit,
        "help" => Command::Help,
        "close" => Command::Close(CloseReason::Button),
        "esc" | "\u{1b}" => Command::Close(CloseReason::Escape),
        _ => match trimmed.strip_prefix("view ") {
            Some(target) => Command::View(target.trim()),
            None => Command::Search(line),
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SearchConfig::load()?;
    debug!("Using recipe source at {}", config.base_url);
    let search = RecipeSearchBuilder::from_config(&config).build()?;
    let session = SearchSession::new(search, TerminalView::stdout());

    // Ingredients given as arguments: run one search and exit
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        session.search(&args.join(" ")).await;
        return Ok(());
    }

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Close(reason) => session.close_detail(reason),
            Command::View(target) => match session.view().view_target(target) {
                Some(id) => {
                    session.open_detail(&id).await;
                }
                None => session.view().show_error(
                    ErrorKind::Validation,
                    &format!("No recipe card matches \"{}\".", target),
                ),
            },
            Command::Search(input) => {
                session.search(input).await;
            }
        }
    }

    Ok(())
}
