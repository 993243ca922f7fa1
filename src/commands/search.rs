//! Search commands.
//!
//! - `search`: run one search session and print a page of results
//! - `categories`: list the category tags
//! - `regions`: list the configured states and cities

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, format_contact_lines, format_provider_line, load_client};
use crate::config::Config;
use crate::error::Result;
use crate::search::{CATEGORIES, SearchSessionController, SessionSettings};

pub struct SearchOptions {
    pub term: Option<String>,
    pub tag: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub page: u32,
    pub details: bool,
    pub output_json: bool,
}

pub async fn cmd_search(opts: SearchOptions) -> Result<()> {
    let (config, client) = load_client()?;
    let mut session = SearchSessionController::new(client, SessionSettings::from(&config));

    match (opts.state.as_deref(), opts.city.as_deref()) {
        (Some(state), city) => session.set_region(state, city)?,
        (None, Some(city)) => {
            let state = session.region().state.clone();
            session.set_region(&state, Some(city))?;
        }
        (None, None) => {}
    }

    if let Some(term) = opts.term {
        session.set_search_term(term.trim());
    }

    match opts.tag.as_deref() {
        Some(tag) => session.toggle_tag(tag).await?,
        None => session.search(1).await?,
    }

    let mut notice = None;
    if opts.page > 1 && !session.go_to_page(opts.page).await? {
        notice = Some(format!(
            "page {} is out of range (1-{}), showing page {}",
            opts.page,
            session.page_state().total_pages,
            session.page_state().current_page
        ));
    }

    let state = session.page_state();
    let window = session.page_window();

    let json_output = json!({
        "criteria": session.criteria(),
        "page": state,
        "window": window,
        "providers": session.results(),
    });

    let mut text = String::new();
    text.push_str(&format!(
        "{} {} in {} (page {} of {})\n\n",
        "Found".cyan().bold(),
        format!("{} providers", state.total_results).bold(),
        session.region(),
        state.current_page,
        state.total_pages
    ));

    if session.results().is_empty() {
        text.push_str(&format!("{}\n", "No providers found".dimmed()));
    }
    for provider in session.results() {
        text.push_str(&format_provider_line(provider));
        text.push('\n');
        if opts.details {
            for line in format_contact_lines(provider) {
                text.push_str(&format!("    {}\n", line.dimmed()));
            }
        }
    }

    if state.total_pages > 1 {
        text.push_str(&format!("\n{} {}", "Pages:".cyan(), window));
    }
    if let Some(notice) = notice {
        text.push_str(&format!("\n{}", notice.yellow()));
    }

    CommandOutput::new(json_output)
        .with_text(text.trim_end().to_string())
        .print(opts.output_json)
}

pub fn cmd_categories(output_json: bool) -> Result<()> {
    CommandOutput::new(json!(CATEGORIES))
        .with_text(CATEGORIES.join("\n"))
        .print(output_json)
}

pub fn cmd_regions(output_json: bool) -> Result<()> {
    let config = Config::load()?;

    let mut text = String::new();
    for state in config.regions.states() {
        text.push_str(&format!("{} ({})\n", state.name.cyan(), state.code));
        for city in &state.cities {
            let marker = if config.default_region.state == state.code
                && config.default_region.city == *city
            {
                " (default)".green().to_string()
            } else {
                String::new()
            };
            text.push_str(&format!("  {city}{marker}\n"));
        }
    }

    CommandOutput::new(json!({
        "default": config.default_region,
        "states": config.regions,
    }))
    .with_text(text.trim_end().to_string())
    .print(output_json)
}
