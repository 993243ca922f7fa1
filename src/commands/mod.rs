mod account;
mod config;
mod provider;
mod search;

pub use account::{
    AccountChanges, cmd_cancel_premium, cmd_delete_account, cmd_forgot_password, cmd_login,
    cmd_logout, cmd_me, cmd_update_account,
};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use provider::{cmd_claimed, cmd_comment, cmd_comments, cmd_like, cmd_liked, cmd_provider};
pub use search::{SearchOptions, cmd_categories, cmd_regions, cmd_search};

use std::sync::Arc;

use owo_colors::OwoColorize;
use serde_json::Value;

use crate::api::{ConectaClient, FileTokenStore, ProviderSummary};
use crate::config::Config;
use crate::error::Result;

/// A command result that renders as text or JSON.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output_json: bool) -> Result<()> {
        if output_json {
            return print_json(&self.json);
        }
        match self.text {
            Some(text) => println!("{text}"),
            None => print_json(&self.json)?,
        }
        Ok(())
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load config and build a client backed by the on-disk token.
pub(crate) fn load_client() -> Result<(Config, ConectaClient)> {
    let config = Config::load()?;
    config.validate()?;
    let tokens = Arc::new(FileTokenStore::from_config_dir()?);
    let client = ConectaClient::from_config(&config, tokens)?;
    Ok((config, client))
}

/// Single-line listing of a provider.
pub fn format_provider_line(provider: &ProviderSummary) -> String {
    let premium = if provider.is_premium {
        format!(" {}", "[premium]".yellow())
    } else {
        String::new()
    };

    let heart = if provider.user_liked { "♥" } else { "♡" };
    let location = if provider.cidade.is_empty() {
        String::new()
    } else {
        format!(" - {} ({})", provider.cidade, provider.uf)
    };

    format!(
        "{} {}{}{} {}",
        provider.cnpj_basico.cyan(),
        provider.razao_social,
        premium,
        location.dimmed(),
        format!("{heart} {}  💬 {}", provider.like_count, provider.comment_count).dimmed()
    )
}

/// Phone/e-mail/address lines, skipping the API's "not informed" placeholder.
pub fn format_contact_lines(provider: &ProviderSummary) -> Vec<String> {
    let informed = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.is_empty() && *v != "Não informado")
            .map(str::to_string)
    };

    let mut lines = Vec::new();
    if let Some(address) = informed(&provider.address) {
        lines.push(format!("address: {address}"));
    }
    if let Some(phone) = informed(&provider.telefone_1) {
        lines.push(format!("phone: {phone}"));
    }
    if let Some(email) = informed(&provider.correio_eletronico) {
        lines.push(format!("email: {email}"));
    }
    lines
}
