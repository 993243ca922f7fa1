use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, format_contact_lines, format_provider_line, load_client};
use crate::api::{LikeAction, ProviderSummary};
use crate::error::Result;

pub async fn cmd_provider(cnpj_basico: &str, output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    let provider = client.provider_details(cnpj_basico).await?;

    let mut text = format_provider_line(&provider);
    if let Some(description) = provider.description.as_deref() {
        text.push_str(&format!("\n\n{description}"));
    }
    text.push_str(&format!("\n{} {}", "cnpj:".cyan(), provider.key()));
    for line in format_contact_lines(&provider) {
        text.push_str(&format!("\n{line}"));
    }
    if !provider.servicos_prestados.is_empty() {
        text.push_str(&format!(
            "\n{} {}",
            "services:".cyan(),
            provider.servicos_prestados.join(", ")
        ));
    }

    CommandOutput::new(json!(provider))
        .with_text(text)
        .print(output_json)
}

pub async fn cmd_like(cnpj_basico: &str, output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    let action = client.like_provider(cnpj_basico).await?;

    let text = match action {
        LikeAction::Added => format!("{} {}", "Liked".green(), cnpj_basico.cyan()),
        LikeAction::Removed => format!("{} {}", "Removed like from".yellow(), cnpj_basico.cyan()),
    };

    CommandOutput::new(json!({
        "cnpj_basico": cnpj_basico,
        "action": action,
    }))
    .with_text(text)
    .print(output_json)
}

pub async fn cmd_comments(cnpj_basico: &str, output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    let comments = client.provider_comments(cnpj_basico).await?;

    let text = if comments.is_empty() {
        "No comments yet".dimmed().to_string()
    } else {
        comments
            .iter()
            .map(|c| {
                let when = c.created_at.as_deref().unwrap_or_default();
                format!(
                    "{} {} {}\n  {}",
                    c.first_name.cyan(),
                    c.last_name.cyan(),
                    when.dimmed(),
                    c.comment
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    CommandOutput::new(json!(comments))
        .with_text(text)
        .print(output_json)
}

pub async fn cmd_comment(cnpj_basico: &str, text: &[String], output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    let comment = client.add_comment(cnpj_basico, &text.join(" ")).await?;

    CommandOutput::new(json!(comment))
        .with_text(format!("{} {}", "Comment added to".green(), cnpj_basico.cyan()))
        .print(output_json)
}

pub async fn cmd_liked(output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    let providers = client.liked_providers().await?;
    print_listing(&providers, "You have not liked any provider", output_json)
}

pub async fn cmd_claimed(output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    let providers = client.claimed_providers().await?;
    print_listing(&providers, "You have not claimed any provider", output_json)
}

fn print_listing(providers: &[ProviderSummary], empty: &str, output_json: bool) -> Result<()> {
    let text = if providers.is_empty() {
        empty.dimmed().to_string()
    } else {
        providers
            .iter()
            .map(format_provider_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    CommandOutput::new(json!(providers))
        .with_text(text)
        .print(output_json)
}
