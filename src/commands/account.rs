//! Session and account commands.

use std::io::{self, BufRead};

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, load_client};
use crate::api::{AccountUpdate, User};
use crate::error::{ConectaError, Result};

fn read_password_from_stdin() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(ConectaError::Auth(
            "no password given; pass --password or pipe it on stdin".to_string(),
        ));
    }
    Ok(password)
}

fn display_name(user: &User) -> String {
    let name = format!("{} {}", user.first_name, user.last_name);
    let name = name.trim();
    if name.is_empty() {
        user.email.clone()
    } else {
        name.to_string()
    }
}

pub async fn cmd_login(email: &str, password: Option<String>, output_json: bool) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => read_password_from_stdin()?,
    };

    let (_, client) = load_client()?;
    let user = client.login(email, &password).await?;

    CommandOutput::new(json!(user))
        .with_text(format!("{} {}", "Logged in as".green(), display_name(&user)))
        .print(output_json)
}

pub async fn cmd_forgot_password(email: &str, output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    client.forgot_password(email).await?;

    CommandOutput::new(json!({ "email": email.trim(), "sent": true }))
        .with_text(format!(
            "{} Check {} for the reset code",
            "Reset code sent.".green(),
            email.trim().cyan()
        ))
        .print(output_json)
}

pub fn cmd_logout(output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    client.logout()?;

    CommandOutput::new(json!({ "logged_in": false }))
        .with_text("Logged out")
        .print(output_json)
}

pub async fn cmd_me(output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    let user = client
        .check_session()
        .await?
        .ok_or(ConectaError::NotLoggedIn)?;

    let plan = if user.is_premium {
        "premium".yellow().to_string()
    } else {
        "free".dimmed().to_string()
    };
    let text = format!(
        "{}\n  email: {}\n  plan: {}",
        display_name(&user).cyan(),
        user.email,
        plan
    );

    CommandOutput::new(json!(user))
        .with_text(text)
        .print(output_json)
}

/// Profile fields to change; `None` keeps the current value.
#[derive(Default)]
pub struct AccountChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub email: Option<String>,
    pub new_password: Option<String>,
}

pub async fn cmd_update_account(
    changes: AccountChanges,
    current_password: Option<String>,
    output_json: bool,
) -> Result<()> {
    let (_, client) = load_client()?;
    let user = client
        .check_session()
        .await?
        .ok_or(ConectaError::NotLoggedIn)?;

    let current_password = match current_password {
        Some(p) => p,
        None => read_password_from_stdin()?,
    };

    let mut update = AccountUpdate::from_user(&user, current_password);
    if let Some(v) = changes.first_name {
        update.first_name = v;
    }
    if let Some(v) = changes.last_name {
        update.last_name = v;
    }
    if let Some(v) = changes.city {
        update.city = v;
    }
    if let Some(v) = changes.state {
        update.state = v;
    }
    if let Some(v) = changes.email {
        update.email = v;
    }
    update.new_password = changes.new_password;

    let user = client.update_account(update).await?;

    CommandOutput::new(json!(user))
        .with_text(format!("{} {}", "Account updated:".green(), display_name(&user)))
        .print(output_json)
}

pub async fn cmd_cancel_premium(output_json: bool) -> Result<()> {
    let (_, client) = load_client()?;
    let response = client.cancel_premium().await?;

    CommandOutput::new(response)
        .with_text("Premium plan cancelled")
        .print(output_json)
}

pub async fn cmd_delete_account(confirm: bool, output_json: bool) -> Result<()> {
    if !confirm {
        return Err(ConectaError::Other(
            "refusing to delete the account without --yes".to_string(),
        ));
    }

    let (_, client) = load_client()?;
    let response = client.delete_account().await?;

    CommandOutput::new(response)
        .with_text("Account deleted")
        .print(output_json)
}
