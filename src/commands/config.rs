//! Configuration commands for managing conecta settings.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one configuration value
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::api::{FileTokenStore, TokenStore};
use crate::config::Config;
use crate::error::{ConectaError, Result};

const VALID_KEYS: &str = "api.base_url, region.default, timeout";

/// Validate a config key and convert underscore notation to dot notation suggestion
fn validate_config_key(key: &str) -> Result<&str> {
    if matches!(key, "api.base_url" | "region.default" | "timeout") {
        return Ok(key);
    }

    // Only the first underscore becomes a dot (e.g., region_default -> region.default)
    if let Some(pos) = key.find('_')
        && !key.contains('.')
    {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        return Err(ConectaError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{dot_version}'"
        )));
    }

    Err(ConectaError::Config(format!(
        "unknown config key '{key}'. Valid keys: {VALID_KEYS}"
    )))
}

/// Parse "UF" or "UF/City" into its parts
fn parse_region_value(value: &str) -> Result<(String, Option<String>)> {
    let (state, city) = match value.split_once('/') {
        Some((state, city)) => (state.trim(), Some(city.trim())),
        None => (value.trim(), None),
    };

    if state.is_empty() || city.is_some_and(str::is_empty) {
        return Err(ConectaError::Config(format!(
            "invalid region '{value}'. Expected: UF or UF/City (e.g. PR/Campo Largo)"
        )));
    }

    Ok((state.to_uppercase(), city.map(str::to_string)))
}

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;
    let base_url = config.api_base_url()?;
    let logged_in = FileTokenStore::from_config_dir()?.load()?.is_some();

    let json_output = json!({
        "api_base_url": base_url.as_str(),
        "default_region": config.default_region,
        "timeout_secs": config.timeout_secs,
        "regions": config.regions,
        "logged_in": logged_in,
        "config_file": config_path.to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));
    text_output.push_str(&format!("{}: {}\n", "api.base_url".cyan(), base_url));
    text_output.push_str(&format!(
        "{}: {}\n",
        "region.default".cyan(),
        config.default_region
    ));
    text_output.push_str(&format!("{}: {}s\n", "timeout".cyan(), config.timeout_secs));

    let session = if logged_in {
        "logged in".green().to_string()
    } else {
        "not logged in".dimmed().to_string()
    };
    text_output.push_str(&format!("{}: {}\n", "session".cyan(), session));

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", config_path.display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output_json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    validate_config_key(key)?;

    let mut config = Config::load()?;

    let text_output = match key {
        "api.base_url" => {
            let url = url::Url::parse(value)?;
            config.api_base_url = Some(url.to_string());
            format!("Set {} to {}", "api.base_url".cyan(), url)
        }
        "region.default" => {
            let (state, city) = parse_region_value(value)?;
            if let Some(city) = city.as_deref()
                && !config.regions.contains(&state, city)
            {
                return Err(ConectaError::Config(format!(
                    "'{city}' is not a configured city of {state}"
                )));
            }
            config.set_default_region(&state, city.as_deref())?;
            format!("Set {} to {}", "region.default".cyan(), config.default_region)
        }
        "timeout" => {
            let secs = value
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    ConectaError::Config(format!(
                        "invalid value '{value}' for timeout. Expected a positive number of seconds"
                    ))
                })?;
            config.timeout_secs = secs;
            format!("Set {} to {}s", "timeout".cyan(), secs)
        }
        _ => {
            return Err(ConectaError::Config(format!(
                "unknown config key '{key}'. Valid keys: {VALID_KEYS}"
            )));
        }
    };

    config.save()?;

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": value,
        "success": true,
    }))
    .with_text(text_output)
    .print(output_json)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    validate_config_key(key)?;

    let config = Config::load()?;

    let value = match key {
        "api.base_url" => config.api_base_url()?.to_string(),
        "region.default" => format!(
            "{}/{}",
            config.default_region.state, config.default_region.city
        ),
        "timeout" => config.timeout_secs.to_string(),
        _ => {
            return Err(ConectaError::Config(format!(
                "unknown config key '{key}'. Valid keys: {VALID_KEYS}"
            )));
        }
    };

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value.clone())
    .print(output_json)
}
