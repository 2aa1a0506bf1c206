//! Configuration commands.
//!
//! - `config show`: display the effective configuration
//! - `config get <key>`: print one value (secrets masked)
//! - `config set <key> <value>`: update the config file

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{API_KEY_ENV, Config};
use crate::error::{MarqueeError, Result};

const VALID_KEYS: &str = "omdb.api_key, api.url, api.timeout, log.level";

/// Reject underscore notation for a section (`omdb_api_key`) with a hint.
fn validate_config_key(key: &str) -> Result<&str> {
    if !key.contains('.')
        && let Some(pos) = key.find('_')
    {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        return Err(MarqueeError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{dot_version}'"
        )));
    }
    Ok(key)
}

/// Show only the first 2 and last 2 characters of a secret
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

fn unknown_key(key: &str) -> MarqueeError {
    MarqueeError::Config(format!(
        "unknown config key '{key}'. Valid keys: {VALID_KEYS}"
    ))
}

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let key_configured = config.api_key().is_some();
    let key_from_env = std::env::var(API_KEY_ENV).is_ok_and(|v| !v.is_empty());

    let json_output = json!({
        "omdb": {
            "api_key_configured": key_configured,
            "api_key_from_env": key_from_env,
        },
        "api": {
            "url": config.api.url,
            "timeout": config.api.timeout,
        },
        "log": {
            "level": config.log_level(),
        },
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    let key_status = match (key_configured, key_from_env) {
        (true, true) => format!("{} (from {API_KEY_ENV})", "configured".green()),
        (true, false) => "configured".green().to_string(),
        (false, _) => "not configured".dimmed().to_string(),
    };
    text.push_str(&format!("{}:\n", "omdb".cyan()));
    text.push_str(&format!("  api_key: {key_status}\n\n"));

    text.push_str(&format!("{}:\n", "api".cyan()));
    text.push_str(&format!("  url: {}\n", config.api.url));
    text.push_str(&format!("  timeout: {}s\n\n", config.api.timeout));

    text.push_str(&format!("{}:\n", "log".cyan()));
    match config.log_level() {
        Some(level) => text.push_str(&format!("  level: {level}\n\n")),
        None => text.push_str(&format!("  level: {}\n\n", "default".dimmed())),
    }

    text.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text)
        .print(output_json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    validate_config_key(key)?;
    let mut config = Config::load()?;

    match key {
        "omdb.api_key" => config.set_api_key(value.to_string()),
        "api.url" => config.set_api_url(value)?,
        "api.timeout" => {
            let seconds = value.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                MarqueeError::Config(format!(
                    "invalid value '{value}' for api.timeout. Expected a positive number of seconds"
                ))
            })?;
            config.set_api_timeout(seconds);
        }
        "log.level" => config.set_log_level(value.to_string()),
        _ => return Err(unknown_key(key)),
    }
    config.save()?;

    // Never echo a secret back
    let shown = if key == "omdb.api_key" {
        mask_sensitive_value(value)
    } else {
        value.to_string()
    };

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": shown,
        "success": true,
    }))
    .with_text(format!("Set {} to {shown}", key.cyan()))
    .print(output_json)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    validate_config_key(key)?;
    let config = Config::load()?;

    let (json_output, text_output) = match key {
        "omdb.api_key" => {
            let api_key = config
                .api_key()
                .ok_or_else(|| MarqueeError::Config("omdb.api_key not set".to_string()))?;
            let masked = mask_sensitive_value(&api_key);
            let json = json!({
                "key": key,
                "value": masked,
                "configured": true,
                "masked": true,
            });
            let text = format!("{masked} (masked - showing first 2 and last 2 characters)");
            (json, text)
        }
        "api.url" => (
            json!({ "key": key, "value": config.api.url }),
            config.api.url.clone(),
        ),
        "api.timeout" => (
            json!({ "key": key, "value": config.api.timeout }),
            config.api.timeout.to_string(),
        ),
        "log.level" => {
            let level = config
                .log_level()
                .ok_or_else(|| MarqueeError::Config("log.level not set".to_string()))?;
            (json!({ "key": key, "value": level }), level.to_string())
        }
        _ => return Err(unknown_key(key)),
    };

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_sensitive_value() {
        assert_eq!(mask_sensitive_value("abcdef"), "ab...ef");
        assert_eq!(mask_sensitive_value("1a2b3c4d"), "1a...4d");
        assert_eq!(mask_sensitive_value("abcd"), "****");
        assert_eq!(mask_sensitive_value(""), "****");
    }

    #[test]
    fn test_mask_sensitive_value_multibyte() {
        assert_eq!(mask_sensitive_value("ключ-секрет"), "кл...ет");
    }

    #[test]
    fn test_validate_config_key() {
        assert!(validate_config_key("omdb.api_key").is_ok());
        assert!(validate_config_key("api.timeout").is_ok());

        let err = validate_config_key("omdb_api_key").unwrap_err();
        assert!(err.to_string().contains("'omdb.api_key'"));
    }
}
