use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for image-publish.
///
/// Contains the public base URL images are served from, the draft document
/// location, the default resize width, and commit/behavior options.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_draft_url")]
    pub draft_url: String,

    #[serde(default = "default_max_width")]
    pub max_width: String,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the public base URL committed images are published under.
fn default_base_url() -> String {
    "https://raw.githubusercontent.com/rweekly/image/master".to_string()
}

/// Returns the URL of the draft document the issue id is extracted from.
fn default_draft_url() -> String {
    "https://raw.githubusercontent.com/rweekly/rweekly.org/gh-pages/draft.md".to_string()
}

/// Returns the default maximum width for resized copies.
fn default_max_width() -> String {
    "600".to_string()
}

/// Configuration for the commit step of the publish workflow.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitConfig {
    #[serde(default = "default_message_template")]
    pub message_template: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_push")]
    pub push: bool,
}

fn default_message_template() -> String {
    "[auto] images for {issue}".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_push() -> bool {
    true
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            message_template: default_message_template(),
            remote: default_remote(),
            push: default_push(),
        }
    }
}

/// Configuration for behavior customization.
///
/// `non_interactive` suppresses the caption prompt so a missing caption
/// always falls back to the empty string.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub non_interactive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            draft_url: default_draft_url(),
            max_width: default_max_width(),
            commit: CommitConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `imagepublish.toml` in current directory
/// 3. `~/.config/.imagepublish.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./imagepublish.toml").exists() {
        fs::read_to_string("./imagepublish.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".imagepublish.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
