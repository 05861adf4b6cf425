use crate::error::{PortfolioError, Result};
use crate::settings::UiSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file, relative to the working directory
pub const CONFIG_FILE: &str = "portfolio.json5";

/// Application configuration structure
///
/// Contains the content shown on the portfolio page and the settings for its
/// interactive behaviour
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Name of the site displayed in the page title
    pub site_name: String,
    /// Person the portfolio belongs to
    pub owner: String,
    /// One-line introduction shown under the hero heading
    #[serde(default)]
    pub tagline: String,
    /// Public contact address shown next to the contact form; may be empty
    #[serde(default)]
    pub email: String,
    /// Projects rendered as cards
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Timings and thresholds of the interactive layer
    #[serde(default)]
    pub ui: UiSettings,
}

/// A project card on the portfolio page
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Project {
    /// Card title
    pub title: String,
    /// Short description
    pub description: String,
    /// Link to the project, usually external; empty when there is none
    #[serde(default)]
    pub url: String,
    /// Image loaded lazily once the card becomes visible; empty when there is none
    #[serde(default)]
    pub image: String,
    /// List of tags shown on the card
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Config {
    /// Load the application configuration from the default `portfolio.json5` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load the application configuration from `path`.
    ///
    /// # Returns
    ///
    /// Returns the loaded Config if successful, or a `PortfolioError` if an error occurs
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid json5, has an
    /// empty site name, or carries invalid UI settings
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading application configuration from {}", path.display());
        let config_str = fs::read_to_string(path)?;

        let config: Config = json5::from_str(&config_str)?;
        config.validate()?;

        tracing::info!(
            "Configuration loaded successfully with {} projects",
            config.projects.len()
        );
        Ok(config)
    }

    /// Validates the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the site name is blank or the UI settings are invalid
    pub fn validate(&self) -> Result<()> {
        if self.site_name.trim().is_empty() {
            return Err(PortfolioError::from("Site name cannot be empty"));
        }
        self.ui.validate()
    }
}
