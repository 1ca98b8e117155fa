//! Configuration module for Pawshop

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme
    #[serde(default)]
    pub theme: Theme,

    /// Shop backend base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Category collection endpoint
    #[serde(default = "default_categories_path")]
    pub categories_path: String,

    /// Promotional banners endpoint
    #[serde(default = "default_banners_path")]
    pub banners_path: String,

    /// Home grid layout endpoint
    #[serde(default = "default_layout_path")]
    pub layout_path: String,

    /// Product recommendations endpoint
    #[serde(default = "default_recommendations_path")]
    pub recommendations_path: String,

    /// Upper bound for a single request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Number of products to fetch per recommendation request
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Icon key for the home screen entry in the navigation bar
    #[serde(default = "default_home_icon")]
    pub home_icon: String,

    /// Icon key for the shop screen entry in the navigation bar
    #[serde(default = "default_shop_icon")]
    pub shop_icon: String,

    /// Extra query parameters sent with the category request
    #[serde(default)]
    pub category_params: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_categories_path() -> String {
    "/api/categories".to_string()
}

fn default_banners_path() -> String {
    "/api/banners".to_string()
}

fn default_layout_path() -> String {
    "/api/layout".to_string()
}

fn default_recommendations_path() -> String {
    "/api/recommendations".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_recommendation_limit() -> usize {
    20
}

fn default_home_icon() -> String {
    "home".to_string()
}

fn default_shop_icon() -> String {
    "paw".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            base_url: default_base_url(),
            categories_path: default_categories_path(),
            banners_path: default_banners_path(),
            layout_path: default_layout_path(),
            recommendations_path: default_recommendations_path(),
            request_timeout_secs: default_request_timeout(),
            recommendation_limit: default_recommendation_limit(),
            home_icon: default_home_icon(),
            shop_icon: default_shop_icon(),
            category_params: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        crate::paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}
