//! reqwest-backed shop client

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::models::{Banner, Category, GridLayout, Product};

use super::{ApiError, ShopApi, unwrap_envelope};

/// HTTP client for the shop backend
#[derive(Debug, Clone)]
pub struct ShopClient {
    client: Client,
    base_url: String,
    categories_path: String,
    banners_path: String,
    layout_path: String,
    recommendations_path: String,
    category_params: Vec<(String, String)>,
}

impl ShopClient {
    /// Create a client from the configured endpoints
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .user_agent(concat!("pawshop/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            categories_path: config.categories_path.clone(),
            banners_path: config.banners_path.clone(),
            layout_path: config.layout_path.clone(),
            recommendations_path: config.recommendations_path.clone(),
            category_params: config
                .category_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }

    /// GET an endpoint and unwrap `data.data.<field>` from its envelope
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
        field: &str,
    ) -> Result<T, ApiError> {
        let url = build_url(&self.base_url, path, params);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Server(format!("{url} answered {status}")));
        }

        let body = response.text().await?;
        unwrap_envelope(&body, field)
    }
}

impl ShopApi for ShopClient {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_envelope(&self.categories_path, &self.category_params, "categories")
            .await
    }

    async fn banners(&self) -> Result<Vec<Banner>, ApiError> {
        self.get_envelope(&self.banners_path, &[], "banners").await
    }

    async fn grid_layout(&self) -> Result<GridLayout, ApiError> {
        self.get_envelope(&self.layout_path, &[], "layout").await
    }

    async fn recommendations(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Product>, ApiError> {
        let mut params = vec![("limit".to_string(), limit.to_string())];
        if let Some(slug) = category {
            params.push(("category".to_string(), slug.to_string()));
        }
        self.get_envelope(&self.recommendations_path, &params, "products")
            .await
    }
}

/// Join base URL, path and URL-encoded query parameters
pub fn build_url(base_url: &str, path: &str, params: &[(String, String)]) -> String {
    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 && !path.contains('?') { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }

    url
}
