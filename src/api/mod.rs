//! HTTP API for the shop backend
//!
//! Every endpoint answers with the same nested envelope,
//! `{ "data": { "data": { "<field>": ... } } }`. [`unwrap_envelope`] peels it
//! and maps failures onto the [`ApiError`] taxonomy.

pub mod client;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Banner, Category, GridLayout, Product};

pub use client::ShopClient;

/// Failures crossing the network boundary.
///
/// All variants reach the UI through the same error state; the variant is
/// only used for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No connectivity, refused connection or timeout
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx status or a body that is not a JSON envelope
    #[error("server error: {0}")]
    Server(String),
    /// The envelope is missing the expected shape
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short name of the variant, for log fields
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Server(_) => "server",
            Self::Decode(_) => "decode",
        }
    }

    /// Message suitable for showing to the user
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "Couldn't reach the shop. Check your connection.",
            Self::Server(_) => "The shop is having trouble right now.",
            Self::Decode(_) => "The shop sent something we couldn't read.",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_status() {
            Self::Server(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// The shop endpoints the UI consumes
pub trait ShopApi: Send + Sync + 'static {
    /// Fetch the category collection
    fn categories(&self) -> impl Future<Output = Result<Vec<Category>, ApiError>> + Send;

    /// Fetch promotional banners
    fn banners(&self) -> impl Future<Output = Result<Vec<Banner>, ApiError>> + Send;

    /// Fetch the home grid configuration
    fn grid_layout(&self) -> impl Future<Output = Result<GridLayout, ApiError>> + Send;

    /// Fetch product recommendations, optionally for a single category
    fn recommendations(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;
}

/// Extract `data.data.<field>` from a response body and decode it.
pub fn unwrap_envelope<T: DeserializeOwned>(body: &str, field: &str) -> Result<T, ApiError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Server(format!("malformed response body: {e}")))?;

    let inner = root
        .get("data")
        .and_then(|d| d.get("data"))
        .ok_or_else(|| ApiError::Decode("response is missing `data.data`".to_string()))?;

    let value = inner
        .get(field)
        .ok_or_else(|| ApiError::Decode(format!("response is missing `data.data.{field}`")))?;

    serde_json::from_value(value.clone())
        .map_err(|e| ApiError::Decode(format!("`{field}`: {e}")))
}
