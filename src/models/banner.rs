//! Promotional banners shown on the home screen

use serde::{Deserialize, Serialize};

/// A promotional banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    /// Banner identifier
    #[serde(default)]
    pub id: String,
    /// Headline
    pub title: String,
    /// Secondary line
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Category slug or URL the banner points at
    #[serde(default)]
    pub link: Option<String>,
}
