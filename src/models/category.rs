//! Shop category definitions

use serde::{Deserialize, Serialize};

/// A product category as served by the category endpoint.
///
/// Identity is the `slug`. Categories are replaced wholesale on every
/// fetch and never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Unique key, used as the route key
    pub slug: String,
    /// Display label
    pub name: String,
    /// Icon URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Category {
    /// Create a category without an icon
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            image: None,
        }
    }

    /// Attach an icon URL
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.slug)
    }
}
