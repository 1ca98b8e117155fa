//! Server-driven grid layout for the home screen

use serde::{Deserialize, Serialize};

/// Fewest columns the grid renders with
pub const MIN_COLUMNS: u16 = 1;
/// Most columns the grid renders with
pub const MAX_COLUMNS: u16 = 6;

/// Kind of content a home section shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Promotional banners
    Banners,
    /// Category shortcuts
    Categories,
    /// Product recommendations
    #[default]
    #[serde(other)]
    Products,
}

/// One titled section of the home grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSection {
    /// Section heading
    pub title: String,
    /// What the section shows
    #[serde(default)]
    pub kind: SectionKind,
}

/// Grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Number of product columns
    #[serde(default = "default_columns")]
    pub columns: u16,
    /// Rows of products per page
    #[serde(default = "default_rows")]
    pub rows: u16,
    /// Ordered home sections
    #[serde(default)]
    pub sections: Vec<GridSection>,
}

fn default_columns() -> u16 {
    2
}

fn default_rows() -> u16 {
    3
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
            sections: vec![
                GridSection {
                    title: "Deals".to_string(),
                    kind: SectionKind::Banners,
                },
                GridSection {
                    title: "Recommended".to_string(),
                    kind: SectionKind::Products,
                },
            ],
        }
    }
}

impl GridLayout {
    /// Column count clamped to what the terminal grid can render
    pub fn effective_columns(&self) -> u16 {
        self.columns.clamp(MIN_COLUMNS, MAX_COLUMNS)
    }

    /// Number of products that fit on one page
    pub fn page_size(&self) -> usize {
        usize::from(self.effective_columns()) * usize::from(self.rows.max(1))
    }
}
