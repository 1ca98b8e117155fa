//! Product recommendations

use serde::{Deserialize, Serialize};

/// A recommended product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// ISO currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Average rating, 0.0 to 5.0
    #[serde(default)]
    pub rating: Option<f32>,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Category slug
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Price formatted with its currency, e.g. `USD 12.50`
    pub fn display_price(&self) -> String {
        match &self.currency {
            Some(currency) => format!("{currency} {:.2}", self.price),
            None => format!("{:.2}", self.price),
        }
    }

    /// Rating as a five-star bar, e.g. `★★★☆☆`
    pub fn stars(&self) -> Option<String> {
        self.rating.map(|r| {
            let full = r.clamp(0.0, 5.0).round() as usize;
            format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kibble() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Kibble".to_string(),
            price: 12.5,
            currency: Some("USD".to_string()),
            rating: Some(3.6),
            image: None,
            category: Some("dogs".to_string()),
        }
    }

    #[test]
    fn test_display_price() {
        assert_eq!(kibble().display_price(), "USD 12.50");
        let bare = Product {
            currency: None,
            ..kibble()
        };
        assert_eq!(bare.display_price(), "12.50");
    }

    #[test]
    fn test_stars_are_clamped() {
        assert_eq!(kibble().stars().as_deref(), Some("★★★★☆"));
        let wild = Product {
            rating: Some(9.0),
            ..kibble()
        };
        assert_eq!(wild.stars().as_deref(), Some("★★★★★"));
        let unrated = Product {
            rating: None,
            ..kibble()
        };
        assert!(unrated.stars().is_none());
    }
}
