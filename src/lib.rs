//! # Pawshop 🐾
//!
//! A terminal storefront for pet products.
//!
//! ## Overview
//!
//! Pawshop shows a home screen with deals and recommendations, and a shop
//! screen with one tab per product category. The category tabs are not
//! hard-coded: they are derived from whatever the backend returns, and are
//! re-derived whenever the category collection changes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          App                                │
//! │  Orchestrates all components and runs the main event loop   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Router      │ │    Providers    │ │     Widgets     │
//! │                 │ │                 │ │                 │
//! │ • Routes        │ │ • fetch/refetch │ │ • Placeholders  │
//! │ • Tab strip     │ │ • Sequencing    │ │ • Product grid  │
//! │ • Pull refresh  │ │ • Last good     │ │ • Shimmer       │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │       API       │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • HTTP client   │ │ • Category      │
//! │ • Endpoints     │ │ • Envelopes     │ │ • Product       │
//! │ • Icons/Theme   │ │ • Error kinds   │ │ • Layout        │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Shop backend client and error taxonomy
//! - [`app`] - TUI application state and event loop
//! - [`config`] - Configuration management
//! - [`icons`] - Navigation icon lookup
//! - [`models`] - Data models (Category, Product, Banner, Layout)
//! - [`provider`] - Remote collections with request sequencing
//! - [`router`] - Category-driven tab routing
//! - [`theme`] - Theme support via ratatui-themes
//! - [`widgets`] - Loading, error and empty placeholders, product grid
//!
//! ## Example
//!
//! ```no_run
//! use pawshop::app;
//!
//! fn main() -> anyhow::Result<()> {
//!     app::run()
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/pawshop/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod app;
pub mod config;
pub mod icons;
pub mod models;
pub mod paths;
pub mod provider;
pub mod router;
pub mod theme;
pub mod widgets;

// Re-export main types for convenience
pub use api::{ApiError, ShopApi, ShopClient};
pub use app::AppState;
pub use config::Config;
pub use models::{Banner, Category, GridLayout, Product};
pub use provider::{CategoryProvider, FetchState, Resource};
pub use router::{Route, RouterView, TabRouter};
pub use theme::{Theme, ThemeColors};

// Re-export theme types from ratatui-themes crate
pub use ratatui_themes::{ThemeName, ThemePalette};

/// ASCII logo for the application
pub const LOGO: &str = r"
    ____                    __
   / __ \____ __      _____/ /_  ____  ____
  / /_/ / __ `/ | /| / / ___/ __ \/ __ \/ __ \
 / ____/ /_/ /| |/ |/ (__  ) / / / /_/ / /_/ /
/_/    \__,_/ |__/|__/____/_/ /_/\____/ .___/
                                     /_/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
