//! Application state

use std::sync::Arc;

use crate::config::Config;
use crate::icons::NavIcons;
use crate::models::GridLayout;
use crate::provider::{
    BannerProvider, CategoryProvider, LayoutProvider, ProductProvider, Resource, Ticket,
};
use crate::router::TabRouter;
use crate::theme::Theme;

use super::async_ops::{AsyncCommand, AsyncResult};
use super::scenes::CategoryScenes;

/// Upper bound for the number of recommendations per request
pub const MAX_RECOMMENDATIONS: usize = 60;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Banners, layout sections and featured products
    #[default]
    Home,
    /// Category tabs
    Shop,
}

impl Screen {
    /// Cycle to the other screen
    pub const fn next(&self) -> Self {
        match self {
            Self::Home => Self::Shop,
            Self::Shop => Self::Home,
        }
    }
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Regular navigation
    #[default]
    Normal,
    /// Keyboard help overlay
    Help,
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Current theme
    pub theme: Theme,
    /// Navigation icons, resolved at startup
    pub icons: NavIcons,
    /// Active screen
    pub screen: Screen,
    /// Input mode
    pub mode: Mode,
    /// Whether to quit
    pub should_quit: bool,
    /// Status message (bottom bar)
    pub status: String,

    /// Category collection
    pub categories: CategoryProvider,
    /// Tabs derived from the categories
    pub router: TabRouter,
    /// Products per category tab
    pub scenes: CategoryScenes,

    /// Home banners
    pub banners: BannerProvider,
    /// Home grid layout
    pub layout: LayoutProvider,
    /// Home recommendations
    pub featured: ProductProvider,
    /// Banner shown in the carousel
    pub banner_index: usize,
    /// First visible row of home recommendations
    pub home_scroll: usize,

    /// Tick counter for animations
    tick: u64,
}

impl AppState {
    /// Create a new app state
    pub fn new(config: Config, icons: NavIcons) -> Self {
        Self {
            theme: config.theme,
            config,
            icons,
            screen: Screen::Home,
            mode: Mode::Normal,
            should_quit: false,
            status: String::new(),
            categories: CategoryProvider::new("categories"),
            router: TabRouter::new(),
            scenes: CategoryScenes::default(),
            banners: BannerProvider::new("banners"),
            layout: LayoutProvider::new("layout"),
            featured: ProductProvider::new("featured"),
            banner_index: 0,
            home_scroll: 0,
            tick: 0,
        }
    }

    /// Tick for animations
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Get current tick
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    /// Cycle through themes
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.theme = self.theme;
    }

    /// Grid columns from the server layout, or the default
    pub fn columns(&self) -> u16 {
        self.layout
            .last_good()
            .map_or_else(|| GridLayout::default().effective_columns(), |l| l.effective_columns())
    }

    /// Requests for the initial load of every remote collection
    pub fn initial_commands(&mut self) -> Vec<AsyncCommand> {
        let mut cmds = Vec::new();
        if let Some(ticket) = self.categories.fetch() {
            cmds.push(AsyncCommand::FetchCategories { ticket });
        }
        cmds.extend(self.home_commands(false));
        cmds
    }

    /// Requests for the home screen; `refresh` marks them user-initiated
    pub fn home_commands(&mut self, refresh: bool) -> Vec<AsyncCommand> {
        let mut cmds = Vec::new();
        if let Some(ticket) = begin(&mut self.banners, refresh) {
            cmds.push(AsyncCommand::FetchBanners { ticket });
        }
        if let Some(ticket) = begin(&mut self.layout, refresh) {
            cmds.push(AsyncCommand::FetchLayout { ticket });
        }
        if let Some(ticket) = begin(&mut self.featured, refresh) {
            cmds.push(AsyncCommand::FetchRecommendations {
                slug: None,
                limit: self.config.recommendation_limit,
                ticket,
            });
        }
        cmds
    }

    /// Change how many recommendations are requested.
    ///
    /// Requests already sent with the old limit are superseded: the home
    /// list is invalidated and category scenes are dropped, so the active
    /// one reloads on the next poll.
    pub fn set_recommendation_limit(&mut self, limit: usize) -> Vec<AsyncCommand> {
        let limit = limit.clamp(1, MAX_RECOMMENDATIONS);
        if limit == self.config.recommendation_limit {
            return Vec::new();
        }
        self.config.recommendation_limit = limit;
        self.set_status(format!("Showing up to {limit} products"));
        tracing::debug!(limit, "recommendation limit changed");

        self.scenes.clear();
        self.featured
            .invalidate()
            .map(|ticket| AsyncCommand::FetchRecommendations {
                slug: None,
                limit,
                ticket,
            })
            .into_iter()
            .collect()
    }

    /// Work to do after input and results were handled: forward a fired
    /// pull-to-refresh, re-derive the tabs and load the active scene.
    pub fn poll_commands(&mut self) -> Vec<AsyncCommand> {
        let mut cmds = Vec::new();

        if let Some(ticket) = self.router.forward_refresh(&mut self.categories) {
            self.set_status("Refreshing categories...");
            cmds.push(AsyncCommand::FetchCategories { ticket });
        }

        self.router.update(&self.categories);

        if self.screen == Screen::Shop
            && let Some(route) = self.router.active_route()
        {
            let key = route.key.clone();
            if let Some(ticket) = self.scenes.ensure_loaded(&key) {
                cmds.push(AsyncCommand::FetchRecommendations {
                    slug: Some(key),
                    limit: self.config.recommendation_limit,
                    ticket,
                });
            }
        }

        cmds
    }

    /// Apply a worker result
    pub fn apply_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Categories { ticket, result } => {
                let ok = result.is_ok();
                let count = result.as_ref().map_or(0, Vec::len);
                // the ticket keeps its original trigger when a refresh joined it
                let refreshing = self.categories.is_refreshing();
                if self.categories.settle(ticket, result.map(Arc::from)) {
                    if ok {
                        if refreshing {
                            // products may have moved between categories
                            self.scenes.clear();
                        }
                        self.set_status(format!("Loaded {count} categories"));
                    } else {
                        self.set_status("Couldn't load categories");
                    }
                }
            }
            AsyncResult::Banners { ticket, result } => {
                self.banners.settle(ticket, result.map(Arc::from));
                let len = self.banners.last_good().map_or(0, |b| b.len());
                if self.banner_index >= len {
                    self.banner_index = 0;
                }
            }
            AsyncResult::Layout { ticket, result } => {
                self.layout.settle(ticket, result.map(Arc::new));
            }
            AsyncResult::Recommendations {
                slug: None,
                ticket,
                result,
            } => {
                self.featured.settle(ticket, result.map(Arc::from));
            }
            AsyncResult::Recommendations {
                slug: Some(slug),
                ticket,
                result,
            } => {
                self.scenes.settle(&slug, ticket, result);
            }
        }
    }

    /// Tear down all providers; later results are discarded
    pub fn close(&mut self) {
        self.categories.close();
        self.banners.close();
        self.layout.close();
        self.featured.close();
        self.scenes.close_all();
    }
}

fn begin<T: Clone>(resource: &mut Resource<T>, refresh: bool) -> Option<Ticket> {
    if refresh {
        resource.refetch()
    } else {
        resource.fetch()
    }
}
