//! Category-driven tab routing.
//!
//! The [`TabRouter`] reads a [`CategoryProvider`], derives one [`Route`] per
//! category and renders either a placeholder (loading, error, empty) or a
//! tab strip with the active route's scene underneath. Scene content is
//! drawn by a caller-supplied [`SceneRenderer`].
//!
//! The router only ever reads provider state. Refreshes reach the provider
//! through [`TabRouter::forward_refresh`] and [`TabRouter::retry`], both of
//! which go through `refetch`.

mod tab_strip;

pub use tab_strip::{TabStrip, tab_width, visible_window};

use std::cell::Cell;
use std::collections::HashSet;
use std::sync::Arc;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::models::Category;
use crate::provider::{CategoryProvider, FetchState, Ticket};
use crate::theme::ThemeColors;
use crate::widgets::{EmptyPlaceholder, ErrorPlaceholder, LoadingPlaceholder};

/// A navigable tab derived from one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Stable key, the category slug
    pub key: String,
    /// Tab label, the uppercased category name
    pub title: String,
    /// Icon URL
    pub icon: Option<String>,
    /// The category the route was derived from
    pub category: Category,
}

impl From<&Category> for Route {
    fn from(category: &Category) -> Self {
        Self {
            key: category.slug.clone(),
            title: category.name.to_uppercase(),
            icon: category.image.clone(),
            category: category.clone(),
        }
    }
}

/// Derive routes from categories, preserving order.
///
/// Duplicate slugs keep their first occurrence; later ones are dropped.
pub fn routes(categories: &[Category]) -> Vec<Route> {
    let mut seen = HashSet::with_capacity(categories.len());
    categories
        .iter()
        .filter(|c| {
            let fresh = seen.insert(c.slug.as_str());
            if !fresh {
                tracing::warn!(slug = %c.slug, "duplicate category slug, keeping the first");
            }
            fresh
        })
        .map(Route::from)
        .collect()
}

/// Pull-to-refresh signal shared with scenes.
///
/// Scenes fire it through [`SceneProps::on_refresh`]; the router turns it
/// into one `refetch` call.
#[derive(Debug, Default)]
pub struct RefreshTrigger(Cell<bool>);

impl RefreshTrigger {
    /// Ask for a refresh
    pub fn fire(&self) {
        self.0.set(true);
    }

    /// Whether a refresh was asked for since the last call; clears the flag
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// What a scene gets to render
#[derive(Debug, Clone, Copy)]
pub struct SceneProps<'a> {
    /// The active route
    pub route: &'a Route,
    /// Fire to refresh the category collection
    pub on_refresh: &'a RefreshTrigger,
    /// Whether a user-initiated refresh is outstanding
    pub is_refreshing: bool,
}

/// Draws the content area for the active route
pub trait SceneRenderer {
    /// Render the scene for `scene.route` into `area`
    fn render_scene(&mut self, frame: &mut Frame, area: Rect, scene: SceneProps<'_>);
}

/// Presentation state derived from the provider.
///
/// A retry or refresh moves the provider to `Loading` before the next
/// [`TabRouter::update`], so `Error` and `Empty` are only ever shown with
/// nothing outstanding. Repeated presses are absorbed by
/// [`TabRouter::retry`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouterView {
    /// Provider not asked yet
    #[default]
    Uninitialized,
    /// First load (or retry) outstanding, nothing to show yet
    Loading,
    /// Last request failed
    Error {
        /// User-presentable message
        message: String,
    },
    /// Request succeeded with no categories
    Empty,
    /// Tabs are shown
    Populated {
        /// Index of the active route
        active: usize,
        /// Whether a refresh is outstanding behind the visible routes
        refreshing: bool,
    },
}

/// Tab router over the category collection
#[derive(Debug, Default)]
pub struct TabRouter {
    /// Collection the routes were derived from
    source: Option<Arc<[Category]>>,
    routes: Arc<[Route]>,
    active: usize,
    view: RouterView,
    trigger: RefreshTrigger,
    recomputed: u64,
}

impl TabRouter {
    /// Create a router with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Current routes
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Shared handle to the current routes
    pub fn routes_arc(&self) -> Arc<[Route]> {
        Arc::clone(&self.routes)
    }

    /// Index of the active route
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// The active route, if any
    pub fn active_route(&self) -> Option<&Route> {
        self.routes.get(self.active)
    }

    /// View computed by the last [`update`](Self::update)
    pub const fn view(&self) -> &RouterView {
        &self.view
    }

    /// How many times the route set has been rebuilt
    pub const fn recompute_count(&self) -> u64 {
        self.recomputed
    }

    /// Pull-to-refresh trigger handed to scenes
    pub const fn refresh_trigger(&self) -> &RefreshTrigger {
        &self.trigger
    }

    /// Re-derive the view from the provider.
    ///
    /// Routes are rebuilt only when the category collection is a different
    /// allocation from the one they were built from.
    pub fn update(&mut self, provider: &CategoryProvider) -> &RouterView {
        self.view = match provider.state() {
            FetchState::Idle => RouterView::Uninitialized,
            FetchState::Loading => match provider.last_good() {
                // keep showing the previous tabs while the refresh runs
                Some(categories) if !categories.is_empty() => {
                    self.sync(categories);
                    self.populated_or_empty(true)
                }
                _ => RouterView::Loading,
            },
            FetchState::Error(message) => RouterView::Error {
                message: message.clone(),
            },
            FetchState::Success(categories) => {
                self.sync(categories);
                self.populated_or_empty(provider.is_refreshing())
            }
        };
        &self.view
    }

    fn populated_or_empty(&self, refreshing: bool) -> RouterView {
        if self.routes.is_empty() {
            RouterView::Empty
        } else {
            RouterView::Populated {
                active: self.active,
                refreshing,
            }
        }
    }

    fn sync(&mut self, categories: &Arc<[Category]>) {
        if self
            .source
            .as_ref()
            .is_some_and(|s| Arc::ptr_eq(s, categories))
        {
            return;
        }

        let previous_key = self.active_route().map(|r| r.key.clone());
        self.routes = routes(categories).into();
        self.source = Some(Arc::clone(categories));
        self.recomputed += 1;

        // stay on the same category if it survived the refresh
        self.active = previous_key
            .and_then(|key| self.routes.iter().position(|r| r.key == key))
            .unwrap_or_else(|| self.active.min(self.routes.len().saturating_sub(1)));
        tracing::debug!(routes = self.routes.len(), active = self.active, "routes rebuilt");
    }

    /// Make route `index` active.
    ///
    /// Out-of-range indices are ignored and `false` is returned. Selecting
    /// never issues a network request.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.routes.len() {
            tracing::debug!(index, routes = self.routes.len(), "ignored out-of-range tab");
            return false;
        }
        self.active = index;
        if let RouterView::Populated { active, .. } = &mut self.view {
            *active = index;
        }
        true
    }

    /// Make the route with `key` active
    pub fn select_key(&mut self, key: &str) -> bool {
        match self.routes.iter().position(|r| r.key == key) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Move to the next tab, wrapping around
    pub fn select_next(&mut self) -> bool {
        if self.routes.is_empty() {
            return false;
        }
        self.select((self.active + 1) % self.routes.len())
    }

    /// Move to the previous tab, wrapping around
    pub fn select_prev(&mut self) -> bool {
        if self.routes.is_empty() {
            return false;
        }
        let len = self.routes.len();
        self.select((self.active + len - 1) % len)
    }

    /// Retry after an error, or refresh an empty result.
    ///
    /// Does nothing while a request is outstanding, so repeated presses
    /// never submit twice.
    pub fn retry(&self, provider: &mut CategoryProvider) -> Option<Ticket> {
        match self.view {
            RouterView::Error { .. } | RouterView::Empty if !provider.in_flight() => {
                provider.refetch()
            }
            _ => None,
        }
    }

    /// Props for the scene under the tabs, while tabs are shown.
    ///
    /// Input aimed at the scene goes through these, so a pull fires the
    /// same trigger the scene was rendered with.
    pub fn active_scene(&self) -> Option<SceneProps<'_>> {
        match self.view {
            RouterView::Populated { active, refreshing } => {
                self.routes.get(active).map(|route| SceneProps {
                    route,
                    on_refresh: &self.trigger,
                    is_refreshing: refreshing,
                })
            }
            _ => None,
        }
    }

    /// Turn a fired refresh trigger into a `refetch`
    pub fn forward_refresh(&self, provider: &mut CategoryProvider) -> Option<Ticket> {
        if self.trigger.take() {
            provider.refetch()
        } else {
            None
        }
    }

    /// Render the current view into `area`
    pub fn render<S: SceneRenderer>(
        &self,
        frame: &mut Frame,
        area: Rect,
        colors: &ThemeColors,
        tick: u64,
        scenes: &mut S,
    ) {
        match &self.view {
            RouterView::Uninitialized | RouterView::Loading => {
                frame.render_widget(LoadingPlaceholder::new(colors, tick, "Categories"), area);
            }
            RouterView::Error { message } => {
                frame.render_widget(ErrorPlaceholder::new(colors, message), area);
            }
            RouterView::Empty => {
                frame.render_widget(EmptyPlaceholder::new(colors, "No categories yet"), area);
            }
            RouterView::Populated { active, refreshing } => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0)])
                    .split(area);

                let mut strip = TabStrip::new(&self.routes, *active, colors).title(" Shop ");
                if *refreshing {
                    strip = strip.refreshing(tick);
                }
                frame.render_widget(strip, chunks[0]);

                if let Some(scene) = self.active_scene() {
                    scenes.render_scene(frame, chunks[1], scene);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn cats(pairs: &[(&str, &str)]) -> Arc<[Category]> {
        pairs
            .iter()
            .map(|(slug, name)| Category::new(*slug, *name))
            .collect::<Vec<_>>()
            .into()
    }

    fn loaded(pairs: &[(&str, &str)]) -> CategoryProvider {
        let mut p = CategoryProvider::new("categories");
        let t = p.fetch().unwrap();
        p.settle(t, Ok(cats(pairs)));
        p
    }

    #[test]
    fn test_routes_preserve_order_and_uppercase() {
        let c = cats(&[("dogs", "Dogs"), ("cats", "Cats"), ("small-pets", "Small pets")]);
        let r = routes(&c);
        assert_eq!(r.len(), c.len());
        for (route, cat) in r.iter().zip(c.iter()) {
            assert_eq!(route.key, cat.slug);
            assert_eq!(route.title, cat.name.to_uppercase());
            assert_eq!(&route.category, cat);
        }
    }

    #[test]
    fn test_routes_of_nothing() {
        assert!(routes(&[]).is_empty());
    }

    #[test]
    fn test_duplicate_slug_keeps_first() {
        let c = cats(&[("dogs", "Dogs"), ("cats", "Cats"), ("dogs", "Doggos")]);
        let r = routes(&c);
        assert_eq!(r.len(), 2);
        assert_eq!(r[0].title, "DOGS");
    }

    #[test]
    fn test_state_machine_views() {
        let mut router = TabRouter::new();
        let mut p = CategoryProvider::new("categories");
        assert_eq!(router.update(&p), &RouterView::Uninitialized);

        let t = p.fetch().unwrap();
        assert_eq!(router.update(&p), &RouterView::Loading);

        p.settle(t, Err(ApiError::Server("500".to_string())));
        assert!(matches!(router.update(&p), RouterView::Error { .. }));

        let t = router.retry(&mut p).unwrap();
        assert_eq!(router.update(&p), &RouterView::Loading);
        p.settle(t, Ok(cats(&[])));
        assert_eq!(router.update(&p), &RouterView::Empty);

        let t = router.retry(&mut p).unwrap();
        p.settle(t, Ok(cats(&[("dogs", "Dogs")])));
        assert_eq!(
            router.update(&p),
            &RouterView::Populated {
                active: 0,
                refreshing: false
            }
        );
    }

    #[test]
    fn test_retry_ignored_while_in_flight() {
        let mut router = TabRouter::new();
        let mut p = CategoryProvider::new("categories");
        let t = p.fetch().unwrap();
        p.settle(t, Err(ApiError::Network("down".to_string())));
        router.update(&p);

        assert!(router.retry(&mut p).is_some());
        // view still says Error until the next update, but the provider is busy
        assert!(router.retry(&mut p).is_none());
        // and the next update never shows the error while the retry runs
        assert_eq!(router.update(&p), &RouterView::Loading);
        assert!(router.retry(&mut p).is_none());
    }

    #[test]
    fn test_empty_refresh_ignored_while_in_flight() {
        let mut router = TabRouter::new();
        let mut p = loaded(&[]);
        assert_eq!(router.update(&p), &RouterView::Empty);

        let t = router.retry(&mut p).unwrap();
        assert!(router.retry(&mut p).is_none());
        assert_eq!(router.update(&p), &RouterView::Loading);

        p.settle(t, Ok(cats(&[])));
        assert_eq!(router.update(&p), &RouterView::Empty);
        assert!(router.retry(&mut p).is_some());
    }

    #[test]
    fn test_retry_does_nothing_when_populated() {
        let mut router = TabRouter::new();
        let mut p = loaded(&[("dogs", "Dogs")]);
        router.update(&p);
        assert!(router.retry(&mut p).is_none());
    }

    #[test]
    fn test_select_valid_and_invalid() {
        let mut router = TabRouter::new();
        let p = loaded(&[("dogs", "Dogs"), ("cats", "Cats")]);
        router.update(&p);

        assert!(router.select(1));
        assert_eq!(router.active_index(), 1);
        assert_eq!(
            router.view(),
            &RouterView::Populated {
                active: 1,
                refreshing: false
            }
        );

        assert!(!router.select(2));
        assert!(!router.select(usize::MAX));
        assert_eq!(router.active_index(), 1);
        // selection does not touch the provider
        assert!(!p.in_flight());
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut router = TabRouter::new();
        let p = loaded(&[("a", "A"), ("b", "B"), ("c", "C")]);
        router.update(&p);

        router.select_prev();
        assert_eq!(router.active_index(), 2);
        router.select_next();
        assert_eq!(router.active_index(), 0);
        assert!(router.select_key("b"));
        assert_eq!(router.active_index(), 1);
        assert!(!router.select_key("zebra"));
    }

    #[test]
    fn test_select_on_empty_router() {
        let mut router = TabRouter::new();
        assert!(!router.select(0));
        assert!(!router.select_next());
        assert!(!router.select_prev());
    }

    #[test]
    fn test_routes_memoized_on_identity() {
        let mut router = TabRouter::new();
        let p = loaded(&[("dogs", "Dogs")]);
        router.update(&p);
        router.update(&p);
        router.update(&p);
        assert_eq!(router.recompute_count(), 1);

        // equal contents, new allocation: rebuilt
        let p = loaded(&[("dogs", "Dogs")]);
        router.update(&p);
        assert_eq!(router.recompute_count(), 2);
    }

    #[test]
    fn test_refresh_keeps_routes_visible() {
        let mut router = TabRouter::new();
        let mut p = loaded(&[("dogs", "Dogs"), ("cats", "Cats")]);
        router.update(&p);
        router.select(1);

        router.refresh_trigger().fire();
        let t = router.forward_refresh(&mut p).unwrap();
        assert_eq!(
            router.update(&p),
            &RouterView::Populated {
                active: 1,
                refreshing: true
            }
        );
        assert_eq!(router.routes().len(), 2);

        // the active category moves but survives the refresh
        p.settle(t, Ok(cats(&[("cats", "Cats"), ("birds", "Birds"), ("dogs", "Dogs")])));
        router.update(&p);
        assert_eq!(router.active_route().unwrap().key, "cats");
        assert_eq!(router.active_index(), 0);
    }

    #[test]
    fn test_active_clamped_when_route_disappears() {
        let mut router = TabRouter::new();
        let mut p = loaded(&[("a", "A"), ("b", "B"), ("c", "C")]);
        router.update(&p);
        router.select(2);

        let t = p.refetch().unwrap();
        p.settle(t, Ok(cats(&[("a", "A"), ("b", "B")])));
        router.update(&p);
        assert_eq!(router.active_index(), 1);
    }

    #[test]
    fn test_scene_handle_reaches_provider() {
        let mut router = TabRouter::new();
        let mut p = loaded(&[("dogs", "Dogs")]);
        router.update(&p);

        let scene = router.active_scene().unwrap();
        assert_eq!(scene.route.key, "dogs");
        assert!(!scene.is_refreshing);
        scene.on_refresh.fire();

        assert!(router.forward_refresh(&mut p).is_some());
        assert!(p.is_refreshing());
    }

    #[test]
    fn test_no_scene_without_tabs() {
        let mut router = TabRouter::new();
        let mut p = CategoryProvider::new("categories");
        let t = p.fetch().unwrap();
        p.settle(t, Err(ApiError::Network("down".to_string())));
        router.update(&p);
        assert!(router.active_scene().is_none());
    }

    #[test]
    fn test_trigger_fires_once() {
        let router = TabRouter::new();
        let mut p = CategoryProvider::new("categories");
        router.refresh_trigger().fire();
        router.refresh_trigger().fire();
        assert!(router.forward_refresh(&mut p).is_some());
        assert!(router.forward_refresh(&mut p).is_none());
    }
}
