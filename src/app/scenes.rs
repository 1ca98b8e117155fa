//! Per-category shop scenes

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::Product;
use crate::provider::{FetchState, ProductProvider, Ticket};
use crate::router::{SceneProps, SceneRenderer};
use crate::theme::ThemeColors;
use crate::widgets::{
    CARD_HEIGHT, EmptyPlaceholder, ErrorPlaceholder, LoadingPlaceholder, ProductGrid, spinner,
};

/// Products and scroll position of one category tab
#[derive(Debug)]
pub struct Scene {
    /// Recommendations for the category
    pub products: ProductProvider,
    /// First visible card row
    pub scroll: usize,
}

impl Scene {
    const fn new(seq_floor: u64) -> Self {
        Self {
            products: ProductProvider::starting_after("recommendations", seq_floor),
            scroll: 0,
        }
    }
}

/// Scenes keyed by route key, created the first time a route is shown
#[derive(Debug, Default)]
pub struct CategoryScenes {
    scenes: HashMap<String, Scene>,
    /// Highest ticket issued by any dropped scene; new scenes number after it
    seq_floor: u64,
}

impl CategoryScenes {
    /// Scene for `key`, if it has been shown before
    pub fn get(&self, key: &str) -> Option<&Scene> {
        self.scenes.get(key)
    }

    /// Scene for `key`, created on first use
    pub fn entry(&mut self, key: &str) -> &mut Scene {
        let floor = self.seq_floor;
        self.scenes
            .entry(key.to_string())
            .or_insert_with(|| Scene::new(floor))
    }

    /// Start loading `key` if it was never loaded
    pub fn ensure_loaded(&mut self, key: &str) -> Option<Ticket> {
        let scene = self.entry(key);
        if matches!(scene.products.state(), FetchState::Idle) {
            scene.products.fetch()
        } else {
            None
        }
    }

    /// Retry a failed or empty scene
    pub fn retry(&mut self, key: &str) -> Option<Ticket> {
        let scene = self.scenes.get_mut(key)?;
        let retryable = match scene.products.state() {
            FetchState::Error(_) => true,
            FetchState::Success(products) => products.is_empty(),
            _ => false,
        };
        if retryable {
            scene.products.refetch()
        } else {
            None
        }
    }

    /// Apply a recommendation result for `key`
    pub fn settle(
        &mut self,
        key: &str,
        ticket: Ticket,
        result: Result<Vec<Product>, crate::api::ApiError>,
    ) -> bool {
        match self.scenes.get_mut(key) {
            Some(scene) => scene.products.settle(ticket, result.map(Arc::from)),
            None => false,
        }
    }

    /// Tear down every scene; outstanding results are dropped
    pub fn clear(&mut self) {
        for scene in self.scenes.values_mut() {
            scene.products.close();
            self.seq_floor = self.seq_floor.max(scene.products.last_issued());
        }
        self.scenes.clear();
    }

    /// Close all scenes without forgetting them
    pub fn close_all(&mut self) {
        for scene in self.scenes.values_mut() {
            scene.products.close();
        }
    }

    /// Scroll the scene for `key` by `delta` card rows.
    ///
    /// Returns `false` when asked to scroll up from the top, which is
    /// the pull-to-refresh gesture.
    pub fn scroll(&mut self, key: &str, delta: isize, columns: u16) -> bool {
        let scene = self.entry(key);
        if delta < 0 && scene.scroll == 0 {
            return false;
        }
        let rows = scene
            .products
            .last_good()
            .map_or(0, |p| ProductGrid::row_count(p.len(), columns));
        let max = rows.saturating_sub(1);
        scene.scroll = scene.scroll.saturating_add_signed(delta).min(max);
        true
    }

    /// Scroll the scene drawn with `scene`. Pulling past the top fires
    /// its refresh handle instead.
    pub fn scroll_or_pull(&mut self, scene: SceneProps<'_>, delta: isize, columns: u16) -> bool {
        let scrolled = self.scroll(&scene.route.key, delta, columns);
        if !scrolled {
            scene.on_refresh.fire();
        }
        scrolled
    }

    /// Number of scenes created so far
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene has been created
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

/// Renders the category scenes inside the router
pub struct ShopSceneRenderer<'a> {
    /// Scene state
    pub scenes: &'a CategoryScenes,
    /// Colors
    pub colors: &'a ThemeColors,
    /// Animation tick
    pub tick: u64,
    /// Card columns
    pub columns: u16,
}

impl SceneRenderer for ShopSceneRenderer<'_> {
    fn render_scene(&mut self, frame: &mut Frame, area: Rect, scene: SceneProps<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let hint = if scene.is_refreshing {
            Line::from(Span::styled(
                format!(" {} refreshing categories…", spinner(self.tick)),
                self.colors.text_secondary(),
            ))
        } else {
            Line::from(vec![
                Span::styled(" ↓ pull past the top (", self.colors.text_muted()),
                Span::styled("k", self.colors.key_hint()),
                Span::styled(") or press ", self.colors.text_muted()),
                Span::styled("r", self.colors.key_hint()),
                Span::styled(" to refresh", self.colors.text_muted()),
            ])
        };
        frame.render_widget(Paragraph::new(hint), chunks[0]);

        let title = scene.route.category.name.as_str();
        let scenes = self.scenes;
        let Some(state) = scenes.get(&scene.route.key) else {
            frame.render_widget(LoadingPlaceholder::new(self.colors, self.tick, title), chunks[1]);
            return;
        };

        match state.products.state() {
            FetchState::Idle | FetchState::Loading => match state.products.last_good() {
                Some(products) if !products.is_empty() => {
                    render_products(frame, chunks[1], products, state.scroll, self);
                }
                _ => frame.render_widget(
                    LoadingPlaceholder::new(self.colors, self.tick, title),
                    chunks[1],
                ),
            },
            FetchState::Error(message) => {
                frame.render_widget(ErrorPlaceholder::new(self.colors, message), chunks[1]);
            }
            FetchState::Success(products) if products.is_empty() => {
                frame.render_widget(
                    EmptyPlaceholder::new(self.colors, "Nothing here yet"),
                    chunks[1],
                );
            }
            FetchState::Success(products) => {
                render_products(frame, chunks[1], products, state.scroll, self);
            }
        }
    }
}

fn render_products(
    frame: &mut Frame,
    area: Rect,
    products: &[Product],
    scroll: usize,
    renderer: &ShopSceneRenderer<'_>,
) {
    if area.height < CARD_HEIGHT {
        return;
    }
    frame.render_widget(
        ProductGrid::new(products, renderer.columns, renderer.colors).scroll(scroll),
        area,
    );
}
