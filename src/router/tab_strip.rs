//! Horizontally scrolling tab strip

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::ThemeColors;
use crate::widgets::spinner;

use super::Route;

/// Columns taken by the divider between two tabs
const DIVIDER: &str = "│";
/// Columns reserved on each side for an overflow marker
const MARKER_WIDTH: usize = 2;

/// Display width of a tab label, padding included
pub fn tab_width(title: &str) -> usize {
    title.width() + 2
}

/// Pick the run of tabs to draw so that `active` is always visible.
///
/// If everything fits, all tabs are shown. Otherwise the window grows from
/// the active tab, alternating right then left, inside `available` minus
/// room for the overflow markers.
pub fn visible_window(widths: &[usize], active: usize, available: usize) -> Range<usize> {
    let n = widths.len();
    if n == 0 {
        return 0..0;
    }
    let active = active.min(n - 1);
    let divider = DIVIDER.width();

    let total: usize = widths.iter().sum::<usize>() + divider * (n - 1);
    if total <= available {
        return 0..n;
    }

    let budget = available.saturating_sub(2 * MARKER_WIDTH);
    let (mut start, mut end) = (active, active + 1);
    let mut used = widths[active];

    loop {
        let mut grew = false;
        if end < n && used + divider + widths[end] <= budget {
            used += divider + widths[end];
            end += 1;
            grew = true;
        }
        if start > 0 && used + divider + widths[start - 1] <= budget {
            used += divider + widths[start - 1];
            start -= 1;
            grew = true;
        }
        if !grew {
            break;
        }
    }

    start..end
}

/// Tab strip for a set of routes
pub struct TabStrip<'a> {
    routes: &'a [Route],
    active: usize,
    colors: &'a ThemeColors,
    title: &'a str,
    refreshing: Option<u64>,
}

impl<'a> TabStrip<'a> {
    /// Create a strip with `active` highlighted
    pub const fn new(routes: &'a [Route], active: usize, colors: &'a ThemeColors) -> Self {
        Self {
            routes,
            active,
            colors,
            title: "",
            refreshing: None,
        }
    }

    /// Title drawn on the strip's border
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Show a refresh spinner animated by `tick`
    pub const fn refreshing(mut self, tick: u64) -> Self {
        self.refreshing = Some(tick);
        self
    }
}

impl Widget for TabStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.colors.block())
            .title(Span::styled(self.title, self.colors.logo()));
        if let Some(tick) = self.refreshing {
            block = block.title(
                Line::from(Span::styled(
                    format!(" {} refreshing ", spinner(tick)),
                    self.colors.text_secondary(),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let widths: Vec<usize> = self.routes.iter().map(|r| tab_width(&r.title)).collect();
        let window = visible_window(&widths, self.active, inner.width as usize);

        let mut spans = Vec::with_capacity(window.len() * 2 + 2);
        if window.start > 0 {
            spans.push(Span::styled("‹ ", self.colors.text_muted()));
        }
        for i in window.clone() {
            if i > window.start {
                spans.push(Span::styled(DIVIDER, self.colors.text_muted()));
            }
            let style = if i == self.active {
                self.colors.tab_active()
            } else {
                self.colors.tab()
            };
            spans.push(Span::styled(format!(" {} ", self.routes[i].title), style));
        }
        if window.end < self.routes.len() {
            spans.push(Span::styled(" ›", self.colors.text_muted()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
