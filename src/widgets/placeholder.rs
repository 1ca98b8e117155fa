//! Loading, error and empty-state placeholders

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::theme::ThemeColors;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for the given tick
pub fn spinner(tick: u64) -> &'static str {
    SPINNER[(tick / 2) as usize % SPINNER.len()]
}

/// Width of the bright band that sweeps across shimmer rows
const BAND: usize = 6;

/// Skeleton rows with a highlight band moving left to right
pub struct Shimmer<'a> {
    colors: &'a ThemeColors,
    tick: u64,
}

impl<'a> Shimmer<'a> {
    /// Create a shimmer for the given animation tick
    pub const fn new(colors: &'a ThemeColors, tick: u64) -> Self {
        Self { colors, tick }
    }

    /// Column where the band starts on a row of `width` cells
    pub fn band_start(tick: u64, width: usize) -> usize {
        (tick as usize) % (width + BAND)
    }
}

impl Widget for Shimmer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        if width == 0 {
            return;
        }
        let band = Self::band_start(self.tick, width);

        // Rows come in card-like groups: a full line, a shorter one, a gap.
        for (row, y) in (area.top()..area.bottom()).enumerate() {
            let len = match row % 3 {
                0 => width,
                1 => width * 3 / 5,
                _ => continue,
            };
            for col in 0..len {
                let style = if (band..band + BAND).contains(&col) {
                    self.colors.shimmer_band()
                } else {
                    self.colors.shimmer_base()
                };
                buf[(area.x + col as u16, y)].set_symbol("█").set_style(style);
            }
        }
    }
}

/// Loading state: shimmer skeleton with a refresh hint
pub struct LoadingPlaceholder<'a> {
    colors: &'a ThemeColors,
    tick: u64,
    title: &'a str,
}

impl<'a> LoadingPlaceholder<'a> {
    /// Create a loading placeholder
    pub const fn new(colors: &'a ThemeColors, tick: u64, title: &'a str) -> Self {
        Self {
            colors,
            tick,
            title,
        }
    }
}

impl Widget for LoadingPlaceholder<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.colors.block())
            .title(format!(" {} {} ", spinner(self.tick), self.title))
            .title_style(self.colors.text_primary());
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let padded = chunks[0].inner(Margin::new(1, 1));
        Shimmer::new(self.colors, self.tick).render(padded, buf);

        Paragraph::new(Line::from(vec![
            Span::styled(" Loading… ", self.colors.text_muted()),
            Span::styled("r", self.colors.key_hint()),
            Span::styled(": refresh", self.colors.text_muted()),
        ]))
        .render(chunks[1], buf);
    }
}

/// Error state: message plus a retry button
pub struct ErrorPlaceholder<'a> {
    colors: &'a ThemeColors,
    message: &'a str,
}

impl<'a> ErrorPlaceholder<'a> {
    /// Create an error placeholder
    pub const fn new(colors: &'a ThemeColors, message: &'a str) -> Self {
        Self { colors, message }
    }
}

impl Widget for ErrorPlaceholder<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let button = Span::styled(" ↻ Retry (Enter) ", self.colors.button());

        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Something went wrong", self.colors.text_error())),
            Line::from(""),
            Line::from(Span::styled(self.message, self.colors.text())),
            Line::from(""),
            Line::from(button),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.colors.error)),
            )
            .render(area, buf);
    }
}

/// Empty success: nothing to show, offer a refresh
pub struct EmptyPlaceholder<'a> {
    colors: &'a ThemeColors,
    message: &'a str,
}

impl<'a> EmptyPlaceholder<'a> {
    /// Create an empty-state placeholder
    pub const fn new(colors: &'a ThemeColors, message: &'a str) -> Self {
        Self { colors, message }
    }
}

impl Widget for EmptyPlaceholder<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let button = Span::styled(" ↻ Refresh (r) ", self.colors.button());

        let text = vec![
            Line::from(""),
            Line::from(Span::styled("🐾", self.colors.text_primary())),
            Line::from(""),
            Line::from(Span::styled(self.message, self.colors.text_muted())),
            Line::from(""),
            Line::from(button),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(self.colors.block()),
            )
            .render(area, buf);
    }
}
