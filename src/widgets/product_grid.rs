//! Product cards laid out in a grid

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::models::Product;
use crate::theme::ThemeColors;

/// Rows of terminal cells taken by one card
pub const CARD_HEIGHT: u16 = 5;

/// Grid of product cards, scrolled by whole rows
pub struct ProductGrid<'a> {
    products: &'a [Product],
    columns: u16,
    scroll: usize,
    colors: &'a ThemeColors,
}

impl<'a> ProductGrid<'a> {
    /// Create a grid with `columns` cards per row
    pub fn new(products: &'a [Product], columns: u16, colors: &'a ThemeColors) -> Self {
        Self {
            products,
            columns: columns.max(1),
            scroll: 0,
            colors,
        }
    }

    /// Skip the first `rows` rows
    pub const fn scroll(mut self, rows: usize) -> Self {
        self.scroll = rows;
        self
    }

    /// Number of card rows needed for `count` products
    pub const fn row_count(count: usize, columns: u16) -> usize {
        let columns = if columns == 0 { 1 } else { columns as usize };
        count.div_ceil(columns)
    }
}

impl Widget for ProductGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = usize::from(self.columns);
        let visible_rows = usize::from(area.height / CARD_HEIGHT);
        if visible_rows == 0 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);

        let chunks = self.products.chunks(columns).skip(self.scroll);
        for (row_area, row) in rows.iter().zip(chunks) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, u32::from(self.columns)); columns])
                .split(*row_area);

            for (cell, product) in cells.iter().zip(row) {
                render_card(product, self.colors, *cell, buf);
            }
        }
    }
}

fn render_card(product: &Product, colors: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![Line::from(vec![
        Span::styled(product.display_price(), colors.text_success()),
    ])];
    if let Some(stars) = product.stars() {
        lines.push(Line::from(Span::styled(stars, colors.text_warning())));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block())
                .title(Span::styled(format!(" {} ", product.name), colors.text())),
        )
        .render(area, buf);
}
