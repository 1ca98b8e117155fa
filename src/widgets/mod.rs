//! Reusable storefront widgets

mod placeholder;
mod product_grid;

pub use placeholder::{EmptyPlaceholder, ErrorPlaceholder, LoadingPlaceholder, Shimmer, spinner};
pub use product_grid::{CARD_HEIGHT, ProductGrid};

use ratatui::layout::Rect;

/// Rectangle of `percent_x` by `percent_y` centered in `r`
pub const fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(popup_width)) / 2,
        y: r.y + (r.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}
