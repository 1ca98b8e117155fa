//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
};

use super::scenes::ShopSceneRenderer;
use super::state::{AppState, Mode, Screen};
use crate::models::{GridLayout, SectionKind};
use crate::provider::FetchState;
use crate::theme::ThemeColors;
use crate::widgets::{
    CARD_HEIGHT, EmptyPlaceholder, ErrorPlaceholder, LoadingPlaceholder, ProductGrid, Shimmer,
    centered_rect, spinner,
};

/// Main render function
pub fn render(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();

    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation
            Constraint::Min(0),    // Screen
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_nav(frame, state, &colors, chunks[0]);
    match state.screen {
        Screen::Home => render_home(frame, state, &colors, chunks[1]),
        Screen::Shop => {
            let mut scenes = ShopSceneRenderer {
                scenes: &state.scenes,
                colors: &colors,
                tick: state.current_tick(),
                columns: state.columns(),
            };
            state
                .router
                .render(frame, chunks[1], &colors, state.current_tick(), &mut scenes);
        }
    }
    render_status_bar(frame, state, &colors, chunks[2]);

    if state.mode == Mode::Help {
        render_help_popup(frame, &colors);
    }
}

fn render_nav(frame: &mut Frame, state: &AppState, colors: &ThemeColors, area: Rect) {
    let titles = vec![
        Line::from(format!("{}  Home", state.icons.home.glyph())),
        Line::from(format!("{}  Shop", state.icons.shop.glyph())),
    ];

    let selected = match state.screen {
        Screen::Home => 0,
        Screen::Shop => 1,
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block())
                .title(" Pawshop ")
                .title_style(colors.logo()),
        )
        .select(selected)
        .style(colors.tab())
        .highlight_style(colors.text_primary().add_modifier(Modifier::BOLD))
        .divider(Span::styled(" │ ", colors.text_muted()));

    frame.render_widget(tabs, area);
}

fn render_home(frame: &mut Frame, state: &AppState, colors: &ThemeColors, area: Rect) {
    let fallback = GridLayout::default();
    let sections = match state.layout.last_good() {
        Some(layout) if !layout.sections.is_empty() => &layout.sections,
        _ => &fallback.sections,
    };

    let constraints: Vec<Constraint> = sections
        .iter()
        .map(|s| match s.kind {
            SectionKind::Banners => Constraint::Length(5),
            SectionKind::Categories => Constraint::Length(3),
            SectionKind::Products => Constraint::Min(CARD_HEIGHT + 2),
        })
        .collect();
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (section, section_area) in sections.iter().zip(areas.iter()) {
        match section.kind {
            SectionKind::Banners => {
                render_banners(frame, state, colors, &section.title, *section_area);
            }
            SectionKind::Categories => {
                render_category_chips(frame, state, colors, &section.title, *section_area);
            }
            SectionKind::Products => {
                render_featured(frame, state, colors, &section.title, *section_area);
            }
        }
    }
}

fn render_banners(frame: &mut Frame, state: &AppState, colors: &ThemeColors, title: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block())
        .title(format!(" {title} "))
        .title_style(colors.text_primary());

    let banners = match (state.banners.state(), state.banners.last_good()) {
        (FetchState::Error(message), _) => {
            let text = Paragraph::new(Line::from(vec![
                Span::styled(message.as_str(), colors.text_error()),
                Span::styled("  r", colors.key_hint()),
                Span::styled(": retry", colors.text_muted()),
            ]))
            .block(block);
            frame.render_widget(text, area);
            return;
        }
        (_, Some(banners)) => banners,
        _ => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Shimmer::new(colors, state.current_tick()), inner);
            return;
        }
    };

    let Some(banner) = banners.get(state.banner_index) else {
        frame.render_widget(
            Paragraph::new(Span::styled("No deals today", colors.text_muted())).block(block),
            area,
        );
        return;
    };

    let dots: String = (0..banners.len())
        .map(|i| if i == state.banner_index { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = vec![Line::from(Span::styled(
        banner.title.as_str(),
        colors.text().add_modifier(Modifier::BOLD),
    ))];
    if let Some(subtitle) = &banner.subtitle {
        lines.push(Line::from(Span::styled(subtitle.as_str(), colors.text_muted())));
    }
    lines.push(Line::from(Span::styled(dots, colors.text_secondary())));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn render_category_chips(
    frame: &mut Frame,
    state: &AppState,
    colors: &ThemeColors,
    title: &str,
    area: Rect,
) {
    let mut spans = Vec::new();
    for route in state.router.routes() {
        spans.push(Span::styled(format!(" {} ", route.title), colors.selected()));
        spans.push(Span::raw(" "));
    }
    if spans.is_empty() {
        spans.push(Span::styled("…", colors.text_muted()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block())
                .title(format!(" {title} "))
                .title_style(colors.text_primary()),
        ),
        area,
    );
}

fn render_featured(frame: &mut Frame, state: &AppState, colors: &ThemeColors, title: &str, area: Rect) {
    match state.featured.state() {
        FetchState::Error(message) => {
            frame.render_widget(ErrorPlaceholder::new(colors, message), area);
        }
        FetchState::Success(products) if products.is_empty() => {
            frame.render_widget(EmptyPlaceholder::new(colors, "No recommendations yet"), area);
        }
        state_now => {
            let products = match state_now {
                FetchState::Success(products) => Some(products),
                _ => state.featured.last_good(),
            };
            let Some(products) = products else {
                frame.render_widget(
                    LoadingPlaceholder::new(colors, state.current_tick(), title),
                    area,
                );
                return;
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block())
                .title(format!(" {title} "))
                .title_style(colors.text_primary());
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                ProductGrid::new(products, state.columns(), colors).scroll(state.home_scroll),
                inner,
            );
        }
    }
}

fn render_status_bar(frame: &mut Frame, state: &AppState, colors: &ThemeColors, area: Rect) {
    let busy = state.categories.in_flight()
        || state.banners.in_flight()
        || state.layout.in_flight()
        || state.featured.in_flight();
    let loading_indicator = if busy {
        format!("{} ", spinner(state.current_tick()))
    } else {
        String::new()
    };

    let mut content = vec![
        Span::styled(" ", Style::default()),
        Span::styled(loading_indicator, colors.text_secondary()),
    ];
    if state.status.is_empty() {
        content.extend([
            Span::styled("Tab", colors.key_hint()),
            Span::styled(": screens  ", colors.text_muted()),
            Span::styled("r", colors.key_hint()),
            Span::styled(": refresh  ", colors.text_muted()),
            Span::styled("?", colors.key_hint()),
            Span::styled(": help  ", colors.text_muted()),
            Span::styled("q", colors.key_hint()),
            Span::styled(": quit", colors.text_muted()),
        ]);
    } else {
        content.push(Span::styled(state.status.as_str(), colors.text_secondary()));
    }

    let status =
        Paragraph::new(Line::from(content)).style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(status, area);
}

fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect(50, 70, frame.area());

    let bg_block = Block::default().style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<17}"), colors.key_hint()),
            Span::styled(what, colors.text()),
        ])
    };
    let heading = |h: &'static str| {
        Line::from(Span::styled(
            format!("  {h}"),
            colors.text_primary().add_modifier(Modifier::BOLD),
        ))
    };

    let help_content = vec![
        Line::from(""),
        heading("Navigation"),
        key("Tab / 1 / 2", "Switch screen"),
        key("h/l or ←/→", "Previous/next category (banner on Home)"),
        key("g/G", "First/last category"),
        key("o", "Open the current deal"),
        key("j/k or ↓/↑", "Scroll products"),
        Line::from(""),
        heading("Data"),
        key("r", "Refresh"),
        key("k at the top", "Pull to refresh"),
        key("Enter", "Retry after an error"),
        key("+ / -", "More/fewer products per list"),
        Line::from(""),
        heading("General"),
        key("t", "Next theme"),
        key("?", "Toggle help"),
        key("q / Ctrl+C", "Quit"),
    ];

    let help = Paragraph::new(help_content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block_focus())
                .style(Style::default().bg(colors.bg_secondary))
                .title(" ⌨ Keyboard Shortcuts ")
                .title_style(colors.text_primary()),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::icons::NavIcons;
    use crate::models::Category;
    use crate::widgets::test_util;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        test_util::text(terminal.backend().buffer())
    }

    #[test]
    fn test_shop_screen_shows_tabs() {
        let mut state = AppState::new(Config::default(), NavIcons::default());
        state.screen = Screen::Shop;
        let ticket = state.categories.fetch().unwrap();
        state.categories.settle(
            ticket,
            Ok(Arc::from(vec![
                Category::new("dogs", "Dogs"),
                Category::new("cats", "Cats"),
            ])),
        );
        state.poll_commands();

        let text = draw(&state);
        assert!(text.contains("DOGS"));
        assert!(text.contains("CATS"));
    }

    #[test]
    fn test_home_screen_while_loading() {
        let mut state = AppState::new(Config::default(), NavIcons::default());
        let cmds = state.initial_commands();
        assert_eq!(cmds.len(), 4);
        let text = draw(&state);
        assert!(text.contains("Pawshop"));
        assert!(text.contains("Recommended"));
    }

    #[test]
    fn test_help_overlay() {
        let mut state = AppState::new(Config::default(), NavIcons::default());
        state.mode = Mode::Help;
        let text = draw(&state);
        assert!(text.contains("Keyboard Shortcuts"));
    }
}
