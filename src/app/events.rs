//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::async_ops::AsyncCommand;
use super::state::{AppState, Mode, Screen};
use crate::router::RouterView;

/// Handle key events, returning the async commands they start
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<AsyncCommand> {
    if state.mode == Mode::Help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')
        ) {
            state.mode = Mode::Normal;
        }
        return Vec::new();
    }

    // Global shortcuts
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            state.should_quit = true;
            return Vec::new();
        }
        (_, KeyCode::Char('?') | KeyCode::F(1)) => {
            state.mode = Mode::Help;
            return Vec::new();
        }
        (_, KeyCode::Tab | KeyCode::BackTab) => {
            state.screen = state.screen.next();
            return Vec::new();
        }
        (_, KeyCode::Char('1')) => {
            state.screen = Screen::Home;
            return Vec::new();
        }
        (_, KeyCode::Char('2')) => {
            state.screen = Screen::Shop;
            return Vec::new();
        }
        (_, KeyCode::Char('t')) => {
            state.next_theme();
            state.set_status(format!("Theme: {}", state.theme));
            return Vec::new();
        }
        // one row of cards more or less
        (_, KeyCode::Char('+' | '=')) => {
            let limit = state.config.recommendation_limit + usize::from(state.columns());
            return state.set_recommendation_limit(limit);
        }
        (_, KeyCode::Char('-')) => {
            let limit = state
                .config
                .recommendation_limit
                .saturating_sub(usize::from(state.columns()));
            return state.set_recommendation_limit(limit);
        }
        _ => {}
    }

    match state.screen {
        Screen::Home => handle_home_key(state, key),
        Screen::Shop => handle_shop_key(state, key),
    }
}

fn handle_home_key(state: &mut AppState, key: KeyEvent) -> Vec<AsyncCommand> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => {
            let cmds = state.home_commands(true);
            if !cmds.is_empty() {
                state.set_status("Refreshing home...");
            }
            cmds
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let len = state.banners.last_good().map_or(0, |b| b.len());
            if len > 0 {
                state.banner_index = (state.banner_index + 1) % len;
            }
            Vec::new()
        }
        KeyCode::Char('h') | KeyCode::Left => {
            let len = state.banners.last_good().map_or(0, |b| b.len());
            if len > 0 {
                state.banner_index = (state.banner_index + len - 1) % len;
            }
            Vec::new()
        }
        KeyCode::Char('o') => {
            let link = state
                .banners
                .last_good()
                .and_then(|b| b.get(state.banner_index))
                .and_then(|b| b.link.clone());
            match link {
                Some(url) if url.starts_with("http") => {
                    if let Err(e) = open::that(&url) {
                        tracing::warn!("Failed to open {url}: {e}");
                        state.set_status("Couldn't open the link");
                    }
                    Vec::new()
                }
                // anything else names a category tab
                Some(slug) => {
                    if state.router.select_key(&slug) {
                        state.screen = Screen::Shop;
                        return state.poll_commands();
                    }
                    state.set_status(format!("No category '{slug}'"));
                    Vec::new()
                }
                None => {
                    state.set_status("This deal has no link");
                    Vec::new()
                }
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let rows = state.featured.last_good().map_or(0, |p| {
                crate::widgets::ProductGrid::row_count(p.len(), state.columns())
            });
            state.home_scroll = (state.home_scroll + 1).min(rows.saturating_sub(1));
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if state.home_scroll == 0 {
                // pulled past the top
                return state.home_commands(true);
            }
            state.home_scroll -= 1;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_shop_key(state: &mut AppState, key: KeyEvent) -> Vec<AsyncCommand> {
    match key.code {
        KeyCode::Char('l') | KeyCode::Right => {
            state.router.select_next();
            Vec::new()
        }
        KeyCode::Char('h') | KeyCode::Left => {
            state.router.select_prev();
            Vec::new()
        }
        KeyCode::Char('g') | KeyCode::Home => {
            state.router.select(0);
            Vec::new()
        }
        KeyCode::Char('G') | KeyCode::End => {
            let last = state.router.routes().len().saturating_sub(1);
            state.router.select(last);
            Vec::new()
        }
        KeyCode::Char('r') => {
            // also works with no tabs shown
            state.router.refresh_trigger().fire();
            Vec::new()
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let columns = state.columns();
            if let Some(scene) = state.router.active_scene() {
                state.scenes.scroll_or_pull(scene, 1, columns);
            }
            Vec::new()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let columns = state.columns();
            if let Some(scene) = state.router.active_scene() {
                state.scenes.scroll_or_pull(scene, -1, columns);
            }
            Vec::new()
        }
        KeyCode::Enter => {
            let view = state.router.view();
            if matches!(view, RouterView::Error { .. } | RouterView::Empty) {
                let Some(ticket) = state.router.retry(&mut state.categories) else {
                    return Vec::new();
                };
                state.set_status("Retrying...");
                return vec![AsyncCommand::FetchCategories { ticket }];
            }

            // populated: retry the active scene's products
            let Some(key) = state.router.active_route().map(|r| r.key.clone()) else {
                return Vec::new();
            };
            state
                .scenes
                .retry(&key)
                .map(|ticket| AsyncCommand::FetchRecommendations {
                    slug: Some(key),
                    limit: state.config.recommendation_limit,
                    ticket,
                })
                .into_iter()
                .collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::config::Config;
    use crate::icons::NavIcons;
    use crate::models::{Banner, Category};
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shop_state() -> AppState {
        let mut state = AppState::new(Config::default(), NavIcons::default());
        state.screen = Screen::Shop;
        state
    }

    fn load(state: &mut AppState, cats: Vec<Category>) {
        let ticket = state.categories.fetch().unwrap();
        state.categories.settle(ticket, Ok(Arc::from(cats)));
        state.poll_commands();
    }

    #[test]
    fn test_quit_and_help() {
        let mut state = shop_state();
        handle_key(&mut state, press(KeyCode::Char('?')));
        assert_eq!(state.mode, Mode::Help);
        // q closes help first
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(!state.should_quit);
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn test_tab_switches_screen() {
        let mut state = shop_state();
        handle_key(&mut state, press(KeyCode::Tab));
        assert_eq!(state.screen, Screen::Home);
        handle_key(&mut state, press(KeyCode::Char('2')));
        assert_eq!(state.screen, Screen::Shop);
    }

    #[test]
    fn test_arrows_move_tabs_without_requests() {
        let mut state = shop_state();
        load(
            &mut state,
            vec![Category::new("dogs", "Dogs"), Category::new("cats", "Cats")],
        );
        let cmds = handle_key(&mut state, press(KeyCode::Right));
        assert!(cmds.is_empty());
        assert_eq!(state.router.active_index(), 1);
        assert!(!state.categories.in_flight());
    }

    #[test]
    fn test_pull_past_top_refreshes_categories() {
        let mut state = shop_state();
        load(&mut state, vec![Category::new("dogs", "Dogs")]);

        handle_key(&mut state, press(KeyCode::Char('k')));
        let cmds = state.poll_commands();
        assert!(
            cmds.iter()
                .any(|c| matches!(c, AsyncCommand::FetchCategories { .. }))
        );
        assert!(state.categories.is_refreshing());
        assert!(matches!(
            state.router.view(),
            RouterView::Populated {
                refreshing: true,
                ..
            }
        ));

        // a second pull joins the outstanding refresh
        handle_key(&mut state, press(KeyCode::Char('r')));
        let cmds = state.poll_commands();
        assert!(
            !cmds
                .iter()
                .any(|c| matches!(c, AsyncCommand::FetchCategories { .. }))
        );
    }

    #[test]
    fn test_enter_retries_after_error_once() {
        let mut state = shop_state();
        let ticket = state.categories.fetch().unwrap();
        state
            .categories
            .settle(ticket, Err(ApiError::Network("offline".to_string())));
        state.poll_commands();

        let cmds = handle_key(&mut state, press(KeyCode::Enter));
        assert_eq!(cmds.len(), 1);
        let cmds = handle_key(&mut state, press(KeyCode::Enter));
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_banner_with_slug_link_opens_category_tab() {
        let mut state = shop_state();
        load(
            &mut state,
            vec![Category::new("dogs", "Dogs"), Category::new("cats", "Cats")],
        );
        let ticket = state.banners.fetch().unwrap();
        state.banners.settle(
            ticket,
            Ok(Arc::from(vec![Banner {
                id: "b1".to_string(),
                title: "Cat week".to_string(),
                subtitle: None,
                image: None,
                link: Some("cats".to_string()),
            }])),
        );
        state.screen = Screen::Home;

        let cmds = handle_key(&mut state, press(KeyCode::Char('o')));
        assert_eq!(state.screen, Screen::Shop);
        assert_eq!(state.router.active_index(), 1);
        assert!(cmds.iter().any(|c| matches!(
            c,
            AsyncCommand::FetchRecommendations { slug: Some(s), .. } if s == "cats"
        )));
    }

    #[test]
    fn test_plus_and_minus_change_limit_by_a_row() {
        let mut state = shop_state();
        let start = state.config.recommendation_limit;
        let step = usize::from(state.columns());

        let cmds = handle_key(&mut state, press(KeyCode::Char('+')));
        assert_eq!(state.config.recommendation_limit, start + step);
        assert!(cmds.iter().any(|c| matches!(
            c,
            AsyncCommand::FetchRecommendations { slug: None, .. }
        )));

        handle_key(&mut state, press(KeyCode::Char('-')));
        assert_eq!(state.config.recommendation_limit, start);
    }

    #[test]
    fn test_shop_screen_loads_active_scene() {
        let mut state = shop_state();
        let ticket = state.categories.fetch().unwrap();
        state
            .categories
            .settle(ticket, Ok(Arc::from(vec![Category::new("dogs", "Dogs")])));
        let cmds = state.poll_commands();
        assert!(cmds.iter().any(|c| matches!(
            c,
            AsyncCommand::FetchRecommendations { slug: Some(s), .. } if s == "dogs"
        )));
        // only once
        assert!(state.poll_commands().is_empty());
    }
}
