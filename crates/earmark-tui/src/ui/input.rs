//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use earmark_core::router::RouteName;

use crate::app::{
    can_add_password_char, can_add_search_char, can_add_username_char, App, AppState,
    LoginFocus, PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if app.current_route() == RouteName::Login {
        return handle_login_input(app, key).await;
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    if matches!(app.state, AppState::Searching) {
        handle_search_input(app, key);
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
        }
        KeyCode::Char('r') => {
            app.refresh_collections();
        }
        KeyCode::Esc => {
            if app.showing_search_results() {
                app.clear_search();
            }
        }
        KeyCode::Left | KeyCode::BackTab => {
            app.pane = app.pane.prev();
        }
        KeyCode::Right | KeyCode::Tab => {
            app.pane = app.pane.next();
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::PageDown => app.scroll_transcript(i32::from(PAGE_SCROLL_SIZE)),
        KeyCode::PageUp => app.scroll_transcript(-i32::from(PAGE_SCROLL_SIZE)),
        KeyCode::Enter => app.drill_down(),
        _ => {}
    }

    Ok(false)
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.clear_search();
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
            app.run_search();
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => {
            if can_add_search_char(app.search_query.chars().count(), c) {
                app.search_query.push(c);
            }
        }
        _ => {}
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Leaving is up to the router guard
            app.navigate(RouteName::Home);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => app.login_focus = LoginFocus::Password,
            LoginFocus::Password => app.login_focus = LoginFocus::Button,
            LoginFocus::Button => {
                // On failure login_error is set for display
                let _ = app.attempt_login().await;
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.chars().count(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.chars().count(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use earmark_core::auth::MemoryStore;
    use earmark_core::config::Config;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn login_screen_app() -> App {
        let config = Config {
            base_url: Some("http://127.0.0.1:9".to_string()),
            last_username: None,
        };
        let mut app = App::with_storage(config, Box::new(MemoryStore::new())).unwrap();
        app.navigate(RouteName::Home);
        app
    }

    #[tokio::test]
    async fn test_login_form_typing() {
        let mut app = login_screen_app();
        assert_eq!(app.current_route(), RouteName::Login);
        assert_eq!(app.login_focus, LoginFocus::Username);

        for c in "bob".chars() {
            handle_input(&mut app, key(KeyCode::Char(c))).await.unwrap();
        }
        handle_input(&mut app, key(KeyCode::Tab)).await.unwrap();
        handle_input(&mut app, key(KeyCode::Char('x'))).await.unwrap();
        handle_input(&mut app, key(KeyCode::Backspace)).await.unwrap();
        handle_input(&mut app, key(KeyCode::Char('p'))).await.unwrap();

        assert_eq!(app.login_username, "bob");
        assert_eq!(app.login_password, "p");
        assert_eq!(app.login_focus, LoginFocus::Password);
    }

    #[tokio::test]
    async fn test_login_keys_do_not_open_overlays() {
        let mut app = login_screen_app();
        handle_input(&mut app, key(KeyCode::Char('q'))).await.unwrap();
        handle_input(&mut app, key(KeyCode::Char('?'))).await.unwrap();

        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.login_username, "q?");
    }

    #[tokio::test]
    async fn test_escape_on_login_is_guarded() {
        let mut app = login_screen_app();
        let quit = handle_input(&mut app, key(KeyCode::Esc)).await.unwrap();

        assert!(!quit);
        assert_eq!(app.current_route(), RouteName::Login);
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected_locally() {
        let mut app = login_screen_app();
        app.login_focus = LoginFocus::Button;
        handle_input(&mut app, key(KeyCode::Enter)).await.unwrap();

        assert_eq!(
            app.login_error.as_deref(),
            Some("Username and password required")
        );
        assert!(!app.is_authenticated());
    }

    #[tokio::test]
    async fn test_search_mode() {
        let mut app = login_screen_app();
        app.tokens.login("abc");
        app.navigate(RouteName::Home);

        handle_input(&mut app, key(KeyCode::Char('/'))).await.unwrap();
        assert_eq!(app.state, AppState::Searching);

        // 'q' is text while searching
        handle_input(&mut app, key(KeyCode::Char('q'))).await.unwrap();
        assert_eq!(app.search_query, "q");
        assert_eq!(app.state, AppState::Searching);

        handle_input(&mut app, key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state, AppState::Normal);
        assert!(app.search_query.is_empty());
    }

    #[tokio::test]
    async fn test_quit_confirmation() {
        let mut app = login_screen_app();
        app.tokens.login("abc");
        app.navigate(RouteName::Home);

        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))).await.unwrap());
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).await.unwrap());
        assert_eq!(app.state, AppState::Quitting);
    }
}
