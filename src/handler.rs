use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, Screen};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::SurahsLoaded(result) => app.apply_index(result),
        AppEvent::SurahLoaded { request, result } => app.apply_content(request, result),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.screen {
        Screen::Home if app.reader.is_picker_open() => handle_picker(app, key),
        Screen::Home => handle_home(app, key),
        Screen::Login | Screen::Signup => handle_form(app, key),
    }
}

fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,

        // Open the Surah picker
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('/') => app.open_picker(),

        // Half-page scroll
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_down();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page_up();
        }

        // Scrolling
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_half_page_down(),
        KeyCode::PageUp => app.scroll_half_page_up(),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),

        // Retry a failed index load
        KeyCode::Char('r') => app.retry_index(),

        // Sign in / out
        KeyCode::Char('L') => {
            if app.session.is_some() {
                app.logout();
            } else {
                app.open_login();
            }
        }

        _ => {}
    }
}

fn handle_picker(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_picker(),
        KeyCode::Enter => app.select_highlighted(),

        KeyCode::Down => app.picker_nav_down(),
        KeyCode::Up => app.picker_nav_up(),
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => app.picker_nav_down(),
        KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => app.picker_nav_up(),
        KeyCode::Home => app.picker_nav_first(),
        KeyCode::End => app.picker_nav_last(),

        // Search input
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.search_clear(),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),

        _ => {}
    }
}

fn handle_form(app: &mut App, key: KeyEvent) {
    let screen = app.screen;
    match key.code {
        KeyCode::Esc => app.go_home(),

        // Switch between login and signup
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => match screen {
            Screen::Login => app.open_signup(),
            _ => app.open_login(),
        },

        KeyCode::Tab | KeyCode::Down => app.form.next_field(screen),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(screen),
        KeyCode::Enter => app.submit_form(),

        KeyCode::Backspace => {
            app.form.focused_input().pop();
        }
        KeyCode::Char(c) => {
            app.form.focused_input().push(c);
            app.form.error = None;
        }
        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.screen != Screen::Home {
        return;
    }

    let (x, y) = (mouse.column, mouse.row);
    let in_picker = app.reader.is_picker_open()
        && app.picker_area.is_some_and(|area| point_in_rect(x, y, area));
    let in_content = !app.reader.is_picker_open()
        && app.content_area.is_some_and(|area| point_in_rect(x, y, area));

    match mouse.kind {
        MouseEventKind::ScrollDown if in_picker => app.picker_nav_down(),
        MouseEventKind::ScrollUp if in_picker => app.picker_nav_up(),
        MouseEventKind::ScrollDown if in_content => {
            for _ in 0..3 {
                app.scroll_down();
            }
        }
        MouseEventKind::ScrollUp if in_content => {
            for _ in 0..3 {
                app.scroll_up();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Credentials, FormField};
    use crossterm::event::KeyEventState;
    use crossterm::event::KeyEventKind;
    use tilawah_core::{Config, CredentialStore, FetchError, MemoryStore};
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let credentials: Credentials = CredentialStore::new(Box::new(MemoryStore::default()));
        App::new(&Config::default(), credentials, None, tx)
    }

    #[test]
    fn test_typing_in_picker_edits_search() {
        let mut app = app();
        handle_event(&mut app, AppEvent::SurahsLoaded(Ok(Vec::new())));
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.reader.is_picker_open());

        for c in "baq".chars() {
            handle_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.reader.search_query(), "ba");

        // 'q' is text while the picker is open
        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);

        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.reader.is_picker_open());
        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_index_failure_event_sets_error() {
        let mut app = app();
        handle_event(&mut app, AppEvent::SurahsLoaded(Err(FetchError::Index)));
        assert_eq!(app.reader.last_error(), Some(&FetchError::Index));
        assert!(app.reader.surahs().is_none());
    }

    #[test]
    fn test_login_form_navigation() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('L')));
        assert_eq!(app.screen, Screen::Login);

        for c in "a@b.c".chars() {
            handle_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.form.focus, FormField::Password);
        assert_eq!(app.form.email, "a@b.c");

        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.form.error.as_deref(), Some("Please fill in all fields."));

        handle_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_picker_keys_ignored_while_surah_loads() {
        let mut app = app();
        handle_event(&mut app, AppEvent::SurahsLoaded(Ok(Vec::new())));
        app.reader.open_picker();
        let request = app.reader.select(1).unwrap();

        for code in [KeyCode::Enter, KeyCode::Char('s'), KeyCode::Char('/')] {
            handle_event(&mut app, key(code));
            assert!(!app.reader.is_picker_open());
        }

        handle_event(
            &mut app,
            AppEvent::SurahLoaded {
                request,
                result: Err(FetchError::Content { surah: 1 }),
            },
        );
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.reader.is_picker_open());
    }
}
