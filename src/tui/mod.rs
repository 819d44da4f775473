pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250); // 250ms tick for flash expiry

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            Some(Event::Resize) => {}
            None => break Ok(()),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => match app.focus {
                    app::Focus::Sidebar => app.next_field(),
                    app::Focus::Table => app.next_row(),
                },
                KeyCode::Char('k') | KeyCode::Up => match app.focus {
                    app::Focus::Sidebar => app.previous_field(),
                    app::Focus::Table => app.previous_row(),
                },
                KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),

                // Field adjustment
                KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('+')
                    if app.focus == app::Focus::Sidebar =>
                {
                    app.adjust_selected(1)
                }
                KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('-')
                    if app.focus == app::Focus::Sidebar =>
                {
                    app.adjust_selected(-1)
                }
                KeyCode::Enter if app.focus == app::Focus::Sidebar => app.start_edit(),

                // Lookup
                KeyCode::Char('/') => app.start_lookup(),

                // Export
                KeyCode::Char('e') => app.export_table(),

                // Reset
                KeyCode::Char('r') => app.reset_config(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::EditField => {
            match key.code {
                KeyCode::Enter => app.confirm_edit(),
                KeyCode::Esc => app.cancel_edit(),
                KeyCode::Backspace => {
                    app.edit_input.pop();
                }
                // Numbers, decimal separators and method names
                KeyCode::Char(c) if c.is_alphanumeric() || matches!(c, '.' | '-') => {
                    app.edit_input.push(c);
                }
                // Ignore all other keys (don't propagate to Normal mode)
                _ => {}
            }
        }
        app::InputMode::Lookup => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.finish_lookup(),
            KeyCode::Backspace => {
                app.lookup_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                app.lookup_input.push(c);
            }
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
