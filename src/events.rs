use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, InputTarget, View};
use crate::data::now_ms;
use crate::ui;

/// File written by the in-app export key.
pub const EXPORT_FILE: &str = "aquawatch_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Text prompts capture every key
    if app.input.is_some() {
        handle_text_input(app, key);
        return;
    }

    // Catalog picker is modal over the maintenance view
    if app.catalog_picker.is_some() {
        match key.code {
            KeyCode::Enter => app.confirm_catalog_pick(now_ms()),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => app.close_catalog_picker(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    if handle_view_key(app, key) {
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Dashboard),
        KeyCode::Char('2') => app.set_view(View::Maintenance),
        KeyCode::Char('3') => app.set_view(View::Reports),
        KeyCode::Char('4') => app.set_view(View::Aquarium),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Theme
        KeyCode::Char('t') => app.toggle_theme(),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path, now_ms()) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Keys specific to the current view. Returns true if the key was consumed.
fn handle_view_key(app: &mut App, key: KeyEvent) -> bool {
    match app.current_view {
        View::Dashboard | View::Reports => match key.code {
            KeyCode::Char('r') => app.record_report(None, now_ms()),
            KeyCode::Char('n') => app.start_input(InputTarget::ReportNote),
            KeyCode::Char('f') => app.log_feeding(now_ms()),
            _ => return false,
        },
        View::Maintenance if app.editor().is_editing() => match key.code {
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_medium(),
            KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_selected_interval(1),
            KeyCode::Char('-') => app.adjust_selected_interval(-1),
            KeyCode::Char(']') => app.adjust_selected_interval(7),
            KeyCode::Char('[') => app.adjust_selected_interval(-7),
            KeyCode::Char('>') | KeyCode::Char('.') => app.shift_selected_last_changed(1),
            KeyCode::Char('<') | KeyCode::Char(',') => app.shift_selected_last_changed(-1),
            KeyCode::Char('a') => app.open_catalog_picker(),
            KeyCode::Char('s') | KeyCode::Enter => app.save_edit(),
            _ => return false,
        },
        View::Maintenance => match key.code {
            KeyCode::Char('c') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.mark_selected_changed(now_ms())
            }
            KeyCode::Char('i') | KeyCode::Enter => app.begin_edit(),
            _ => return false,
        },
        View::Aquarium => match key.code {
            KeyCode::Char('v') => app.start_input(InputTarget::Volume),
            KeyCode::Char('F') => app.start_input(InputTarget::FilterDescription),
            KeyCode::Char('o') => app.start_input(InputTarget::FoodDescription),
            KeyCode::Char('a') => app.start_input(InputTarget::NewFish),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_fish(),
            _ => return false,
        },
    }
    true
}

/// Handle key input while a text prompt is open
fn handle_text_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(now_ms()),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.cancel_input(),
        KeyCode::Backspace => app.input_pop(),
        KeyCode::Char(c) => app.input_push(c),
        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Tab clicks (row 1, after header)
        MouseEventKind::Down(MouseButton::Left) if mouse.row == 1 => {
            if let Some(view) = ui::common::tab_at(mouse.column) {
                app.set_view(view);
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}
