//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, text prompt,
//! and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::centered;
use crate::app::{App, View};
use crate::data::classifier::{evaluate, overall};
use crate::data::{now_ms, SafetyTier};

/// Render the header bar with the water-quality overview.
///
/// Displays: overall tier, parameter counts by tier, maintenance counts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let store = app.store();
    let Some(reading) = store.latest() else {
        let line = Line::from(vec![
            Span::styled(" AQUAWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Waiting for first reading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let mut safe = 0;
    let mut warning = 0;
    let mut danger = 0;
    for status in evaluate(reading) {
        match status.tier {
            SafetyTier::Safe => safe += 1,
            SafetyTier::Warning => warning += 1,
            SafetyTier::Danger => danger += 1,
        }
    }

    let (good, soon, overdue) = store.filter_media().tier_counts(now_ms());
    let worst = overall(reading);

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.tier_style(worst)),
        Span::styled("AQUAWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(format!("{}", safe), Style::default().fg(app.theme.safe)),
        Span::raw(" ok "),
        count_span(warning, Style::default().fg(app.theme.warning)),
        Span::raw(" warn "),
        count_span(danger, app.theme.tier_style(SafetyTier::Danger)),
        Span::raw(" danger │ filters "),
        Span::styled(format!("{}", good), Style::default().fg(app.theme.safe)),
        Span::raw(" good "),
        count_span(soon, Style::default().fg(app.theme.warning)),
        Span::raw(" soon "),
        count_span(overdue, app.theme.tier_style(SafetyTier::Danger)),
        Span::raw(" overdue │ "),
        Span::raw(format!("{} L", store.settings().volume_liters)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn count_span(count: usize, style: Style) -> Span<'static> {
    if count > 0 {
        Span::styled(format!("{}", count), style)
    } else {
        Span::styled("0", Style::default().add_modifier(Modifier::DIM))
    }
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL.iter().map(|v| Line::from(tab_title(*v))).collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .padding(TAB_PADDING, TAB_PADDING)
        .divider(TAB_DIVIDER);

    frame.render_widget(tabs, area);
}

const TAB_PADDING: &str = " ";
const TAB_DIVIDER: &str = "|";

fn tab_title(view: View) -> String {
    format!(" {}:{} ", view.index() + 1, view.label())
}

/// The view whose tab covers `column` of the tab bar.
///
/// Follows the layout of [`render_tabs`]. A divider belongs to the tab on
/// its left.
pub fn tab_at(column: u16) -> Option<View> {
    let padding = Line::from(TAB_PADDING).width() * 2;
    let divider = Line::from(TAB_DIVIDER).width();
    let column = usize::from(column);

    let mut end = 0;
    for (i, view) in View::ALL.iter().enumerate() {
        end += padding + Line::from(tab_title(*view)).width();
        if i + 1 < View::ALL.len() {
            end += divider;
        }
        if column < end {
            return Some(*view);
        }
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows: current view, time since last reading, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Dashboard => "↑↓:parameter r:report n:note f:feed Tab:switch ?:help q:quit",
        View::Maintenance if app.editor().is_editing() => {
            "d:delete +/-:interval </>:date a:add s:save Esc:cancel"
        }
        View::Maintenance => "↑↓:select c:changed i:edit Tab:switch ?:help q:quit",
        View::Reports => "↑↓:select r:report n:note Tab:switch ?:help q:quit",
        View::Aquarium => "v:volume F:filter o:food a:add fish d:remove ?:help q:quit",
    };

    let status = if let Some(updated) = app.last_update {
        format!(
            " {} | {} | Updated {:.1}s ago | {}",
            app.current_view.label(),
            app.source_description(),
            updated.elapsed().as_secs_f64(),
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit", err)
    } else {
        format!(" {} | Waiting for readings... | {}", app.current_view.label(), controls)
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the open text prompt as a one-line modal.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref input) = app.input else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", input.target.prompt()))
        .title_bottom(" Enter:confirm Esc:cancel ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(format!("{}_", input.buffer)).block(block);
    let input_area = centered(area, 60, 3);

    frame.render_widget(Clear, input_area);
    frame.render_widget(paragraph, input_area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l 1-4 Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Dashboard & Reports"),
        Line::from("  r           Record report"),
        Line::from("  n           Record report with note"),
        Line::from("  f           Log feeding"),
        Line::from(""),
        section(" Maintenance"),
        Line::from("  c           Mark as changed"),
        Line::from("  i / Enter   Edit media"),
        Line::from("  d           Delete (edit)"),
        Line::from("  +/- [/]     Interval ±1/±7 days (edit)"),
        Line::from("  </>         Last changed ±1 day (edit)"),
        Line::from("  a           Add from catalog (edit)"),
        Line::from("  s           Save (edit)"),
        Line::from(""),
        section(" Aquarium"),
        Line::from("  v F o       Edit volume, filter, food"),
        Line::from("  a / d       Add / remove fish"),
        Line::from(""),
        section(" General"),
        Line::from("  t           Toggle light/dark theme"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let help_height = help_text.len() as u16 + 2;
    let paragraph = Paragraph::new(help_text).block(block);
    let help_area = centered(area, 46, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
