//! Maintenance view rendering.
//!
//! Lists the filter media with their replacement status. In EDIT mode the
//! table shows the draft instead of the committed list, and the catalog
//! picker can be opened on top of it.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::{centered, format_timestamp};
use crate::app::App;
use crate::data::maintenance::status;
use crate::data::{now_ms, MaintenanceTier};

/// Render the Maintenance view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Min(6), Constraint::Length(5)]).split(area);

    render_media_table(frame, app, chunks[0]);
    render_selected(frame, app, chunks[1]);
}

fn render_media_table(frame: &mut Frame, app: &App, area: Rect) {
    let now = now_ms();
    let editing = app.editor().is_editing();
    let media = app.displayed_media();

    let header = Row::new(vec![
        Cell::from("Medium"),
        Cell::from("Category"),
        Cell::from("Last changed"),
        Cell::from("Interval"),
        Cell::from("Next due"),
        Cell::from("Days left"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = media
        .iter()
        .map(|m| {
            let s = status(m, now);
            let style = app.theme.maintenance_style(s.tier);
            Row::new(vec![
                Cell::from(m.name.clone()),
                Cell::from(m.category.label()),
                Cell::from(format_timestamp(m.last_changed_ms, "%Y-%m-%d")),
                Cell::from(format!("{} d", m.change_interval_days)),
                Cell::from(format_timestamp(m.next_due_ms(), "%Y-%m-%d")),
                Cell::from(format!("{}", s.days_remaining)).style(style),
                Cell::from(s.tier.label()).style(style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Min(9),
    ];

    let (mode, border) = if editing {
        ("EDIT (unsaved draft)", app.theme.warning)
    } else {
        ("VIEW", app.theme.border)
    };
    let position_info = if !media.is_empty() {
        format!(" [{}/{}]", app.selected_medium_index + 1, media.len())
    } else {
        String::new()
    };
    let title = format!(" Filter Media [{}]{} ", mode, position_info);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !media.is_empty() {
        state.select(Some(app.selected_medium_index.min(media.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_selected(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" If neglected ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(medium) = app.selected_medium() else {
        let hint = if app.editor().is_editing() {
            " No media in the draft. Press a to add one from the catalog."
        } else {
            " No filter media configured. Press i to edit."
        };
        frame.render_widget(Paragraph::new(hint).block(block), area);
        return;
    };

    let s = status(medium, now_ms());
    let due = match s.tier {
        MaintenanceTier::Overdue => format!("overdue by {} days", -s.days_remaining),
        _ => format!("due in {} days", s.days_remaining),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", medium.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(due, app.theme.maintenance_style(s.tier)),
        ]),
        Line::from(format!(" {}", medium.consequence)),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// Render the catalog picker as a modal list over the view.
pub fn render_catalog_picker(frame: &mut Frame, app: &App, area: Rect) {
    let Some(selected) = app.catalog_picker else {
        return;
    };
    let choices = app.catalog_choices();

    let header = Row::new(vec![
        Cell::from("Medium"),
        Cell::from("Category"),
        Cell::from("Interval"),
    ])
    .style(app.theme.header);

    let rows: Vec<Row> = choices
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(e.name),
                Cell::from(e.category.label()),
                Cell::from(format!("{} d", e.change_interval_days)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Fill(3), Constraint::Fill(1), Constraint::Length(9)],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Add from catalog ")
            .title_bottom(" Enter:add Esc:close ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight)),
    )
    .row_highlight_style(app.theme.selected)
    .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected.min(choices.len().saturating_sub(1))));

    let picker_area = centered(area, 64, choices.len() as u16 + 4);
    frame.render_widget(Clear, picker_area);
    frame.render_stateful_widget(table, picker_area, &mut state);
}
