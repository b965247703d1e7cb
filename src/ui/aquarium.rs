//! Aquarium view rendering: details, next maintenance and fish roster.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::format_timestamp;
use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::horizontal([Constraint::Fill(2), Constraint::Fill(3)]).split(area);
    let right = Layout::vertical([Constraint::Min(6), Constraint::Length(6)]).split(columns[1]);

    render_details(frame, app, columns[0]);
    render_fish(frame, app, right[0]);
    render_selected_fish(frame, app, right[1]);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let settings = app.store().settings();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let next_maintenance = app
        .store()
        .filter_media()
        .next_maintenance_due()
        .map(|ts| format_timestamp(ts, "%B %d, %Y"))
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(vec![
            Span::raw(" Volume:  "),
            Span::styled(format!("{} L", settings.volume_liters), bold),
            Span::styled("  [v]", dim),
        ]),
        Line::from(vec![
            Span::raw(" Filter:  "),
            Span::styled(settings.filter_description, bold),
            Span::styled("  [F]", dim),
        ]),
        Line::from(vec![
            Span::raw(" Food:    "),
            Span::styled(settings.food_description, bold),
            Span::styled("  [o]", dim),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Next maintenance: "),
            Span::styled(next_maintenance, Style::default().fg(app.theme.highlight)),
        ]),
        Line::from(vec![
            Span::raw(" Filter media:     "),
            Span::raw(format!("{}", settings.filter_media.len())),
        ]),
        Line::from(vec![
            Span::raw(" Fish:             "),
            Span::raw(format!("{}", settings.fish.len())),
        ]),
    ];

    let block = Block::default()
        .title(" My Aquarium ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_fish(frame: &mut Frame, app: &App, area: Rect) {
    let fish = app.store().fish();

    let header = Row::new(vec![Cell::from("Name"), Cell::from("Species")])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = fish
        .iter()
        .map(|f| Row::new(vec![Cell::from(f.name.clone()), Cell::from(f.species.clone())]))
        .collect();

    let table = Table::new(rows, [Constraint::Fill(1), Constraint::Fill(1)])
        .header(header)
        .block(
            Block::default()
                .title(format!(" Fish ({}) [a:add d:remove] ", fish.len()))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !fish.is_empty() {
        state.select(Some(app.selected_fish_index.min(fish.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_selected_fish(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(fish) = app.store().fish().get(app.selected_fish_index) else {
        frame.render_widget(Paragraph::new(" No fish yet. Press a to add one.").block(block), area);
        return;
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {} ", fish.name), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            fish.species.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ])];
    if !fish.description.is_empty() {
        lines.push(Line::from(format!(" {}", fish.description)));
    }
    if !fish.image_url.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", fish.image_url),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
