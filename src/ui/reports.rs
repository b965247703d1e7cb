//! Reports view rendering.
//!
//! Reports are grouped into Today, This week, This month and Older, most
//! recent first within each group.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{format_timestamp, format_value};
use crate::app::App;
use crate::data::classifier::evaluate;
use crate::data::Parameter;

/// Render the Reports view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Min(6), Constraint::Length(4)]).split(area);

    let groups = app.grouped_reports(&Local::now());
    let total = app.store().reports().len();

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from("Temp"),
        Cell::from("pH"),
        Cell::from("NH3"),
        Cell::from("NO2"),
        Cell::from("NO3"),
        Cell::from("Note"),
    ])
    .height(1)
    .style(app.theme.header);

    // Bucket headings are rows too, so track the visual row of the selection
    let mut rows: Vec<Row> = Vec::new();
    let mut selected_row = None;
    let mut report_index = 0;
    for (bucket, reports) in &groups {
        if reports.is_empty() {
            continue;
        }
        rows.push(
            Row::new(vec![Cell::from(format!("{} ({})", bucket.label(), reports.len()))])
                .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
        );
        for report in reports {
            if report_index == app.selected_report_index {
                selected_row = Some(rows.len());
            }
            report_index += 1;

            let mut cells = vec![Cell::from(format_timestamp(report.timestamp_ms, "%m-%d %H:%M"))];
            for status in evaluate(&report.snapshot) {
                cells.push(
                    Cell::from(format_value(status.parameter, status.value))
                        .style(app.theme.tier_style(status.tier)),
                );
            }
            cells.push(Cell::from(report.note.clone().unwrap_or_default()));
            rows.push(Row::new(cells));
        }
    }

    let widths = [
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Reports ({}) ", total))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(selected_row);
    frame.render_stateful_widget(table, chunks[0], &mut state);

    render_selected(frame, app, chunks[1]);
}

fn render_selected(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Report ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let rows = app.report_rows();
    let Some(report) = rows.get(app.selected_report_index) else {
        let hint = " No reports yet. Press r to record one, n to add a note.";
        frame.render_widget(Paragraph::new(hint).block(block), area);
        return;
    };

    let mut values: Vec<Span> = vec![Span::raw(" ")];
    for status in evaluate(&report.snapshot) {
        let config = status.parameter.config();
        values.push(Span::raw(format!("{}: ", short_label(status.parameter))));
        values.push(Span::styled(
            format!("{}{} ", format_value(status.parameter, status.value), config.unit),
            app.theme.tier_style(status.tier),
        ));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", format_timestamp(report.timestamp_ms, "%Y-%m-%d %H:%M:%S")),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(report.id.clone(), Style::default().add_modifier(Modifier::DIM)),
        ]),
        Line::from(values),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn short_label(parameter: Parameter) -> &'static str {
    match parameter {
        Parameter::Temperature => "Temp",
        Parameter::Ph => "pH",
        Parameter::Ammonia => "NH3",
        Parameter::Nitrite => "NO2",
        Parameter::Nitrate => "NO3",
    }
}
