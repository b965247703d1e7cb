//! Dashboard view rendering.
//!
//! Displays the latest value of every parameter with its tier and trend,
//! a history chart of the selected parameter, the alarm panel, and the
//! feeding/maintenance tracking panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, TableState,
        Wrap,
    },
    Frame,
};

use super::{format_timestamp, format_value};
use crate::app::App;
use crate::data::classifier::{alarms, evaluate};
use crate::data::{Parameter, SafetyTier};

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Number of trailing readings shown in the trend column.
const SPARKLINE_WIDTH: usize = 12;

/// Render the Dashboard view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(9), // Parameter table + tracking
        Constraint::Min(6),    // Chart
        Constraint::Length(6), // Alarms
    ])
    .split(area);

    let top = Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).split(rows[0]);

    render_parameters(frame, app, top[0]);
    render_tracking(frame, app, top[1]);
    render_chart(frame, app, rows[1]);
    render_alarms(frame, app, rows[2]);
}

fn render_parameters(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Water Quality ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(reading) = app.store().latest() else {
        frame.render_widget(Paragraph::new(" No readings yet").block(block), area);
        return;
    };

    let header = Row::new(vec![
        Cell::from("Parameter"),
        Cell::from("Value"),
        Cell::from("Unit"),
        Cell::from("Trend"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let history = app.store().history();
    let rows: Vec<Row> = evaluate(reading)
        .iter()
        .map(|s| {
            let config = s.parameter.config();
            let sparkline = render_sparkline(&history.sparkline(s.parameter));
            Row::new(vec![
                Cell::from(config.label),
                Cell::from(format_value(s.parameter, s.value)),
                Cell::from(config.unit),
                Cell::from(sparkline),
                Cell::from(s.tier.symbol()).style(app.theme.tier_style(s.tier)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Min(SPARKLINE_WIDTH as u16),
        Constraint::Min(7),
    ];

    let selected = Parameter::ALL
        .iter()
        .position(|&p| p == app.selected_parameter)
        .unwrap_or(0);

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_tracking(frame: &mut Frame, app: &App, area: Rect) {
    let store = app.store();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let last_feeding = store
        .last_feeding_ms()
        .map(|ts| format_timestamp(ts, "%b %d %H:%M"))
        .unwrap_or_else(|| "not logged".to_string());
    let next_maintenance = store
        .filter_media()
        .next_maintenance_due()
        .map(|ts| format_timestamp(ts, "%b %d, %Y"))
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(vec![Span::raw(" Last feeding:     "), Span::styled(last_feeding, bold)]),
        Line::from(vec![
            Span::raw(" Next maintenance: "),
            Span::styled(next_maintenance, bold),
        ]),
        Line::from(vec![
            Span::raw(" Readings:         "),
            Span::raw(format!("{}", store.history().len())),
        ]),
        Line::from(vec![
            Span::raw(" Reports:          "),
            Span::raw(format!("{}", store.reports().len())),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " f:log feeding  r:report  n:note",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Tracking ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let parameter = app.selected_parameter;
    let config = parameter.config();
    let series = app.store().history().series(parameter);

    let title = format!(" {} history ({} readings) ", config.label, series.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if series.is_empty() {
        frame.render_widget(Paragraph::new(" No history yet").block(block), area);
        return;
    }

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let (lo, hi) = y_bounds(&series);
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![Dataset::default()
        .name(config.label)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.chart))
        .data(&points)];

    let y_labels = vec![
        Span::raw(format_value(parameter, lo)),
        Span::raw(format_value(parameter, (lo + hi) / 2.0)),
        Span::raw(format_value(parameter, hi)),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .title(config.unit)
                .style(Style::default().fg(app.theme.border))
                .bounds([lo, hi])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Chart bounds with a little headroom; flat series get a fixed margin.
fn y_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.1).max(0.01);
    (min - pad, max + pad)
}

fn render_alarms(frame: &mut Frame, app: &App, area: Rect) {
    let Some(reading) = app.store().latest() else {
        let block = Block::default()
            .title(" Alarms ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let active = alarms(reading);
    let selected = evaluate(reading)
        .into_iter()
        .find(|s| s.parameter == app.selected_parameter);

    let mut lines: Vec<Line> = Vec::new();
    if active.is_empty() {
        lines.push(Line::from(Span::styled(
            " No alarms. All parameters are out of the danger zone.",
            Style::default().fg(app.theme.safe),
        )));
    } else {
        for s in &active {
            let config = s.parameter.config();
            lines.push(Line::from(vec![
                Span::styled(
                    format!(
                        " {} {} {} ",
                        s.tier.symbol(),
                        config.label,
                        format_value(s.parameter, s.value)
                    ),
                    app.theme.tier_style(SafetyTier::Danger),
                ),
                Span::raw(config.recommendation),
            ]));
        }
    }

    // Recommendation for the selected parameter when it is only a warning
    if let Some(s) = selected.filter(|s| s.tier == SafetyTier::Warning) {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} {}: ", s.tier.symbol(), s.parameter.config().label),
                app.theme.tier_style(s.tier),
            ),
            Span::raw(s.recommendation().unwrap_or_default()),
        ]));
    }

    let border = if active.is_empty() {
        app.theme.border
    } else {
        app.theme.danger
    };
    let block = Block::default()
        .title(format!(" Alarms ({}) ", active.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_sparkline(data: &[u8]) -> String {
    if data.is_empty() {
        return " ".repeat(SPARKLINE_WIDTH);
    }

    // Take last SPARKLINE_WIDTH values
    let skip = data.len().saturating_sub(SPARKLINE_WIDTH);
    data[skip..]
        .iter()
        .map(|&v| SPARKLINE_CHARS[v.min(7) as usize])
        .collect()
}
