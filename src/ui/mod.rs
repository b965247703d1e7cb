//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Latest reading per parameter, history chart, alarms and tracking
//! - [`maintenance`]: Filter media schedule with the VIEW/EDIT surface and catalog picker
//! - [`reports`]: Recorded reports grouped by calendar bucket
//! - [`aquarium`]: Aquarium details and fish roster
//! - [`common`]: Shared components (header, tabs, status bar, input line, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌───────────────────────────────────────┐
//! │ Header (common::render_header)        │
//! ├───────────────────────────────────────┤
//! │ Tabs (common::render_tabs)            │
//! ├───────────────────────────────────────┤
//! │                                       │
//! │ View Content                          │
//! │ (dashboard/maintenance/reports/       │
//! │  aquarium::render)                    │
//! │                                       │
//! ├───────────────────────────────────────┤
//! │ Status Bar (common::render_status_bar)│
//! └───────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - maintenance::render_catalog_picker
//!    - common::render_input
//!    - common::render_help
//! ```

pub mod aquarium;
pub mod common;
pub mod dashboard;
pub mod maintenance;
pub mod reports;
pub mod theme;

pub use theme::Theme;

use ratatui::layout::Rect;

/// A rectangle of at most `width` x `height` centered in `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Format an epoch-milliseconds timestamp in local time.
pub(crate) fn format_timestamp(timestamp_ms: i64, pattern: &str) -> String {
    use chrono::{Local, TimeZone};
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => dt.format(pattern).to_string(),
        None => "-".to_string(),
    }
}

/// Format a parameter value with the precision it is measured at.
pub(crate) fn format_value(parameter: crate::data::Parameter, value: f64) -> String {
    use crate::data::Parameter;
    match parameter {
        Parameter::Temperature | Parameter::Nitrate => format!("{:.1}", value),
        Parameter::Ph => format!("{:.2}", value),
        Parameter::Ammonia | Parameter::Nitrite => format!("{:.3}", value),
    }
}
