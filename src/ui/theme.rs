//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{MaintenanceTier, SafetyTier};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Whether this is the light variant.
    pub is_light: bool,
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for the warning tier and maintenance due soon.
    pub warning: Color,
    /// Color for the danger tier and overdue maintenance.
    pub danger: Color,
    /// Color for safe values and good maintenance status.
    pub safe: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Line color of the history chart.
    pub chart: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            is_light: false,
            highlight: Color::Cyan,
            warning: Color::Yellow,
            danger: Color::Red,
            safe: Color::Green,
            border: Color::Gray,
            chart: Color::LightCyan,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            is_light: true,
            highlight: Color::Blue,
            warning: Color::Yellow,
            danger: Color::Red,
            safe: Color::Green,
            border: Color::DarkGray,
            chart: Color::Blue,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// The other variant.
    pub fn toggled(&self) -> Self {
        if self.is_light {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn name(&self) -> &'static str {
        if self.is_light {
            "light"
        } else {
            "dark"
        }
    }

    /// Get style for a safety tier
    pub fn tier_style(&self, tier: SafetyTier) -> Style {
        match tier {
            SafetyTier::Safe => Style::default().fg(self.safe),
            SafetyTier::Warning => Style::default().fg(self.warning),
            SafetyTier::Danger => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
        }
    }

    /// Get style for a maintenance tier
    pub fn maintenance_style(&self, tier: MaintenanceTier) -> Style {
        match tier {
            MaintenanceTier::Good => Style::default().fg(self.safe),
            MaintenanceTier::Soon => Style::default().fg(self.warning),
            MaintenanceTier::Overdue => {
                Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
            }
        }
    }
}
