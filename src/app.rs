//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use tracing::warn;

use crate::data::catalog::{self, CatalogEntry};
use crate::data::classifier::{alarms, evaluate, overall};
use crate::data::maintenance::status;
use crate::data::reports::group;
use crate::data::{
    AquariumStore, FilterMedium, Fish, MaintenanceEditor, Parameter, Report, ReportBucket,
};
use crate::source::ReadingSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Latest values, history chart and alarms.
    Dashboard,
    /// Filter media and their replacement schedule.
    Maintenance,
    /// Recorded snapshots grouped by day, week and month.
    Reports,
    /// Aquarium details and fish roster.
    Aquarium,
}

impl View {
    /// Views in tab order.
    pub const ALL: [View; 4] = [
        View::Dashboard,
        View::Maintenance,
        View::Reports,
        View::Aquarium,
    ];

    /// Position in the tab bar, starting at zero.
    pub fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Maintenance => 1,
            View::Reports => 2,
            View::Aquarium => 3,
        }
    }

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Dashboard => View::Maintenance,
            View::Maintenance => View::Reports,
            View::Reports => View::Aquarium,
            View::Aquarium => View::Dashboard,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Dashboard => View::Aquarium,
            View::Maintenance => View::Dashboard,
            View::Reports => View::Maintenance,
            View::Aquarium => View::Reports,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Maintenance => "Maintenance",
            View::Reports => "Reports",
            View::Aquarium => "Aquarium",
        }
    }
}

/// What a line of text input will be used for once submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// Note attached to a new report; may be left empty.
    ReportNote,
    Volume,
    FilterDescription,
    FoodDescription,
    /// New fish as `name, species`.
    NewFish,
}

impl InputTarget {
    pub fn prompt(&self) -> &'static str {
        match self {
            InputTarget::ReportNote => "Report note (optional)",
            InputTarget::Volume => "Volume (liters)",
            InputTarget::FilterDescription => "Filter",
            InputTarget::FoodDescription => "Food",
            InputTarget::NewFish => "New fish (name, species)",
        }
    }
}

/// A single-line text prompt in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub target: InputTarget,
    pub buffer: String,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source and state
    source: Box<dyn ReadingSource>,
    store: AquariumStore,
    pub load_error: Option<String>,
    pub last_update: Option<Instant>,

    // Navigation state
    pub selected_parameter: Parameter,
    pub selected_medium_index: usize,
    pub selected_report_index: usize,
    pub selected_fish_index: usize,

    // Maintenance edit surface
    editor: MaintenanceEditor,
    /// Selected row of the catalog picker, when it is open.
    pub catalog_picker: Option<usize>,

    // Text input (report note, aquarium details)
    pub input: Option<TextInput>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given reading source and store.
    ///
    /// The theme is detected from the terminal background.
    pub fn new(source: Box<dyn ReadingSource>, store: AquariumStore) -> Self {
        Self::with_theme(source, store, Theme::auto_detect())
    }

    pub fn with_theme(source: Box<dyn ReadingSource>, store: AquariumStore, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Dashboard,
            show_help: false,
            source,
            store,
            load_error: None,
            last_update: None,
            selected_parameter: Parameter::Temperature,
            selected_medium_index: 0,
            selected_report_index: 0,
            selected_fish_index: 0,
            editor: MaintenanceEditor::new(),
            catalog_picker: None,
            input: None,
            theme,
            status_message: None,
        }
    }

    pub fn store(&self) -> &AquariumStore {
        &self.store
    }

    pub fn editor(&self) -> &MaintenanceEditor {
        &self.editor
    }

    /// Returns a description of the current reading source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Drain the reading source into the store.
    ///
    /// Returns true if at least one reading was accepted. Rejected
    /// readings and source errors are surfaced through the status message
    /// and `load_error`.
    pub fn reload_data(&mut self) -> bool {
        let mut accepted = false;
        while let Some(reading) = self.source.poll() {
            match self.store.ingest(reading) {
                Ok(()) => accepted = true,
                Err(e) => self.set_status_message(format!("Reading rejected: {}", e)),
            }
        }

        if accepted {
            self.last_update = Some(Instant::now());
            self.load_error = None;
        } else if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }
        accepted
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    ///
    /// The maintenance draft stays open; only an explicit save or cancel
    /// leaves edit mode.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.catalog_picker = None;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        if let Some(index) = self.catalog_picker {
            let max = self.catalog_choices().len().saturating_sub(1);
            self.catalog_picker = Some((index + n).min(max));
            return;
        }
        match self.current_view {
            View::Dashboard => {
                for _ in 0..n {
                    self.selected_parameter = self.selected_parameter.next();
                }
            }
            View::Maintenance => {
                let max = self.displayed_media().len().saturating_sub(1);
                self.selected_medium_index = (self.selected_medium_index + n).min(max);
            }
            View::Reports => {
                let max = self.store.reports().len().saturating_sub(1);
                self.selected_report_index = (self.selected_report_index + n).min(max);
            }
            View::Aquarium => {
                let max = self.store.fish().len().saturating_sub(1);
                self.selected_fish_index = (self.selected_fish_index + n).min(max);
            }
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        if let Some(index) = self.catalog_picker {
            self.catalog_picker = Some(index.saturating_sub(n));
            return;
        }
        match self.current_view {
            View::Dashboard => {
                for _ in 0..n {
                    self.selected_parameter = self.selected_parameter.prev();
                }
            }
            View::Maintenance => {
                self.selected_medium_index = self.selected_medium_index.saturating_sub(n);
            }
            View::Reports => {
                self.selected_report_index = self.selected_report_index.saturating_sub(n);
            }
            View::Aquarium => {
                self.selected_fish_index = self.selected_fish_index.saturating_sub(n);
            }
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        if self.current_view == View::Dashboard && self.catalog_picker.is_none() {
            self.selected_parameter = Parameter::ALL[0];
            return;
        }
        self.select_prev_n(usize::MAX);
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        if self.current_view == View::Dashboard && self.catalog_picker.is_none() {
            self.selected_parameter = Parameter::ALL[Parameter::ALL.len() - 1];
            return;
        }
        self.select_next_n(usize::MAX / 2);
    }

    // ----- Dashboard -----

    /// Record a report of the latest reading with an optional note.
    pub fn record_report(&mut self, note: Option<String>, now_ms: i64) {
        match self.store.record_report(note, now_ms) {
            Ok(_) => self.set_status_message("Report recorded".to_string()),
            Err(e) => self.set_status_message(format!("Cannot record report: {}", e)),
        }
    }

    /// Log a feeding at `now_ms`.
    pub fn log_feeding(&mut self, now_ms: i64) {
        self.store.log_feeding(now_ms);
        self.set_status_message("Feeding logged".to_string());
    }

    // ----- Maintenance -----

    /// The media shown in the maintenance view: the draft while editing,
    /// the committed list otherwise.
    pub fn displayed_media(&self) -> &[FilterMedium] {
        self.editor
            .draft()
            .unwrap_or_else(|| self.store.filter_media().all())
    }

    pub fn selected_medium(&self) -> Option<&FilterMedium> {
        self.displayed_media().get(self.selected_medium_index)
    }

    fn selected_medium_id(&self) -> Option<String> {
        self.selected_medium().map(|m| m.id.clone())
    }

    fn clamp_medium_selection(&mut self) {
        let max = self.displayed_media().len().saturating_sub(1);
        self.selected_medium_index = self.selected_medium_index.min(max);
    }

    /// Mark the selected medium as replaced now. Only available in VIEW mode.
    pub fn mark_selected_changed(&mut self, now_ms: i64) {
        if self.editor.is_editing() {
            return;
        }
        let Some(id) = self.selected_medium_id() else {
            return;
        };
        match self.store.mark_filter_changed(&id, now_ms) {
            Ok((medium, _)) => {
                self.set_status_message(format!("{} marked as changed", medium.name));
            }
            Err(e) => self.set_status_message(format!("Error: {}", e)),
        }
    }

    /// VIEW → EDIT with a draft copy of the committed media.
    pub fn begin_edit(&mut self) {
        self.editor.begin_edit(self.store.filter_media().all());
    }

    /// EDIT → VIEW, committing the draft as a bulk replace.
    ///
    /// On a rejected draft the editor stays in EDIT mode so nothing is lost.
    pub fn save_edit(&mut self) {
        let Some(draft) = self.editor.draft().map(<[FilterMedium]>::to_vec) else {
            return;
        };
        match self.store.replace_filter_media(draft) {
            Ok(()) => {
                self.editor.save();
                self.catalog_picker = None;
                self.clamp_medium_selection();
                self.set_status_message("Filter media saved".to_string());
            }
            Err(e) => {
                warn!(error = %e, "filter media draft rejected");
                self.set_status_message(format!("Cannot save: {}", e));
            }
        }
    }

    /// EDIT → VIEW, discarding the draft.
    pub fn cancel_edit(&mut self) {
        if self.editor.is_editing() {
            self.editor.cancel();
            self.catalog_picker = None;
            self.clamp_medium_selection();
            self.set_status_message("Changes discarded".to_string());
        }
    }

    /// Remove the selected medium from the draft.
    pub fn delete_selected_medium(&mut self) {
        let Some(id) = self.selected_medium_id() else {
            return;
        };
        if let Ok(removed) = self.editor.remove(&id) {
            self.clamp_medium_selection();
            self.set_status_message(format!("Removed {}", removed.name));
        }
    }

    /// Change the interval of the selected draft medium by `delta_days`.
    pub fn adjust_selected_interval(&mut self, delta_days: i64) {
        let Some(medium) = self.selected_medium() else {
            return;
        };
        let days = (i64::from(medium.change_interval_days) + delta_days).clamp(1, u32::MAX as i64);
        let id = medium.id.clone();
        let _ = self.editor.set_interval(&id, days as u32);
    }

    /// Move the last-changed date of the selected draft medium.
    pub fn shift_selected_last_changed(&mut self, delta_days: i64) {
        if let Some(id) = self.selected_medium_id() {
            let _ = self.editor.shift_last_changed(&id, delta_days);
        }
    }

    /// Catalog entries not yet present in the draft.
    pub fn catalog_choices(&self) -> Vec<&'static CatalogEntry> {
        catalog::available(self.displayed_media().iter().map(|m| m.id.as_str()))
    }

    /// Open the catalog picker. Only available while editing.
    pub fn open_catalog_picker(&mut self) {
        if !self.editor.is_editing() {
            return;
        }
        if self.catalog_choices().is_empty() {
            self.set_status_message("Every catalog medium is already in use".to_string());
        } else {
            self.catalog_picker = Some(0);
        }
    }

    pub fn close_catalog_picker(&mut self) {
        self.catalog_picker = None;
    }

    /// Add the highlighted catalog entry to the draft and close the picker.
    pub fn confirm_catalog_pick(&mut self, now_ms: i64) {
        let Some(index) = self.catalog_picker.take() else {
            return;
        };
        let Some(entry) = self.catalog_choices().get(index).copied() else {
            return;
        };
        match self.editor.add_from_catalog(entry, now_ms) {
            Ok(()) => {
                self.selected_medium_index = self.displayed_media().len().saturating_sub(1);
                self.set_status_message(format!("Added {}", entry.name));
            }
            Err(e) => self.set_status_message(format!("Error: {}", e)),
        }
    }

    // ----- Reports -----

    /// Reports grouped by bucket relative to `now`, most recent first.
    pub fn grouped_reports<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Vec<(ReportBucket, Vec<&Report>)> {
        group(self.store.reports(), now)
    }

    /// Reports in the order the reports view lists them.
    pub fn report_rows(&self) -> Vec<&Report> {
        self.grouped_reports(&Local::now())
            .into_iter()
            .flat_map(|(_, reports)| reports)
            .collect()
    }

    // ----- Aquarium -----

    /// Remove the selected fish from the roster.
    pub fn delete_selected_fish(&mut self) {
        let mut fish = self.store.fish().to_vec();
        if self.selected_fish_index >= fish.len() {
            return;
        }
        let removed = fish.remove(self.selected_fish_index);
        self.store.replace_fish(fish);
        self.selected_fish_index = self
            .selected_fish_index
            .min(self.store.fish().len().saturating_sub(1));
        self.set_status_message(format!("Removed {}", removed.name));
    }

    // ----- Text input -----

    /// Open a text prompt, prefilled with the current value where one exists.
    pub fn start_input(&mut self, target: InputTarget) {
        let settings = self.store.settings();
        let buffer = match target {
            InputTarget::ReportNote | InputTarget::NewFish => String::new(),
            InputTarget::Volume => format!("{}", settings.volume_liters),
            InputTarget::FilterDescription => settings.filter_description,
            InputTarget::FoodDescription => settings.food_description,
        };
        self.input = Some(TextInput { target, buffer });
    }

    pub fn input_push(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.push(c);
        }
    }

    pub fn input_pop(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    /// Apply the prompt's text to its target and close the prompt.
    pub fn submit_input(&mut self, now_ms: i64) {
        let Some(TextInput { target, buffer }) = self.input.take() else {
            return;
        };
        let text = buffer.trim().to_string();
        let settings = self.store.settings();

        match target {
            InputTarget::ReportNote => {
                let note = (!text.is_empty()).then_some(text);
                self.record_report(note, now_ms);
            }
            InputTarget::Volume => match text.parse::<f64>() {
                Ok(volume) if volume.is_finite() && volume > 0.0 => {
                    self.store.update_details(
                        volume,
                        settings.filter_description,
                        settings.food_description,
                    );
                    self.set_status_message("Volume updated".to_string());
                }
                _ => self.set_status_message(format!("Invalid volume: {}", text)),
            },
            InputTarget::FilterDescription => {
                self.store
                    .update_details(settings.volume_liters, text, settings.food_description);
                self.set_status_message("Filter updated".to_string());
            }
            InputTarget::FoodDescription => {
                self.store
                    .update_details(settings.volume_liters, settings.filter_description, text);
                self.set_status_message("Food updated".to_string());
            }
            InputTarget::NewFish => {
                let (name, species) = match text.split_once(',') {
                    Some((name, species)) => (name.trim(), species.trim()),
                    None => (text.as_str(), ""),
                };
                if name.is_empty() {
                    self.set_status_message("Fish name is required".to_string());
                    return;
                }
                let mut fish = settings.fish;
                fish.push(Fish {
                    name: name.to_string(),
                    species: species.to_string(),
                    description: String::new(),
                    image_url: String::new(),
                });
                self.store.replace_fish(fish);
                self.selected_fish_index = self.store.fish().len() - 1;
                self.set_status_message(format!("Added {}", name));
            }
        }
    }

    // ----- General -----

    /// Navigate back: close the picker, then leave edit mode, then go to
    /// the dashboard.
    pub fn go_back(&mut self) {
        if self.catalog_picker.is_some() {
            self.catalog_picker = None;
            return;
        }
        if self.current_view == View::Maintenance && self.editor.is_editing() {
            self.cancel_edit();
            return;
        }
        if self.current_view != View::Dashboard {
            self.set_view(View::Dashboard);
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Switch between the light and dark themes.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.set_status_message(format!("Theme: {}", self.theme.name()));
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Stop the reading producer. Called on teardown.
    pub fn shutdown(&mut self) {
        self.running = false;
        self.source.stop();
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path, now_ms: i64) -> Result<()> {
        export_to_path(&self.store, path, now_ms)
    }
}

/// Build a JSON document describing the store at `now_ms`.
pub fn export_json(store: &AquariumStore, now_ms: i64) -> serde_json::Value {
    let mut export = serde_json::Map::new();
    export.insert("exported_at".to_string(), serde_json::json!(now_ms));

    // Latest reading with per-parameter tiers
    match store.latest() {
        Some(reading) => {
            let parameters: Vec<serde_json::Value> = evaluate(reading)
                .iter()
                .map(|s| {
                    let config = s.parameter.config();
                    serde_json::json!({
                        "parameter": s.parameter.key(),
                        "label": config.label,
                        "value": s.value,
                        "unit": config.unit,
                        "tier": format!("{:?}", s.tier),
                        "recommendation": s.recommendation(),
                    })
                })
                .collect();
            let alarm_keys: Vec<&str> = alarms(reading).iter().map(|s| s.parameter.key()).collect();
            export.insert(
                "latest".to_string(),
                serde_json::json!({
                    "reading": reading,
                    "overall": format!("{:?}", overall(reading)),
                    "parameters": parameters,
                    "alarms": alarm_keys,
                }),
            );
        }
        None => {
            export.insert("latest".to_string(), serde_json::Value::Null);
        }
    }

    export.insert("history".to_string(), serde_json::json!(store.history().all()));

    // Filter media with derived status
    let media: Vec<serde_json::Value> = store
        .filter_media()
        .all()
        .iter()
        .map(|m| {
            let s = status(m, now_ms);
            serde_json::json!({
                "id": m.id,
                "name": m.name,
                "category": m.category,
                "last_changed_ms": m.last_changed_ms,
                "change_interval_days": m.change_interval_days,
                "next_due_ms": m.next_due_ms(),
                "days_remaining": s.days_remaining,
                "status": format!("{:?}", s.tier),
            })
        })
        .collect();
    export.insert("filter_media".to_string(), serde_json::Value::Array(media));
    export.insert(
        "next_maintenance_due_ms".to_string(),
        serde_json::json!(store.filter_media().next_maintenance_due()),
    );

    export.insert("reports".to_string(), serde_json::json!(store.reports()));
    export.insert("last_feeding_ms".to_string(), serde_json::json!(store.last_feeding_ms()));

    let settings = store.settings();
    export.insert(
        "aquarium".to_string(),
        serde_json::json!({
            "volume_liters": settings.volume_liters,
            "filter_description": settings.filter_description,
            "food_description": settings.food_description,
            "fish": settings.fish,
        }),
    );

    serde_json::Value::Object(export)
}

/// Write [`export_json`] to `path`, pretty-printed.
pub fn export_to_path(store: &AquariumStore, path: &Path, now_ms: i64) -> Result<()> {
    use std::io::Write;

    let json = serde_json::to_string_pretty(&export_json(store, now_ms))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AquariumSettings, MaintenanceTier, Reading, DAY_MS};
    use crate::source::ChannelSource;
    use tokio::sync::mpsc::UnboundedSender;

    const NOW: i64 = 1_750_000_000_000;

    fn app() -> (UnboundedSender<Reading>, App) {
        let (tx, source) = ChannelSource::create("test");
        let store = AquariumStore::new(AquariumSettings::demo(NOW)).unwrap();
        (tx, App::with_theme(Box::new(source), store, Theme::dark()))
    }

    fn select_medium(app: &mut App, id: &str) {
        app.selected_medium_index = app
            .displayed_media()
            .iter()
            .position(|m| m.id == id)
            .unwrap();
    }

    #[test]
    fn test_view_cycle() {
        let mut view = View::Dashboard;
        for _ in 0..4 {
            view = view.next();
        }
        assert_eq!(view, View::Dashboard);
        assert_eq!(View::Dashboard.prev(), View::Aquarium);
        assert_eq!(View::Reports.label(), "Reports");
    }

    #[test]
    fn test_reload_drains_source() {
        let (tx, mut app) = app();
        assert!(!app.reload_data());

        tx.send(Reading::baseline(NOW)).unwrap();
        tx.send(Reading::baseline(NOW + 3000)).unwrap();
        assert!(app.reload_data());
        assert_eq!(app.store().history().len(), 2);
        assert!(app.last_update.is_some());
    }

    #[test]
    fn test_reload_reports_rejected_reading() {
        let (tx, mut app) = app();
        tx.send(Reading::baseline(NOW)).unwrap();
        tx.send(Reading::baseline(NOW - 1)).unwrap();

        assert!(app.reload_data());
        assert_eq!(app.store().history().len(), 1);
        assert!(app.get_status_message().unwrap().starts_with("Reading rejected"));
    }

    #[test]
    fn test_reload_surfaces_disconnect() {
        let (tx, mut app) = app();
        drop(tx);
        assert!(!app.reload_data());
        assert_eq!(app.load_error.as_deref(), Some("Producer disconnected"));
    }

    #[test]
    fn test_dashboard_selection_cycles_parameters() {
        let (_tx, mut app) = app();
        app.select_prev();
        assert_eq!(app.selected_parameter, Parameter::Nitrate);
        app.select_next_n(2);
        assert_eq!(app.selected_parameter, Parameter::Ph);
        app.select_last();
        assert_eq!(app.selected_parameter, Parameter::Nitrate);
        app.select_first();
        assert_eq!(app.selected_parameter, Parameter::Temperature);
    }

    #[test]
    fn test_report_note_input() {
        let (tx, mut app) = app();
        tx.send(Reading::baseline(NOW)).unwrap();
        app.reload_data();

        app.start_input(InputTarget::ReportNote);
        for c in "water change".chars() {
            app.input_push(c);
        }
        app.submit_input(NOW + 1);
        assert!(app.input.is_none());

        app.start_input(InputTarget::ReportNote);
        app.submit_input(NOW + 2);

        let reports = app.store().reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].note.as_deref(), Some("water change"));
        assert!(reports[1].note.is_none());
    }

    #[test]
    fn test_record_report_without_reading() {
        let (_tx, mut app) = app();
        app.record_report(None, NOW);
        assert!(app.store().reports().is_empty());
        assert!(app.get_status_message().unwrap().starts_with("Cannot record report"));
    }

    #[test]
    fn test_mark_selected_changed_only_in_view_mode() {
        let (_tx, mut app) = app();
        select_medium(&mut app, "activated_carbon");

        app.begin_edit();
        app.mark_selected_changed(NOW);
        let carbon = app.store().filter_media().get("activated_carbon").unwrap();
        assert_eq!(status(carbon, NOW).tier, MaintenanceTier::Overdue);

        app.cancel_edit();
        app.mark_selected_changed(NOW);
        let carbon = app.store().filter_media().get("activated_carbon").unwrap();
        assert_eq!(carbon.last_changed_ms, NOW);
    }

    #[test]
    fn test_edit_session_save_commits_draft() {
        let (_tx, mut app) = app();
        app.begin_edit();

        select_medium(&mut app, "sponge_fine");
        app.adjust_selected_interval(5);
        app.shift_selected_last_changed(-1);
        select_medium(&mut app, "ceramic_rings");
        app.delete_selected_medium();

        // Committed list is untouched until save
        assert_eq!(app.store().filter_media().len(), 3);

        app.save_edit();
        assert!(!app.editor().is_editing());
        let media = app.store().filter_media();
        assert_eq!(media.len(), 2);
        let sponge = media.get("sponge_fine").unwrap();
        assert_eq!(sponge.change_interval_days, 35);
        assert_eq!(sponge.last_changed_ms, NOW - 11 * DAY_MS);
        assert!(media.get("ceramic_rings").is_none());
    }

    #[test]
    fn test_edit_session_cancel_discards_draft() {
        let (_tx, mut app) = app();
        let before = app.store().filter_media().all().to_vec();

        app.set_view(View::Maintenance);
        app.begin_edit();
        app.delete_selected_medium();
        assert_eq!(app.displayed_media().len(), 2);

        // Esc leaves edit mode without committing
        app.go_back();
        assert!(!app.editor().is_editing());
        assert_eq!(app.store().filter_media().all(), before.as_slice());
        assert_eq!(app.current_view, View::Maintenance);
    }

    #[test]
    fn test_interval_never_drops_below_one_day() {
        let (_tx, mut app) = app();
        app.begin_edit();
        select_medium(&mut app, "sponge_fine");
        app.adjust_selected_interval(-100);
        assert_eq!(app.selected_medium().unwrap().change_interval_days, 1);
    }

    #[test]
    fn test_catalog_picker_adds_to_draft() {
        let (_tx, mut app) = app();
        app.open_catalog_picker();
        assert!(app.catalog_picker.is_none(), "picker needs edit mode");

        app.set_view(View::Maintenance);
        app.begin_edit();
        app.open_catalog_picker();
        let choices = app.catalog_choices();
        assert!(choices.iter().all(|e| e.id != "sponge_fine"));
        let first = choices[0];

        app.confirm_catalog_pick(NOW);
        assert!(app.catalog_picker.is_none());
        assert_eq!(app.selected_medium().unwrap().id, first.id);
        assert_eq!(app.selected_medium().unwrap().last_changed_ms, NOW);

        app.save_edit();
        assert!(app.store().filter_media().get(first.id).is_some());
        assert_eq!(app.store().filter_media().len(), 4);
    }

    #[test]
    fn test_picker_navigation_is_bounded() {
        let (_tx, mut app) = app();
        app.begin_edit();
        app.open_catalog_picker();
        app.select_prev();
        assert_eq!(app.catalog_picker, Some(0));
        app.select_last();
        assert_eq!(app.catalog_picker, Some(app.catalog_choices().len() - 1));
        app.go_back();
        assert!(app.catalog_picker.is_none());
        assert!(app.editor().is_editing());
    }

    #[test]
    fn test_detail_inputs_update_settings() {
        let (_tx, mut app) = app();

        app.start_input(InputTarget::Volume);
        assert_eq!(app.input.as_ref().unwrap().buffer, "120");
        app.input_pop();
        app.input_pop();
        app.input_pop();
        app.input_push('8');
        app.input_push('0');
        app.submit_input(NOW);
        assert_eq!(app.store().settings().volume_liters, 80.0);

        app.start_input(InputTarget::Volume);
        app.input_push('x');
        app.submit_input(NOW);
        assert_eq!(app.store().settings().volume_liters, 80.0);

        app.start_input(InputTarget::FoodDescription);
        app.input.as_mut().unwrap().buffer = "Flakes".to_string();
        app.submit_input(NOW);
        assert_eq!(app.store().settings().food_description, "Flakes");
    }

    #[test]
    fn test_fish_roster_edits() {
        let (_tx, mut app) = app();
        app.start_input(InputTarget::NewFish);
        app.input.as_mut().unwrap().buffer = "Otocinclus, Otocinclus vittatus".to_string();
        app.submit_input(NOW);

        let fish = app.store().fish();
        assert_eq!(fish.len(), 5);
        assert_eq!(fish[4].species, "Otocinclus vittatus");
        assert_eq!(app.selected_fish_index, 4);

        app.delete_selected_fish();
        assert_eq!(app.store().fish().len(), 4);
        assert_eq!(app.selected_fish_index, 3);
    }

    #[test]
    fn test_feeding_and_theme_toggle() {
        let (_tx, mut app) = app();
        app.log_feeding(NOW);
        assert_eq!(app.store().last_feeding_ms(), Some(NOW));

        app.toggle_theme();
        assert!(app.theme.is_light);
        assert_eq!(app.get_status_message(), Some("Theme: light"));
    }

    #[test]
    fn test_export_json_shape() {
        let (tx, mut app) = app();
        tx.send(Reading::new(NOW, 25.0, 7.2, 0.8, 0.05, 10.0)).unwrap();
        app.reload_data();
        app.record_report(Some("spike".into()), NOW);

        let json = export_json(app.store(), NOW);
        assert_eq!(json["latest"]["overall"], "Danger");
        assert_eq!(json["latest"]["alarms"], serde_json::json!(["ammonia"]));
        assert_eq!(json["history"].as_array().unwrap().len(), 1);
        assert_eq!(json["reports"][0]["note"], "spike");
        assert_eq!(json["filter_media"][1]["status"], "Overdue");
        assert_eq!(json["aquarium"]["volume_liters"], 120.0);
    }

    #[test]
    fn test_export_state_writes_file() {
        let (_tx, app) = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        app.export_state(&path, NOW).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(json["latest"].is_null());
        assert_eq!(json["filter_media"].as_array().unwrap().len(), 3);
    }
}
