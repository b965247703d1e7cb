//! The single owner of all aquarium state.
//!
//! Every mutation goes through a named operation here; the presentation
//! layer reads through accessors and never assigns fields directly.

use tracing::info;

use super::history::History;
use super::maintenance::{FilterMediaList, FilterMedium};
use super::reading::Reading;
use super::reports::{Report, ReportLog};
use super::settings::{AquariumSettings, Fish};
use crate::error::{Error, Result};

/// Note attached to the report recorded when feeding is logged.
pub const FEEDING_NOTE: &str = "Feeding logged";

/// Application state: readings, reports, filter media and aquarium details.
#[derive(Debug, Clone)]
pub struct AquariumStore {
    history: History,
    reports: ReportLog,
    media: FilterMediaList,
    volume_liters: f64,
    filter_description: String,
    food_description: String,
    fish: Vec<Fish>,
    last_feeding_ms: Option<i64>,
}

impl AquariumStore {
    /// Create a store from aquarium settings, validating the filter media.
    pub fn new(settings: AquariumSettings) -> Result<Self> {
        let media = FilterMediaList::new(settings.filter_media)?;
        Ok(Self {
            history: History::new(),
            reports: ReportLog::new(),
            media,
            volume_liters: settings.volume_liters,
            filter_description: settings.filter_description,
            food_description: settings.food_description,
            fish: settings.fish,
            last_feeding_ms: None,
        })
    }

    /// Append a new reading to the history.
    pub fn ingest(&mut self, reading: Reading) -> Result<()> {
        self.history.append(reading)
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.history.latest()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn reports(&self) -> &[Report] {
        self.reports.list()
    }

    pub fn filter_media(&self) -> &FilterMediaList {
        &self.media
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn last_feeding_ms(&self) -> Option<i64> {
        self.last_feeding_ms
    }

    /// Record a report of the latest reading.
    pub fn record_report(&mut self, note: Option<String>, now_ms: i64) -> Result<Report> {
        let snapshot = *self.history.latest().ok_or(Error::EmptyHistory)?;
        Ok(self.reports.record(snapshot, note, now_ms))
    }

    /// Log a feeding at `now_ms`.
    ///
    /// The feeding time is kept even when no reading exists yet to attach
    /// a report to; the report is returned when one was recorded.
    pub fn log_feeding(&mut self, now_ms: i64) -> Option<Report> {
        self.last_feeding_ms = Some(now_ms);
        info!(at = now_ms, "feeding logged");
        self.record_report(Some(FEEDING_NOTE.to_string()), now_ms).ok()
    }

    /// Mark a filter medium as replaced and record a maintenance report.
    ///
    /// Returns the updated medium and, when a reading exists, the report.
    pub fn mark_filter_changed(
        &mut self,
        id: &str,
        now_ms: i64,
    ) -> Result<(FilterMedium, Option<Report>)> {
        let medium = self.media.mark_changed(id, now_ms)?;
        info!(id = %medium.id, "filter medium marked as changed");
        let report = self
            .record_report(Some(format!("{} marked as changed", medium.name)), now_ms)
            .ok();
        Ok((medium, report))
    }

    /// Replace the filter media wholesale.
    pub fn replace_filter_media(&mut self, media: Vec<FilterMedium>) -> Result<()> {
        self.media.replace_all(media)
    }

    /// Replace the fish roster wholesale.
    pub fn replace_fish(&mut self, fish: Vec<Fish>) {
        self.fish = fish;
    }

    /// Replace the volume, filter and food descriptions.
    pub fn update_details(
        &mut self,
        volume_liters: f64,
        filter_description: String,
        food_description: String,
    ) {
        self.volume_liters = volume_liters;
        self.filter_description = filter_description;
        self.food_description = food_description;
    }

    /// A snapshot of the current aquarium settings.
    pub fn settings(&self) -> AquariumSettings {
        AquariumSettings {
            volume_liters: self.volume_liters,
            filter_description: self.filter_description.clone(),
            food_description: self.food_description.clone(),
            fish: self.fish.clone(),
            filter_media: self.media.all().to_vec(),
        }
    }
}
