//! Filter media and their replacement schedule.
//!
//! The urgency of a medium is derived, never stored: it is computed from
//! `last_changed_ms + change_interval_days` against the caller's clock.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 86_400_000;

/// A medium due within this many days is flagged as due soon.
pub const SOON_WINDOW_DAYS: i64 = 7;

/// Role a filter medium plays in the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterCategory {
    Mechanical,
    Biological,
    Chemical,
    Extra,
}

impl FilterCategory {
    /// All categories in display order.
    pub const ALL: [FilterCategory; 4] = [
        FilterCategory::Mechanical,
        FilterCategory::Biological,
        FilterCategory::Chemical,
        FilterCategory::Extra,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterCategory::Mechanical => "Mechanical",
            FilterCategory::Biological => "Biological",
            FilterCategory::Chemical => "Chemical",
            FilterCategory::Extra => "Extra",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A filter component with its own replacement cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterMedium {
    /// Unique key within the active media list.
    pub id: String,
    pub name: String,
    pub category: FilterCategory,
    /// Last replacement, in milliseconds since the Unix epoch.
    pub last_changed_ms: i64,
    /// Days between replacements; always at least one.
    pub change_interval_days: u32,
    /// What happens when the medium is left past its interval.
    pub consequence: String,
}

impl FilterMedium {
    /// Time at which the medium is next due, in ms epoch.
    ///
    /// Saturates at the ends of the `i64` range.
    pub fn next_due_ms(&self) -> i64 {
        self.last_changed_ms.saturating_add(i64::from(self.change_interval_days) * DAY_MS)
    }
}

/// Maintenance urgency of a filter medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaintenanceTier {
    Good,
    Soon,
    Overdue,
}

impl MaintenanceTier {
    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceTier::Good => "Good",
            MaintenanceTier::Soon => "Due soon",
            MaintenanceTier::Overdue => "Overdue",
        }
    }
}

/// Derived maintenance state of a medium at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceStatus {
    pub tier: MaintenanceTier,
    /// Whole days until the medium is due, rounded up; zero or negative once due.
    pub days_remaining: i64,
}

/// Compute the maintenance status of `medium` at `now_ms`.
pub fn status(medium: &FilterMedium, now_ms: i64) -> MaintenanceStatus {
    let remaining_ms = medium.next_due_ms().saturating_sub(now_ms);
    let days_remaining = (remaining_ms as f64 / DAY_MS as f64).ceil() as i64;

    let tier = if days_remaining <= 0 {
        MaintenanceTier::Overdue
    } else if days_remaining <= SOON_WINDOW_DAYS {
        MaintenanceTier::Soon
    } else {
        MaintenanceTier::Good
    };

    MaintenanceStatus {
        tier,
        days_remaining,
    }
}

/// Return a copy of `medium` replaced at `now_ms`.
pub fn mark_changed(medium: &FilterMedium, now_ms: i64) -> FilterMedium {
    FilterMedium {
        last_changed_ms: now_ms,
        ..medium.clone()
    }
}

/// Check the list invariants: unique ids and non-zero intervals.
pub fn validate(media: &[FilterMedium]) -> Result<()> {
    let mut seen = HashSet::with_capacity(media.len());
    for medium in media {
        if !seen.insert(medium.id.as_str()) {
            return Err(Error::DuplicateFilterMedium(medium.id.clone()));
        }
        if medium.change_interval_days == 0 {
            return Err(Error::ZeroChangeInterval(medium.id.clone()));
        }
    }
    Ok(())
}

/// The active, ordered set of filter media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMediaList {
    media: Vec<FilterMedium>,
}

impl FilterMediaList {
    /// Build a list, validating its invariants.
    pub fn new(media: Vec<FilterMedium>) -> Result<Self> {
        validate(&media)?;
        Ok(Self { media })
    }

    /// Replace the whole list with `media`.
    ///
    /// On error the current list is left untouched.
    pub fn replace_all(&mut self, media: Vec<FilterMedium>) -> Result<()> {
        validate(&media)?;
        info!(count = media.len(), "filter media replaced");
        self.media = media;
        Ok(())
    }

    /// All media in order.
    pub fn all(&self) -> &[FilterMedium] {
        &self.media
    }

    pub fn get(&self, id: &str) -> Option<&FilterMedium> {
        self.media.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    /// Mark the medium with `id` as replaced at `now_ms`, returning the updated medium.
    pub fn mark_changed(&mut self, id: &str, now_ms: i64) -> Result<FilterMedium> {
        let slot = self
            .media
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::UnknownFilterMedium(id.to_string()))?;
        *slot = mark_changed(slot, now_ms);
        Ok(slot.clone())
    }

    /// Soonest next-due time across all media, or `None` when empty.
    pub fn next_maintenance_due(&self) -> Option<i64> {
        self.media.iter().map(FilterMedium::next_due_ms).min()
    }

    /// Count of media per maintenance tier at `now_ms` as (good, soon, overdue).
    pub fn tier_counts(&self, now_ms: i64) -> (usize, usize, usize) {
        self.media.iter().fold((0, 0, 0), |(g, s, o), m| match status(m, now_ms).tier {
            MaintenanceTier::Good => (g + 1, s, o),
            MaintenanceTier::Soon => (g, s + 1, o),
            MaintenanceTier::Overdue => (g, s, o + 1),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn medium(id: &str, last_changed_ms: i64, interval: u32) -> FilterMedium {
        FilterMedium {
            id: id.to_string(),
            name: format!("Medium {}", id),
            category: FilterCategory::Mechanical,
            last_changed_ms,
            change_interval_days: interval,
            consequence: "Flow slows down".to_string(),
        }
    }

    const NOW: i64 = 1_750_000_000_000;

    #[test]
    fn overdue_after_interval() {
        let m = medium("a", NOW - 200 * DAY_MS, 180);
        let s = status(&m, NOW);
        assert_eq!(s.tier, MaintenanceTier::Overdue);
        assert!(s.days_remaining <= 0);
        assert_eq!(s.days_remaining, -20);
    }

    #[test]
    fn soon_within_a_week() {
        let m = medium("a", NOW - 25 * DAY_MS, 30);
        let s = status(&m, NOW);
        assert_eq!(s.days_remaining, 5);
        assert_eq!(s.tier, MaintenanceTier::Soon);
    }

    #[test]
    fn tier_boundaries() {
        // Exactly due now
        let due = medium("a", NOW - 30 * DAY_MS, 30);
        assert_eq!(status(&due, NOW).days_remaining, 0);
        assert_eq!(status(&due, NOW).tier, MaintenanceTier::Overdue);

        // Exactly seven days left
        let seven = medium("b", NOW - 23 * DAY_MS, 30);
        assert_eq!(status(&seven, NOW).tier, MaintenanceTier::Soon);

        // Eight days left
        let eight = medium("c", NOW - 22 * DAY_MS, 30);
        assert_eq!(status(&eight, NOW).tier, MaintenanceTier::Good);
    }

    #[test]
    fn partial_days_round_up() {
        // One hour short of the full interval still counts as a whole day left
        let m = medium("a", NOW - 30 * DAY_MS + 3_600_000, 30);
        assert_eq!(status(&m, NOW).days_remaining, 1);
        assert_eq!(status(&m, NOW).tier, MaintenanceTier::Soon);
    }

    #[test]
    fn mark_changed_resets_to_full_interval() {
        let m = medium("a", NOW - 200 * DAY_MS, 180);
        let changed = mark_changed(&m, NOW);
        assert_eq!(changed.last_changed_ms, NOW);
        assert_eq!(status(&changed, NOW).days_remaining, 180);
        assert_eq!(status(&changed, NOW).tier, MaintenanceTier::Good);
        // Original is untouched
        assert_eq!(m.last_changed_ms, NOW - 200 * DAY_MS);
    }

    #[test]
    fn extreme_timestamps_saturate() {
        let far_future = medium("a", i64::MAX - 1, 30);
        assert_eq!(far_future.next_due_ms(), i64::MAX);
        let s = status(&far_future, 0);
        assert_eq!(s.tier, MaintenanceTier::Good);
        assert!(s.days_remaining > 0);

        let far_past = medium("b", i64::MIN, 30);
        let s = status(&far_past, NOW);
        assert_eq!(s.tier, MaintenanceTier::Overdue);
        assert!(s.days_remaining < 0);

        let list = FilterMediaList::new(vec![far_future, far_past]).unwrap();
        assert_eq!(list.tier_counts(NOW), (1, 0, 1));
    }

    #[test]
    fn status_is_idempotent() {
        let m = medium("a", NOW - 3 * DAY_MS, 14);
        assert_eq!(status(&m, NOW), status(&m, NOW));
    }

    #[test]
    fn replace_all_round_trips() {
        let mut list = FilterMediaList::default();
        let media = vec![medium("a", NOW, 7), medium("b", NOW, 30)];
        list.replace_all(media.clone()).unwrap();
        assert_eq!(list.all(), media.as_slice());
    }

    #[test]
    fn replace_all_rejects_duplicates_and_keeps_old_list() {
        let mut list = FilterMediaList::new(vec![medium("a", NOW, 7)]).unwrap();
        let err = list.replace_all(vec![medium("b", NOW, 7), medium("b", NOW, 30)]).unwrap_err();
        assert_eq!(err, Error::DuplicateFilterMedium("b".to_string()));
        assert_eq!(list.len(), 1);
        assert!(list.get("a").is_some());
    }

    #[test]
    fn replace_all_rejects_zero_interval() {
        let mut list = FilterMediaList::default();
        let err = list.replace_all(vec![medium("a", NOW, 0)]).unwrap_err();
        assert_eq!(err, Error::ZeroChangeInterval("a".to_string()));
        assert!(list.is_empty());
    }

    #[test]
    fn list_mark_changed_updates_in_place() {
        let mut list =
            FilterMediaList::new(vec![medium("a", 0, 7), medium("b", 0, 30)]).unwrap();
        let updated = list.mark_changed("b", NOW).unwrap();
        assert_eq!(updated.last_changed_ms, NOW);
        assert_eq!(list.get("b").unwrap().last_changed_ms, NOW);
        assert_eq!(list.get("a").unwrap().last_changed_ms, 0);
    }

    #[test]
    fn list_mark_changed_unknown_id() {
        let mut list = FilterMediaList::default();
        assert_eq!(
            list.mark_changed("missing", NOW).unwrap_err(),
            Error::UnknownFilterMedium("missing".to_string())
        );
    }

    #[test]
    fn next_maintenance_due_is_soonest() {
        let list = FilterMediaList::new(vec![
            medium("a", NOW, 30),
            medium("b", NOW - 10 * DAY_MS, 14),
        ])
        .unwrap();
        assert_eq!(list.next_maintenance_due(), Some(NOW + 4 * DAY_MS));
        assert_eq!(FilterMediaList::default().next_maintenance_due(), None);
    }

    #[test]
    fn tier_counts_partition_media() {
        let list = FilterMediaList::new(vec![
            medium("good", NOW, 30),
            medium("soon", NOW - 25 * DAY_MS, 30),
            medium("late", NOW - 40 * DAY_MS, 30),
        ])
        .unwrap();
        assert_eq!(list.tier_counts(NOW), (1, 1, 1));
    }
}
