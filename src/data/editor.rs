//! Edit session for the filter media list.
//!
//! The maintenance surface is either viewing the committed list or editing
//! a draft copy of it. Saving hands the draft back verbatim for a bulk
//! replace; cancelling drops it. There is no merge and no partial save.

use super::catalog::CatalogEntry;
use super::maintenance::{FilterMedium, DAY_MS};
use crate::error::{Error, Result};

/// State of the maintenance edit surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    View,
    Edit {
        draft: Vec<FilterMedium>,
    },
}

/// VIEW/EDIT state machine over a working copy of the filter media.
#[derive(Debug, Clone, Default)]
pub struct MaintenanceEditor {
    mode: EditorMode,
}

impl MaintenanceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    /// Enter edit mode with a copy of `committed`.
    ///
    /// Ignored while already editing so an open draft is never clobbered.
    pub fn begin_edit(&mut self, committed: &[FilterMedium]) {
        if !self.is_editing() {
            self.mode = EditorMode::Edit {
                draft: committed.to_vec(),
            };
        }
    }

    /// The draft, if editing.
    pub fn draft(&self) -> Option<&[FilterMedium]> {
        match &self.mode {
            EditorMode::Edit { draft } => Some(draft),
            EditorMode::View => None,
        }
    }

    fn draft_mut(&mut self) -> Result<&mut Vec<FilterMedium>> {
        match &mut self.mode {
            EditorMode::Edit { draft } => Ok(draft),
            EditorMode::View => Err(Error::NotEditing),
        }
    }

    fn draft_medium(&mut self, id: &str) -> Result<&mut FilterMedium> {
        self.draft_mut()?
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::UnknownFilterMedium(id.to_string()))
    }

    /// Remove a medium from the draft.
    pub fn remove(&mut self, id: &str) -> Result<FilterMedium> {
        let draft = self.draft_mut()?;
        let index = draft
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| Error::UnknownFilterMedium(id.to_string()))?;
        Ok(draft.remove(index))
    }

    /// Append a catalog entry to the draft, marked as replaced at `now_ms`.
    pub fn add_from_catalog(&mut self, entry: &CatalogEntry, now_ms: i64) -> Result<()> {
        let draft = self.draft_mut()?;
        if draft.iter().any(|m| m.id == entry.id) {
            return Err(Error::DuplicateFilterMedium(entry.id.to_string()));
        }
        draft.push(entry.instantiate(now_ms));
        Ok(())
    }

    /// Set the change interval of a draft medium, clamped to at least one day.
    pub fn set_interval(&mut self, id: &str, days: u32) -> Result<()> {
        self.draft_medium(id)?.change_interval_days = days.max(1);
        Ok(())
    }

    /// Move the last-changed date of a draft medium by whole days.
    pub fn shift_last_changed(&mut self, id: &str, delta_days: i64) -> Result<()> {
        let medium = self.draft_medium(id)?;
        medium.last_changed_ms = medium
            .last_changed_ms
            .saturating_add(delta_days.saturating_mul(DAY_MS));
        Ok(())
    }

    /// Leave edit mode, returning the draft to commit.
    ///
    /// Returns `None` when not editing.
    pub fn save(&mut self) -> Option<Vec<FilterMedium>> {
        match std::mem::take(&mut self.mode) {
            EditorMode::Edit { draft } => Some(draft),
            EditorMode::View => None,
        }
    }

    /// Leave edit mode, discarding the draft.
    pub fn cancel(&mut self) {
        self.mode = EditorMode::View;
    }
}
