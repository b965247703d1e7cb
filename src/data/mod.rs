//! Domain model and evaluation logic.
//!
//! ## Submodules
//!
//! - [`reading`]: Readings and the [`Parameter`] enum
//! - [`classifier`]: Per-parameter safety tiers and display configuration
//! - [`history`]: Bounded window of recent readings for charts and sparklines
//! - [`maintenance`]: Filter media, replacement schedule and [`MaintenanceStatus`]
//! - [`editor`]: VIEW/EDIT session over a draft copy of the filter media
//! - [`catalog`]: Library of common filter media
//! - [`reports`]: Append-only report log and calendar bucketing
//! - [`settings`]: Aquarium details and fish roster
//! - [`store`]: [`AquariumStore`], the owner of all of the above
//!
//! ## Data Flow
//!
//! ```text
//! ReadingSource::poll()
//!        │
//!        ▼
//! AquariumStore::ingest() ──▶ History (bounded, oldest evicted)
//!        │
//!        ├──▶ classify() per parameter (dashboard, alarms)
//!        │
//!        └──▶ record_report() ──▶ ReportLog ──▶ group() by calendar bucket
//! ```

pub mod catalog;
pub mod classifier;
pub mod editor;
pub mod history;
pub mod maintenance;
pub mod reading;
pub mod reports;
pub mod settings;
pub mod store;

pub use catalog::CatalogEntry;
pub use classifier::{classify, ParameterConfig, ParameterStatus, SafetyTier};
pub use editor::{EditorMode, MaintenanceEditor};
pub use history::{History, MAX_HISTORY_SIZE};
pub use maintenance::{
    FilterCategory, FilterMediaList, FilterMedium, MaintenanceStatus, MaintenanceTier, DAY_MS,
};
pub use reading::{now_ms, Parameter, Reading};
pub use reports::{BucketBoundaries, Report, ReportBucket, ReportLog};
pub use settings::{AquariumSettings, Fish};
pub use store::AquariumStore;
