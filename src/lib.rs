// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # aquawatch
//!
//! A terminal dashboard and library for monitoring aquarium water quality
//! and filter maintenance.
//!
//! Readings (temperature, pH, ammonia, nitrite, nitrate) arrive from a
//! [`ReadingSource`], are kept in a bounded [`History`], and are classified
//! into safety tiers per parameter. Filter media carry a replacement
//! schedule whose urgency is derived from the current time. Reports capture
//! a snapshot of the latest reading with an optional note.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (store)  │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── SimulatedSource | ChannelSource             │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user actions
//! - **[`source`]**: Reading source abstraction ([`ReadingSource`] trait), the
//!   channel adapter, and the random-walk simulator
//! - **[`data`]**: Domain model: classification, history, maintenance
//!   schedule, reports, and the [`AquariumStore`] that owns them
//! - **[`config`]**: Layered configuration ([`AppConfig`])
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Simulated readings every 3 seconds
//! aquawatch
//!
//! # Faster, reproducible simulation with a custom aquarium
//! aquawatch --config aquarium.toml --tick-ms 500 --seed 42
//!
//! # Dump the current state as JSON
//! aquawatch --export state.json
//! ```
//!
//! ### Classifying values
//!
//! ```
//! use aquawatch::{classify, Parameter, SafetyTier};
//!
//! assert_eq!(classify(Parameter::Temperature, 24.0), SafetyTier::Safe);
//! assert_eq!(classify(Parameter::Ammonia, 0.5), SafetyTier::Warning);
//! assert_eq!(classify(Parameter::Ammonia, 0.51), SafetyTier::Danger);
//! ```
//!
//! ### Feeding the store from a channel
//!
//! ```
//! use aquawatch::{AquariumSettings, AquariumStore, App, ChannelSource, Reading};
//!
//! let (tx, source) = ChannelSource::create("bench sensor");
//! let store = AquariumStore::new(AquariumSettings::demo(0)).unwrap();
//! let mut app = App::with_theme(Box::new(source), store, aquawatch::ui::Theme::dark());
//!
//! tx.send(Reading::baseline(1_000)).unwrap();
//! app.reload_data();
//! assert_eq!(app.store().history().len(), 1);
//! ```
//!
//! ### Running the simulator
//!
//! ```
//! use std::time::Duration;
//! use aquawatch::{Reading, ReadingSource, SimulatedSource};
//!
//! # tokio_test::block_on(async {
//! let mut source =
//!     SimulatedSource::spawn(Duration::from_millis(10), Some(7), Reading::baseline(0));
//! tokio::time::sleep(Duration::from_millis(25)).await;
//! assert!(source.poll().is_some());
//! source.stop();
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::AppConfig;
pub use data::{
    classify, AquariumSettings, AquariumStore, FilterCategory, FilterMedium, Fish, History,
    MaintenanceStatus, MaintenanceTier, Parameter, Reading, Report, ReportBucket, SafetyTier,
};
pub use error::{Error, Result};
pub use source::{ChannelSource, ReadingSource, SimulatedSource, Simulator};
