//! Reading source abstraction.
//!
//! The dashboard pulls new readings from a [`ReadingSource`] on every pass
//! of its event loop. Producers push readings from a background task; the
//! source hands them over without blocking.

mod channel;
mod simulator;

pub use channel::ChannelSource;
pub use simulator::{SimulatedSource, Simulator, DEFAULT_TICK};

use std::fmt::Debug;

use crate::data::Reading;

/// Trait for receiving readings from a producer.
///
/// # Example
///
/// ```
/// use aquawatch::{ChannelSource, Reading, ReadingSource};
///
/// let (tx, mut source) = ChannelSource::create("test bench");
/// tx.send(Reading::baseline(0)).unwrap();
/// assert!(source.poll().is_some());
/// ```
pub trait ReadingSource: Send + Debug {
    /// Take the next pending reading, if any.
    ///
    /// This method must not block.
    fn poll(&mut self) -> Option<Reading>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns the error message if the source has stopped producing.
    fn error(&self) -> Option<&str>;

    /// Stop any background producer owned by this source.
    ///
    /// Readings already received stay pollable. The default does nothing.
    fn stop(&mut self) {}
}
