//! Bounded reading history for the trend chart and sparklines.

use std::collections::VecDeque;

use tracing::warn;

use super::reading::{Parameter, Reading};
use crate::error::{Error, Result};

/// Maximum number of readings to keep.
pub const MAX_HISTORY_SIZE: usize = 50;

/// Ordered window over the most recent readings.
///
/// Readings are kept oldest first with non-decreasing timestamps. Once the
/// window is full, each append evicts the oldest reading.
#[derive(Debug, Clone, Default)]
pub struct History {
    readings: VecDeque<Reading>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            readings: VecDeque::with_capacity(MAX_HISTORY_SIZE + 1),
        }
    }

    /// Append a reading, evicting the oldest once over capacity.
    ///
    /// A reading older than the latest one is rejected and the history is
    /// left unchanged.
    pub fn append(&mut self, reading: Reading) -> Result<()> {
        if let Some(last) = self.readings.back() {
            if reading.timestamp_ms < last.timestamp_ms {
                warn!(
                    previous = last.timestamp_ms,
                    got = reading.timestamp_ms,
                    "rejecting out-of-order reading"
                );
                return Err(Error::OutOfOrderReading {
                    previous: last.timestamp_ms,
                    got: reading.timestamp_ms,
                });
            }
        }

        self.readings.push_back(reading);
        if self.readings.len() > MAX_HISTORY_SIZE {
            self.readings.pop_front();
        }
        Ok(())
    }

    /// The most recent reading, if any.
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    /// All readings, oldest first.
    pub fn all(&self) -> Vec<Reading> {
        self.readings.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Values of one parameter, oldest first.
    pub fn series(&self, parameter: Parameter) -> Vec<f64> {
        self.readings.iter().map(|r| r.value(parameter)).collect()
    }

    /// Get sparkline data for a parameter (normalized to 0-7 for 8 bar levels).
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn sparkline(&self, parameter: Parameter) -> Vec<u8> {
        let values = self.series(parameter);
        if values.len() < 2 {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        // Flat series sit in the middle of the glyph range
        if !range.is_finite() || range <= f64::EPSILON {
            return vec![3; values.len()];
        }

        values
            .iter()
            .map(|&v| {
                let normalized = ((v - min) / range * 7.0).round() as u8;
                normalized.min(7)
            })
            .collect()
    }
}
