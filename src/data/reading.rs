//! Water-quality readings and the parameters they carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One water-quality sample.
///
/// Readings are immutable once created. The nitrogen compounds (ammonia,
/// nitrite, nitrate) are never negative; [`Reading::new`] clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Sample time in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// Water temperature in °C.
    pub temperature: f64,
    pub ph: f64,
    /// Ammonia (NH3) in ppm.
    pub ammonia: f64,
    /// Nitrite (NO2) in ppm.
    pub nitrite: f64,
    /// Nitrate (NO3) in ppm.
    pub nitrate: f64,
}

impl Reading {
    /// Build a reading, clamping ammonia, nitrite and nitrate to zero or above.
    pub fn new(
        timestamp_ms: i64,
        temperature: f64,
        ph: f64,
        ammonia: f64,
        nitrite: f64,
        nitrate: f64,
    ) -> Self {
        Self {
            timestamp_ms,
            temperature,
            ph,
            ammonia: ammonia.max(0.0),
            nitrite: nitrite.max(0.0),
            nitrate: nitrate.max(0.0),
        }
    }

    /// The baseline reading a fresh session starts from.
    pub fn baseline(timestamp_ms: i64) -> Self {
        Self::new(timestamp_ms, 25.0, 7.2, 0.1, 0.05, 10.0)
    }

    /// Value of a single parameter.
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::Ph => self.ph,
            Parameter::Ammonia => self.ammonia,
            Parameter::Nitrite => self.nitrite,
            Parameter::Nitrate => self.nitrate,
        }
    }
}

/// One of the measured fields of a [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Temperature,
    Ph,
    Ammonia,
    Nitrite,
    Nitrate,
}

impl Parameter {
    /// All parameters in display order.
    pub const ALL: [Parameter; 5] = [
        Parameter::Temperature,
        Parameter::Ph,
        Parameter::Ammonia,
        Parameter::Nitrite,
        Parameter::Nitrate,
    ];

    /// Stable lowercase key, matching the serialized field name.
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::Temperature => "temperature",
            Parameter::Ph => "ph",
            Parameter::Ammonia => "ammonia",
            Parameter::Nitrite => "nitrite",
            Parameter::Nitrate => "nitrate",
        }
    }

    /// Cycle to the next parameter.
    pub fn next(self) -> Self {
        match self {
            Parameter::Temperature => Parameter::Ph,
            Parameter::Ph => Parameter::Ammonia,
            Parameter::Ammonia => Parameter::Nitrite,
            Parameter::Nitrite => Parameter::Nitrate,
            Parameter::Nitrate => Parameter::Temperature,
        }
    }

    /// Cycle to the previous parameter.
    pub fn prev(self) -> Self {
        match self {
            Parameter::Temperature => Parameter::Nitrate,
            Parameter::Ph => Parameter::Temperature,
            Parameter::Ammonia => Parameter::Ph,
            Parameter::Nitrite => Parameter::Ammonia,
            Parameter::Nitrate => Parameter::Nitrite,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Parameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Parameter::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| Error::UnknownParameter(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_nitrogen_compounds() {
        let r = Reading::new(0, -1.0, -0.5, -0.2, -0.01, -3.0);
        assert_eq!(r.ammonia, 0.0);
        assert_eq!(r.nitrite, 0.0);
        assert_eq!(r.nitrate, 0.0);
        // Temperature and pH are not clamped
        assert_eq!(r.temperature, -1.0);
        assert_eq!(r.ph, -0.5);
    }

    #[test]
    fn value_dispatches_by_parameter() {
        let r = Reading::new(1, 25.0, 7.2, 0.1, 0.05, 10.0);
        assert_eq!(r.value(Parameter::Temperature), 25.0);
        assert_eq!(r.value(Parameter::Ph), 7.2);
        assert_eq!(r.value(Parameter::Ammonia), 0.1);
        assert_eq!(r.value(Parameter::Nitrite), 0.05);
        assert_eq!(r.value(Parameter::Nitrate), 10.0);
    }

    #[test]
    fn parameter_parses_keys_case_insensitively() {
        assert_eq!("pH".parse::<Parameter>().unwrap(), Parameter::Ph);
        assert_eq!(" nitrate ".parse::<Parameter>().unwrap(), Parameter::Nitrate);
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let err = "salinity".parse::<Parameter>().unwrap_err();
        assert_eq!(err, Error::UnknownParameter("salinity".to_string()));
    }

    #[test]
    fn next_and_prev_cycle_through_all() {
        let mut p = Parameter::Temperature;
        for _ in 0..Parameter::ALL.len() {
            p = p.next();
        }
        assert_eq!(p, Parameter::Temperature);
        assert_eq!(Parameter::Temperature.prev(), Parameter::Nitrate);
    }

    #[test]
    fn reading_serializes_with_field_names() {
        let r = Reading::baseline(42);
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["timestamp_ms"], 42);
        assert_eq!(json["ph"], 7.2);
    }
}
