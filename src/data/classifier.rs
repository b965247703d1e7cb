//! Safety classification of water-quality parameters.
//!
//! Each parameter maps a value to a [`SafetyTier`] with its own fixed
//! threshold rule. Tiers are ordered for display (worst-first sorting, the
//! header indicator) but carry no cross-parameter meaning.

use super::reading::{Parameter, Reading};

/// Safety classification for a single parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SafetyTier {
    Safe,
    Warning,
    Danger,
}

impl SafetyTier {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            SafetyTier::Safe => "OK",
            SafetyTier::Warning => "WARN",
            SafetyTier::Danger => "DANGER",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SafetyTier::Safe => "Safe",
            SafetyTier::Warning => "Warning",
            SafetyTier::Danger => "Danger",
        }
    }
}

/// Static display configuration for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterConfig {
    pub label: &'static str,
    pub unit: &'static str,
    /// Advice shown when the parameter is not in its safe range.
    pub recommendation: &'static str,
}

impl Parameter {
    /// Label, unit and recommendation for this parameter.
    pub fn config(&self) -> ParameterConfig {
        match self {
            Parameter::Temperature => ParameterConfig {
                label: "Temperature",
                unit: "°C",
                recommendation: "Check the heater, or add a fan for cooling. The ideal range is 24-27°C.",
            },
            Parameter::Ph => ParameterConfig {
                label: "pH Level",
                unit: "",
                recommendation: "Use pH up/down solutions or do a partial water change. Mangrove roots can lower pH.",
            },
            Parameter::Ammonia => ParameterConfig {
                label: "Ammonia (NH3)",
                unit: "ppm",
                recommendation: "Change 25-50% of the water immediately. Use an ammonia remover and feed less.",
            },
            Parameter::Nitrite => ParameterConfig {
                label: "Nitrite (NO2)",
                unit: "ppm",
                recommendation: "Change 25-50% of the water immediately. Aquarium salt can prevent nitrite poisoning.",
            },
            Parameter::Nitrate => ParameterConfig {
                label: "Nitrate (NO3)",
                unit: "ppm",
                recommendation: "Do a partial water change. Live plants or nitrate-removing media help.",
            },
        }
    }
}

/// Classify a value for the given parameter.
///
/// Safe bounds are inclusive; danger bounds are strict. The function is
/// total: negative values fall through the same rules and NaN is `Danger`.
pub fn classify(parameter: Parameter, value: f64) -> SafetyTier {
    if value.is_nan() {
        return SafetyTier::Danger;
    }

    match parameter {
        Parameter::Temperature => banded(value, (24.0, 27.0), (22.0, 29.0)),
        Parameter::Ph => banded(value, (6.8, 7.8), (6.5, 8.2)),
        Parameter::Ammonia | Parameter::Nitrite => ceiling(value, 0.25, 0.5),
        Parameter::Nitrate => ceiling(value, 20.0, 40.0),
    }
}

/// Two-sided rule: safe inside `safe`, danger outside `limits`.
fn banded(value: f64, safe: (f64, f64), limits: (f64, f64)) -> SafetyTier {
    if value >= safe.0 && value <= safe.1 {
        SafetyTier::Safe
    } else if value < limits.0 || value > limits.1 {
        SafetyTier::Danger
    } else {
        SafetyTier::Warning
    }
}

/// One-sided rule: safe at or below `safe_max`, danger above `danger_above`.
fn ceiling(value: f64, safe_max: f64, danger_above: f64) -> SafetyTier {
    if value <= safe_max {
        SafetyTier::Safe
    } else if value > danger_above {
        SafetyTier::Danger
    } else {
        SafetyTier::Warning
    }
}

/// Classified value of one parameter of a reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterStatus {
    pub parameter: Parameter,
    pub value: f64,
    pub tier: SafetyTier,
}

impl ParameterStatus {
    /// The recommendation to show, if the parameter is not safe.
    pub fn recommendation(&self) -> Option<&'static str> {
        (self.tier != SafetyTier::Safe).then(|| self.parameter.config().recommendation)
    }
}

/// Classify every parameter of a reading, in display order.
pub fn evaluate(reading: &Reading) -> Vec<ParameterStatus> {
    Parameter::ALL
        .iter()
        .map(|&parameter| {
            let value = reading.value(parameter);
            ParameterStatus {
                parameter,
                value,
                tier: classify(parameter, value),
            }
        })
        .collect()
}

/// Parameters currently in the danger tier.
pub fn alarms(reading: &Reading) -> Vec<ParameterStatus> {
    evaluate(reading).into_iter().filter(|s| s.tier == SafetyTier::Danger).collect()
}

/// Worst tier across all parameters of a reading.
pub fn overall(reading: &Reading) -> SafetyTier {
    evaluate(reading).iter().map(|s| s.tier).max().unwrap_or(SafetyTier::Safe)
}
