//! The parameter vector driving a filter pass, and the input ranges of the
//! controls that produce it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dimension::Dimension;
use crate::error::{Error, Result};

/// Tempo tolerance in BPM applied when none is configured.
pub const DEFAULT_TEMPO_TOLERANCE: f64 = 5.0;

/// Resolution the stepping helpers snap values to.
const SNAP_SCALE: f64 = 1e6;

/// Target values and tolerances for one filter pass.
///
/// Tempo has its own tolerance in BPM. The five `[0, 1]` dimensions share a
/// single `tolerance`. The engine accepts any finite values here; keeping them
/// inside the control ranges is the job of whoever produces the vector
/// (see [`ParameterVector::validate`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    pub tempo_target: f64,
    pub tempo_tolerance: f64,
    pub tolerance: f64,
    pub danceability_target: f64,
    pub energy_target: f64,
    pub valence_target: f64,
    pub acousticness_target: f64,
    pub instrumentalness_target: f64,
}

impl Default for ParameterVector {
    fn default() -> Self {
        Self {
            tempo_target: Parameter::Tempo.control().default,
            tempo_tolerance: Parameter::TempoTolerance.control().default,
            tolerance: Parameter::Tolerance.control().default,
            danceability_target: Parameter::Danceability.control().default,
            energy_target: Parameter::Energy.control().default,
            valence_target: Parameter::Valence.control().default,
            acousticness_target: Parameter::Acousticness.control().default,
            instrumentalness_target: Parameter::Instrumentalness.control().default,
        }
    }
}

impl ParameterVector {
    /// The target for a dimension.
    #[must_use]
    pub fn target(&self, dimension: Dimension) -> f64 {
        self.get(Parameter::target_of(dimension))
    }

    /// The maximum allowed distance from the target on a dimension.
    #[must_use]
    pub const fn tolerance_for(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Tempo => self.tempo_tolerance,
            _ => self.tolerance,
        }
    }

    #[must_use]
    pub const fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Tempo => self.tempo_target,
            Parameter::Tolerance => self.tolerance,
            Parameter::Danceability => self.danceability_target,
            Parameter::Energy => self.energy_target,
            Parameter::Valence => self.valence_target,
            Parameter::Acousticness => self.acousticness_target,
            Parameter::Instrumentalness => self.instrumentalness_target,
            Parameter::TempoTolerance => self.tempo_tolerance,
        }
    }

    /// Set a parameter verbatim. No range check is applied.
    pub fn set(&mut self, parameter: Parameter, value: f64) {
        let slot = match parameter {
            Parameter::Tempo => &mut self.tempo_target,
            Parameter::Tolerance => &mut self.tolerance,
            Parameter::Danceability => &mut self.danceability_target,
            Parameter::Energy => &mut self.energy_target,
            Parameter::Valence => &mut self.valence_target,
            Parameter::Acousticness => &mut self.acousticness_target,
            Parameter::Instrumentalness => &mut self.instrumentalness_target,
            Parameter::TempoTolerance => &mut self.tempo_tolerance,
        };
        *slot = value;
    }

    #[must_use]
    pub fn with(mut self, parameter: Parameter, value: f64) -> Self {
        self.set(parameter, value);
        self
    }

    /// Move a parameter by whole control steps, staying on the step grid and
    /// inside the control range.
    pub fn step(&mut self, parameter: Parameter, steps: i32) {
        let control = parameter.control();
        let moved = self.get(parameter) + f64::from(steps) * control.step;
        self.set(parameter, control.snap(moved));
    }

    /// Check every parameter is finite and inside its control range.
    pub fn validate(&self) -> Result<()> {
        Parameter::ALL
            .into_iter()
            .try_for_each(|p| p.control().check(p, self.get(p)))
    }
}

/// A tunable entry of the parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Tempo,
    Tolerance,
    Danceability,
    Energy,
    Valence,
    Acousticness,
    Instrumentalness,
    TempoTolerance,
}

impl Parameter {
    /// Every parameter, in display order.
    pub const ALL: [Self; 8] = [
        Self::Tempo,
        Self::Tolerance,
        Self::Danceability,
        Self::Energy,
        Self::Valence,
        Self::Acousticness,
        Self::Instrumentalness,
        Self::TempoTolerance,
    ];

    /// The parameter holding the target for `dimension`.
    #[must_use]
    pub const fn target_of(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Tempo => Self::Tempo,
            Dimension::Danceability => Self::Danceability,
            Dimension::Energy => Self::Energy,
            Dimension::Valence => Self::Valence,
            Dimension::Acousticness => Self::Acousticness,
            Dimension::Instrumentalness => Self::Instrumentalness,
        }
    }

    /// Machine name, matching the CLI flag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tempo => "tempo",
            Self::Tolerance => "tolerance",
            Self::Danceability => "danceability",
            Self::Energy => "energy",
            Self::Valence => "valence",
            Self::Acousticness => "acousticness",
            Self::Instrumentalness => "instrumentalness",
            Self::TempoTolerance => "tempo-tolerance",
        }
    }

    /// Human label for an input control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tempo => "Tempo (BPM)",
            Self::Tolerance => "Tolerance",
            Self::Danceability => "Danceability",
            Self::Energy => "Energy",
            Self::Valence => "Brightness",
            Self::Acousticness => "Acousticness",
            Self::Instrumentalness => "Instrumentalness",
            Self::TempoTolerance => "Tempo tolerance (BPM)",
        }
    }

    /// Input range of the control for this parameter.
    #[must_use]
    pub const fn control(self) -> Control {
        match self {
            Self::Tempo => Control::new(50.0, 200.0, 1.0, 120.0),
            Self::Tolerance => Control::new(0.01, 0.5, 0.01, 0.1),
            Self::TempoTolerance => Control::new(1.0, 50.0, 1.0, DEFAULT_TEMPO_TOLERANCE),
            Self::Danceability
            | Self::Energy
            | Self::Valence
            | Self::Acousticness
            | Self::Instrumentalness => Control::new(0.0, 1.0, 0.01, 0.5),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Range, step and default of an input control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Control {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Control {
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64, default: f64) -> Self {
        Self {
            min,
            max,
            step,
            default,
        }
    }

    /// Clamp into range and round to the nearest step above `min`.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).min(self.max);
        (snapped * SNAP_SCALE).round() / SNAP_SCALE
    }

    /// Position of `value` within the range, as a ratio in `[0, 1]`.
    #[must_use]
    pub fn ratio(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    fn check(&self, parameter: Parameter, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::NonFinite { parameter, value });
        }
        if value < self.min || value > self.max {
            return Err(Error::OutOfRange {
                parameter,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}
