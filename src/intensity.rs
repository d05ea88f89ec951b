//! Training intensity as a percentage of a reference pace
//!
//! Two models are supported and they only agree at 100%:
//! - percentage of speed: speed scales linearly, so time per distance scales as 1/p
//! - percentage of pace: the pace itself moves by a constant step per percentage
//!   point, symmetric about 100%
//!
//! Results are rounded to the nearest second, ties away from zero.

use crate::duration::Duration;
use crate::error::{RacePaceError, Result};
use crate::pace::Pace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which percentage model to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityModel {
    /// Linear in pace
    #[default]
    Pace,
    /// Linear in speed
    Speed,
}

impl fmt::Display for IntensityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntensityModel::Pace => f.write_str("pace"),
            IntensityModel::Speed => f.write_str("speed"),
        }
    }
}

impl FromStr for IntensityModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pace" => Ok(IntensityModel::Pace),
            "speed" => Ok(IntensityModel::Speed),
            _ => Err(format!("Invalid intensity model: {} (expected pace or speed)", s)),
        }
    }
}

/// One row of the workout designation table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkoutDesignation {
    /// Percentage of race pace
    pub percent: u32,
    /// Name of the training stimulus
    pub designation: &'static str,
}

/// Workout intensities relative to race pace, slowest first
pub const WORKOUT_DESIGNATIONS: [WorkoutDesignation; 8] = [
    WorkoutDesignation { percent: 80, designation: "Basic Endurance" },
    WorkoutDesignation { percent: 85, designation: "General Endurance" },
    WorkoutDesignation { percent: 90, designation: "Race-supportive Endurance" },
    WorkoutDesignation { percent: 95, designation: "Race-specific Endurance" },
    WorkoutDesignation { percent: 100, designation: "Race Pace" },
    WorkoutDesignation { percent: 105, designation: "Race-specific Speed" },
    WorkoutDesignation { percent: 110, designation: "Race-supportive Speed" },
    WorkoutDesignation { percent: 115, designation: "General Speed" },
];

/// A designation with the pace it resolves to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutPace {
    pub percent: u32,
    pub designation: &'static str,
    pub pace: Pace,
}

/// Integer percentage (95) to fraction (0.95)
pub fn fraction_from_percent(percent: u32) -> f64 {
    percent as f64 * 0.01
}

fn validate_fraction(calculation: &str, fraction: f64) -> Result<()> {
    if !fraction.is_finite() || fraction <= 0.0 {
        return Err(RacePaceError::invalid_input(calculation, "fraction", fraction));
    }
    Ok(())
}

fn rounded(calculation: &str, seconds: f64) -> Result<Duration> {
    let seconds = seconds.round();
    if seconds < 0.0 {
        return Err(RacePaceError::invalid_input(calculation, "result", seconds));
    }
    Duration::from_secs_f64(seconds)
}

/// new = round(pace / p)
pub fn percentage_of_speed(pace: Pace, fraction: f64) -> Result<Pace> {
    validate_fraction("percentage of speed", fraction)?;
    let time = rounded("percentage of speed", pace.time.as_secs_f64() / fraction)?;
    Ok(Pace::new(time, pace.unit))
}

/// new = round(pace * (2 - p))
pub fn percentage_of_pace(pace: Pace, fraction: f64) -> Result<Pace> {
    validate_fraction("percentage of pace", fraction)?;
    let time = rounded(
        "percentage of pace",
        pace.time.as_secs_f64() * (2.0 - fraction),
    )?;
    Ok(Pace::new(time, pace.unit))
}

/// Apply the selected model
pub fn scale(model: IntensityModel, pace: Pace, fraction: f64) -> Result<Pace> {
    match model {
        IntensityModel::Pace => percentage_of_pace(pace, fraction),
        IntensityModel::Speed => percentage_of_speed(pace, fraction),
    }
}

/// Resolve every row of [`WORKOUT_DESIGNATIONS`] against a race pace
pub fn workout_paces(race_pace: Pace, model: IntensityModel) -> Result<Vec<WorkoutPace>> {
    WORKOUT_DESIGNATIONS
        .iter()
        .map(|row| {
            let pace = scale(model, race_pace, fraction_from_percent(row.percent))?;
            Ok(WorkoutPace {
                percent: row.percent,
                designation: row.designation,
                pace,
            })
        })
        .collect()
}
