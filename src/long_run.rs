//! Progressive long-run pace targets (Pfitzinger method)
//!
//! The run starts 20% slower than goal marathon pace and closes in on 10% slower,
//! both measured with the percentage-of-pace model. Each unit of distance gets a
//! target window of +/- 2 seconds around its center.
//!
//! The step between units is the integer floor of the spread divided by the run
//! length, so the final center usually stops short of the 10% bound.

use crate::duration::Duration;
use crate::error::{RacePaceError, Result};
use crate::intensity::percentage_of_pace;
use crate::pace::Pace;
use crate::units::{convert_pace, DistanceUnit};
use serde::Serialize;
use std::fmt;

/// Fraction of marathon pace the run opens at
pub const OPENING_FRACTION: f64 = 0.8;

/// Fraction of marathon pace the run closes toward
pub const CLOSING_FRACTION: f64 = 0.9;

/// Half-width of each target window in seconds
pub const WINDOW_HALF_WIDTH_SECS: i64 = 2;

/// Target window for one unit of the long run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongRunStep {
    /// 1-based unit index (mile 1, mile 2, ...)
    pub index: u32,
    pub unit: DistanceUnit,
    /// Faster end of the window
    pub low_target: Duration,
    /// Slower end of the window
    pub high_target: Duration,
}

impl LongRunStep {
    /// Middle of the window
    pub fn center(&self) -> Duration {
        Duration::from_secs((self.low_target.as_secs() + self.high_target.as_secs()) / 2)
    }

    pub fn target_pace(&self) -> String {
        format!("{} to {}", self.low_target, self.high_target)
    }
}

impl fmt::Display for LongRunStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.unit, self.index, self.target_pace())
    }
}

/// Long-run ladder generation
pub struct LongRunPlanner;

impl LongRunPlanner {
    /// Build the per-unit target windows for a long run of `length` units.
    ///
    /// The marathon pace is re-expressed in `unit` first if it was given in the
    /// other unit.
    pub fn ladder(length: u32, unit: DistanceUnit, marathon_pace: Pace) -> Result<Vec<LongRunStep>> {
        if length == 0 {
            return Err(RacePaceError::invalid_input("long run ladder", "length", length));
        }

        let marathon_pace = convert_pace(marathon_pace, unit)?;
        let mut center = percentage_of_pace(marathon_pace, OPENING_FRACTION)?.seconds() as i64;
        let closing = percentage_of_pace(marathon_pace, CLOSING_FRACTION)?.seconds() as i64;
        let step = (center - closing).div_euclid(i64::from(length));

        (1..=length)
            .map(|index| {
                center -= step;
                Ok(LongRunStep {
                    index,
                    unit,
                    low_target: window_bound(center - WINDOW_HALF_WIDTH_SECS)?,
                    high_target: window_bound(center + WINDOW_HALF_WIDTH_SECS)?,
                })
            })
            .collect()
    }
}

fn window_bound(secs: i64) -> Result<Duration> {
    Duration::from_signed_secs(secs)
        .map_err(|_| RacePaceError::invalid_input("long run ladder", "target window", secs))
}
