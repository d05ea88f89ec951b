//! VDOT estimation and training paces
//!
//! Uses the Daniels-Gilbert equations. A race result gives the velocity the runner
//! held (m/min), the oxygen cost of that velocity, and the fraction of VO2max that
//! can be sustained for the race duration; their ratio is the VDOT.
//!
//! Training paces run the cost equation backwards: for each zone the target oxygen
//! cost is `vdot * fraction`, and the positive root of
//! `0.000104 v^2 + 0.182258 v - (4.6 + cost) = 0` is the zone velocity.

use crate::duration::Duration;
use crate::error::{RacePaceError, Result};
use crate::pace::Pace;
use crate::units::{convert_pace, DistanceUnit, RaceDistance};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// VDOT derived from one race result, with the intermediate quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VdotEstimate {
    /// VDOT rounded to one decimal
    pub vdot: f64,
    /// Race distance in meters
    pub distance_meters: f64,
    /// Finish time
    pub time: Duration,
    /// Average velocity in meters per minute
    pub velocity_m_per_min: f64,
    /// Oxygen cost of that velocity (ml/kg/min)
    pub vo2_cost: f64,
    /// Fraction of VO2max sustainable for the race duration
    pub fraction_sustained: f64,
}

/// Daniels training intensities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrainingZone {
    #[serde(rename = "Easy (lower)")]
    EasyLower,
    #[serde(rename = "Easy (upper)")]
    EasyUpper,
    Marathon,
    Threshold,
    Interval,
    Repetitions,
}

impl TrainingZone {
    pub const ALL: [TrainingZone; 6] = [
        TrainingZone::EasyLower,
        TrainingZone::EasyUpper,
        TrainingZone::Marathon,
        TrainingZone::Threshold,
        TrainingZone::Interval,
        TrainingZone::Repetitions,
    ];

    /// Fraction of VDOT the zone is run at
    pub fn fraction(&self) -> f64 {
        match self {
            TrainingZone::EasyLower => 0.6304,
            TrainingZone::EasyUpper => 0.7346,
            TrainingZone::Marathon => 0.8251,
            TrainingZone::Threshold => 0.8799,
            TrainingZone::Interval => 0.9743,
            TrainingZone::Repetitions => 1.089,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrainingZone::EasyLower => "Easy (lower)",
            TrainingZone::EasyUpper => "Easy (upper)",
            TrainingZone::Marathon => "Marathon",
            TrainingZone::Threshold => "Threshold",
            TrainingZone::Interval => "Interval",
            TrainingZone::Repetitions => "Repetitions",
        }
    }
}

impl fmt::Display for TrainingZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One pace per training zone, all in the same unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingPaceSet {
    pub vdot: f64,
    pub unit: DistanceUnit,
    pub paces: BTreeMap<TrainingZone, Pace>,
}

impl TrainingPaceSet {
    pub fn get(&self, zone: TrainingZone) -> Option<Pace> {
        self.paces.get(&zone).copied()
    }

    /// Zones from easiest to hardest
    pub fn iter(&self) -> impl Iterator<Item = (TrainingZone, Pace)> + '_ {
        self.paces.iter().map(|(zone, pace)| (*zone, *pace))
    }

    /// The same set re-expressed in another unit
    pub fn in_unit(&self, unit: DistanceUnit) -> Result<TrainingPaceSet> {
        let paces = self
            .paces
            .iter()
            .map(|(zone, pace)| Ok((*zone, convert_pace(*pace, unit)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(TrainingPaceSet {
            vdot: self.vdot,
            unit,
            paces,
        })
    }
}

/// VDOT calculator
pub struct VdotCalculator;

impl VdotCalculator {
    /// Estimate VDOT from a race result
    pub fn estimate(distance_meters: f64, time: Duration) -> Result<VdotEstimate> {
        if !distance_meters.is_finite() || distance_meters <= 0.0 {
            return Err(RacePaceError::invalid_input(
                "vdot",
                "distance_meters",
                distance_meters,
            ));
        }
        if time.as_secs() == 0 {
            return Err(RacePaceError::invalid_input("vdot", "time", time));
        }

        let t = time.as_minutes_f64();
        let v = distance_meters / t;

        let vo2_cost = -4.6 + 0.182258 * v + 0.000104 * v.powi(2);
        let fraction_sustained =
            0.8 + 0.1894393 * (-0.012778 * t).exp() + 0.2989558 * (-0.1932605 * t).exp();
        let vdot = round_to_tenth(vo2_cost / fraction_sustained);

        Ok(VdotEstimate {
            vdot,
            distance_meters,
            time,
            velocity_m_per_min: v,
            vo2_cost,
            fraction_sustained,
        })
    }

    /// VDOT value only
    pub fn vdot(distance_meters: f64, time: Duration) -> Result<f64> {
        Ok(Self::estimate(distance_meters, time)?.vdot)
    }

    /// Estimate VDOT for one of the standard race distances
    pub fn estimate_race(race: RaceDistance, time: Duration) -> Result<VdotEstimate> {
        Self::estimate(race.meters(), time)
    }

    /// Velocity in m/min whose oxygen cost is `vdot * fraction`
    pub fn velocity_at(vdot: f64, fraction: f64) -> Result<f64> {
        if !vdot.is_finite() || vdot <= 0.0 {
            return Err(RacePaceError::invalid_input("training pace", "vdot", vdot));
        }

        let cost = vdot * fraction;
        let radicand = 0.033218 - 0.000416 * (-4.6 - cost);
        if !radicand.is_finite() || radicand < 0.0 {
            return Err(RacePaceError::invalid_input(
                "training pace",
                "radicand",
                radicand,
            ));
        }

        let velocity = (-0.182258 + radicand.sqrt()) / 0.000208;
        if velocity <= 0.0 {
            return Err(RacePaceError::invalid_input(
                "training pace",
                "velocity",
                velocity,
            ));
        }
        Ok(velocity)
    }

    /// Per-kilometre pace for every training zone
    pub fn training_paces(vdot: f64) -> Result<TrainingPaceSet> {
        let paces = TrainingZone::ALL
            .iter()
            .map(|zone| {
                let velocity = Self::velocity_at(vdot, zone.fraction())?;
                let minutes_per_km = 1000.0 / velocity;
                let time = Duration::from_secs_f64(minutes_per_km * 60.0)?;
                Ok((*zone, Pace::new(time, DistanceUnit::Km)))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(TrainingPaceSet {
            vdot,
            unit: DistanceUnit::Km,
            paces,
        })
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
