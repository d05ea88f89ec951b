//! Pace, time and distance arithmetic
//!
//! A [`Pace`] is time per unit distance. It is a separate type from an elapsed
//! [`Duration`] so every call site states which of the two it is working with.
//! All results truncate to whole seconds.

use crate::duration::Duration;
use crate::error::{RacePaceError, Result};
use crate::units::{convert_distance, Distance, DistanceUnit, MI_PER_KM};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marathon distance in kilometres
pub const MARATHON_KM: f64 = 42.195;

/// Marathon distance in miles, as used for goal-pace derivation
pub const MARATHON_MI: f64 = 26.2188;

/// Time needed to cover one unit of distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
    /// Time per unit
    pub time: Duration,
    /// Unit the pace is expressed in
    pub unit: DistanceUnit,
}

impl Pace {
    pub fn new(time: Duration, unit: DistanceUnit) -> Self {
        Self { time, unit }
    }

    /// Parse a pace such as `"6:30"` in the given unit
    pub fn parse(text: &str, unit: DistanceUnit) -> Result<Self> {
        Ok(Self::new(Duration::parse(text)?, unit))
    }

    pub fn seconds(&self) -> u64 {
        self.time.as_secs()
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.time, self.unit)
    }
}

/// Pace = time / distance
pub fn get_pace(time: Duration, distance: Distance) -> Result<Pace> {
    if !distance.value.is_finite() || distance.value <= 0.0 {
        return Err(RacePaceError::invalid_input("pace", "distance", distance.value));
    }
    let seconds = Duration::from_secs_f64(time.as_secs_f64() / distance.value)?;
    Ok(Pace::new(seconds, distance.unit))
}

/// Time = pace * distance. The distance is first expressed in the pace's unit.
pub fn get_time(pace: Pace, distance: Distance) -> Result<Duration> {
    if !distance.value.is_finite() || distance.value < 0.0 {
        return Err(RacePaceError::invalid_input("time", "distance", distance.value));
    }
    let distance = convert_distance(distance, pace.unit);
    Duration::from_secs_f64(pace.time.as_secs_f64() * distance.value)
}

/// Multiply a pace by a non-negative factor
pub fn scale_pace(pace: Pace, factor: f64) -> Result<Pace> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(RacePaceError::invalid_input("scale pace", "factor", factor));
    }
    let time = Duration::from_secs_f64(pace.time.as_secs_f64() * factor)?;
    Ok(Pace::new(time, pace.unit))
}

/// How much slower `slower` is than `faster`, per unit distance
pub fn difference_pace(slower: Pace, faster: Pace) -> Result<Pace> {
    ensure_same_unit("difference pace", slower, faster)?;
    let secs = slower.seconds() as i64 - faster.seconds() as i64;
    if secs < 0 {
        return Err(RacePaceError::invalid_input(
            "difference pace",
            "faster",
            faster.time,
        ));
    }
    Ok(Pace::new(Duration::from_signed_secs(secs)?, slower.unit))
}

/// Add two paces in the same unit
pub fn sum_pace(a: Pace, b: Pace) -> Result<Pace> {
    ensure_same_unit("sum pace", a, b)?;
    let secs = a
        .seconds()
        .checked_add(b.seconds())
        .ok_or_else(|| RacePaceError::invalid_input("sum pace", "result", b.time))?;
    Ok(Pace::new(Duration::from_secs(secs), a.unit))
}

fn ensure_same_unit(calculation: &str, a: Pace, b: Pace) -> Result<()> {
    if a.unit != b.unit {
        return Err(RacePaceError::invalid_input(
            calculation,
            "unit",
            format!("{} vs {}", a.unit, b.unit),
        ));
    }
    Ok(())
}

/// Average pace for a race finished in `finish_time` over `distance` units
pub fn race_pace(finish_time: Duration, distance: f64, unit: DistanceUnit) -> Result<Pace> {
    get_pace(finish_time, Distance::new(distance, unit))
}

/// Finish time for a race of `distance_meters` run at `pace`.
///
/// A per-mile pace scales the metre distance by [`MI_PER_KM`] before the division
/// by 1000.
pub fn race_time(pace: Pace, distance_meters: f64) -> Result<Duration> {
    if !distance_meters.is_finite() || distance_meters <= 0.0 {
        return Err(RacePaceError::invalid_input(
            "race time",
            "distance_meters",
            distance_meters,
        ));
    }
    let distance = match pace.unit {
        DistanceUnit::Mi => distance_meters * MI_PER_KM,
        DistanceUnit::Km => distance_meters,
    };
    get_time(pace, Distance::new(distance / 1000.0, pace.unit))
}

/// Goal marathon pace from a goal finish time
pub fn marathon_pace(finish_time: Duration, unit: DistanceUnit) -> Result<Pace> {
    let distance = match unit {
        DistanceUnit::Km => MARATHON_KM,
        DistanceUnit::Mi => MARATHON_MI,
    };
    race_pace(finish_time, distance, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn km(secs: u64) -> Pace {
        Pace::new(Duration::from_secs(secs), DistanceUnit::Km)
    }

    #[test]
    fn test_get_pace() {
        let pace = get_pace(Duration::from_secs(1200), Distance::mi(3.0)).unwrap();
        assert_eq!(pace.time.format(), "6:40");
        assert_eq!(pace.unit, DistanceUnit::Mi);
        assert_eq!(pace.to_string(), "6:40/mi");

        // Sub-second remainder is dropped
        let pace = get_pace(Duration::from_secs(1000), Distance::km(3.0)).unwrap();
        assert_eq!(pace.seconds(), 333);
    }

    #[test]
    fn test_get_pace_rejects_non_positive_distance() {
        assert!(get_pace(Duration::from_secs(1200), Distance::km(0.0)).is_err());
        assert!(get_pace(Duration::from_secs(1200), Distance::km(-5.0)).is_err());
        assert!(get_pace(Duration::from_secs(1200), Distance::km(f64::NAN)).is_err());
    }

    #[test]
    fn test_results_too_large_are_errors() {
        assert!(matches!(
            get_pace(Duration::from_secs(3600), Distance::km(1e-300)),
            Err(RacePaceError::InvalidInput { .. })
        ));
        assert!(matches!(
            scale_pace(km(3600), 1e300),
            Err(RacePaceError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_ultra_distance_time_round_trips() {
        let time = get_time(km(900), Distance::km(100.0)).unwrap();
        assert_eq!(time.format(), "25:00:00");
        assert_eq!(Duration::parse(&time.format()).unwrap(), time);
    }

    #[test]
    fn test_get_time() {
        let time = get_time(km(300), Distance::km(10.0)).unwrap();
        assert_eq!(time.format(), "50:00");

        // Miles are converted into the pace's unit first: 10 * 1.609 km
        let time = get_time(km(240), Distance::mi(10.0)).unwrap();
        assert_eq!(time.format(), "1:04:21");
    }

    #[test]
    fn test_named_pace_arithmetic() {
        assert_eq!(scale_pace(km(400), 1.5).unwrap().seconds(), 600);
        assert!(scale_pace(km(400), -1.0).is_err());

        assert_eq!(difference_pace(km(400), km(360)).unwrap().seconds(), 40);
        assert!(difference_pace(km(360), km(400)).is_err());

        assert_eq!(sum_pace(km(300), km(15)).unwrap().seconds(), 315);
        let mile = Pace::new(Duration::from_secs(15), DistanceUnit::Mi);
        assert!(sum_pace(km(300), mile).is_err());
        assert!(matches!(
            sum_pace(km(u64::MAX), km(1)),
            Err(RacePaceError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_race_helpers() {
        let pace = race_pace(Duration::from_secs(1200), 3.0, DistanceUnit::Mi).unwrap();
        assert_eq!(pace.time.format(), "6:40");

        // 6:30/mi over 5000 m: 390 * 5000 * 0.621 / 1000 = 1210.95 s
        let mile_pace = Pace::parse("6:30", DistanceUnit::Mi).unwrap();
        assert_eq!(race_time(mile_pace, 5000.0).unwrap().format(), "20:10");
        assert_eq!(race_time(km(300), 10000.0).unwrap().format(), "50:00");
        assert!(race_time(km(300), 0.0).is_err());

        let goal = Duration::parse("3:30:00").unwrap();
        assert_eq!(marathon_pace(goal, DistanceUnit::Km).unwrap().time.format(), "4:58");
        assert_eq!(marathon_pace(goal, DistanceUnit::Mi).unwrap().time.format(), "8:00");
    }
}
