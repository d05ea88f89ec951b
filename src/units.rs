//! Kilometre/mile conversion for distances and paces
//!
//! The factors are the rounded approximations 0.621 mi/km and 1.609 km/mi. They are
//! not exact reciprocals of each other and must stay that way: published pace
//! tables were produced with these literals.

use crate::duration::Duration;
use crate::error::{RacePaceError, Result};
use crate::pace::Pace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Miles in one kilometre
pub const MI_PER_KM: f64 = 0.621;

/// Kilometres in one mile
pub const KM_PER_MI: f64 = 1.609;

/// Distance unit a pace or distance is expressed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Mi,
}

impl DistanceUnit {
    pub fn label(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Mi => "mi",
        }
    }

    pub fn other(&self) -> DistanceUnit {
        match self {
            DistanceUnit::Km => DistanceUnit::Mi,
            DistanceUnit::Mi => DistanceUnit::Km,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" => Ok(DistanceUnit::Km),
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Mi),
            _ => Err(format!("Invalid distance unit: {} (expected km or mi)", s)),
        }
    }
}

/// A distance tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }

    pub fn km(value: f64) -> Self {
        Self::new(value, DistanceUnit::Km)
    }

    pub fn mi(value: f64) -> Self {
        Self::new(value, DistanceUnit::Mi)
    }

    /// Express this distance in `unit`
    pub fn to_unit(&self, unit: DistanceUnit) -> Distance {
        convert_distance(*self, unit)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Convert a distance into the target unit.
///
/// Keyed on the target: converting to km multiplies by [`KM_PER_MI`], converting to
/// mi multiplies by [`MI_PER_KM`].
pub fn convert_distance(distance: Distance, to: DistanceUnit) -> Distance {
    if distance.unit == to {
        return distance;
    }
    let value = match to {
        DistanceUnit::Km => distance.value * KM_PER_MI,
        DistanceUnit::Mi => distance.value * MI_PER_KM,
    };
    Distance::new(value, to)
}

/// Time per kilometre to time per mile
pub fn pace_to_miles(per_km: Duration) -> Result<Duration> {
    Duration::from_secs_f64(per_km.as_secs_f64() / MI_PER_KM)
}

/// Time per mile to time per kilometre
pub fn pace_to_km(per_mile: Duration) -> Result<Duration> {
    Duration::from_secs_f64(per_mile.as_secs_f64() / KM_PER_MI)
}

/// Re-express a pace in another unit. Same-unit conversion is the identity.
pub fn convert_pace(pace: Pace, to: DistanceUnit) -> Result<Pace> {
    if pace.unit == to {
        return Ok(pace);
    }
    let time = match to {
        DistanceUnit::Mi => pace_to_miles(pace.time)?,
        DistanceUnit::Km => pace_to_km(pace.time)?,
    };
    Ok(Pace::new(time, to))
}

/// Standard race distances offered by the calculators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceDistance {
    #[serde(rename = "800M")]
    M800,
    #[serde(rename = "1600M")]
    M1600,
    #[serde(rename = "5K")]
    FiveK,
    #[serde(rename = "10K")]
    TenK,
    #[serde(rename = "Half Marathon")]
    HalfMarathon,
    #[serde(rename = "Marathon")]
    Marathon,
}

impl RaceDistance {
    pub const ALL: [RaceDistance; 6] = [
        RaceDistance::M800,
        RaceDistance::M1600,
        RaceDistance::FiveK,
        RaceDistance::TenK,
        RaceDistance::HalfMarathon,
        RaceDistance::Marathon,
    ];

    pub fn meters(&self) -> f64 {
        match self {
            RaceDistance::M800 => 800.0,
            RaceDistance::M1600 => 1600.0,
            RaceDistance::FiveK => 5000.0,
            RaceDistance::TenK => 10000.0,
            RaceDistance::HalfMarathon => 21097.5,
            RaceDistance::Marathon => 42195.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RaceDistance::M800 => "800M",
            RaceDistance::M1600 => "1600M",
            RaceDistance::FiveK => "5K",
            RaceDistance::TenK => "10K",
            RaceDistance::HalfMarathon => "Half Marathon",
            RaceDistance::Marathon => "Marathon",
        }
    }
}

impl fmt::Display for RaceDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RaceDistance {
    type Err = RacePaceError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "800m" | "800" => Ok(RaceDistance::M800),
            "1600m" | "1600" => Ok(RaceDistance::M1600),
            "5k" => Ok(RaceDistance::FiveK),
            "10k" => Ok(RaceDistance::TenK),
            "halfmarathon" | "half" | "hm" => Ok(RaceDistance::HalfMarathon),
            "marathon" | "full" => Ok(RaceDistance::Marathon),
            _ => Err(RacePaceError::invalid_input("race distance", "race", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_conversion_uses_rounded_factors() {
        // 6:00/km divided by 0.621
        let per_mile = pace_to_miles(Duration::from_secs(360)).unwrap();
        assert_eq!(per_mile.format(), "9:39");

        // 6:00/mi divided by 1.609
        let per_km = pace_to_km(Duration::from_secs(360)).unwrap();
        assert_eq!(per_km.format(), "3:43");
    }

    #[test]
    fn test_convert_pace_between_units() {
        let pace = Pace::new(Duration::from_secs(600), DistanceUnit::Km);
        let converted = convert_pace(pace, DistanceUnit::Mi).unwrap();
        assert_eq!(converted.unit, DistanceUnit::Mi);
        assert_eq!(converted.time.format(), "16:06");

        let same = convert_pace(pace, DistanceUnit::Km).unwrap();
        assert_eq!(same, pace);
    }

    #[test]
    fn test_convert_distance() {
        let km = convert_distance(Distance::mi(10.0), DistanceUnit::Km);
        assert_eq!(km.unit, DistanceUnit::Km);
        assert!((km.value - 16.09).abs() < 1e-9);

        let mi = Distance::km(10.0).to_unit(DistanceUnit::Mi);
        assert!((mi.value - 6.21).abs() < 1e-9);

        let unchanged = Distance::km(5.0).to_unit(DistanceUnit::Km);
        assert_eq!(unchanged.value, 5.0);
    }

    #[test]
    fn test_distance_unit_parsing() {
        assert_eq!("km".parse::<DistanceUnit>().unwrap(), DistanceUnit::Km);
        assert_eq!("Miles".parse::<DistanceUnit>().unwrap(), DistanceUnit::Mi);
        assert!("furlong".parse::<DistanceUnit>().is_err());
        assert_eq!(DistanceUnit::Mi.to_string(), "mi");
        assert_eq!(DistanceUnit::Mi.other(), DistanceUnit::Km);
    }

    #[test]
    fn test_race_distances() {
        assert_eq!("5K".parse::<RaceDistance>().unwrap().meters(), 5000.0);
        assert_eq!(
            "Half Marathon".parse::<RaceDistance>().unwrap(),
            RaceDistance::HalfMarathon
        );
        assert_eq!("800m".parse::<RaceDistance>().unwrap(), RaceDistance::M800);
        assert!("ultra".parse::<RaceDistance>().is_err());
        assert_eq!(RaceDistance::ALL.len(), 6);
        assert_eq!(RaceDistance::Marathon.meters(), 42195.0);
    }
}
