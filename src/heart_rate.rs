use crate::error::{RacePaceError, Result};
use serde::Serialize;

/// Fixed band of maximum heart rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartRateBand {
    pub zone: u8,
    pub intensity: &'static str,
    pub purpose: &'static str,
    pub low_fraction: f64,
    pub high_fraction: f64,
}

/// Five-zone model based on Maximum Heart Rate:
/// - Z1: 50-60% MaxHR (Very Light: recovery, warm-ups, cool-downs)
/// - Z2: 65-75% MaxHR (Light: fat burning, endurance building)
/// - Z3: 83-87% MaxHR (Moderate: aerobic capacity, stamina)
/// - Z4: 89-94% MaxHR (Hard: speed and performance)
/// - Z5: 95-98% MaxHR (Maximum: peak effort, anaerobic power)
pub const HEART_RATE_BANDS: [HeartRateBand; 5] = [
    HeartRateBand {
        zone: 1,
        intensity: "Very Light",
        purpose: "Recovery, warm-ups, cool-downs",
        low_fraction: 0.50,
        high_fraction: 0.60,
    },
    HeartRateBand {
        zone: 2,
        intensity: "Light",
        purpose: "Fat burning, endurance building",
        low_fraction: 0.65,
        high_fraction: 0.75,
    },
    HeartRateBand {
        zone: 3,
        intensity: "Moderate",
        purpose: "Aerobic capacity, improved stamina",
        low_fraction: 0.83,
        high_fraction: 0.87,
    },
    HeartRateBand {
        zone: 4,
        intensity: "Hard",
        purpose: "Increased speed and performance",
        low_fraction: 0.89,
        high_fraction: 0.94,
    },
    HeartRateBand {
        zone: 5,
        intensity: "Maximum",
        purpose: "Peak effort, anaerobic power",
        low_fraction: 0.95,
        high_fraction: 0.98,
    },
];

/// Heart rate range for one zone, in beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeartRateZone {
    pub zone: u8,
    pub intensity: &'static str,
    pub purpose: &'static str,
    pub low: u16,
    pub high: u16,
}

impl HeartRateZone {
    pub fn bounds(&self) -> (u16, u16) {
        (self.low, self.high)
    }
}

/// Heart rate zone calculation
pub struct HeartRateZoneCalculator;

impl HeartRateZoneCalculator {
    /// Zones 1-5 in ascending order. Each bound is rounded independently.
    pub fn zones(max_hr: u16) -> Result<Vec<HeartRateZone>> {
        if max_hr == 0 {
            return Err(RacePaceError::invalid_input(
                "heart rate zones",
                "max_heart_rate",
                max_hr,
            ));
        }

        Ok(HEART_RATE_BANDS
            .iter()
            .map(|band| HeartRateZone {
                zone: band.zone,
                intensity: band.intensity,
                purpose: band.purpose,
                low: Self::calculate_percentage(max_hr, band.low_fraction),
                high: Self::calculate_percentage(max_hr, band.high_fraction),
            })
            .collect())
    }

    // Fractions are below 1, so the result always fits back into u16
    fn calculate_percentage(max_hr: u16, fraction: f64) -> u16 {
        (f64::from(max_hr) * fraction).round() as u16
    }
}
