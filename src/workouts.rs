//! Named workout templates and the store interface they live behind
//!
//! Persistence itself belongs to the caller. This module fixes the record shape,
//! its validation rules, and the create/fetch/delete contract, and provides an
//! in-memory store that honours that contract.

use crate::duration::Duration;
use crate::error::{RacePaceError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PACE_LEN: usize = 5;
pub const MAX_TIME_LEN: usize = 8;
/// Largest scale a stored distance may carry (NUMERIC(4,2))
pub const DISTANCE_SCALE: u32 = 2;
const DISTANCE_LIMIT: Decimal = dec!(100);

/// Workout data as submitted, before an id is assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    /// Workout name
    pub name: String,
    /// Target pace, e.g. "6:30"
    pub pace: Option<String>,
    /// Target distance
    pub distance: Option<Decimal>,
    /// Target duration, e.g. "1:05:00"
    pub time: Option<String>,
    /// Additional notes on the workout
    pub notes: Option<String>,
}

impl NewWorkout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_pace(mut self, pace: impl Into<String>) -> Self {
        self.pace = Some(pace.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_distance(mut self, distance: Decimal) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check the record against the stored column constraints
    pub fn validate(&self) -> Result<()> {
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_NAME_LEN {
            return Err(RacePaceError::invalid_input("workout", "name", name_len));
        }

        if let Some(pace) = &self.pace {
            validate_time_text("pace", pace, MAX_PACE_LEN)?;
        }
        if let Some(time) = &self.time {
            validate_time_text("time", time, MAX_TIME_LEN)?;
        }

        if let Some(distance) = self.distance {
            let normalized = distance.normalize();
            if normalized.is_sign_negative()
                || normalized.scale() > DISTANCE_SCALE
                || normalized >= DISTANCE_LIMIT
            {
                return Err(RacePaceError::invalid_input("workout", "distance", distance));
            }
        }
        Ok(())
    }
}

fn validate_time_text(parameter: &str, text: &str, max_len: usize) -> Result<()> {
    if text.len() > max_len {
        return Err(RacePaceError::invalid_input("workout", parameter, text));
    }
    Duration::parse(text)?;
    Ok(())
}

/// A stored workout template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: u64,
    pub name: String,
    pub pace: Option<String>,
    pub distance: Option<Decimal>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

impl WorkoutTemplate {
    fn from_new(id: u64, workout: NewWorkout) -> Self {
        Self {
            id,
            name: workout.name,
            pace: workout.pace,
            distance: workout.distance,
            time: workout.time,
            notes: workout.notes,
        }
    }

    /// Target pace as a duration, if one was given
    pub fn pace_duration(&self) -> Result<Option<Duration>> {
        Ok(self.pace.as_deref().map(Duration::parse).transpose()?)
    }

    /// Target time as a duration, if one was given
    pub fn time_duration(&self) -> Result<Option<Duration>> {
        Ok(self.time.as_deref().map(Duration::parse).transpose()?)
    }
}

/// Storage contract for workout templates
pub trait WorkoutStore {
    /// Validate and store a workout, returning it with its new id
    fn create(&mut self, workout: NewWorkout) -> Result<WorkoutTemplate>;

    /// Fetch one workout; unknown ids fail with NotFound
    fn fetch(&self, id: u64) -> Result<WorkoutTemplate>;

    /// Every stored workout in id order
    fn fetch_all(&self) -> Vec<WorkoutTemplate>;

    /// Remove a workout; unknown ids fail with NotFound
    fn delete(&mut self, id: u64) -> Result<()>;
}

/// [`WorkoutStore`] backed by an ordered map
#[derive(Debug, Default)]
pub struct InMemoryWorkoutStore {
    last_id: u64,
    records: BTreeMap<u64, WorkoutTemplate>,
}

impl InMemoryWorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn not_found(id: u64) -> RacePaceError {
        RacePaceError::NotFound {
            resource: "workout".to_string(),
            id: id.to_string(),
        }
    }
}

impl WorkoutStore for InMemoryWorkoutStore {
    fn create(&mut self, workout: NewWorkout) -> Result<WorkoutTemplate> {
        workout.validate()?;
        self.last_id += 1;
        let record = WorkoutTemplate::from_new(self.last_id, workout);
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: u64) -> Result<WorkoutTemplate> {
        self.records.get(&id).cloned().ok_or_else(|| Self::not_found(id))
    }

    fn fetch_all(&self) -> Vec<WorkoutTemplate> {
        self.records.values().cloned().collect()
    }

    fn delete(&mut self, id: u64) -> Result<()> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}
