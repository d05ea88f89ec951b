// Library interface for racepace modules
// The CLI and the integration tests both go through this crate root

pub mod config;
pub mod duration;
pub mod error;
pub mod heart_rate;
pub mod intensity;
pub mod logging;
pub mod long_run;
pub mod pace;
pub mod units;
pub mod vdot;
pub mod workouts;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use duration::{mask_time_input, matches_query_shape, parse_query_value, Duration};
pub use error::{ErrorSeverity, ParseError, RacePaceError, Result};
pub use heart_rate::{HeartRateZone, HeartRateZoneCalculator};
pub use intensity::{
    fraction_from_percent, percentage_of_pace, percentage_of_speed, workout_paces,
    IntensityModel, WorkoutPace, WORKOUT_DESIGNATIONS,
};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use long_run::{LongRunPlanner, LongRunStep};
pub use pace::{
    difference_pace, get_pace, get_time, marathon_pace, race_pace, race_time, scale_pace,
    sum_pace, Pace,
};
pub use units::{convert_distance, convert_pace, Distance, DistanceUnit, RaceDistance};
pub use vdot::{TrainingPaceSet, TrainingZone, VdotCalculator, VdotEstimate};
pub use workouts::{InMemoryWorkoutStore, NewWorkout, WorkoutStore, WorkoutTemplate};
