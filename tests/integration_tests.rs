use racepace::{
    convert_pace, get_time, mask_time_input, marathon_pace, parse_query_value, race_time,
    workout_paces, Distance, DistanceUnit, Duration, HeartRateZoneCalculator, InMemoryWorkoutStore,
    IntensityModel, LongRunPlanner, NewWorkout, Pace, RaceDistance, RacePaceError, TrainingZone,
    VdotCalculator, WorkoutStore,
};
use rust_decimal_macros::dec;

/// Integration tests that run complete calculator workflows

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn mile_pace(text: &str) -> Pace {
        Pace::parse(text, DistanceUnit::Mi).unwrap()
    }

    /// Goal finish time to marathon pace to long-run ladder
    #[test]
    fn test_marathon_goal_to_long_run_ladder() {
        let goal = marathon_pace(parse_query_value("3:00:00").unwrap(), DistanceUnit::Mi).unwrap();
        // 10800 / 26.2188 = 411.9 s
        assert_eq!(goal.time.format(), "6:51");

        let ladder = LongRunPlanner::ladder(16, DistanceUnit::Mi, goal).unwrap();
        assert_eq!(ladder.len(), 16);
        assert_eq!(ladder[0].target_pace(), "8:09 to 8:13");

        let centers: Vec<u64> = ladder.iter().map(|s| s.center().as_secs()).collect();
        assert!(centers.windows(2).all(|w| w[1] <= w[0]));
        // Never faster than the 10% bound of 452 s
        assert!(*centers.last().unwrap() >= 452);
    }

    /// Race result to VDOT to per-mile training paces
    #[test]
    fn test_race_result_to_training_paces() {
        let estimate =
            VdotCalculator::estimate_race(RaceDistance::FiveK, Duration::from_mins(20)).unwrap();
        assert_eq!(estimate.vdot, 49.8);

        let paces = VdotCalculator::training_paces(estimate.vdot)
            .unwrap()
            .in_unit(DistanceUnit::Mi)
            .unwrap();
        assert_eq!(paces.get(TrainingZone::Marathon).unwrap().to_string(), "7:13/mi");
        assert_eq!(paces.get(TrainingZone::Interval).unwrap().to_string(), "6:18/mi");
    }

    #[test]
    fn test_workout_table_feeds_workout_store() {
        let race = mile_pace("6:00");
        let table = workout_paces(race, IntensityModel::Pace).unwrap();
        let formatted: Vec<String> = table.iter().map(|w| w.pace.time.format()).collect();
        assert_eq!(
            formatted,
            vec!["7:12", "6:54", "6:36", "6:18", "6:00", "5:42", "5:24", "5:06"]
        );

        let mut store = InMemoryWorkoutStore::new();
        for row in table.iter().filter(|w| w.percent >= 100) {
            store
                .create(
                    NewWorkout::new(row.designation)
                        .with_pace(row.pace.time.format())
                        .with_distance(dec!(5)),
                )
                .unwrap();
        }

        let stored = store.fetch_all();
        assert_eq!(stored.len(), 4);
        assert_eq!(stored[0].name, "Race Pace");
        assert_eq!(
            stored[3].pace_duration().unwrap(),
            Some(Duration::from_secs(306))
        );

        store.delete(stored[0].id).unwrap();
        assert!(matches!(
            store.fetch(stored[0].id),
            Err(RacePaceError::NotFound { .. })
        ));
    }

    #[test]
    fn test_speed_model_table() {
        let table = workout_paces(mile_pace("6:00"), IntensityModel::Speed).unwrap();
        let formatted: Vec<String> = table.iter().map(|w| w.pace.time.format()).collect();
        assert_eq!(
            formatted,
            vec!["7:30", "7:04", "6:40", "6:19", "6:00", "5:43", "5:27", "5:13"]
        );
    }

    #[test]
    fn test_pace_time_distance_across_units() {
        // 6:00/mi over 10 km: 10 * 0.621 = 6.21 mi
        let time = get_time(mile_pace("6:00"), Distance::km(10.0)).unwrap();
        assert_eq!(time.format(), "37:15");

        assert_eq!(race_time(mile_pace("6:30"), 5000.0).unwrap().format(), "20:10");

        let per_mile = convert_pace(
            Pace::new(Duration::from_mins(6), DistanceUnit::Km),
            DistanceUnit::Mi,
        )
        .unwrap();
        assert_eq!(per_mile.to_string(), "9:39/mi");
    }

    #[test]
    fn test_masked_input_parses() {
        let masked = mask_time_input("32435");
        assert_eq!(masked, "3:24:35");
        assert_eq!(parse_query_value(&masked).unwrap().as_secs(), 12275);

        assert!(matches!(
            parse_query_value("6:3:0:"),
            Err(RacePaceError::Parse(_))
        ));
    }

    #[test]
    fn test_heart_rate_zones_workflow() {
        let zones = HeartRateZoneCalculator::zones(185).unwrap();
        assert_eq!(zones.first().unwrap().bounds(), (93, 111));
        assert_eq!(zones.last().unwrap().bounds(), (176, 181));
    }

    #[test]
    fn test_invalid_inputs_surface_as_warnings() {
        let errors = vec![
            LongRunPlanner::ladder(0, DistanceUnit::Mi, mile_pace("6:00")).unwrap_err(),
            HeartRateZoneCalculator::zones(0).unwrap_err(),
            VdotCalculator::estimate(0.0, Duration::from_mins(20)).unwrap_err(),
            parse_query_value("abc").unwrap_err(),
        ];
        for err in errors {
            assert_eq!(err.severity(), racepace::ErrorSeverity::Warning);
            assert!(!err.user_message().is_empty());
        }
    }
}

/// End-to-end tests of the `racepace` binary
#[cfg(test)]
mod cli_tests {
    use racepace::AppConfig;
    use std::path::{Path, PathBuf};
    use std::process::{Command, Output};
    use tempfile::TempDir;

    fn config_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("config.toml");
        AppConfig::default().save_to_file(&path).unwrap();
        path
    }

    fn racepace(config: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_racepace"))
            .arg("--config")
            .arg(config)
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    fn json(output: &Output) -> serde_json::Value {
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    #[test]
    fn test_race_pace_command() {
        let dir = TempDir::new().unwrap();
        let config = config_file(&dir);

        let value = json(&racepace(
            &config,
            &["--json", "race-pace", "--time", "20:00", "--distance", "3", "--unit", "mi"],
        ));
        assert_eq!(value["pace"]["time"], "6:40");
        assert_eq!(value["pace"]["unit"], "mi");
    }

    #[test]
    fn test_percentage_command_models() {
        let dir = TempDir::new().unwrap();
        let config = config_file(&dir);

        let pace_model = json(&racepace(
            &config,
            &["--json", "percentage", "--pace", "10:00", "--method", "pace", "--percent", "95"],
        ));
        assert_eq!(pace_model["pace"]["time"], "10:30");

        let speed_model = json(&racepace(
            &config,
            &["--json", "percentage", "--pace", "10:00", "--method", "speed", "--percent", "95"],
        ));
        assert_eq!(speed_model["pace"]["time"], "10:32");
    }

    #[test]
    fn test_config_set_changes_defaults() {
        let dir = TempDir::new().unwrap();
        let config = config_file(&dir);

        let set = racepace(&config, &["config", "--set", "defaults.max_heart_rate=190"]);
        assert!(set.status.success());

        let zones = json(&racepace(&config, &["--json", "heart-rate"]));
        assert_eq!(zones[0]["low"], 95);
        assert_eq!(zones[0]["high"], 114);
    }

    #[test]
    fn test_long_run_limit_enforced() {
        let dir = TempDir::new().unwrap();
        let config = config_file(&dir);

        let set = racepace(&config, &["config", "--set", "limits.max_long_run_length=10"]);
        assert!(set.status.success());

        let rejected = racepace(&config, &["long-run", "--distance", "20"]);
        assert!(!rejected.status.success());

        let ladder = json(&racepace(
            &config,
            &["--json", "long-run", "--distance", "10", "--marathon-pace", "6:00"],
        ));
        assert_eq!(ladder.as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_malformed_time_rejected() {
        let dir = TempDir::new().unwrap();
        let config = config_file(&dir);

        let output = racepace(&config, &["race-pace", "--time", "6:75"]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
    }
}
