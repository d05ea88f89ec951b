use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, error, info, warn};

use racepace::{
    convert_pace, fraction_from_percent, init_logging, intensity, marathon_pace,
    parse_query_value, race_pace, race_time, AppConfig, DistanceUnit, Duration, ErrorSeverity,
    HeartRateZoneCalculator, IntensityModel, LongRunPlanner, Pace, RaceDistance, RacePaceError,
    VdotCalculator,
};

/// racepace - Race pace and training intensity calculator
///
/// Converts between finish times, paces and distances, and derives training
/// targets (long-run ladders, heart rate zones, VDOT paces) from a race result
/// or goal.
#[derive(Parser)]
#[command(name = "racepace")]
#[command(author = "racepace contributors")]
#[command(version = "0.1.0")]
#[command(about = "Race pace and training intensity calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average pace for a finish time over a distance
    RacePace {
        /// Finish time (M:SS or H:MM:SS)
        #[arg(short, long)]
        time: Option<String>,

        /// Race distance in the selected unit
        #[arg(short, long)]
        distance: Option<f64>,

        /// Distance unit (km or mi)
        #[arg(short, long)]
        unit: Option<DistanceUnit>,
    },

    /// Finish time for a race run at a given pace
    RaceTime {
        /// Pace per unit (M:SS)
        #[arg(short, long)]
        pace: Option<String>,

        /// Race distance in meters
        #[arg(short, long)]
        distance: Option<f64>,

        /// Unit the pace is expressed in (km or mi)
        #[arg(short, long)]
        unit: Option<DistanceUnit>,
    },

    /// Progressive long-run targets from a goal marathon pace
    LongRun {
        /// Run length in the selected unit
        #[arg(short, long)]
        distance: Option<u32>,

        /// Goal marathon pace (M:SS)
        #[arg(short, long)]
        marathon_pace: Option<String>,

        /// Goal marathon finish time, used instead of --marathon-pace
        #[arg(long, conflicts_with = "marathon_pace")]
        marathon_time: Option<String>,

        /// Distance unit (km or mi)
        #[arg(short, long)]
        unit: Option<DistanceUnit>,
    },

    /// Heart rate training zones from maximum heart rate
    HeartRate {
        /// Maximum heart rate in bpm
        #[arg(long)]
        max_hr: Option<u16>,
    },

    /// Scale a pace by a percentage
    Percentage {
        /// Reference pace (M:SS)
        #[arg(short, long)]
        pace: Option<String>,

        /// Percentage model (pace or speed)
        #[arg(short, long)]
        method: Option<IntensityModel>,

        /// Percentage of the reference pace
        #[arg(long)]
        percent: Option<u32>,

        /// Unit the pace is expressed in (km or mi)
        #[arg(short, long)]
        unit: Option<DistanceUnit>,
    },

    /// Workout paces from 80% to 115% of race pace
    Workouts {
        /// Race pace (M:SS)
        #[arg(short, long)]
        pace: Option<String>,

        /// Percentage model (pace or speed)
        #[arg(short, long)]
        method: Option<IntensityModel>,

        /// Unit the pace is expressed in (km or mi)
        #[arg(short, long)]
        unit: Option<DistanceUnit>,
    },

    /// Convert a pace between per-km and per-mile
    Convert {
        /// Pace in the other unit (M:SS)
        #[arg(short, long)]
        pace: Option<String>,

        /// Target unit (km or mi)
        #[arg(short, long)]
        to: Option<DistanceUnit>,
    },

    /// Estimate VDOT from a race result
    Vdot {
        /// Race distance in meters
        #[arg(short, long, conflicts_with = "race")]
        distance: Option<f64>,

        /// Standard race (800M, 1600M, 5K, 10K, Half Marathon, Marathon)
        #[arg(short, long)]
        race: Option<RaceDistance>,

        /// Finish time (M:SS or H:MM:SS)
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Training paces for a VDOT value
    VdotPaces {
        /// VDOT value
        #[arg(long)]
        vdot: f64,

        /// Distance unit (km or mi)
        #[arg(short, long)]
        unit: Option<DistanceUnit>,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (KEY=VALUE)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

#[derive(Serialize)]
struct RacePaceOutput {
    finish_time: Duration,
    distance: f64,
    pace: Pace,
}

#[derive(Serialize)]
struct RaceTimeOutput {
    pace: Pace,
    distance_meters: f64,
    finish_time: Duration,
}

#[derive(Serialize)]
struct PercentageOutput {
    reference: Pace,
    percent: u32,
    method: IntensityModel,
    pace: Pace,
}

#[derive(Serialize)]
struct ConvertOutput {
    from: Pace,
    to: Pace,
}

#[derive(Tabled)]
struct LongRunRow {
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Target pace")]
    target: String,
}

#[derive(Tabled)]
struct HeartRateRow {
    #[tabled(rename = "Zone")]
    zone: u8,
    #[tabled(rename = "Intensity")]
    intensity: &'static str,
    #[tabled(rename = "Range (bpm)")]
    range: String,
    #[tabled(rename = "Purpose")]
    purpose: &'static str,
}

#[derive(Tabled)]
struct WorkoutRow {
    #[tabled(rename = "%")]
    percent: u32,
    #[tabled(rename = "Designation")]
    designation: &'static str,
    #[tabled(rename = "Pace")]
    pace: String,
}

#[derive(Tabled)]
struct TrainingPaceRow {
    #[tabled(rename = "Zone")]
    zone: &'static str,
    #[tabled(rename = "Pace")]
    pace: String,
}

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        report(&err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.raised_by(cli.verbose);
    init_logging(&log_config)?;

    debug!(config = ?cli.config, json = cli.json, "Configuration loaded");
    let defaults = config.defaults.clone();

    match cli.command {
        Commands::RacePace {
            time,
            distance,
            unit,
        } => {
            let finish_time = time_arg(time, defaults.finish_time)?;
            let distance = distance.unwrap_or(defaults.race_distance);
            let unit = unit.unwrap_or(defaults.unit);
            info!(%finish_time, distance, %unit, "Calculating race pace");

            let pace = race_pace(finish_time, distance, unit)?;
            let output = RacePaceOutput {
                finish_time,
                distance,
                pace,
            };
            emit(cli.json, &output, || {
                println!("{}", "Race pace".green().bold());
                println!("  {} {} in {}", distance, unit, finish_time);
                println!("  Pace: {}", pace.to_string().bold());
            })?;
        }

        Commands::RaceTime {
            pace,
            distance,
            unit,
        } => {
            let unit = unit.unwrap_or(defaults.unit);
            let pace = Pace::new(time_arg(pace, defaults.race_pace)?, unit);
            let distance_meters = distance.unwrap_or(defaults.race_distance_meters);
            info!(%pace, distance_meters, "Calculating race time");

            let finish_time = race_time(pace, distance_meters)?;
            let output = RaceTimeOutput {
                pace,
                distance_meters,
                finish_time,
            };
            emit(cli.json, &output, || {
                println!("{}", "Race time".green().bold());
                println!("  {} m at {}", distance_meters, pace);
                println!("  Finish time: {}", finish_time.to_string().bold());
            })?;
        }

        Commands::LongRun {
            distance,
            marathon_pace: pace,
            marathon_time,
            unit,
        } => {
            let unit = unit.unwrap_or(defaults.unit);
            let length = distance.unwrap_or(defaults.long_run_length);
            if length > config.limits.max_long_run_length {
                warn!(
                    length,
                    limit = config.limits.max_long_run_length,
                    "Long run length over configured limit"
                );
                return Err(RacePaceError::invalid_input("long run ladder", "length", length).into());
            }

            let goal = match marathon_time {
                Some(text) => marathon_pace(parse_query_value(&text)?, unit)?,
                None => Pace::new(time_arg(pace, defaults.marathon_pace)?, unit),
            };
            info!(length, goal = %goal, "Building long run ladder");

            let ladder = LongRunPlanner::ladder(length, unit, goal)?;
            emit(cli.json, &ladder, || {
                println!(
                    "{}",
                    format!("Long run: {} {} at marathon pace {}", length, unit, goal)
                        .cyan()
                        .bold()
                );
                let rows = ladder.iter().map(|step| LongRunRow {
                    unit: format!("{} {}", step.unit, step.index),
                    target: step.target_pace(),
                });
                print_table(rows);
            })?;
        }

        Commands::HeartRate { max_hr } => {
            let max_hr = max_hr.unwrap_or(defaults.max_heart_rate);
            info!(max_hr, "Calculating heart rate zones");

            let zones = HeartRateZoneCalculator::zones(max_hr)?;
            emit(cli.json, &zones, || {
                println!(
                    "{}",
                    format!("Heart rate zones for max HR {} bpm", max_hr)
                        .red()
                        .bold()
                );
                let rows = zones.iter().map(|zone| HeartRateRow {
                    zone: zone.zone,
                    intensity: zone.intensity,
                    range: format!("{}-{}", zone.low, zone.high),
                    purpose: zone.purpose,
                });
                print_table(rows);
            })?;
        }

        Commands::Percentage {
            pace,
            method,
            percent,
            unit,
        } => {
            let unit = unit.unwrap_or(defaults.unit);
            let reference = Pace::new(time_arg(pace, defaults.reference_pace)?, unit);
            let method = method.unwrap_or(defaults.intensity_model);
            let percent = percent.unwrap_or(defaults.percentage);
            info!(%reference, percent, %method, "Scaling pace");

            let scaled = intensity::scale(method, reference, fraction_from_percent(percent))?;
            let output = PercentageOutput {
                reference,
                percent,
                method,
                pace: scaled,
            };
            emit(cli.json, &output, || {
                println!(
                    "{}",
                    format!("{}% of {} (percentage of {})", percent, reference, method)
                        .blue()
                        .bold()
                );
                println!("  Pace: {}", scaled.to_string().bold());
            })?;
        }

        Commands::Workouts { pace, method, unit } => {
            let unit = unit.unwrap_or(defaults.unit);
            let race = Pace::new(time_arg(pace, defaults.reference_pace)?, unit);
            let method = method.unwrap_or(defaults.intensity_model);
            info!(%race, %method, "Building workout pace table");

            let paces = intensity::workout_paces(race, method)?;
            emit(cli.json, &paces, || {
                println!(
                    "{}",
                    format!("Workout paces from race pace {}", race).blue().bold()
                );
                let rows = paces.iter().map(|row| WorkoutRow {
                    percent: row.percent,
                    designation: row.designation,
                    pace: row.pace.to_string(),
                });
                print_table(rows);
            })?;
        }

        Commands::Convert { pace, to } => {
            let to = to.unwrap_or(defaults.unit);
            let from = Pace::new(time_arg(pace, defaults.reference_pace)?, to.other());
            info!(%from, %to, "Converting pace");

            let converted = convert_pace(from, to)?;
            let output = ConvertOutput {
                from,
                to: converted,
            };
            emit(cli.json, &output, || {
                println!("{} = {}", from, converted.to_string().bold());
            })?;
        }

        Commands::Vdot {
            distance,
            race,
            time,
        } => {
            let time = time_arg(time, defaults.vdot_time)?;
            let estimate = match race {
                Some(race) => VdotCalculator::estimate_race(race, time)?,
                None => VdotCalculator::estimate(
                    distance.unwrap_or(defaults.vdot_distance_meters),
                    time,
                )?,
            };
            info!(vdot = estimate.vdot, "Estimated VDOT");

            emit(cli.json, &estimate, || {
                println!(
                    "{} {}",
                    "VDOT:".magenta().bold(),
                    format!("{:.1}", estimate.vdot).bold()
                );
                println!(
                    "  {} m in {} ({:.1} m/min)",
                    estimate.distance_meters, estimate.time, estimate.velocity_m_per_min
                );
                println!(
                    "  {}",
                    format!(
                        "VO2 cost {:.2} ml/kg/min, {:.1}% of VO2max sustained",
                        estimate.vo2_cost,
                        estimate.fraction_sustained * 100.0
                    )
                    .dimmed()
                );
            })?;
        }

        Commands::VdotPaces { vdot, unit } => {
            let unit = unit.unwrap_or(defaults.unit);
            info!(vdot, %unit, "Calculating training paces");

            let paces = VdotCalculator::training_paces(vdot)?.in_unit(unit)?;
            emit(cli.json, &paces, || {
                println!(
                    "{}",
                    format!("Training paces for VDOT {:.1}", vdot).magenta().bold()
                );
                let rows = paces.iter().map(|(zone, pace)| TrainingPaceRow {
                    zone: zone.label(),
                    pace: pace.to_string(),
                });
                print_table(rows);
            })?;
        }

        Commands::Config {
            list,
            set,
            get,
            init,
        } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(AppConfig::default_config_path);

            if init {
                if path.exists() {
                    println!(
                        "{} {}",
                        "Configuration already exists:".yellow(),
                        path.display()
                    );
                } else {
                    AppConfig::default().save_to_file(&path)?;
                    info!(path = %path.display(), "Wrote default configuration");
                    println!("{} {}", "✓ Created".green(), path.display());
                }
            }

            if let Some(assignment) = set {
                let (key, value) = assignment.split_once('=').ok_or_else(|| {
                    RacePaceError::Configuration(format!(
                        "Expected KEY=VALUE, got {:?}",
                        assignment
                    ))
                })?;
                config.set_value(key.trim(), value.trim())?;
                config.save_to_file(&path)?;
                info!(key, path = %path.display(), "Configuration updated");
                println!("{} {} = {}", "✓ Set".green(), key.trim(), value.trim());
            }

            if let Some(key) = get {
                let value = config.get_value(&key)?;
                println!("{}", value);
            }

            if list {
                let entries = config.entries()?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                } else {
                    println!("{} {}", "Configuration:".white().bold(), path.display());
                    let rows = entries
                        .into_iter()
                        .map(|(key, value)| ConfigRow { key, value });
                    print_table(rows);
                }
            }
        }
    }

    Ok(())
}

/// Time or pace argument from the command line, or the configured default
fn time_arg(arg: Option<String>, default: Duration) -> racepace::Result<Duration> {
    match arg {
        Some(text) => parse_query_value(text.trim()),
        None => Ok(default),
    }
}

fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human();
    }
    Ok(())
}

fn print_table<R: Tabled>(rows: impl IntoIterator<Item = R>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<RacePaceError>() {
        Some(racepace_err) => {
            match racepace_err.severity() {
                ErrorSeverity::Error => error!(error = %racepace_err, "Command failed"),
                ErrorSeverity::Warning => warn!(error = %racepace_err, "Command rejected input"),
            }
            eprintln!("{} {}", "Error:".red().bold(), racepace_err.user_message());
        }
        None => {
            error!(error = %err, "Command failed");
            eprintln!("{} {:#}", "Error:".red().bold(), err);
        }
    }
}
