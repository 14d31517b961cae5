use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use greenplan_core::models::{RoomType, WindowSide, Windows};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// GreenPlan - Energy-aware room layout planning
#[derive(Parser, Debug)]
#[command(name = "greenplan")]
#[command(about = "Energy-aware room layout planning", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./greenplan.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and score candidate layouts for a request
    Design(DesignArgs),

    /// Score a layout description without a generator
    Score(ScoreArgs),

    /// Show environment rules for a moment in time
    Rules(RulesArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

/// Rooms and windows of a request
#[derive(Args, Debug)]
pub struct RoomArgs {
    /// Room count as TYPE=N, repeatable (e.g. --room bedroom=2)
    #[arg(long = "room", value_name = "TYPE=N", value_parser = parse_room_count, required = true)]
    pub rooms: Vec<(RoomType, u32)>,

    /// Side with windows, repeatable (top, right, bottom, left)
    #[arg(long = "window", value_name = "SIDE", value_parser = parse_window_side)]
    pub windows: Vec<WindowSide>,
}

impl RoomArgs {
    /// Counts per room type; repeated types add up
    pub fn room_counts(&self) -> BTreeMap<RoomType, u32> {
        let mut counts = BTreeMap::new();
        for (room, count) in &self.rooms {
            let total = counts.entry(*room).or_insert(0u32);
            *total = total.saturating_add(*count);
        }
        counts
    }

    pub fn windows(&self) -> Windows {
        Windows::from_sides(&self.windows)
    }
}

/// Special conditions applied to the rules
#[derive(Args, Debug)]
pub struct ConditionArgs {
    /// Raise temperature targets for a heat wave
    #[arg(long)]
    pub heat_wave: bool,

    /// Lower humidity targets for a high-humidity warning
    #[arg(long)]
    pub high_humidity: bool,
}

#[derive(Parser, Debug)]
pub struct DesignArgs {
    /// Design name
    #[arg(long)]
    pub name: String,

    /// Footprint length in meters
    #[arg(long)]
    pub length: f64,

    /// Footprint width in meters
    #[arg(long)]
    pub width: f64,

    #[command(flatten)]
    pub rooms: RoomArgs,

    /// Free-text wishes passed to the generator
    #[arg(long)]
    pub special_request: Option<String>,

    /// Design time as YYYY-MM-DDTHH:MM[:SS] (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub at: Option<NaiveDateTime>,

    /// Seed for the area allocation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use a saved generator answer instead of calling the model
    #[arg(long, value_name = "FILE")]
    pub response_file: Option<PathBuf>,

    /// Generator base URL
    #[arg(long)]
    pub url: Option<String>,

    /// Generator model
    #[arg(long)]
    pub model: Option<String>,

    /// Number of configurations to request
    #[arg(long)]
    pub candidates: Option<usize>,

    /// Directory results are saved to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Skip writing results to disk
    #[arg(long)]
    pub no_save: bool,

    /// Also write one file per configuration
    #[arg(long, conflicts_with = "no_save")]
    pub export: bool,

    /// Keep packed room sizes instead of growing them into free space
    #[arg(long)]
    pub no_optimize: bool,

    #[command(flatten)]
    pub conditions: ConditionArgs,
}

#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Layout description, e.g. "客廳在位置A，臥室在位置B,C"
    #[arg(long)]
    pub description: String,

    #[command(flatten)]
    pub rooms: RoomArgs,

    /// Time to derive rules for (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub at: Option<NaiveDateTime>,

    #[command(flatten)]
    pub conditions: ConditionArgs,
}

#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Time to derive rules for (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub at: Option<NaiveDateTime>,

    #[command(flatten)]
    pub conditions: ConditionArgs,
}

fn parse_room_count(s: &str) -> Result<(RoomType, u32), String> {
    let (name, count) =
        s.split_once('=').ok_or_else(|| format!("expected TYPE=N, got '{}'", s))?;
    let room = name.parse::<RoomType>().map_err(|e| e.to_string())?;
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("room count must be a non-negative integer, got '{}'", count))?;
    Ok((room, count))
}

fn parse_window_side(s: &str) -> Result<WindowSide, String> {
    s.parse::<WindowSide>().map_err(|e| e.to_string())
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

    let s = s.trim();
    if let Some(timestamp) =
        FORMATS.iter().find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
    {
        return Ok(timestamp);
    }

    // A bare date means noon
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD, got '{}'", s))
}
