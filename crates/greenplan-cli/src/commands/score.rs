use crate::cli::ScoreArgs;
use crate::output::OutputWriter;
use crate::output_types::{LocationRow, ScoreOutput};
use anyhow::{bail, Result};
use greenplan_core::models::{
    EnvironmentConditions, EnvironmentSample, LocationTable, ReadingStatus, RoomType,
    SpecialConditions,
};
use greenplan_engine::environment::validate_readings;
use greenplan_engine::{
    adjust_for_conditions, extract_room_locations, resolve_samples, rules_for, EnergyScorer,
    SampleSet,
};
use std::collections::BTreeMap;

use super::timestamp_or_now;

/// Score a description against the reference site
pub fn execute(args: ScoreArgs, output: &OutputWriter) -> Result<()> {
    let rooms: Vec<RoomType> = args
        .rooms
        .room_counts()
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(room, _)| room)
        .collect();
    if rooms.is_empty() {
        bail!("At least one room type needs a positive count");
    }

    let timestamp = timestamp_or_now(args.at);
    let rules =
        adjust_for_conditions(&rules_for(timestamp), SpecialConditions::from(&args.conditions));
    let table = LocationTable::reference();

    let room_locations = extract_room_locations(&args.description);
    let samples = resolve_samples(&room_locations, &table);

    let scorer = EnergyScorer::default();
    let scores = scorer.score(&rooms, &args.rooms.windows(), &samples, &rules);
    let report = scorer.report(&scores);

    let observed: BTreeMap<RoomType, EnvironmentSample> = rooms
        .iter()
        .filter_map(|room| samples.get(room).map(|set| (*room, mean(set))))
        .collect();
    let readings = validate_readings(&observed, &rules);

    if output.is_json() {
        let result = ScoreOutput {
            conditions: EnvironmentConditions {
                season: rules.season,
                time_of_day: rules.time_of_day,
            },
            room_locations,
            readings,
            report,
        };
        return output.result(&result);
    }

    output.section("Room Locations");
    output.table(LocationRow::rows(&room_locations));

    let off_target: Vec<String> = readings
        .iter()
        .flat_map(|(room, factors)| {
            factors
                .iter()
                .filter(|(_, reading)| reading.status != ReadingStatus::Normal)
                .map(move |(factor, reading)| {
                    format!(
                        "{} {:?}: {:.1} is {:?} (ideal {:.1})",
                        room, factor, reading.value, reading.status, reading.ideal
                    )
                })
        })
        .collect();
    if !off_target.is_empty() {
        output.section("Readings Outside Range");
        for line in &off_target {
            output.bullet(line);
        }
    }

    output.section("Energy Efficiency");
    output.kv("Conditions", format!("{}, {}", rules.season, rules.time_of_day));
    output.kv("Grade", report.grade);
    output.kv("Total score", format!("{:.2}", report.total_score));
    output.kv("Temperature", format!("{:.2}", report.detailed_scores.temperature_adaptation));
    output.kv("Natural light", format!("{:.2}", report.detailed_scores.natural_light_utilization));
    output.kv("Humidity", format!("{:.2}", report.detailed_scores.humidity_control));

    for line in &report.explanation {
        output.bullet(line);
    }
    if !report.suggestions.is_empty() {
        output.section("Suggestions");
        for suggestion in &report.suggestions {
            output.bullet(suggestion);
        }
    }
    Ok(())
}

fn mean(set: &SampleSet) -> EnvironmentSample {
    let n = set.as_slice().len() as f64;
    EnvironmentSample::new(
        set.iter().map(|s| s.temperature).sum::<f64>() / n,
        set.iter().map(|s| s.humidity).sum::<f64>() / n,
        set.iter().map(|s| s.sunlight).sum::<f64>() / n,
    )
}
