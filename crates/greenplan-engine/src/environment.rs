//! Environmental targets per room type
//!
//! Targets depend only on the season and on whether it is day or night, so a
//! rule set is a pure function of the timestamp it is derived for.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use greenplan_core::models::{
    EnvironmentRules, EnvironmentSample, Factor, FactorReading, RoomReadingReport, RoomTargets,
    RoomType, Season, SpecialConditions, TargetRange, TimeOfDay,
};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::numeric::round1;

/// Half-width of the temperature comfort band in °C
const TEMPERATURE_BAND: f64 = 2.0;

/// Humidity band below and above the ideal, in percentage points
const HUMIDITY_BAND: (f64, f64) = (10.0, 5.0);

const BEDROOM_HUMIDITY_OFFSET: f64 = -5.0;

const HIGH_HUMIDITY_SHIFT: f64 = -5.0;
const HEAT_WAVE_SHIFT: f64 = 2.0;

/// Daylight hours are `[6, 18)`
const DAY_START_HOUR: u32 = 6;
const DAY_END_HOUR: u32 = 18;

/// Season of a calendar date
pub fn season_for(date: NaiveDate) -> Season {
    match date.month() {
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        9..=11 => Season::Autumn,
        _ => Season::Winter,
    }
}

pub fn is_daytime(time: NaiveTime) -> bool {
    (DAY_START_HOUR..DAY_END_HOUR).contains(&time.hour())
}

pub fn time_of_day(time: NaiveTime) -> TimeOfDay {
    if is_daytime(time) {
        TimeOfDay::Day
    } else {
        TimeOfDay::Night
    }
}

/// Mean outdoor temperature of a season in °C
pub fn base_temperature(season: Season) -> f64 {
    match season {
        Season::Spring => 21.12,
        Season::Summer => 26.38,
        Season::Autumn => 23.03,
        Season::Winter => 16.51,
    }
}

/// Mean relative humidity of a season in %
pub fn base_humidity(season: Season) -> f64 {
    match season {
        Season::Spring => 79.59,
        Season::Summer => 80.37,
        Season::Autumn => 77.98,
        Season::Winter => 78.42,
    }
}

fn sunlight_target(room_type: RoomType, time_of_day: TimeOfDay) -> TargetRange {
    match (room_type, time_of_day) {
        (RoomType::LivingRoom, TimeOfDay::Day) => TargetRange::new(500.0, 300.0, 750.0),
        (RoomType::LivingRoom, TimeOfDay::Night) => TargetRange::new(100.0, 50.0, 200.0),
        (RoomType::Bedroom, TimeOfDay::Day) => TargetRange::new(200.0, 100.0, 300.0),
        (RoomType::Bedroom, TimeOfDay::Night) => TargetRange::new(0.0, 0.0, 50.0),
        (RoomType::Kitchen, TimeOfDay::Day) => TargetRange::new(500.0, 300.0, 750.0),
        (RoomType::Kitchen, TimeOfDay::Night) => TargetRange::new(300.0, 200.0, 400.0),
        (RoomType::Bathroom, TimeOfDay::Day) => TargetRange::new(200.0, 100.0, 300.0),
        (RoomType::Bathroom, TimeOfDay::Night) => TargetRange::new(100.0, 50.0, 150.0),
    }
}

/// Targets of one room type for a season and time of day
pub fn room_targets(room_type: RoomType, season: Season, time_of_day: TimeOfDay) -> RoomTargets {
    let is_bedroom = room_type == RoomType::Bedroom;

    let mut temperature_adjust = if time_of_day.is_day() { 1.0 } else { -1.0 };
    if is_bedroom {
        temperature_adjust -= 1.0;
    }
    let ideal_temperature = round1(base_temperature(season) + temperature_adjust);
    let temperature = TargetRange::new(
        ideal_temperature,
        round1(ideal_temperature - TEMPERATURE_BAND),
        round1(ideal_temperature + TEMPERATURE_BAND),
    );

    let humidity_offset = if is_bedroom { BEDROOM_HUMIDITY_OFFSET } else { 0.0 };
    let ideal_humidity = base_humidity(season) + humidity_offset;
    let humidity = TargetRange::new(
        ideal_humidity,
        ideal_humidity - HUMIDITY_BAND.0,
        ideal_humidity + HUMIDITY_BAND.1,
    );

    RoomTargets { temperature, humidity, sunlight: sunlight_target(room_type, time_of_day) }
}

/// Derive the rule set for every room type at `timestamp`
pub fn rules_for(timestamp: NaiveDateTime) -> EnvironmentRules {
    let season = season_for(timestamp.date());
    let time_of_day = time_of_day(timestamp.time());

    let rooms = RoomType::ALL
        .into_iter()
        .map(|room| (room, room_targets(room, season, time_of_day)))
        .collect();

    EnvironmentRules { season, time_of_day, rooms }
}

/// Shift a rule set for special conditions
///
/// Each condition touches a different factor, so applying them in any order
/// gives the same result.
pub fn adjust_for_conditions(
    rules: &EnvironmentRules,
    conditions: SpecialConditions,
) -> EnvironmentRules {
    let mut adjusted = rules.clone();

    for targets in adjusted.rooms.values_mut() {
        if conditions.high_humidity_warning {
            targets.humidity = targets.humidity.shifted(HIGH_HUMIDITY_SHIFT);
        }
        if conditions.heat_wave {
            targets.temperature = targets.temperature.shifted(HEAT_WAVE_SHIFT);
        }
    }

    adjusted
}

/// Classify observed readings against a rule set
///
/// Rooms without targets in `rules` are left out of the report.
pub fn validate_readings(
    readings: &BTreeMap<RoomType, EnvironmentSample>,
    rules: &EnvironmentRules,
) -> BTreeMap<RoomType, RoomReadingReport> {
    let mut report = BTreeMap::new();

    for (room, sample) in readings {
        let Some(targets) = rules.targets(*room) else {
            tracing::debug!(room = %room, "No targets for room, skipping readings");
            continue;
        };

        let room_report: RoomReadingReport = Factor::ALL
            .into_iter()
            .map(|factor| {
                let target = targets.factor(factor);
                let value = sample_value(sample, factor);
                (factor, FactorReading { value, ideal: target.ideal, status: target.classify(value) })
            })
            .collect();

        report.insert(*room, room_report);
    }

    report
}

/// Reading of one factor in a sample
pub fn sample_value(sample: &EnvironmentSample, factor: Factor) -> f64 {
    match factor {
        Factor::Temperature => sample.temperature,
        Factor::Humidity => sample.humidity,
        Factor::Sunlight => sample.sunlight,
    }
}

fn factor_label(factor: Factor) -> &'static str {
    match factor {
        Factor::Temperature => "Temperature (°C)",
        Factor::Humidity => "Humidity (%)",
        Factor::Sunlight => "Sunlight (lux)",
    }
}

/// Human-readable digest of a rule set
pub fn summarize(rules: &EnvironmentRules) -> String {
    let mut summary = format!(
        "Environment rules (season: {}, time: {}):\n",
        rules.season, rules.time_of_day
    );

    for (room, targets) in &rules.rooms {
        let _ = writeln!(summary, "{}:", room);
        for factor in Factor::ALL {
            let target = targets.factor(factor);
            let _ = writeln!(
                summary,
                "  {}: ideal {:.2}, range {:.2} to {:.2}",
                factor_label(factor),
                target.ideal,
                target.min(),
                target.max()
            );
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenplan_core::models::ReadingStatus;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_season_boundaries() {
        let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        assert_eq!(season_for(date(2, 28)), Season::Winter);
        assert_eq!(season_for(date(3, 1)), Season::Spring);
        assert_eq!(season_for(date(5, 31)), Season::Spring);
        assert_eq!(season_for(date(6, 1)), Season::Summer);
        assert_eq!(season_for(date(11, 30)), Season::Autumn);
        assert_eq!(season_for(date(12, 1)), Season::Winter);
    }

    #[test]
    fn test_daytime_window() {
        let time = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert!(!is_daytime(time(5, 59)));
        assert!(is_daytime(time(6, 0)));
        assert!(is_daytime(time(17, 59)));
        assert!(!is_daytime(time(18, 0)));
    }

    #[test]
    fn test_summer_day_rules() {
        let rules = rules_for(at(2024, 7, 1, 14));
        assert_eq!(rules.season, Season::Summer);
        assert_eq!(rules.time_of_day, TimeOfDay::Day);

        let living = rules.targets(RoomType::LivingRoom).unwrap();
        assert_eq!(living.temperature.ideal, 27.4);
        assert_eq!(living.temperature.range, (25.4, 29.4));
        assert!(approx(living.humidity.ideal, 80.37));
        assert!(approx(living.humidity.min(), 70.37));
        assert!(approx(living.humidity.max(), 85.37));
        assert_eq!(living.sunlight, TargetRange::new(500.0, 300.0, 750.0));

        let bedroom = rules.targets(RoomType::Bedroom).unwrap();
        assert_eq!(bedroom.temperature.ideal, 26.4);
        assert!(approx(bedroom.humidity.ideal, 75.37));
        assert_eq!(bedroom.sunlight, TargetRange::new(200.0, 100.0, 300.0));
    }

    #[test]
    fn test_winter_and_night_rules() {
        let winter = rules_for(at(2024, 1, 15, 10));
        let living = winter.targets(RoomType::LivingRoom).unwrap();
        assert_eq!(living.temperature.ideal, 17.5);
        assert_eq!(living.temperature.range, (15.5, 19.5));
        assert_eq!(winter.targets(RoomType::Bedroom).unwrap().temperature.ideal, 16.5);

        let night = rules_for(at(2024, 7, 1, 22));
        assert_eq!(night.time_of_day, TimeOfDay::Night);
        assert_eq!(night.targets(RoomType::LivingRoom).unwrap().temperature.ideal, 25.4);
        assert_eq!(night.targets(RoomType::Bedroom).unwrap().temperature.ideal, 24.4);
        assert_eq!(
            night.targets(RoomType::Bedroom).unwrap().sunlight,
            TargetRange::new(0.0, 0.0, 50.0)
        );
    }

    #[test]
    fn test_rules_are_idempotent() {
        let ts = at(2024, 10, 3, 9);
        assert_eq!(rules_for(ts), rules_for(ts));
    }

    #[test]
    fn test_special_conditions_compose() {
        let rules = rules_for(at(2024, 7, 1, 14));
        let humid = SpecialConditions { high_humidity_warning: true, heat_wave: false };
        let hot = SpecialConditions { high_humidity_warning: false, heat_wave: true };
        let both = SpecialConditions { high_humidity_warning: true, heat_wave: true };

        let one_by_one = adjust_for_conditions(&adjust_for_conditions(&rules, humid), hot);
        let other_order = adjust_for_conditions(&adjust_for_conditions(&rules, hot), humid);
        let at_once = adjust_for_conditions(&rules, both);
        assert_eq!(one_by_one, other_order);
        assert_eq!(one_by_one, at_once);

        let living = at_once.targets(RoomType::LivingRoom).unwrap();
        assert!(approx(living.temperature.ideal, 29.4));
        assert!(approx(living.humidity.ideal, 75.37));

        // Input is not modified
        assert_eq!(rules.targets(RoomType::LivingRoom).unwrap().temperature.ideal, 27.4);
    }

    #[test]
    fn test_no_conditions_is_identity() {
        let rules = rules_for(at(2024, 4, 2, 8));
        assert_eq!(adjust_for_conditions(&rules, SpecialConditions::default()), rules);
    }

    #[test]
    fn test_validate_readings() {
        let rules = rules_for(at(2024, 7, 1, 14));
        let mut readings = BTreeMap::new();
        readings.insert(RoomType::LivingRoom, EnvironmentSample::new(25.4, 90.0, 100.0));

        let report = validate_readings(&readings, &rules);
        let living = &report[&RoomType::LivingRoom];
        assert_eq!(living[&Factor::Temperature].status, ReadingStatus::Normal);
        assert_eq!(living[&Factor::Humidity].status, ReadingStatus::High);
        assert_eq!(living[&Factor::Sunlight].status, ReadingStatus::Low);
        assert_eq!(living[&Factor::Sunlight].ideal, 500.0);
        assert!(!report.contains_key(&RoomType::Kitchen));
    }

    #[test]
    fn test_summary_lists_every_room() {
        let summary = summarize(&rules_for(at(2024, 7, 1, 14)));
        assert!(summary.starts_with("Environment rules (season: summer, time: day)"));
        for room in RoomType::ALL {
            assert!(summary.contains(&format!("{}:", room)));
        }
        assert!(summary.contains("ideal 27.40, range 25.40 to 29.40"));
    }
}
