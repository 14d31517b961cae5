//! Energy efficiency scoring
//!
//! A configuration is scored on three factors. Each factor starts from a
//! baseline, every scored room moves it by how close its samples are to the
//! room's ideal, weighted by the room's importance for that factor, and the
//! result is clamped to the factor's band:
//!
//! | factor      | baseline | band    |
//! |-------------|----------|---------|
//! | temperature | 50       | 10..=50 |
//! | light       | 30       | 5..=30  |
//! | humidity    | 20       | 5..=20  |
//!
//! Each open window side adds a light bonus before clamping.

use greenplan_core::models::{
    DetailedScores, EnergyReport, EnergyScores, EnvironmentRules, EnvironmentSample, Factor,
    Grade, RoomType, TargetRange, Windows,
};

use crate::environment::sample_value;
use crate::numeric::round2;
use crate::resolution::RoomSamples;

/// Per-sample points at an exact match
const MAX_SAMPLE_POINTS: f64 = 10.0;

/// Per-sample points floor
const MIN_SAMPLE_POINTS: f64 = 2.0;

/// Average points at which a room neither adds nor removes score
const NEUTRAL_POINTS: f64 = 6.0;

const WINDOW_LIGHT_BONUS: f64 = 1.5;

/// How one factor turns sample deviations into score
#[derive(Debug, Clone, Copy)]
struct FactorCurve {
    baseline: f64,
    band: (f64, f64),
    multiplier: f64,
    /// Points lost per range width of deviation
    penalty: f64,
    /// Cap the relative deviation at one range width
    saturate: bool,
}

const TEMPERATURE_CURVE: FactorCurve = FactorCurve {
    baseline: 50.0,
    band: (10.0, 50.0),
    multiplier: 5.0,
    penalty: 20.0,
    saturate: false,
};

const LIGHT_CURVE: FactorCurve = FactorCurve {
    baseline: 30.0,
    band: (5.0, 30.0),
    multiplier: 3.0,
    penalty: 16.0,
    saturate: true,
};

const HUMIDITY_CURVE: FactorCurve = FactorCurve {
    baseline: 20.0,
    band: (5.0, 20.0),
    multiplier: 2.0,
    penalty: 16.0,
    saturate: true,
};

/// Importance of a room type per factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomWeights {
    pub temperature: f64,
    pub light: f64,
    pub humidity: f64,
}

impl RoomWeights {
    fn factor(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Temperature => self.temperature,
            Factor::Humidity => self.humidity,
            Factor::Sunlight => self.light,
        }
    }
}

pub fn room_weights(room_type: RoomType) -> RoomWeights {
    match room_type {
        RoomType::LivingRoom => RoomWeights { temperature: 0.4, light: 0.4, humidity: 0.3 },
        RoomType::Bedroom => RoomWeights { temperature: 0.3, light: 0.2, humidity: 0.3 },
        RoomType::Kitchen => RoomWeights { temperature: 0.2, light: 0.3, humidity: 0.2 },
        RoomType::Bathroom => RoomWeights { temperature: 0.1, light: 0.1, humidity: 0.2 },
    }
}

/// Minimum total score of each grade
///
/// With every room type present the total cannot drop below 60, so the
/// lower grades are only reachable with tighter thresholds or fewer rooms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeThresholds {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self { a: 90.0, b: 80.0, c: 70.0, d: 60.0, e: 50.0 }
    }
}

impl GradeThresholds {
    pub fn grade(&self, total_score: f64) -> Grade {
        if total_score >= self.a {
            Grade::A
        } else if total_score >= self.b {
            Grade::B
        } else if total_score >= self.c {
            Grade::C
        } else if total_score >= self.d {
            Grade::D
        } else if total_score >= self.e {
            Grade::E
        } else {
            Grade::F
        }
    }
}

/// Scores configurations and turns scores into reports
#[derive(Debug, Clone, Default)]
pub struct EnergyScorer {
    thresholds: GradeThresholds,
}

impl EnergyScorer {
    pub fn new(thresholds: GradeThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &GradeThresholds {
        &self.thresholds
    }

    /// Score the given rooms
    ///
    /// Only `rooms` are scored; a room without targets or samples is skipped.
    pub fn score(
        &self,
        rooms: &[RoomType],
        windows: &Windows,
        samples: &RoomSamples,
        rules: &EnvironmentRules,
    ) -> EnergyScores {
        let window_bonus = windows.count() as f64 * WINDOW_LIGHT_BONUS;
        let temperature =
            factor_score(Factor::Temperature, &TEMPERATURE_CURVE, rooms, samples, rules, 0.0);
        let light =
            factor_score(Factor::Sunlight, &LIGHT_CURVE, rooms, samples, rules, window_bonus);
        let humidity =
            factor_score(Factor::Humidity, &HUMIDITY_CURVE, rooms, samples, rules, 0.0);

        EnergyScores {
            total_score: round2(temperature + light + humidity),
            temperature_score: round2(temperature),
            light_score: round2(light),
            humidity_score: round2(humidity),
        }
    }

    pub fn grade(&self, total_score: f64) -> Grade {
        self.thresholds.grade(total_score)
    }

    /// Grade, explanation and suggestions for a set of scores
    pub fn report(&self, scores: &EnergyScores) -> EnergyReport {
        EnergyReport {
            grade: self.grade(scores.total_score),
            total_score: scores.total_score,
            detailed_scores: DetailedScores::from(scores),
            explanation: explain(scores),
            suggestions: suggest(scores),
        }
    }
}

fn factor_score(
    factor: Factor,
    curve: &FactorCurve,
    rooms: &[RoomType],
    samples: &RoomSamples,
    rules: &EnvironmentRules,
    bonus: f64,
) -> f64 {
    let mut score = curve.baseline;

    for room in rooms {
        let (Some(targets), Some(room_samples)) = (rules.targets(*room), samples.get(room)) else {
            tracing::warn!(room = %room, ?factor, "Missing rules or samples, room not scored");
            continue;
        };

        let average = average_points(room_samples.as_slice(), targets.factor(factor), factor, curve);
        score += (average - NEUTRAL_POINTS) * room_weights(*room).factor(factor) * curve.multiplier;
    }

    let (low, high) = curve.band;
    (score + bonus).min(high).max(low)
}

fn average_points(
    samples: &[EnvironmentSample],
    target: &TargetRange,
    factor: Factor,
    curve: &FactorCurve,
) -> f64 {
    let width = target.width();
    let total: f64 = samples
        .iter()
        .map(|sample| {
            let deviation = (sample_value(sample, factor) - target.ideal).abs();
            let mut relative = if width > 0.0 {
                deviation / width
            } else if deviation == 0.0 {
                0.0
            } else {
                f64::INFINITY
            };
            if curve.saturate {
                relative = relative.min(1.0);
            }
            (MAX_SAMPLE_POINTS - relative * curve.penalty).max(MIN_SAMPLE_POINTS)
        })
        .sum();

    total / samples.len() as f64
}

fn explain(scores: &EnergyScores) -> Vec<String> {
    let temperature = if scores.temperature_score >= 40.0 {
        "Excellent temperature control, air conditioning use can be cut substantially."
    } else if scores.temperature_score >= 30.0 {
        "Good temperature control, moderate air conditioning demand."
    } else {
        "Temperature control needs work, frequent air conditioning is likely."
    };

    let light = if scores.light_score >= 25.0 {
        "High use of natural light, lighting electricity drops noticeably."
    } else if scores.light_score >= 20.0 {
        "Good use of natural light, moderate lighting demand."
    } else {
        "Natural light is underused, lighting electricity may rise."
    };

    let humidity = if scores.humidity_score >= 15.0 {
        "Excellent humidity control, a dehumidifier is rarely needed."
    } else if scores.humidity_score >= 10.0 {
        "Good humidity control, low dehumidification demand."
    } else {
        "Humidity control needs work, frequent dehumidifier use is likely."
    };

    vec![temperature.to_string(), light.to_string(), humidity.to_string()]
}

fn suggest(scores: &EnergyScores) -> Vec<String> {
    let mut suggestions = Vec::new();

    if scores.temperature_score < 30.0 {
        suggestions.push(
            "Add insulation or rework window placement to improve temperature control."
                .to_string(),
        );
    }
    if scores.light_score < 20.0 {
        suggestions
            .push("Add windows or rearrange rooms to make better use of daylight.".to_string());
    }
    if scores.humidity_score < 10.0 {
        suggestions.push(
            "Consider a dehumidification system or better ventilation to control humidity."
                .to_string(),
        );
    }
    if scores.total_score < 60.0 {
        suggestions.push(
            "Overall efficiency is low: review the whole layout and consider more \
             energy-saving equipment."
                .to_string(),
        );
    }

    suggestions
}
