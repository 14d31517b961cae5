//! End-to-end design runs against canned generator output

use chrono::{NaiveDate, NaiveDateTime};
use greenplan_core::error::{GreenplanError, Result};
use greenplan_core::models::{
    DesignOutcome, DesignRequest, LocationId, LocationTable, RoomType, SpecialConditions, Windows,
};
use greenplan_core::ports::DesignStore;
use greenplan_design::{DesignOrchestrator, DesignSettings};
use greenplan_llm::{CannedGenerator, Generator};
use greenplan_store::MemoryDesignStore;
use rand::rngs::mock::StepRng;

const RESPONSE: &str = r#"Sure, here you go:
{
  "configurations": [
    {
      "name": "Morning Light",
      "description": "客廳在位置A，臥室在位置B,D，廚房在位置C，浴室在位置D。",
      "advantages": {"environment_optimization": "living room takes the brightest corner"},
      "considerations": {"comfort": "kitchen runs warm in summer"}
    },
    {
      "name": "Cool Retreat",
      "description": "臥室分別位於位置B，位置D；客廳在位置C，廚房位於位置A",
    },
    {"name": "Broken"}
  ]
}"#;

struct FailingGenerator;

impl Generator for FailingGenerator {
    fn generate(&self, _prompt: &str, _context: &[&str]) -> Result<String> {
        Err(GreenplanError::GeneratorUnavailable {
            reason: "connection refused".to_string(),
            remediation: "start the server".to_string(),
        })
    }
}

fn neutral_rng() -> StepRng {
    StepRng::new(1 << 63, 0)
}

fn summer_afternoon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap().and_hms_opt(14, 30, 0).unwrap()
}

fn request() -> DesignRequest {
    DesignRequest::new("Family Home", 12.0, 10.0)
        .with_rooms(RoomType::LivingRoom, 1)
        .with_rooms(RoomType::Bedroom, 2)
        .with_rooms(RoomType::Kitchen, 1)
        .with_rooms(RoomType::Bathroom, 1)
        .with_windows(Windows::all())
}

fn run<G: Generator>(generator: G, store: &MemoryDesignStore) -> Result<DesignOutcome> {
    let orchestrator = DesignOrchestrator::new(generator, store, DesignSettings::default());
    orchestrator.design(
        &request(),
        &LocationTable::reference(),
        summer_afternoon(),
        &mut neutral_rng(),
    )
}

#[test]
fn test_completed_design() {
    let store = MemoryDesignStore::new();
    let outcome = run(CannedGenerator::new(RESPONSE), &store).unwrap();

    let result = outcome.result().expect("design should complete");
    assert_eq!(result.configurations.len(), 2);
    assert_eq!(result.summary.configuration_count, 2);
    assert_eq!(result.summary.room_count, 5);
    assert_eq!(result.summary.total_area, 120.0);
    assert_eq!(result.request.name, "Family Home");
    assert_eq!(result.room_areas.len(), 4);

    let best = result.best_configuration().unwrap();
    assert_eq!(result.summary.best_energy_efficiency, best.energy_report.total_score);

    let first = &result.configurations[0];
    assert_eq!(first.name, "Morning Light");
    assert_eq!(first.room_locations[&RoomType::Bedroom], [LocationId::B, LocationId::D]);
    assert_eq!(first.layout.placements.len() + first.layout.unplaced.len(), 5);
    assert_eq!(first.advantages.len(), 1);

    let second = &result.configurations[1];
    assert_eq!(second.room_locations[&RoomType::Bedroom], [LocationId::B, LocationId::D]);
    assert_eq!(second.room_locations[&RoomType::Kitchen], [LocationId::A]);
    assert!(second.room_locations[&RoomType::Bathroom].is_empty());
}

#[test]
fn test_scores_and_grades_are_consistent() {
    let store = MemoryDesignStore::new();
    let outcome = run(CannedGenerator::new(RESPONSE), &store).unwrap();

    for configuration in &outcome.result().unwrap().configurations {
        let report = &configuration.energy_report;
        let detailed = report.detailed_scores;
        let sum = detailed.temperature_adaptation
            + detailed.natural_light_utilization
            + detailed.humidity_control;
        assert!((report.total_score - sum).abs() < 0.02);
        assert!((10.0..=50.0).contains(&detailed.temperature_adaptation));
        assert!((5.0..=30.0).contains(&detailed.natural_light_utilization));
        assert!((5.0..=20.0).contains(&detailed.humidity_control));
        assert!(!report.explanation.is_empty());
    }
}

#[test]
fn test_layout_order_follows_locations() {
    let store = MemoryDesignStore::new();
    let outcome = run(CannedGenerator::new(RESPONSE), &store).unwrap();
    let result = outcome.result().unwrap();

    // Kitchen sits at A in the second candidate, so it is packed first
    let second = &result.configurations[1].layout;
    assert_eq!(second.placements[0].room_type, RoomType::Kitchen);
    assert_eq!((second.placements[0].x, second.placements[0].y), (0.0, 0.0));

    let first = &result.configurations[0].layout;
    assert_eq!(first.placements[0].room_type, RoomType::LivingRoom);
}

#[test]
fn test_outcome_is_saved() {
    let store = MemoryDesignStore::new();
    let outcome = run(CannedGenerator::new(RESPONSE), &store).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.latest().unwrap(), Some(outcome));
}

#[test]
fn test_generator_failure_yields_failed_outcome() {
    let store = MemoryDesignStore::new();
    let outcome = run(FailingGenerator, &store).unwrap();

    let failure = outcome.failure().expect("design should fail");
    assert!(failure.error.contains("connection refused"));
    assert_eq!(failure.request, request());
    assert_eq!(failure.timestamp, summer_afternoon());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_malformed_response_yields_failed_outcome() {
    let store = MemoryDesignStore::new();
    let outcome = run(CannedGenerator::new("no json here"), &store).unwrap();
    assert!(!outcome.is_completed());
}

#[test]
fn test_only_invalid_candidates_yield_failed_outcome() {
    let store = MemoryDesignStore::new();
    let response = r#"{"configurations": [{"name": "Nameless description"}, {"description": "x"}]}"#;
    let outcome = run(CannedGenerator::new(response), &store).unwrap();

    let failure = outcome.failure().unwrap();
    assert!(failure.error.contains("no usable configurations"));
}

#[test]
fn test_invalid_request_is_an_error() {
    let store = MemoryDesignStore::new();
    let orchestrator =
        DesignOrchestrator::new(CannedGenerator::new(RESPONSE), &store, DesignSettings::default());
    let empty = DesignRequest::new("Nothing", 10.0, 10.0);

    let err = orchestrator
        .design(&empty, &LocationTable::reference(), summer_afternoon(), &mut neutral_rng())
        .unwrap_err();
    assert!(matches!(err, GreenplanError::InvalidRequest { .. }));
    assert!(store.is_empty());
}

#[test]
fn test_special_conditions_shift_rules() {
    let store = MemoryDesignStore::new();
    let settings = DesignSettings {
        conditions: SpecialConditions { heat_wave: true, high_humidity_warning: false },
        ..DesignSettings::default()
    };
    let orchestrator = DesignOrchestrator::new(CannedGenerator::new(RESPONSE), &store, settings);
    let outcome = orchestrator
        .design(&request(), &LocationTable::reference(), summer_afternoon(), &mut neutral_rng())
        .unwrap();

    let plain = run(CannedGenerator::new(RESPONSE), &MemoryDesignStore::new()).unwrap();
    let shifted = &outcome.result().unwrap().rules.rooms[&RoomType::Bedroom].temperature;
    let base = &plain.result().unwrap().rules.rooms[&RoomType::Bedroom].temperature;
    assert!((shifted.ideal - base.ideal - 2.0).abs() < 1e-9);
}
