//! Integration tests for the greenplan binary
//!
//! Every run happens in a fresh temporary directory with the `GREENPLAN_*`
//! variables cleared, so no local configuration leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ENV_KEYS: [&str; 8] = [
    "GREENPLAN_GENERATOR_URL",
    "GREENPLAN_GENERATOR_MODEL",
    "GREENPLAN_CANDIDATE_COUNT",
    "GREENPLAN_MAX_ATTEMPTS",
    "GREENPLAN_RETRY_DELAY_SECS",
    "GREENPLAN_MIN_ROOM_SIZE",
    "GREENPLAN_MAX_ASPECT_RATIO",
    "GREENPLAN_OUTPUT_DIR",
];

const RESPONSE: &str = r#"{
  "configurations": [
    {
      "name": "Bright Living",
      "description": "客廳在位置A，臥室在位置B,D，廚房在位置C，浴室在位置D",
      "advantages": {"environment_optimization": "living room gets the morning sun"}
    },
    {
      "name": "Cool Sleep",
      "description": "臥室分別位於位置B，位置D；客廳在位置C，廚房在位置A，浴室在位置B"
    }
  ]
}"#;

fn greenplan(dir: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_greenplan"));
    command.current_dir(dir).args(args).env("RUST_LOG", "warn");
    for key in ENV_KEYS {
        command.env_remove(key);
    }
    command.output().expect("Failed to execute greenplan")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn write_response(dir: &Path, content: &str) -> String {
    let path = dir.join("response.json");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

fn design_args<'a>(response: &'a str) -> Vec<&'a str> {
    vec![
        "design",
        "--name",
        "Test House",
        "--length",
        "12",
        "--width",
        "10",
        "--room",
        "livingRoom=1",
        "--room",
        "bedroom=2",
        "--room",
        "kitchen=1",
        "--room",
        "bathroom=1",
        "--window",
        "top",
        "--window",
        "left",
        "--at",
        "2024-07-15T14:00",
        "--seed",
        "7",
        "--response-file",
        response,
    ]
}

#[test]
fn test_rules_json_output() {
    let dir = TempDir::new().unwrap();
    let output = greenplan(dir.path(), &["rules", "--at", "2024-01-10T22:00", "--json"]);
    assert!(output.status.success());

    let parsed = json_stdout(&output);
    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["data"]["season"], "winter");
    assert_eq!(parsed["data"]["time_of_day"], "night");
    assert!(parsed["data"]["rooms"]["bedroom"]["temperature"]["ideal"].is_number());
}

#[test]
fn test_heat_wave_raises_temperature_targets() {
    let dir = TempDir::new().unwrap();
    let at = ["rules", "--at", "2024-07-01T12:00", "--json"];
    let plain = json_stdout(&greenplan(dir.path(), &at));

    let mut args = at.to_vec();
    args.push("--heat-wave");
    let shifted = json_stdout(&greenplan(dir.path(), &args));

    let ideal = |v: &serde_json::Value| {
        v["data"]["rooms"]["livingRoom"]["temperature"]["ideal"].as_f64().unwrap()
    };
    assert!((ideal(&shifted) - ideal(&plain) - 2.0).abs() < 1e-9);
}

#[test]
fn test_score_json_output() {
    let dir = TempDir::new().unwrap();
    let output = greenplan(
        dir.path(),
        &[
            "score",
            "--description",
            "客廳在位置A，臥室在位置B",
            "--room",
            "livingRoom=1",
            "--room",
            "bedroom=1",
            "--window",
            "top",
            "--at",
            "2024-07-01T14:00",
            "--json",
        ],
    );
    assert!(output.status.success());

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["room_locations"]["livingRoom"][0], "位置A");
    assert_eq!(data["room_locations"]["bedroom"][0], "位置B");
    assert!(data["report"]["energy_efficiency_grade"].is_string());
    assert!(data["readings"]["livingRoom"]["temperature"]["status"].is_string());
    assert!(data["readings"].get("kitchen").is_none());
    assert!(data["report"]["total_score"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_design_with_canned_response_saves_result() {
    let dir = TempDir::new().unwrap();
    let response = write_response(dir.path(), RESPONSE);

    let mut args = design_args(&response);
    args.extend(["--output-dir", "results", "--json"]);
    let output = greenplan(dir.path(), &args);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["status"], "completed");
    assert_eq!(data["configurations"].as_array().unwrap().len(), 2);
    assert_eq!(data["summary"]["room_count"], 5);
    assert_eq!(data["design_data"]["name"], "Test House");

    let latest = dir.path().join("results").join("latest.json");
    assert!(latest.exists());
}

#[test]
fn test_design_export_writes_configuration_files() {
    let dir = TempDir::new().unwrap();
    let response = write_response(dir.path(), RESPONSE);

    let mut args = design_args(&response);
    args.extend(["--output-dir", "out", "--export"]);
    let output = greenplan(dir.path(), &args);
    assert!(output.status.success());

    let exported = fs::read_dir(dir.path().join("out").join("configurations")).unwrap().count();
    assert_eq!(exported, 2);
}

#[test]
fn test_design_no_save_leaves_directory_untouched() {
    let dir = TempDir::new().unwrap();
    let response = write_response(dir.path(), RESPONSE);

    let mut args = design_args(&response);
    args.push("--no-save");
    let output = greenplan(dir.path(), &args);
    assert!(output.status.success());
    assert!(!dir.path().join("design_results").exists());
}

#[test]
fn test_design_with_unusable_response_fails() {
    let dir = TempDir::new().unwrap();
    let response = write_response(dir.path(), "Sorry, no layouts today.");

    let mut args = design_args(&response);
    args.extend(["--no-save", "--json"]);
    let output = greenplan(dir.path(), &args);
    assert!(!output.status.success());

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["status"], "failed");
    assert!(data["error"].as_str().unwrap().contains("No valid room configuration"));
}

#[test]
fn test_config_reports_sources() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("greenplan.toml"), "candidate_count = 5\n").unwrap();

    let output = greenplan(dir.path(), &["config", "--json"]);
    assert!(output.status.success());

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["candidate_count"]["value"], "5");
    assert_eq!(data["candidate_count"]["source"], "File");
    assert_eq!(data["generator_model"]["source"], "Default");
}

#[test]
fn test_unknown_room_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = greenplan(
        dir.path(),
        &["score", "--description", "客廳在位置A", "--room", "garage=1"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_missing_explicit_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = greenplan(dir.path(), &["config", "--config", "nowhere.toml"]);
    assert!(!output.status.success());
}

#[test]
fn test_oversized_room_count_is_rejected_cleanly() {
    let dir = TempDir::new().unwrap();
    let response = write_response(dir.path(), RESPONSE);
    let mut args = design_args(&response);
    args.extend(["--room", "bedroom=4294967295"]);

    let output = greenplan(dir.path(), &args);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rooms"));
    assert!(!dir.path().join("design_results").join("latest.json").exists());
}
