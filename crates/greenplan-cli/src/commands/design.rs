use crate::cli::DesignArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{ConfigurationRow, LocationRow};
use anyhow::{bail, Context, Result};
use greenplan_core::config::{CliConfigOverrides, LayeredConfig};
use greenplan_core::models::{
    DesignOutcome, DesignRequest, DesignResult, LocationTable, SpecialConditions,
};
use greenplan_design::{DesignOrchestrator, DesignSettings};
use greenplan_engine::dimension::layout_summary;
use greenplan_llm::{CannedGenerator, Generator, OllamaGenerator, RetryingGenerator};
use greenplan_store::{JsonFileStore, MemoryDesignStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::time::Duration;

use super::timestamp_or_now;

pub fn execute(args: DesignArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let overrides = CliConfigOverrides {
        generator_url: args.url.clone(),
        generator_model: args.model.clone(),
        candidate_count: args.candidates,
        output_dir: args.output_dir.clone(),
    };
    let config = load_config_with_overrides(config_path, overrides)?;

    let mut request = DesignRequest::new(&args.name, args.length, args.width)
        .with_windows(args.rooms.windows());
    request.rooms = args.rooms.room_counts();
    if let Some(special) = &args.special_request {
        request = request.with_special_request(special);
    }

    let settings = DesignSettings {
        optimize: !args.no_optimize,
        conditions: SpecialConditions::from(&args.conditions),
        ..DesignSettings::from(&config)
    };

    let generator = build_generator(&args, &config)?;
    let timestamp = timestamp_or_now(args.at);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let locations = LocationTable::reference();

    let outcome = if args.no_save {
        let orchestrator = DesignOrchestrator::new(generator, MemoryDesignStore::new(), settings);
        orchestrator.design(&request, &locations, timestamp, &mut rng)?
    } else {
        let store = JsonFileStore::new(config.output_dir.value.clone());
        let orchestrator = DesignOrchestrator::new(generator, &store, settings);
        let outcome = orchestrator.design(&request, &locations, timestamp, &mut rng)?;

        output.success(format!("Saved to {}", store.latest_path().display()));
        if let (true, Some(result)) = (args.export, outcome.result()) {
            let paths = store.export_configurations(result)?;
            output.success(format!("Exported {} configuration file(s)", paths.len()));
        }
        outcome
    };

    if output.is_json() {
        output.result(&outcome)?;
    } else {
        render(&outcome, output);
    }

    if let DesignOutcome::Failed(failure) = &outcome {
        bail!("{}", failure.error);
    }
    Ok(())
}

/// Canned answer from `--response-file`, otherwise Ollama with retries
fn build_generator(args: &DesignArgs, config: &LayeredConfig) -> Result<Box<dyn Generator>> {
    if let Some(path) = &args.response_file {
        let generator = CannedGenerator::from_file(path)
            .with_context(|| format!("Failed to read generator response from {}", path.display()))?;
        return Ok(Box::new(generator));
    }

    let ollama =
        OllamaGenerator::new(&config.generator_url.value, &config.generator_model.value);
    tracing::info!(
        url = %config.generator_url.value,
        model = ollama.model_name(),
        "Using Ollama generator"
    );
    Ok(Box::new(RetryingGenerator::new(
        ollama,
        config.max_attempts.value,
        Duration::from_secs(config.retry_delay_secs.value),
    )))
}

fn render(outcome: &DesignOutcome, output: &OutputWriter) {
    match outcome {
        DesignOutcome::Completed(result) => render_result(result, output),
        DesignOutcome::Failed(failure) => {
            output.error(&failure.error);
            output.kv("Design", &failure.request.name);
        }
    }
}

fn render_result(result: &DesignResult, output: &OutputWriter) {
    output.section(format!("Design: {}", result.request.name));
    output.kv("Footprint", format!("{}m x {}m", result.request.length, result.request.width));
    output.kv("Total area", format!("{:.2} m²", result.summary.total_area));
    output.kv("Rooms", result.summary.room_count);
    output.kv(
        "Conditions",
        format!(
            "{}, {}",
            result.environmental_conditions.season, result.environmental_conditions.time_of_day
        ),
    );

    output.section("Room Areas");
    for (room, area) in &result.room_areas {
        let ratio = result.room_ratios.get(room).copied().unwrap_or_default();
        output.bullet(format!(
            "{}: {:.2} m² per room ({:.0}% of footprint)",
            room,
            area,
            ratio * 100.0
        ));
    }

    output.section("Configurations");
    output.table(result.configurations.iter().map(ConfigurationRow::from).collect());

    let Some(best) = result.best_configuration() else {
        return;
    };
    output.section(format!("Best: {}", best.name));
    output.info(&best.description);
    output.table(LocationRow::rows(&best.room_locations));
    output.text(layout_summary(&best.layout));
    for line in &best.energy_report.explanation {
        output.bullet(line);
    }
    for violation in &best.constraints.violations {
        output.warning(format!("{}: {}", violation.location, violation.reason));
    }
}
