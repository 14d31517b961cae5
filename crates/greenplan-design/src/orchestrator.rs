use chrono::NaiveDateTime;
use greenplan_core::config::LayeredConfig;
use greenplan_core::error::Result;
use greenplan_core::models::{
    AreaAllocation, CandidateConfiguration, Configuration, DesignFailure, DesignOutcome,
    DesignRequest, DesignResult, DesignSummary, EnvironmentConditions, EnvironmentRules, Footprint,
    LocationTable, MetaInfo, RoomLocations, RoomType, SpecialConditions,
};
use greenplan_core::ports::DesignStore;
use greenplan_engine::{
    adjust_for_conditions, allocate_areas, extract_room_locations, layout_for_allocation,
    resolve_samples, rules_for, validate_layout, ConstraintLimits, EnergyScorer, GradeThresholds,
};
use greenplan_llm::Generator;
use rand::Rng;

use crate::prompt::build_prompt;
use crate::response::parse_configurations;

/// Knobs of a design run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignSettings {
    /// Number of configurations requested from the generator
    pub candidate_count: usize,

    pub limits: ConstraintLimits,

    /// Grow rooms into leftover footprint after packing
    pub optimize: bool,

    pub conditions: SpecialConditions,
    pub thresholds: GradeThresholds,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            candidate_count: 3,
            limits: ConstraintLimits::default(),
            optimize: true,
            conditions: SpecialConditions::default(),
            thresholds: GradeThresholds::default(),
        }
    }
}

impl From<&LayeredConfig> for DesignSettings {
    fn from(config: &LayeredConfig) -> Self {
        Self {
            candidate_count: config.candidate_count.value,
            limits: ConstraintLimits {
                min_room_size: config.min_room_size.value,
                max_aspect_ratio: config.max_aspect_ratio.value,
            },
            ..Self::default()
        }
    }
}

/// Runs a request through allocation, generation, extraction and scoring
pub struct DesignOrchestrator<G, S>
where
    G: Generator,
    S: DesignStore,
{
    generator: G,
    store: S,
    settings: DesignSettings,
    scorer: EnergyScorer,
}

impl<G, S> DesignOrchestrator<G, S>
where
    G: Generator,
    S: DesignStore,
{
    pub fn new(generator: G, store: S, settings: DesignSettings) -> Self {
        let scorer = EnergyScorer::new(settings.thresholds);
        Self { generator, store, settings, scorer }
    }

    pub fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Design a layout for `request` at `timestamp`
    ///
    /// An invalid request or a store failure is an error. Anything that goes
    /// wrong on the generator side yields [`DesignOutcome::Failed`]. Every
    /// outcome is saved before it is returned.
    pub fn design<R: Rng>(
        &self,
        request: &DesignRequest,
        locations: &LocationTable,
        timestamp: NaiveDateTime,
        rng: &mut R,
    ) -> Result<DesignOutcome> {
        request.validate()?;
        tracing::info!(name = %request.name, rooms = request.room_count(), "Starting design run");

        let allocation = allocate_areas(&request.rooms, request.total_area(), rng)?;
        let rules = adjust_for_conditions(&rules_for(timestamp), self.settings.conditions);

        let prompt =
            build_prompt(request, &allocation, &rules, locations, self.settings.candidate_count);

        let outcome = match self.candidates(&prompt) {
            Ok(candidates) if !candidates.is_empty() => {
                let configurations: Vec<Configuration> = candidates
                    .into_iter()
                    .map(|c| self.evaluate(c, request, &allocation, &rules, locations))
                    .collect();
                DesignOutcome::Completed(self.assemble(
                    request,
                    &allocation,
                    rules,
                    locations,
                    timestamp,
                    configurations,
                ))
            }
            Ok(_) => failure(request, timestamp, "generator returned no usable configurations"),
            Err(e) => failure(request, timestamp, &e.to_string()),
        };

        let id = self.store.save(&outcome)?;
        tracing::info!(%id, completed = outcome.is_completed(), "Design run finished");
        Ok(outcome)
    }

    fn candidates(&self, prompt: &str) -> Result<Vec<CandidateConfiguration>> {
        let text = self.generator.generate(prompt, &[])?;
        parse_configurations(&text)
    }

    /// Score one candidate
    fn evaluate(
        &self,
        candidate: CandidateConfiguration,
        request: &DesignRequest,
        allocation: &AreaAllocation,
        rules: &EnvironmentRules,
        locations: &LocationTable,
    ) -> Configuration {
        let room_locations = extract_room_locations(&candidate.description);
        let samples = resolve_samples(&room_locations, locations);

        let footprint = Footprint::new(request.length, request.width);
        let order = room_order(&room_locations);
        let layout = layout_for_allocation(allocation, footprint, &order, self.settings.optimize);
        let constraints = validate_layout(allocation, &layout, &self.settings.limits);

        let rooms: Vec<RoomType> = allocation.rooms.keys().copied().collect();
        let scores = self.scorer.score(&rooms, &request.windows, &samples, rules);
        let energy_report = self.scorer.report(&scores);

        tracing::debug!(
            name = %candidate.name,
            total = scores.total_score,
            grade = %energy_report.grade,
            "Scored configuration"
        );

        Configuration {
            name: candidate.name,
            description: candidate.description,
            advantages: candidate.advantages,
            considerations: candidate.considerations,
            room_locations,
            layout,
            constraints,
            energy_report,
        }
    }

    fn assemble(
        &self,
        request: &DesignRequest,
        allocation: &AreaAllocation,
        rules: EnvironmentRules,
        locations: &LocationTable,
        timestamp: NaiveDateTime,
        configurations: Vec<Configuration>,
    ) -> DesignResult {
        let best_energy_efficiency = configurations
            .iter()
            .map(|c| c.energy_report.total_score)
            .fold(f64::NEG_INFINITY, f64::max);

        let summary = DesignSummary {
            total_area: request.total_area(),
            room_count: request.room_count(),
            configuration_count: configurations.len(),
            best_energy_efficiency,
        };

        DesignResult {
            meta_info: MetaInfo::new(timestamp),
            request: request.clone(),
            room_areas: allocation.unit_areas(),
            room_ratios: allocation.ratios(),
            locations: locations.clone(),
            environmental_conditions: EnvironmentConditions {
                season: rules.season,
                time_of_day: rules.time_of_day,
            },
            rules,
            configurations,
            summary,
        }
    }
}

fn failure(request: &DesignRequest, timestamp: NaiveDateTime, reason: &str) -> DesignOutcome {
    tracing::warn!(reason, "No valid configuration generated");
    DesignOutcome::Failed(DesignFailure {
        error: format!("No valid room configuration could be generated: {}", reason),
        request: request.clone(),
        timestamp,
    })
}

/// Room types ordered by the first location each was placed at
///
/// Ties keep canonical order. Rooms without locations are left out; the
/// layout appends them after the ordered ones.
pub fn room_order(locations: &RoomLocations) -> Vec<RoomType> {
    let mut placed: Vec<_> = RoomType::ALL
        .into_iter()
        .filter_map(|room| locations.get(&room).and_then(|ids| ids.first()).map(|id| (*id, room)))
        .collect();
    placed.sort_by_key(|(id, _)| *id);
    placed.into_iter().map(|(_, room)| room).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenplan_core::models::LocationId;

    #[test]
    fn test_room_order_follows_first_location() {
        let mut locations = RoomLocations::new();
        locations.insert(RoomType::LivingRoom, vec![LocationId::C]);
        locations.insert(RoomType::Bedroom, vec![LocationId::A, LocationId::D]);
        locations.insert(RoomType::Kitchen, Vec::new());
        locations.insert(RoomType::Bathroom, vec![LocationId::C]);

        assert_eq!(
            room_order(&locations),
            [RoomType::Bedroom, RoomType::LivingRoom, RoomType::Bathroom]
        );
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = LayeredConfig::with_defaults();
        config.candidate_count.value = 5;
        config.min_room_size.value = 7.5;

        let settings = DesignSettings::from(&config);
        assert_eq!(settings.candidate_count, 5);
        assert_eq!(settings.limits.min_room_size, 7.5);
        assert_eq!(settings.limits.max_aspect_ratio, 2.0);
        assert!(settings.optimize);
    }
}
