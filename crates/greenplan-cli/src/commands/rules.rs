use crate::cli::RulesArgs;
use crate::output::OutputWriter;
use crate::output_types::RuleRow;
use anyhow::Result;
use greenplan_core::models::{Factor, SpecialConditions};
use greenplan_engine::{adjust_for_conditions, rules_for};

use super::timestamp_or_now;

pub fn execute(args: RulesArgs, output: &OutputWriter) -> Result<()> {
    let timestamp = timestamp_or_now(args.at);
    let conditions = SpecialConditions::from(&args.conditions);
    let rules = adjust_for_conditions(&rules_for(timestamp), conditions);

    if output.is_json() {
        return output.result(&rules);
    }

    output.section("Environment Rules");
    output.kv("Time", timestamp.format("%Y-%m-%d %H:%M"));
    output.kv("Season", rules.season);
    output.kv("Time of day", rules.time_of_day);
    if conditions.heat_wave {
        output.info("Heat wave: temperature targets raised by 2 °C");
    }
    if conditions.high_humidity_warning {
        output.info("High humidity warning: humidity targets lowered by 5 points");
    }

    let rows: Vec<RuleRow> = rules
        .rooms
        .iter()
        .flat_map(|(room, targets)| {
            Factor::ALL.into_iter().map(move |factor| {
                let target = targets.factor(factor);
                RuleRow {
                    room: room.to_string(),
                    factor: format!("{:?}", factor).to_lowercase(),
                    ideal: format!("{:.2}", target.ideal),
                    min: format!("{:.2}", target.min()),
                    max: format!("{:.2}", target.max()),
                }
            })
        })
        .collect();
    output.table(rows);
    Ok(())
}
