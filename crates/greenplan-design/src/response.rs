//! Candidate configurations from generator output
//!
//! Generators do not always return clean JSON: answers arrive wrapped in
//! prose or code fences and sometimes carry trailing commas. Parsing tries the
//! text as is first, then a repaired copy.

use greenplan_core::error::{GreenplanError, Result};
use greenplan_core::models::CandidateConfiguration;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

const TRAILING_COMMA: &str = r",\s*([}\]])";

/// Parse the candidate list out of a generator answer
///
/// Fails with `MalformedResponse` when no JSON object can be recovered or it
/// has no `configurations` array. Candidates without a name or a description
/// are dropped with a warning, so the list may come back empty.
pub fn parse_configurations(text: &str) -> Result<Vec<CandidateConfiguration>> {
    let document = parse_document(text)?;

    let Some(items) = document.get("configurations").and_then(Value::as_array) else {
        return Err(GreenplanError::MalformedResponse {
            reason: "response has no 'configurations' array".to_string(),
        });
    };

    let candidates: Vec<CandidateConfiguration> = items
        .iter()
        .enumerate()
        .filter_map(|(n, item)| {
            let candidate = candidate_from(item);
            if candidate.is_none() {
                tracing::warn!(index = n, "Discarding configuration without name or description");
            }
            candidate
        })
        .collect();

    tracing::debug!(received = items.len(), kept = candidates.len(), "Parsed configurations");
    Ok(candidates)
}

fn parse_document(text: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
        return Ok(value);
    }

    let repaired = repair(text)?;
    serde_json::from_str::<Value>(&repaired).map_err(|e| GreenplanError::MalformedResponse {
        reason: format!("response is not valid JSON: {}", e),
    })
}

/// Outermost `{...}` of `text` with trailing commas removed
fn repair(text: &str) -> Result<String> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(GreenplanError::MalformedResponse {
            reason: "response contains no JSON object".to_string(),
        });
    };
    if end < start {
        return Err(GreenplanError::MalformedResponse {
            reason: "response contains no JSON object".to_string(),
        });
    }

    let pattern = Regex::new(TRAILING_COMMA).map_err(|e| GreenplanError::MalformedResponse {
        reason: format!("repair pattern failed to compile: {}", e),
    })?;

    tracing::debug!("Repairing generator response");
    Ok(pattern.replace_all(&text[start..=end], "$1").into_owned())
}

fn candidate_from(item: &Value) -> Option<CandidateConfiguration> {
    let name = non_blank(item.get("name"))?;
    let description = non_blank(item.get("description"))?;

    Some(CandidateConfiguration {
        name,
        description,
        advantages: text_map(item.get("advantages")),
        considerations: text_map(item.get("considerations")),
    })
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

/// Object entries as text; non-string values keep their JSON spelling
fn text_map(value: Option<&Value>) -> BTreeMap<String, String> {
    let Some(Value::Object(map)) = value else {
        return BTreeMap::new();
    };

    map.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}
