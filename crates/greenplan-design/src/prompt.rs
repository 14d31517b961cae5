//! Prompt sent to the text generator
//!
//! The prompt carries the request, the allocated areas, the site readings and
//! the room rules, then pins down the phrasing convention that location
//! extraction relies on and the JSON shape of the answer.

use greenplan_core::models::{
    AreaAllocation, DesignRequest, EnvironmentRules, LocationTable, TimeOfDay,
};
use greenplan_engine::environment::summarize;
use std::fmt::Write;

/// Build the generator prompt for one design run
pub fn build_prompt(
    request: &DesignRequest,
    allocation: &AreaAllocation,
    rules: &EnvironmentRules,
    locations: &LocationTable,
    candidate_count: usize,
) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "Propose {} distinct, highly energy-efficient room layouts for the client below. \
         Each layout should have its own strengths while meeting the client's needs.",
        candidate_count
    );

    prompt.push_str("\n1. Client requirements\n");
    let _ = writeln!(prompt, "- Design name: {}", request.name);
    let _ = writeln!(
        prompt,
        "- Footprint: {}m x {}m (total area {:.2} m²)",
        request.length,
        request.width,
        request.total_area()
    );
    let rooms: Vec<String> = request
        .rooms
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(room, count)| format!("{} ({}) x{}", room.local_name(), room, count))
        .collect();
    let _ = writeln!(prompt, "- Rooms: {}", rooms.join(", "));
    let _ = writeln!(prompt, "- Windows: {}", window_sides(request));
    let _ = writeln!(
        prompt,
        "- Special requests: {}",
        request.special_request.as_deref().unwrap_or("none")
    );
    prompt.push_str(
        "Only the four room types living room, bedroom, kitchen and bathroom may be used. \
         Fold any other space in the special requests into one of them.\n",
    );

    prompt.push_str("\n2. Conditions\n");
    let _ = writeln!(prompt, "- Season: {}", rules.season);
    let time = match rules.time_of_day {
        TimeOfDay::Day => "daytime",
        TimeOfDay::Night => "night",
    };
    let _ = writeln!(prompt, "- Time: {}", time);

    prompt.push_str("\n3. Allocated areas\n");
    for (room, a) in &allocation.rooms {
        let _ = writeln!(
            prompt,
            "- {}: {} room(s) of {:.2} m² each, ratio {:.2}",
            room, a.count, a.unit_area, a.ratio
        );
    }

    prompt.push_str("\n4. Site readings\n");
    for (id, sample) in locations.iter() {
        let _ = writeln!(
            prompt,
            "- {}: temperature {}°C, humidity {}%, sunlight {} lux",
            id.token(),
            sample.temperature,
            sample.humidity,
            sample.sunlight
        );
    }

    prompt.push_str("\n5. Room environment rules\n");
    prompt.push_str(&summarize(rules));

    prompt.push_str(FORMAT_INSTRUCTIONS);
    let _ = writeln!(
        prompt,
        "Answer with valid JSON only: an object with a 'configurations' array holding {} \
         configuration objects. Quote every string with double quotes and use no comments \
         or trailing commas.",
        candidate_count
    );

    prompt
}

const FORMAT_INSTRUCTIONS: &str = r#"
Every configuration must follow this structure:
{
  "name": "a name reflecting the main features and energy strategy",
  "description": "a layout description that places every room with exactly these phrases:
      - 客廳在位置X
      - 臥室在位置X,Y (separate several bedrooms with commas)
      - 廚房在位置X
      - 浴室在位置X,Y (separate several bathrooms with commas)
    where X and Y are one of A, B, C or D, followed by how the placement uses the readings,
    daylight and ventilation to save energy",
  "advantages": {
    "client_requirements": "how the special requests are met",
    "environment_optimization": "how environmental factors are used",
    "space_utilization": "how the space is used efficiently",
    "functionality": "practical and energy-related considerations",
    "innovation": "distinctive energy-saving features"
  },
  "considerations": {
    "energy_efficiency": "energy-related caveats",
    "comfort": "comfort-related caveats"
  }
}

"#;

fn window_sides(request: &DesignRequest) -> String {
    let w = &request.windows;
    let sides: Vec<&str> = [(w.top, "top"), (w.right, "right"), (w.bottom, "bottom"), (w.left, "left")]
        .into_iter()
        .filter_map(|(open, side)| open.then_some(side))
        .collect();

    if sides.is_empty() {
        "none".to_string()
    } else {
        sides.join(", ")
    }
}
