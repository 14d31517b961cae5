//! Room locations from free-text layout descriptions
//!
//! Descriptions follow the phrasing convention requested from the generator:
//! a room name, a connector and a location token, e.g. `客廳在位置A`. A token
//! may be followed by more locations separated by commas (`臥室在位置B,C`),
//! and several bedrooms can be introduced together with `臥室分別位於`.

use greenplan_core::models::{LocationId, RoomLocations, RoomType};

const CONNECTORS: [&str; 2] = ["位於", "在"];

const TOKEN_PREFIX: &str = "位置";

const LIST_SEPARATORS: [char; 3] = [',', '，', '、'];

/// Introduces a list of bedroom locations
pub const MULTI_BEDROOM_MARKER: &str = "臥室分別位於";

const CLAUSE_TERMINATORS: [&str; 4] = ["。", "；", ";", "\n"];

/// Names a room type goes by in descriptions
pub fn synonyms(room_type: RoomType) -> &'static [&'static str] {
    match room_type {
        RoomType::LivingRoom => &["客廳", "起居室"],
        RoomType::Bedroom => &["臥室", "房間"],
        RoomType::Kitchen => &["廚房"],
        RoomType::Bathroom => &["浴室", "衛生間", "廁所"],
    }
}

/// Map every room type to the locations a description assigns it
///
/// Locations are listed in order of appearance without duplicates. A room
/// the description never places gets an empty list.
pub fn extract_room_locations(description: &str) -> RoomLocations {
    let mut locations = RoomLocations::new();

    for room in RoomType::ALL {
        let mut hits = direct_matches(description, room);
        if room == RoomType::Bedroom {
            let listed = multi_bedroom_matches(description);
            if !listed.is_empty() {
                hits = listed;
            }
        }

        hits.sort_by_key(|(position, _)| *position);
        let ids = dedup(hits.into_iter().map(|(_, id)| id));
        if ids.is_empty() {
            tracing::warn!(room = %room, "No location found for room in the description");
        }
        locations.insert(room, ids);
    }

    locations
}

/// `synonym + connector + token` occurrences and their list continuations
fn direct_matches(description: &str, room: RoomType) -> Vec<(usize, LocationId)> {
    let mut hits = Vec::new();

    for synonym in synonyms(room) {
        for connector in CONNECTORS {
            let phrase = format!("{}{}", synonym, connector);
            for (start, _) in description.match_indices(&phrase) {
                let offset = start + phrase.len();
                collect_list(description, offset, &mut hits);
            }
        }
    }

    hits
}

/// Every token in the clauses following the multi-bedroom marker
fn multi_bedroom_matches(description: &str) -> Vec<(usize, LocationId)> {
    let mut hits = Vec::new();

    for (start, _) in description.match_indices(MULTI_BEDROOM_MARKER) {
        let clause_start = start + MULTI_BEDROOM_MARKER.len();
        let clause_len = clause_end(&description[clause_start..]);
        let clause = &description[clause_start..clause_start + clause_len];

        for (token_start, _) in clause.match_indices(TOKEN_PREFIX) {
            collect_list(description, clause_start + token_start, &mut hits);
        }
    }

    hits
}

/// Parse a token at `offset` plus any comma-separated continuation
fn collect_list(description: &str, offset: usize, hits: &mut Vec<(usize, LocationId)>) {
    let Some((id, consumed)) = strip_token(&description[offset..]) else {
        return;
    };
    hits.push((offset, id));

    let mut cursor = offset + consumed;
    while let Some((id, consumed)) = strip_list_item(&description[cursor..]) {
        hits.push((cursor, id));
        cursor += consumed;
    }
}

/// Length of the clause at the start of `text`
///
/// A clause ends at sentence punctuation, a line break or the name of a room
/// type other than bedroom.
fn clause_end(text: &str) -> usize {
    let terminators = CLAUSE_TERMINATORS.iter().copied();
    let other_rooms = RoomType::ALL
        .into_iter()
        .filter(|room| *room != RoomType::Bedroom)
        .flat_map(|room| synonyms(room).iter().copied());

    terminators.chain(other_rooms).filter_map(|stop| text.find(stop)).min().unwrap_or(text.len())
}

/// `位置X` at the start of `text`, with the number of bytes it spans
fn strip_token(text: &str) -> Option<(LocationId, usize)> {
    let rest = text.strip_prefix(TOKEN_PREFIX)?;
    let letter = rest.chars().next().filter(char::is_ascii_uppercase)?;
    let id = LocationId::from_letter(letter)?;
    Some((id, TOKEN_PREFIX.len() + letter.len_utf8()))
}

/// A separator followed by `位置X` or a bare capital `X`
fn strip_list_item(text: &str) -> Option<(LocationId, usize)> {
    let separator = text.chars().next()?;
    if !LIST_SEPARATORS.contains(&separator) {
        return None;
    }

    let after_separator = &text[separator.len_utf8()..];
    let item = after_separator.trim_start_matches(' ');
    let skipped = text.len() - item.len();

    if let Some((id, consumed)) = strip_token(item) {
        return Some((id, skipped + consumed));
    }

    let letter = item.chars().next()?;
    if !('A'..='D').contains(&letter) {
        return None;
    }
    // A capital starting a longer word is not a location
    let next = item[letter.len_utf8()..].chars().next();
    if next.is_some_and(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    LocationId::from_letter(letter).map(|id| (id, skipped + letter.len_utf8()))
}

fn dedup(ids: impl Iterator<Item = LocationId>) -> Vec<LocationId> {
    let mut unique = Vec::new();
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use LocationId::{A, B, C, D};

    #[test]
    fn test_direct_matches() {
        let locations = extract_room_locations("客廳位於位置A，臥室在位置B，廚房在位置C，浴室在位置D");
        assert_eq!(locations[&RoomType::LivingRoom], [A]);
        assert_eq!(locations[&RoomType::Bedroom], [B]);
        assert_eq!(locations[&RoomType::Kitchen], [C]);
        assert_eq!(locations[&RoomType::Bathroom], [D]);
    }

    #[test]
    fn test_multi_bedroom_marker() {
        let locations = extract_room_locations("客廳位於位置A，臥室分別位於位置B，位置C");
        assert_eq!(locations[&RoomType::LivingRoom], [A]);
        assert_eq!(locations[&RoomType::Bedroom], [B, C]);
        assert!(locations[&RoomType::Kitchen].is_empty());
        assert!(locations[&RoomType::Bathroom].is_empty());
    }

    #[test]
    fn test_marker_list_stops_at_next_room() {
        let locations =
            extract_room_locations("臥室分別位於位置C和位置B，廚房在位置D。客廳在位置A");
        assert_eq!(locations[&RoomType::Bedroom], [C, B]);
        assert_eq!(locations[&RoomType::Kitchen], [D]);
        assert_eq!(locations[&RoomType::LivingRoom], [A]);
    }

    #[test]
    fn test_marker_replaces_direct_bedroom_matches() {
        let locations = extract_room_locations("臥室在位置A。臥室分別位於位置C、位置D。");
        assert_eq!(locations[&RoomType::Bedroom], [C, D]);
    }

    #[test]
    fn test_comma_separated_continuation() {
        let locations = extract_room_locations("- 臥室在位置B,C,D\n- 浴室在位置A, B");
        assert_eq!(locations[&RoomType::Bedroom], [B, C, D]);
        assert_eq!(locations[&RoomType::Bathroom], [A, B]);
    }

    #[test]
    fn test_continuation_ignores_words() {
        let locations = extract_room_locations("廚房在位置C, Dining nook included");
        assert_eq!(locations[&RoomType::Kitchen], [C]);
    }

    #[test]
    fn test_synonyms_and_order_of_appearance() {
        let locations = extract_room_locations("衛生間在位置D，廁所位於位置B，起居室在位置C");
        assert_eq!(locations[&RoomType::Bathroom], [D, B]);
        assert_eq!(locations[&RoomType::LivingRoom], [C]);
    }

    #[test]
    fn test_duplicates_are_removed() {
        let locations = extract_room_locations("客廳在位置A，客廳位於位置A，起居室在位置A");
        assert_eq!(locations[&RoomType::LivingRoom], [A]);
    }

    #[test]
    fn test_unmatched_description() {
        let locations = extract_room_locations("An open-plan loft with a south-facing balcony");
        assert_eq!(locations.len(), 4);
        assert!(locations.values().all(Vec::is_empty));
    }

    #[test]
    fn test_lowercase_location_letters_are_not_tokens() {
        let locations = extract_room_locations("客廳在位置a，廚房在位置b, c");
        assert!(locations[&RoomType::LivingRoom].is_empty());
        assert!(locations[&RoomType::Kitchen].is_empty());
    }
}
