use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::GreenplanError;

/// Supported room categories
///
/// The set is closed: every other kind of space has to be folded into one of
/// these four.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RoomType {
    #[serde(alias = "living_room", alias = "客廳", alias = "起居室")]
    LivingRoom,
    #[serde(alias = "臥室", alias = "房間")]
    Bedroom,
    #[serde(alias = "廚房")]
    Kitchen,
    #[serde(alias = "浴室", alias = "衛生間", alias = "廁所")]
    Bathroom,
}

impl RoomType {
    /// All room types in canonical order
    pub const ALL: [RoomType; 4] =
        [RoomType::LivingRoom, RoomType::Bedroom, RoomType::Kitchen, RoomType::Bathroom];

    /// The camelCase key used in requests and results
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::LivingRoom => "livingRoom",
            RoomType::Bedroom => "bedroom",
            RoomType::Kitchen => "kitchen",
            RoomType::Bathroom => "bathroom",
        }
    }

    /// Primary Chinese name, as used in layout descriptions
    pub fn local_name(&self) -> &'static str {
        match self {
            RoomType::LivingRoom => "客廳",
            RoomType::Bedroom => "臥室",
            RoomType::Kitchen => "廚房",
            RoomType::Bathroom => "浴室",
        }
    }

    /// Two-letter code used to label room instances
    pub fn code(&self) -> &'static str {
        match self {
            RoomType::LivingRoom => "LR",
            RoomType::Bedroom => "BR",
            RoomType::Kitchen => "KT",
            RoomType::Bathroom => "BT",
        }
    }

    /// Instance code such as `BR02`
    pub fn instance_code(&self, index: usize) -> String {
        format!("{}{:02}", self.code(), index)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = GreenplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "livingroom" | "living_room" | "living-room" | "living" | "客廳" | "起居室" => {
                Ok(RoomType::LivingRoom)
            }
            "bedroom" | "bed_room" | "臥室" | "房間" => Ok(RoomType::Bedroom),
            "kitchen" | "廚房" => Ok(RoomType::Kitchen),
            "bathroom" | "bath_room" | "浴室" | "衛生間" | "廁所" => Ok(RoomType::Bathroom),
            _ => Err(GreenplanError::UnknownRoomType { name: trimmed.to_string() }),
        }
    }
}

/// Area allotted to one room type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomAllocation {
    /// Number of rooms of this type
    pub count: u32,

    /// Share of the total footprint given to all rooms of this type
    pub ratio: f64,

    /// Area of all rooms of this type combined
    pub total_area: f64,

    /// Area of a single room of this type
    pub unit_area: f64,
}

/// Result of distributing the footprint between room types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaAllocation {
    pub rooms: BTreeMap<RoomType, RoomAllocation>,
}

impl AreaAllocation {
    /// Allocation for a room type, if it was requested
    pub fn get(&self, room_type: RoomType) -> Option<&RoomAllocation> {
        self.rooms.get(&room_type)
    }

    /// Sum of all ratios
    pub fn ratio_sum(&self) -> f64 {
        self.rooms.values().map(|r| r.ratio).sum()
    }

    /// Ratio per room type
    pub fn ratios(&self) -> BTreeMap<RoomType, f64> {
        self.rooms.iter().map(|(room, a)| (*room, a.ratio)).collect()
    }

    /// Single-room area per room type
    pub fn unit_areas(&self) -> BTreeMap<RoomType, f64> {
        self.rooms.iter().map(|(room, a)| (*room, a.unit_area)).collect()
    }

    /// Total number of rooms across all types
    pub fn room_count(&self) -> u32 {
        self.rooms.values().map(|r| r.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_type_aliases() {
        assert_eq!("livingRoom".parse::<RoomType>().unwrap(), RoomType::LivingRoom);
        assert_eq!("living_room".parse::<RoomType>().unwrap(), RoomType::LivingRoom);
        assert_eq!("客廳".parse::<RoomType>().unwrap(), RoomType::LivingRoom);
        assert_eq!("房間".parse::<RoomType>().unwrap(), RoomType::Bedroom);
        assert_eq!("KITCHEN".parse::<RoomType>().unwrap(), RoomType::Kitchen);
        assert_eq!("衛生間".parse::<RoomType>().unwrap(), RoomType::Bathroom);
    }

    #[test]
    fn test_parse_unknown_room_type() {
        let err = "study".parse::<RoomType>().unwrap_err();
        assert!(matches!(err, GreenplanError::UnknownRoomType { ref name } if name == "study"));
    }

    #[test]
    fn test_instance_code() {
        assert_eq!(RoomType::Bedroom.instance_code(2), "BR02");
        assert_eq!(RoomType::LivingRoom.instance_code(1), "LR01");
    }

    #[test]
    fn test_room_type_serializes_as_camel_case_key() {
        let mut rooms = BTreeMap::new();
        rooms.insert(RoomType::LivingRoom, 1u32);
        rooms.insert(RoomType::Bedroom, 2u32);
        let json = serde_json::to_string(&rooms).unwrap();
        assert_eq!(json, r#"{"livingRoom":1,"bedroom":2}"#);
    }
}
