//! Standard Rug Sizes
//!
//! Stock sizes sold by most retailers, in feet, narrow side first. Rounds
//! store the diameter in both fields.

use serde::{Deserialize, Serialize};

use crate::validation::Choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RugShape {
    #[default]
    Rectangle,
    Runner,
    Round,
}

impl Choice for RugShape {
    const OPTIONS: &'static [&'static str] = &["rectangle", "runner", "round"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "rectangle" | "rectangular" | "rect" => Some(RugShape::Rectangle),
            "runner" => Some(RugShape::Runner),
            "round" | "circle" | "circular" => Some(RugShape::Round),
            _ => None,
        }
    }
}

/// Room the rug is for; drives the default border clearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    #[default]
    Living,
    Bedroom,
    Dining,
    Hallway,
    Entry,
}

impl RoomType {
    /// Bare floor left between rug and wall on each side (in)
    pub fn default_clearance_in(&self) -> f64 {
        match self {
            RoomType::Living => 18.0,
            RoomType::Bedroom => 24.0,
            RoomType::Dining => 0.0,
            RoomType::Hallway => 6.0,
            RoomType::Entry => 12.0,
        }
    }
}

impl Choice for RoomType {
    const OPTIONS: &'static [&'static str] = &["living", "bedroom", "dining", "hallway", "entry"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "living" | "living-room" | "family" => Some(RoomType::Living),
            "bedroom" => Some(RoomType::Bedroom),
            "dining" | "dining-room" => Some(RoomType::Dining),
            "hallway" | "hall" => Some(RoomType::Hallway),
            "entry" | "entryway" | "foyer" => Some(RoomType::Entry),
            _ => None,
        }
    }
}

/// Chairs need this much rug past the table edge on every side (ft)
pub const DINING_CHAIR_ALLOWANCE_FT: f64 = 2.0;

/// A stock rug size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardRug {
    pub label: &'static str,
    pub width_ft: f64,
    pub length_ft: f64,
}

const fn rug(label: &'static str, width_ft: f64, length_ft: f64) -> StandardRug {
    StandardRug { label, width_ft, length_ft }
}

pub const RECTANGLE_SIZES: [StandardRug; 10] = [
    rug("2' x 3'", 2.0, 3.0),
    rug("3' x 5'", 3.0, 5.0),
    rug("4' x 6'", 4.0, 6.0),
    rug("5' x 8'", 5.0, 8.0),
    rug("6' x 9'", 6.0, 9.0),
    rug("8' x 10'", 8.0, 10.0),
    rug("9' x 12'", 9.0, 12.0),
    rug("10' x 14'", 10.0, 14.0),
    rug("12' x 15'", 12.0, 15.0),
    rug("12' x 18'", 12.0, 18.0),
];

pub const RUNNER_SIZES: [StandardRug; 7] = [
    rug("2'6\" x 6'", 2.5, 6.0),
    rug("2'6\" x 8'", 2.5, 8.0),
    rug("2'6\" x 10'", 2.5, 10.0),
    rug("2'6\" x 12'", 2.5, 12.0),
    rug("3' x 10'", 3.0, 10.0),
    rug("3' x 12'", 3.0, 12.0),
    rug("3' x 14'", 3.0, 14.0),
];

pub const ROUND_SIZES: [StandardRug; 7] = [
    rug("3' round", 3.0, 3.0),
    rug("4' round", 4.0, 4.0),
    rug("5' round", 5.0, 5.0),
    rug("6' round", 6.0, 6.0),
    rug("8' round", 8.0, 8.0),
    rug("10' round", 10.0, 10.0),
    rug("12' round", 12.0, 12.0),
];

/// Stock sizes for a shape, smallest first
pub fn sizes_for(shape: RugShape) -> &'static [StandardRug] {
    match shape {
        RugShape::Rectangle => &RECTANGLE_SIZES,
        RugShape::Runner => &RUNNER_SIZES,
        RugShape::Round => &ROUND_SIZES,
    }
}
