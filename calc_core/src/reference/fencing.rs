//! Fence Styles and Picket Prices

use serde::{Deserialize, Serialize};

use crate::validation::Choice;

/// Picket layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FenceStyle {
    /// Pickets separated by an even gap
    #[default]
    Standard,
    /// Pickets butted edge to edge
    Privacy,
    /// Alternating front/back pickets that overlap
    BoardOnBoard,
}

impl FenceStyle {
    /// Horizontal rails per section between posts
    pub fn rails_per_section(&self) -> u32 {
        match self {
            FenceStyle::Standard => 2,
            FenceStyle::Privacy | FenceStyle::BoardOnBoard => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FenceStyle::Standard => "Standard (spaced)",
            FenceStyle::Privacy => "Privacy",
            FenceStyle::BoardOnBoard => "Board-on-board",
        }
    }
}

impl Choice for FenceStyle {
    const OPTIONS: &'static [&'static str] = &["standard", "privacy", "boardonboard"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "standard" | "spaced" | "picket" => Some(FenceStyle::Standard),
            "privacy" | "solid" => Some(FenceStyle::Privacy),
            "boardonboard" | "board-on-board" | "shadowbox" => Some(FenceStyle::BoardOnBoard),
            _ => None,
        }
    }
}

/// Picket material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FenceWood {
    #[default]
    PressureTreated,
    Cedar,
    Redwood,
    Spruce,
}

impl FenceWood {
    /// Price band per picket (low, high) in dollars
    pub fn price_per_picket(&self) -> (f64, f64) {
        match self {
            FenceWood::PressureTreated => (2.00, 3.50),
            FenceWood::Cedar => (3.50, 6.00),
            FenceWood::Redwood => (5.00, 8.00),
            FenceWood::Spruce => (1.50, 2.75),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FenceWood::PressureTreated => "Pressure-treated pine",
            FenceWood::Cedar => "Western red cedar",
            FenceWood::Redwood => "Redwood",
            FenceWood::Spruce => "Spruce",
        }
    }
}

impl Choice for FenceWood {
    const OPTIONS: &'static [&'static str] = &["pressure-treated", "cedar", "redwood", "spruce"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "pressure-treated" | "pt" | "pine" => Some(FenceWood::PressureTreated),
            "cedar" => Some(FenceWood::Cedar),
            "redwood" => Some(FenceWood::Redwood),
            "spruce" => Some(FenceWood::Spruce),
            _ => None,
        }
    }
}
