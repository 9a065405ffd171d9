//! # Reference Tables
//!
//! Static datasets the calculators match against. Every table is a `const`
//! array fixed at build time and never mutated; rows that represent ranges
//! are half-open and gap-free (checked by each module's tests).
//!
//! ## Tables
//!
//! - [`bowling`] - Skill tiers by average, common league formulas
//! - [`financing`] - Loan/lease term presets and limits
//! - [`advertising`] - Platform CPC/CTR/CPM benchmarks
//! - [`fencing`] - Fence styles, picket price bands
//! - [`lumber`] - Floor joist span tables and lumber prices
//! - [`golf`] - Club length adjustments and standard lengths
//! - [`aggregates`] - Gravel densities and prices
//! - [`landscaping`] - Installed unit costs and finish tiers
//! - [`rugs`] - Stock rug sizes
//! - [`letters`] - Letter-pair rotation scores
//!
//! The lookup strategies themselves live in [`matcher`].

pub mod advertising;
pub mod aggregates;
pub mod bowling;
pub mod fencing;
pub mod financing;
pub mod golf;
pub mod landscaping;
pub mod letters;
pub mod lumber;
pub mod matcher;
pub mod rugs;

pub use matcher::{bracket_lookup, nearest, validate_brackets, Bracket};
