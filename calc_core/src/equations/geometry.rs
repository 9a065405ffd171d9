//! # Area and Volume Formulas
//!
//! Plan-area and layer-volume math shared by the material estimators.
//!
//! ## Notation
//!
//! - `l` = Length (ft)
//! - `w` = Width (ft)
//! - `t` = Layer depth / thickness (in)
//!
//! Depths are entered in inches and lengths in feet, matching how driveway
//! and mulch jobs are quoted; the 12 and 27 factors convert to cubic yards.

use crate::units::{CubicFeet, CubicYards, SqFt, Tons};

/// Plan area of a rectangle
///
/// # Formula
/// A = l × w
#[inline]
pub fn rectangle_area(l_ft: f64, w_ft: f64) -> SqFt {
    SqFt(l_ft * w_ft)
}

/// Volume of a uniform layer over a plan area
///
/// # Formula
/// V = A × t / 12   (cu ft)
#[inline]
pub fn layer_volume(area: SqFt, depth_in: f64) -> CubicFeet {
    CubicFeet(area.0 * depth_in / 12.0)
}

/// Cubic yards of material for a rectangular layer
///
/// # Formula
/// V = l × w × (t / 12) / 27
///
/// # Example
/// ```rust
/// use calc_core::equations::geometry::cubic_yards;
///
/// // 100 ft x 12 ft driveway, 12" deep
/// let volume = cubic_yards(100.0, 12.0, 12.0);
/// assert!((volume.0 - 44.44).abs() < 0.01);
/// ```
#[inline]
pub fn cubic_yards(l_ft: f64, w_ft: f64, depth_in: f64) -> CubicYards {
    layer_volume(rectangle_area(l_ft, w_ft), depth_in).into()
}

/// Weight of a bulk volume at a given density
///
/// # Formula
/// W = V × ρ   (tons, ρ in tons per cu yd)
#[inline]
pub fn tons_from_volume(volume: CubicYards, density_tons_per_yd3: f64) -> Tons {
    volume.to_tons(density_tons_per_yd3)
}

/// Shrink a room dimension by a border clearance on both sides
///
/// # Formula
/// d' = d − 2c   (clearance given in inches, result in feet)
#[inline]
pub fn inset_dimension(dimension_ft: f64, clearance_in: f64) -> f64 {
    dimension_ft - 2.0 * clearance_in / 12.0
}
