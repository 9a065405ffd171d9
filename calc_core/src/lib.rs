//! # calc_core - Quickfigure Calculation Engine
//!
//! `calc_core` powers the Quickfigure calculators: ten small, pure
//! calculators (bowling handicap, car payments, ad metrics, fence pickets,
//! floor joists, golf club length, gravel driveways, landscaping cost, rug
//! size and ambigram preview) sharing one engine. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and results implement Serialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Table-Driven**: Reference data lives in `const` tables, checked by tests
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{CalculatorKind, FieldMap};
//! use calc_core::calculations::Summary;
//!
//! let fields = FieldMap::new()
//!     .with("ad_spend", "500")
//!     .with("clicks", "250");
//!
//! let outcome = CalculatorKind::AdMetrics.run_fields(&fields).unwrap();
//! let (label, cpc) = outcome.headline().unwrap();
//! assert_eq!(label, "Cost per click");
//! assert_eq!(cpc.value, 2.0);
//! ```
//!
//! ## Modules
//!
//! - [`validation`] - Raw field parsing and range checks
//! - [`equations`] - Shared formulas (rounding, finance, geometry)
//! - [`reference`] - Lookup tables and the bracket / nearest matchers
//! - [`composer`] - Result building blocks (quantities, cost ranges, matches)
//! - [`calculations`] - The ten calculators and the generic engine
//! - [`settings`] - User defaults loaded from TOML
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod composer;
pub mod equations;
pub mod errors;
pub mod reference;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{run_request, CalculationOutcome, CalculationRequest, CalculatorKind};
pub use errors::{CalcError, CalcResult};
pub use settings::EngineSettings;
pub use validation::FieldMap;
