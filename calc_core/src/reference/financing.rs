//! Auto Financing Presets

/// Loan and lease terms dealers commonly quote, in months
pub const TERM_PRESETS_MONTHS: [u32; 6] = [24, 36, 48, 60, 72, 84];

/// Highest sales tax rate accepted (%)
pub const MAX_SALES_TAX_PCT: f64 = 25.0;

/// Longest term accepted (months)
pub const MAX_TERM_MONTHS: u32 = 120;

/// Highest money factor accepted (about 120% APR)
pub const MAX_MONEY_FACTOR: f64 = 0.05;
