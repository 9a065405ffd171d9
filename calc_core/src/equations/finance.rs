//! # Financing Formulas
//!
//! Closed-form loan and lease payment math.
//!
//! ## Notation
//!
//! - `P` = Amount financed (principal)
//! - `r` = Periodic (monthly) interest rate = APR / 100 / 12
//! - `n` = Number of monthly payments
//! - `MF` = Lease money factor = APR / 2400
//!
//! Rates are passed as whole-number percentages (6.5 means 6.5 %) and divided
//! at the point of use.

use serde::{Deserialize, Serialize};

/// Monthly rate from an annual percentage rate
#[inline]
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / 12.0
}

/// Level monthly payment for a fully amortizing fixed-rate loan
///
/// # Formula
/// ```text
/// payment = P · r(1+r)^n / ((1+r)^n − 1)
/// payment = P / n                          when r = 0
/// ```
///
/// Returns 0.0 for a zero-length term rather than dividing by zero.
///
/// # Example
/// ```rust
/// use calc_core::equations::finance::annuity_payment;
///
/// let payment = annuity_payment(25_000.0, 6.5, 60);
/// assert!((payment - 489.15).abs() < 0.01);
///
/// assert_eq!(annuity_payment(12_000.0, 0.0, 48), 250.0);
/// ```
pub fn annuity_payment(principal: f64, annual_rate_pct: f64, n_months: u32) -> f64 {
    if n_months == 0 {
        return 0.0;
    }
    let n = n_months as f64;
    let r = monthly_rate(annual_rate_pct);
    if r == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + r).powf(n);
    principal * r * growth / (growth - 1.0)
}

/// Interest paid over the life of the loan
///
/// # Formula
/// total_interest = payment × n − P
#[inline]
pub fn total_interest(payment: f64, n_months: u32, principal: f64) -> f64 {
    payment * n_months as f64 - principal
}

/// Convert an APR (percent) to a lease money factor
///
/// # Example
/// ```rust
/// use calc_core::equations::finance::money_factor_from_apr;
///
/// assert!((money_factor_from_apr(4.8) - 0.002).abs() < 1e-12);
/// ```
#[inline]
pub fn money_factor_from_apr(apr_pct: f64) -> f64 {
    apr_pct / 2400.0
}

/// Components of a monthly lease payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeasePayment {
    /// (cap cost − residual) / n
    pub depreciation: f64,
    /// (cap cost + residual) × MF
    pub finance_charge: f64,
    /// depreciation + finance charge
    pub base_payment: f64,
    /// base payment × tax rate
    pub tax: f64,
    /// base payment + tax
    pub monthly_payment: f64,
}

/// Standard lease payment from adjusted cap cost and residual value
///
/// # Formula
/// ```text
/// depreciation = (cap − residual) / n
/// finance      = (cap + residual) · MF
/// monthly      = (depreciation + finance) · (1 + tax%/100)
/// ```
pub fn lease_payment(
    cap_cost: f64,
    residual_value: f64,
    money_factor: f64,
    n_months: u32,
    tax_pct: f64,
) -> LeasePayment {
    let depreciation = if n_months == 0 {
        0.0
    } else {
        (cap_cost - residual_value) / n_months as f64
    };
    let finance_charge = (cap_cost + residual_value) * money_factor;
    let base_payment = depreciation + finance_charge;
    let tax = base_payment * tax_pct / 100.0;
    LeasePayment {
        depreciation,
        finance_charge,
        base_payment,
        tax,
        monthly_payment: base_payment + tax,
    }
}
