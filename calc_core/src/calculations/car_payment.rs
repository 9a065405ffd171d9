//! # Car Loan & Lease Payment
//!
//! Monthly payment for financing or leasing a vehicle.
//!
//! ## Loan
//!
//! ```text
//! taxable   = price − trade_in
//! financed  = taxable × (1 + tax%) − down_payment
//! payment   = annuity(financed, APR, n)
//! ```
//!
//! The result also compares the payment across the common term presets.
//!
//! ## Lease
//!
//! ```text
//! cap cost  = price − down_payment − trade_in
//! residual  = price × residual%
//! payment   = ((cap − residual)/n + (cap + residual) × MF) × (1 + tax%)
//! ```
//!
//! The money factor is taken as given, or derived from an APR as APR / 2400.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::car_payment::{CarPayment, CarPaymentInput, PaymentMode};
//! use calc_core::calculations::run;
//!
//! let input = CarPaymentInput {
//!     vehicle_price: 30_000.0,
//!     down_payment: 6_000.0,
//!     sales_tax_pct: 7.0,
//!     interest_rate_pct: Some(6.5),
//!     term_months: 60,
//!     ..CarPaymentInput::loan()
//! };
//!
//! let result = run::<CarPayment>(&input).unwrap();
//! assert!((result.monthly_payment.value - 510.68).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::Quantity;
use crate::equations::finance::{annuity_payment, lease_payment, money_factor_from_apr, total_interest};
use crate::equations::rounding::{round_cents, round_to};
use crate::errors::{CalcError, CalcResult};
use crate::reference::financing::{MAX_MONEY_FACTOR, MAX_SALES_TAX_PCT, MAX_TERM_MONTHS, TERM_PRESETS_MONTHS};
use crate::validation::{check, check_optional, require_one_of, Choice, Constraint, FieldMap, FromFields};

/// Finance or lease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Loan,
    Lease,
}

impl Choice for PaymentMode {
    const OPTIONS: &'static [&'static str] = &["loan", "lease"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "loan" | "finance" => Some(PaymentMode::Loan),
            "lease" => Some(PaymentMode::Lease),
            _ => None,
        }
    }
}

/// Input parameters for a loan or lease payment.
///
/// ## JSON Example
///
/// ```json
/// {
///   "mode": "lease",
///   "vehicle_price": 35000,
///   "down_payment": 3000,
///   "residual_percent": 55,
///   "money_factor": 0.002,
///   "term_months": 36
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarPaymentInput {
    #[serde(default)]
    pub mode: PaymentMode,
    /// Negotiated price (dollars)
    pub vehicle_price: f64,
    #[serde(default)]
    pub down_payment: f64,
    /// Trade-in credit; reduces the taxable amount on a loan
    #[serde(default)]
    pub trade_in: f64,
    /// Sales tax percentage
    #[serde(default, alias = "sales_tax")]
    pub sales_tax_pct: f64,
    /// APR percentage. Required for a loan.
    #[serde(default, alias = "interest_rate")]
    pub interest_rate_pct: Option<f64>,
    pub term_months: u32,
    /// Lease only: residual as a percentage of price
    #[serde(default)]
    pub residual_percent: Option<f64>,
    /// Lease only: money factor, overrides `interest_rate_pct`
    #[serde(default)]
    pub money_factor: Option<f64>,
}

impl CarPaymentInput {
    /// Zeroed loan input for struct-update syntax
    pub fn loan() -> Self {
        Self {
            mode: PaymentMode::Loan,
            vehicle_price: 0.0,
            down_payment: 0.0,
            trade_in: 0.0,
            sales_tax_pct: 0.0,
            interest_rate_pct: None,
            term_months: 60,
            residual_percent: None,
            money_factor: None,
        }
    }

    /// Zeroed lease input for struct-update syntax
    pub fn lease() -> Self {
        Self {
            mode: PaymentMode::Lease,
            term_months: 36,
            ..Self::loan()
        }
    }

    /// Amount financed on a loan
    pub fn loan_principal(&self) -> f64 {
        let taxable = self.vehicle_price - self.trade_in;
        taxable * (1.0 + self.sales_tax_pct / 100.0) - self.down_payment
    }

    /// Adjusted capitalized cost on a lease
    pub fn cap_cost(&self) -> f64 {
        self.vehicle_price - self.down_payment - self.trade_in
    }

    pub fn residual_value(&self) -> f64 {
        self.vehicle_price * self.residual_percent.unwrap_or(0.0) / 100.0
    }

    /// Money factor given directly or derived from the APR
    pub fn effective_money_factor(&self) -> f64 {
        self.money_factor
            .or(self.interest_rate_pct.map(money_factor_from_apr))
            .unwrap_or(0.0)
    }
}

impl FromFields for CarPaymentInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        Ok(Self {
            mode: fields.choice_or("mode", PaymentMode::Loan)?,
            vehicle_price: fields.number("vehicle_price")?,
            down_payment: fields.number_or("down_payment", 0.0)?,
            trade_in: fields.number_or("trade_in", 0.0)?,
            sales_tax_pct: fields.number_or("sales_tax", 0.0)?,
            interest_rate_pct: fields.optional_number("interest_rate")?,
            term_months: fields.whole("term_months")?,
            residual_percent: fields.optional_number("residual_percent")?,
            money_factor: fields.optional_number("money_factor")?,
        })
    }
}

/// Payment at one of the preset terms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermOption {
    pub term_months: u32,
    pub monthly_payment: f64,
    pub total_interest: f64,
}

/// Loan amortization summary, all amounts in dollars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanBreakdown {
    pub taxable_amount: f64,
    pub sales_tax: f64,
    pub amount_financed: f64,
    pub total_interest: f64,
    pub total_of_payments: f64,
    /// Payments plus down payment and trade-in
    pub total_cost: f64,
    pub term_comparison: Vec<TermOption>,
}

/// Lease payment summary, all amounts in dollars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaseBreakdown {
    pub cap_cost: f64,
    pub residual_value: f64,
    pub money_factor: f64,
    /// APR equivalent of the money factor
    pub equivalent_apr: f64,
    pub depreciation: f64,
    pub finance_charge: f64,
    pub base_payment: f64,
    pub monthly_tax: f64,
    /// Payments plus down payment and trade-in
    pub total_lease_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PaymentDetail {
    Loan(LoanBreakdown),
    Lease(LeaseBreakdown),
}

/// Car payment results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarPaymentResult {
    pub monthly_payment: Quantity,
    pub term_months: u32,
    pub detail: PaymentDetail,
}

pub struct CarPayment;

impl CarPayment {
    fn validate_common(input: &CarPaymentInput) -> CalcResult<()> {
        check("vehicle_price", input.vehicle_price, Constraint::Positive)?;
        check("down_payment", input.down_payment, Constraint::NonNegative)?;
        check("trade_in", input.trade_in, Constraint::NonNegative)?;
        check(
            "sales_tax",
            input.sales_tax_pct,
            Constraint::Range { min: 0.0, max: MAX_SALES_TAX_PCT },
        )?;
        check_optional(
            "interest_rate",
            input.interest_rate_pct,
            Constraint::Range { min: 0.0, max: 100.0 },
        )?;
        check(
            "term_months",
            input.term_months as f64,
            Constraint::Range { min: 1.0, max: MAX_TERM_MONTHS as f64 },
        )?;
        Ok(())
    }

    fn evaluate_loan(input: &CarPaymentInput) -> LoanBreakdown {
        let rate = input.interest_rate_pct.unwrap_or(0.0);
        let taxable = input.vehicle_price - input.trade_in;
        let sales_tax = taxable * input.sales_tax_pct / 100.0;
        let principal = input.loan_principal();
        let payment = annuity_payment(principal, rate, input.term_months);
        let paid = payment * input.term_months as f64;

        let term_comparison = TERM_PRESETS_MONTHS
            .iter()
            .map(|&n| {
                let preset_payment = annuity_payment(principal, rate, n);
                TermOption {
                    term_months: n,
                    monthly_payment: round_cents(preset_payment),
                    total_interest: round_cents(total_interest(preset_payment, n, principal)),
                }
            })
            .collect();

        LoanBreakdown {
            taxable_amount: round_cents(taxable),
            sales_tax: round_cents(sales_tax),
            amount_financed: round_cents(principal),
            total_interest: round_cents(total_interest(payment, input.term_months, principal)),
            total_of_payments: round_cents(paid),
            total_cost: round_cents(paid + input.down_payment + input.trade_in),
            term_comparison,
        }
    }

    fn evaluate_lease(input: &CarPaymentInput) -> (f64, LeaseBreakdown) {
        let cap_cost = input.cap_cost();
        let residual = input.residual_value();
        let money_factor = input.effective_money_factor();
        let lease = lease_payment(cap_cost, residual, money_factor, input.term_months, input.sales_tax_pct);
        let total = lease.monthly_payment * input.term_months as f64 + input.down_payment + input.trade_in;

        let breakdown = LeaseBreakdown {
            cap_cost: round_cents(cap_cost),
            residual_value: round_cents(residual),
            money_factor,
            equivalent_apr: round_to(money_factor * 2400.0, 2),
            depreciation: round_cents(lease.depreciation),
            finance_charge: round_cents(lease.finance_charge),
            base_payment: round_cents(lease.base_payment),
            monthly_tax: round_cents(lease.tax),
            total_lease_cost: round_cents(total),
        };
        (lease.monthly_payment, breakdown)
    }
}

impl Calculator for CarPayment {
    const KIND: CalculatorKind = CalculatorKind::CarPayment;
    type Input = CarPaymentInput;
    type Output = CarPaymentResult;

    fn validate(input: &CarPaymentInput) -> CalcResult<()> {
        Self::validate_common(input)?;

        match input.mode {
            PaymentMode::Loan => {
                if input.interest_rate_pct.is_none() {
                    return Err(CalcError::missing_field("interest_rate"));
                }
                let principal = input.loan_principal();
                if principal <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "down_payment",
                        input.down_payment.to_string(),
                        format!("Down payment and trade-in cover the full price (financed {:.2})", principal),
                    ));
                }
            }
            PaymentMode::Lease => {
                let residual_pct = input
                    .residual_percent
                    .ok_or_else(|| CalcError::missing_field("residual_percent"))?;
                check("residual_percent", residual_pct, Constraint::Percentage)?;
                check_optional(
                    "money_factor",
                    input.money_factor,
                    Constraint::Range { min: 0.0, max: MAX_MONEY_FACTOR },
                )?;
                require_one_of(&[
                    ("interest_rate", input.interest_rate_pct.is_some()),
                    ("money_factor", input.money_factor.is_some()),
                ])?;

                let cap_cost = input.cap_cost();
                if cap_cost <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "down_payment",
                        input.down_payment.to_string(),
                        "Down payment and trade-in cover the full price",
                    ));
                }
                if cap_cost <= input.residual_value() {
                    return Err(CalcError::invalid_input(
                        "residual_percent",
                        residual_pct.to_string(),
                        "Residual value must be less than the capitalized cost",
                    ));
                }
            }
        }
        Ok(())
    }

    fn evaluate(input: &CarPaymentInput) -> CalcResult<CarPaymentResult> {
        let (payment, detail) = match input.mode {
            PaymentMode::Loan => {
                let rate = input.interest_rate_pct.unwrap_or(0.0);
                let payment = annuity_payment(input.loan_principal(), rate, input.term_months);
                (payment, PaymentDetail::Loan(Self::evaluate_loan(input)))
            }
            PaymentMode::Lease => {
                let (payment, breakdown) = Self::evaluate_lease(input);
                (payment, PaymentDetail::Lease(breakdown))
            }
        };

        Ok(CarPaymentResult {
            monthly_payment: Quantity::dollars(payment),
            term_months: input.term_months,
            detail,
        })
    }
}

impl Summary for CarPaymentResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        Some(("Monthly payment", self.monthly_payment))
    }

    fn details(&self) -> Vec<String> {
        match &self.detail {
            PaymentDetail::Loan(loan) => {
                let mut lines = vec![
                    format!("Amount financed: ${:.2}", loan.amount_financed),
                    format!("Sales tax: ${:.2}", loan.sales_tax),
                    format!("Total interest: ${:.2}", loan.total_interest),
                    format!("Total cost: ${:.2}", loan.total_cost),
                    "Other terms:".to_string(),
                ];
                for option in &loan.term_comparison {
                    lines.push(format!(
                        "  {} months: ${:.2}/mo, ${:.2} interest",
                        option.term_months, option.monthly_payment, option.total_interest
                    ));
                }
                lines
            }
            PaymentDetail::Lease(lease) => vec![
                format!("Capitalized cost: ${:.2}", lease.cap_cost),
                format!("Residual value: ${:.2}", lease.residual_value),
                format!("Money factor: {:.5} (~{}% APR)", lease.money_factor, lease.equivalent_apr),
                format!("Depreciation: ${:.2}/mo", lease.depreciation),
                format!("Finance charge: ${:.2}/mo", lease.finance_charge),
                format!("Total lease cost: ${:.2}", lease.total_lease_cost),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{run, run_fields};
    use proptest::prelude::*;

    fn loan_input() -> CarPaymentInput {
        CarPaymentInput {
            vehicle_price: 30_000.0,
            down_payment: 6_000.0,
            sales_tax_pct: 7.0,
            interest_rate_pct: Some(6.5),
            term_months: 60,
            ..CarPaymentInput::loan()
        }
    }

    fn lease_input() -> CarPaymentInput {
        CarPaymentInput {
            vehicle_price: 35_000.0,
            down_payment: 3_000.0,
            residual_percent: Some(55.0),
            money_factor: Some(0.002),
            term_months: 36,
            ..CarPaymentInput::lease()
        }
    }

    fn loan(result: &CarPaymentResult) -> &LoanBreakdown {
        match &result.detail {
            PaymentDetail::Loan(loan) => loan,
            PaymentDetail::Lease(_) => panic!("expected loan"),
        }
    }

    #[test]
    fn test_loan_payment() {
        // 30,000 * 1.07 - 6,000 = 26,100 financed
        let result = run::<CarPayment>(&loan_input()).unwrap();
        let breakdown = loan(&result);
        assert!((breakdown.amount_financed - 26_100.0).abs() < 1e-9);
        assert!((result.monthly_payment.value - 510.68).abs() < 0.01);
        assert!((breakdown.total_interest - 4_540.59).abs() < 0.02);
    }

    #[test]
    fn test_payment_matches_closed_form() {
        let input = loan_input();
        let result = run::<CarPayment>(&input).unwrap();
        let expected = annuity_payment(input.loan_principal(), 6.5, 60);
        assert!((result.monthly_payment.value - expected).abs() <= 0.01);

        let breakdown = loan(&result);
        let interest = expected * 60.0 - input.loan_principal();
        assert!((breakdown.total_interest - interest).abs() <= 0.01);
    }

    #[test]
    fn test_zero_rate_loan() {
        let input = CarPaymentInput {
            vehicle_price: 12_000.0,
            down_payment: 0.0,
            sales_tax_pct: 0.0,
            interest_rate_pct: Some(0.0),
            term_months: 48,
            ..CarPaymentInput::loan()
        };
        let result = run::<CarPayment>(&input).unwrap();
        assert_eq!(result.monthly_payment.value, 250.0);
        assert_eq!(loan(&result).total_interest, 0.0);
    }

    #[test]
    fn test_trade_in_reduces_taxable_amount() {
        let input = CarPaymentInput {
            trade_in: 5_000.0,
            down_payment: 0.0,
            ..loan_input()
        };
        let result = run::<CarPayment>(&input).unwrap();
        let breakdown = loan(&result);
        assert_eq!(breakdown.taxable_amount, 25_000.0);
        assert_eq!(breakdown.sales_tax, 1_750.0);
        assert_eq!(breakdown.amount_financed, 26_750.0);
    }

    #[test]
    fn test_term_comparison_covers_presets() {
        let result = run::<CarPayment>(&loan_input()).unwrap();
        let terms: Vec<u32> = loan(&result).term_comparison.iter().map(|t| t.term_months).collect();
        assert_eq!(terms, TERM_PRESETS_MONTHS.to_vec());
        // Longer terms lower the payment and raise the interest
        let options = &loan(&result).term_comparison;
        for pair in options.windows(2) {
            assert!(pair[1].monthly_payment < pair[0].monthly_payment);
            assert!(pair[1].total_interest > pair[0].total_interest);
        }
    }

    #[test]
    fn test_down_payment_covering_price_rejected() {
        let input = CarPaymentInput {
            down_payment: 40_000.0,
            ..loan_input()
        };
        let err = run::<CarPayment>(&input).unwrap_err();
        assert_eq!(err.field(), Some("down_payment"));
    }

    #[test]
    fn test_loan_requires_rate() {
        let input = CarPaymentInput {
            interest_rate_pct: None,
            ..loan_input()
        };
        assert_eq!(run::<CarPayment>(&input).unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_lease_payment() {
        // cap 32,000, residual 19,250: 354.17 depreciation + 102.50 finance
        let result = run::<CarPayment>(&lease_input()).unwrap();
        assert!((result.monthly_payment.value - 456.67).abs() < 0.01);
        match &result.detail {
            PaymentDetail::Lease(lease) => {
                assert_eq!(lease.cap_cost, 32_000.0);
                assert_eq!(lease.residual_value, 19_250.0);
                assert!((lease.equivalent_apr - 4.8).abs() < 1e-9);
            }
            PaymentDetail::Loan(_) => panic!("expected lease"),
        }
    }

    #[test]
    fn test_lease_apr_converts_to_money_factor() {
        let input = CarPaymentInput {
            money_factor: None,
            interest_rate_pct: Some(4.8),
            ..lease_input()
        };
        let from_apr = run::<CarPayment>(&input).unwrap();
        let direct = run::<CarPayment>(&lease_input()).unwrap();
        assert!((from_apr.monthly_payment.value - direct.monthly_payment.value).abs() < 0.01);
    }

    #[test]
    fn test_lease_needs_rate_or_money_factor() {
        let input = CarPaymentInput {
            money_factor: None,
            interest_rate_pct: None,
            ..lease_input()
        };
        assert_eq!(run::<CarPayment>(&input).unwrap_err().error_code(), "MISSING_ALTERNATIVE");
    }

    #[test]
    fn test_lease_residual_above_cap_cost() {
        let input = CarPaymentInput {
            down_payment: 20_000.0,
            ..lease_input()
        };
        let err = run::<CarPayment>(&input).unwrap_err();
        assert_eq!(err.field(), Some("residual_percent"));
    }

    #[test]
    fn test_from_fields() {
        let fields = FieldMap::new()
            .with("vehicle_price", "$30,000")
            .with("down_payment", "6000")
            .with("sales_tax", "7%")
            .with("interest_rate", "6.5")
            .with("term_months", "60");
        let result = run_fields::<CarPayment>(&fields).unwrap();
        assert!((result.monthly_payment.value - 510.68).abs() < 0.01);

        let bad = fields.clone().with("mode", "rent");
        assert_eq!(run_fields::<CarPayment>(&bad).unwrap_err().error_code(), "UNKNOWN_OPTION");
    }

    proptest! {
        #[test]
        fn prop_loan_is_deterministic(
            price in 1_000.0f64..100_000.0,
            rate in 0.0f64..25.0,
            term in 1u32..=120,
        ) {
            let input = CarPaymentInput {
                vehicle_price: price,
                interest_rate_pct: Some(rate),
                term_months: term,
                ..CarPaymentInput::loan()
            };
            let first = run::<CarPayment>(&input).unwrap();
            prop_assert_eq!(&first, &run::<CarPayment>(&input).unwrap());
            prop_assert!(loan(&first).total_interest >= -0.01);
        }
    }
}
