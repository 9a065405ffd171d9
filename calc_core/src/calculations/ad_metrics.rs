//! # Ad Metrics
//!
//! Cost-per-click, cost-per-thousand-impressions and click-through rate for
//! a campaign, placed against platform benchmarks.
//!
//! Two ways in:
//!
//! - **Spend**: total spend and clicks (plus impressions and revenue when
//!   known). `CPC = spend / clicks`, `CPM = spend / impressions × 1000`,
//!   `CTR = clicks / impressions × 100`.
//! - **Rates**: a CPM and a CTR. `CPC = (CPM / 1000) / (CTR / 100)`.
//!
//! Zero clicks or impressions produce 0 rather than an infinite rate.

use serde::{Deserialize, Serialize};

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::{NetOutcome, Quantity, Ranked, Unit};
use crate::equations::rounding::{percent_of, round_cents, round_to, safe_div};
use crate::errors::{CalcError, CalcResult};
use crate::reference::advertising::{benchmark_for, AdPlatform, PlatformBenchmark, PLATFORM_BENCHMARKS};
use crate::reference::matcher::nearest;
use crate::validation::{check, check_optional, Choice, Constraint, FieldMap, FromFields};

/// How many benchmark platforms to list
pub const CLOSEST_PLATFORMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdMode {
    #[default]
    Spend,
    Rates,
}

impl Choice for AdMode {
    const OPTIONS: &'static [&'static str] = &["spend", "rates"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "spend" | "totals" => Some(AdMode::Spend),
            "rates" | "cpm" => Some(AdMode::Rates),
            _ => None,
        }
    }
}

/// Input parameters for campaign metrics.
///
/// ## JSON Example
///
/// ```json
/// {
///   "mode": "spend",
///   "ad_spend": 500,
///   "clicks": 250,
///   "impressions": 40000,
///   "revenue": 900,
///   "platform": "facebook"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdMetricsInput {
    #[serde(default)]
    pub mode: AdMode,
    /// Total spend (dollars). Spend mode.
    #[serde(default)]
    pub ad_spend: Option<f64>,
    /// Spend mode
    #[serde(default)]
    pub clicks: Option<u32>,
    #[serde(default)]
    pub impressions: Option<u32>,
    /// Revenue attributed to the campaign (dollars)
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Cost per 1000 impressions (dollars). Rates mode.
    #[serde(default)]
    pub cpm: Option<f64>,
    /// Click-through rate (percent). Rates mode.
    #[serde(default, alias = "ctr")]
    pub ctr_pct: Option<f64>,
    /// Platform to compare against
    #[serde(default)]
    pub platform: Option<AdPlatform>,
}

impl FromFields for AdMetricsInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        // Without an explicit mode, a CPM and no spend means rates mode
        let inferred = if fields.contains("cpm") && !fields.contains("ad_spend") {
            AdMode::Rates
        } else {
            AdMode::Spend
        };
        let platform = match fields.get("platform") {
            Some(raw) => Some(AdPlatform::parse_choice("platform", raw)?),
            None => None,
        };

        Ok(Self {
            mode: fields.choice_or("mode", inferred)?,
            ad_spend: fields.optional_number("ad_spend")?,
            clicks: fields.optional_whole("clicks")?,
            impressions: fields.optional_whole("impressions")?,
            revenue: fields.optional_number("revenue")?,
            cpm: fields.optional_number("cpm")?,
            ctr_pct: fields.optional_number("ctr")?,
            platform,
        })
    }
}

/// Return on the campaign
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitSummary {
    pub revenue: f64,
    pub spend: f64,
    pub net: f64,
    /// Return on ad spend (revenue / spend)
    pub roas: f64,
    pub outcome: NetOutcome,
}

/// How the campaign's CPC compares with one platform's average
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    pub platform: &'static str,
    pub benchmark_cpc: f64,
    pub your_cpc: f64,
    /// Positive when the campaign pays more per click than average
    pub difference_pct: f64,
}

/// Campaign metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdMetricsResult {
    pub cpc: Quantity,
    /// Present when impressions are known, or given directly
    pub cpm: Option<Quantity>,
    pub ctr: Option<Quantity>,
    pub profit: Option<ProfitSummary>,
    /// Platforms whose average CPC is closest to this campaign's
    pub closest_platforms: Vec<Ranked<PlatformBenchmark>>,
    pub platform_comparison: Option<BenchmarkComparison>,
}

/// Cost per click
///
/// # Example
/// ```rust
/// use calc_core::calculations::ad_metrics::cpc_from_spend;
///
/// assert_eq!(cpc_from_spend(500.0, 250.0), 2.0);
/// assert_eq!(cpc_from_spend(500.0, 0.0), 0.0);
/// ```
#[inline]
pub fn cpc_from_spend(spend: f64, clicks: f64) -> f64 {
    safe_div(spend, clicks)
}

/// Cost per click implied by a CPM and CTR
///
/// # Formula
/// CPC = (CPM / 1000) / (CTR / 100)
#[inline]
pub fn cpc_from_rates(cpm: f64, ctr_pct: f64) -> f64 {
    safe_div(cpm / 1000.0, ctr_pct / 100.0)
}

/// Cost per 1000 impressions
#[inline]
pub fn cpm_from_spend(spend: f64, impressions: f64) -> f64 {
    safe_div(spend, impressions) * 1000.0
}

/// Rates carry four decimals so sub-cent CPCs survive
fn rate(value: f64) -> Quantity {
    Quantity::new(round_to(value, 4), Unit::Dollars)
}

pub struct AdMetrics;

impl Calculator for AdMetrics {
    const KIND: CalculatorKind = CalculatorKind::AdMetrics;
    type Input = AdMetricsInput;
    type Output = AdMetricsResult;

    fn validate(input: &AdMetricsInput) -> CalcResult<()> {
        check_optional("revenue", input.revenue, Constraint::NonNegative)?;
        match input.mode {
            AdMode::Spend => {
                let spend = input.ad_spend.ok_or_else(|| CalcError::missing_field("ad_spend"))?;
                check("ad_spend", spend, Constraint::NonNegative)?;
                if input.clicks.is_none() {
                    return Err(CalcError::missing_field("clicks"));
                }
            }
            AdMode::Rates => {
                let cpm = input.cpm.ok_or_else(|| CalcError::missing_field("cpm"))?;
                check("cpm", cpm, Constraint::NonNegative)?;
                let ctr = input.ctr_pct.ok_or_else(|| CalcError::missing_field("ctr"))?;
                check("ctr", ctr, Constraint::Percentage)?;
            }
        }
        Ok(())
    }

    fn evaluate(input: &AdMetricsInput) -> CalcResult<AdMetricsResult> {
        let (cpc, cpm, ctr) = match input.mode {
            AdMode::Spend => {
                let spend = input.ad_spend.unwrap_or(0.0);
                let clicks = input.clicks.unwrap_or(0) as f64;
                let cpc = cpc_from_spend(spend, clicks);
                let by_impressions = input.impressions.map(|imp| {
                    let imp = imp as f64;
                    (cpm_from_spend(spend, imp), percent_of(clicks, imp))
                });
                (cpc, by_impressions.map(|(m, _)| m), by_impressions.map(|(_, c)| c))
            }
            AdMode::Rates => {
                let cpm = input.cpm.unwrap_or(0.0);
                let ctr = input.ctr_pct.unwrap_or(0.0);
                (cpc_from_rates(cpm, ctr), Some(cpm), Some(ctr))
            }
        };

        let profit = match (input.mode, input.revenue) {
            (AdMode::Spend, Some(revenue)) => {
                let spend = input.ad_spend.unwrap_or(0.0);
                let net = revenue - spend;
                Some(ProfitSummary {
                    revenue: round_cents(revenue),
                    spend: round_cents(spend),
                    net: round_cents(net),
                    roas: round_to(safe_div(revenue, spend), 2),
                    outcome: NetOutcome::of(net),
                })
            }
            _ => None,
        };

        let closest_platforms = nearest(&PLATFORM_BENCHMARKS, CLOSEST_PLATFORMS, |b| (b.cpc - cpc).abs())
            .into_iter()
            .map(|ranked| Ranked {
                distance: round_to(ranked.distance, 4),
                ..ranked.map(|row| *row)
            })
            .collect();

        let platform_comparison = input.platform.and_then(benchmark_for).map(|b| BenchmarkComparison {
            platform: b.name,
            benchmark_cpc: b.cpc,
            your_cpc: round_to(cpc, 4),
            difference_pct: round_to(percent_of(cpc - b.cpc, b.cpc), 1),
        });

        Ok(AdMetricsResult {
            cpc: rate(cpc),
            cpm: cpm.map(rate),
            ctr: ctr.map(|c| Quantity::new(round_to(c, 2), Unit::Percent)),
            profit,
            closest_platforms,
            platform_comparison,
        })
    }
}

impl Summary for AdMetricsResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        Some(("Cost per click", self.cpc))
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(cpm) = self.cpm {
            lines.push(format!("CPM: {}", cpm));
        }
        if let Some(ctr) = self.ctr {
            lines.push(format!("CTR: {}", ctr));
        }
        if let Some(profit) = &self.profit {
            lines.push(format!(
                "{}: ${:.2} (ROAS {:.2}x)",
                profit.outcome.label(),
                profit.net,
                profit.roas
            ));
        }
        if let Some(cmp) = &self.platform_comparison {
            let direction = if cmp.difference_pct >= 0.0 { "above" } else { "below" };
            lines.push(format!(
                "{:.1}% {} the {} average of ${:.2}",
                cmp.difference_pct.abs(),
                direction,
                cmp.platform,
                cmp.benchmark_cpc
            ));
        }
        lines.push("Closest platform averages:".to_string());
        for ranked in &self.closest_platforms {
            lines.push(format!("  {}. {} (${:.2} CPC)", ranked.rank, ranked.row.name, ranked.row.cpc));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{run, run_fields};
    use pretty_assertions::assert_eq;

    fn spend_input() -> AdMetricsInput {
        AdMetricsInput {
            mode: AdMode::Spend,
            ad_spend: Some(500.0),
            clicks: Some(250),
            impressions: None,
            revenue: None,
            cpm: None,
            ctr_pct: None,
            platform: None,
        }
    }

    #[test]
    fn test_cpc_from_spend() {
        let result = run::<AdMetrics>(&spend_input()).unwrap();
        assert_eq!(result.cpc.value, 2.0);
        assert!(result.cpm.is_none());
        assert!(result.ctr.is_none());
    }

    #[test]
    fn test_cpc_from_rates() {
        let input = AdMetricsInput {
            mode: AdMode::Rates,
            ad_spend: None,
            clicks: None,
            cpm: Some(10.0),
            ctr_pct: Some(2.0),
            ..spend_input()
        };
        let result = run::<AdMetrics>(&input).unwrap();
        assert_eq!(result.cpc.value, 0.5);
    }

    #[test]
    fn test_impressions_give_cpm_and_ctr() {
        let input = AdMetricsInput {
            impressions: Some(40_000),
            ..spend_input()
        };
        let result = run::<AdMetrics>(&input).unwrap();
        assert_eq!(result.cpm.unwrap().value, 12.5);
        assert_eq!(result.ctr.unwrap().value, 0.63);
    }

    #[test]
    fn test_zero_clicks_does_not_divide_by_zero() {
        let input = AdMetricsInput {
            clicks: Some(0),
            impressions: Some(0),
            ..spend_input()
        };
        let result = run::<AdMetrics>(&input).unwrap();
        assert_eq!(result.cpc.value, 0.0);
        assert_eq!(result.cpm.unwrap().value, 0.0);
        assert_eq!(result.ctr.unwrap().value, 0.0);
    }

    #[test]
    fn test_profit_labels() {
        let gain = run::<AdMetrics>(&AdMetricsInput {
            revenue: Some(900.0),
            ..spend_input()
        })
        .unwrap();
        let profit = gain.profit.unwrap();
        assert_eq!(profit.outcome, NetOutcome::Profit);
        assert_eq!(profit.net, 400.0);
        assert_eq!(profit.roas, 1.8);

        let loss = run::<AdMetrics>(&AdMetricsInput {
            revenue: Some(100.0),
            ..spend_input()
        })
        .unwrap();
        assert_eq!(loss.profit.unwrap().outcome, NetOutcome::Loss);
    }

    #[test]
    fn test_closest_platforms() {
        // $2.00 CPC: Facebook 1.72, Microsoft 1.54, Pinterest 1.50
        let result = run::<AdMetrics>(&spend_input()).unwrap();
        let names: Vec<&str> = result.closest_platforms.iter().map(|r| r.row.name).collect();
        assert_eq!(names, vec!["Facebook", "Microsoft Ads", "Pinterest"]);
        assert_eq!(result.closest_platforms[0].rank, 1);
    }

    #[test]
    fn test_platform_comparison() {
        let input = AdMetricsInput {
            platform: Some(AdPlatform::GoogleSearch),
            ..spend_input()
        };
        let cmp = run::<AdMetrics>(&input).unwrap().platform_comparison.unwrap();
        assert_eq!(cmp.platform, "Google Search");
        // (2.00 - 2.69) / 2.69 = -25.65%
        assert_eq!(cmp.difference_pct, -25.7);
    }

    #[test]
    fn test_missing_clicks() {
        let input = AdMetricsInput {
            clicks: None,
            ..spend_input()
        };
        let err = run::<AdMetrics>(&input).unwrap_err();
        assert_eq!(err.field(), Some("clicks"));
    }

    #[test]
    fn test_rates_mode_inferred_from_fields() {
        let fields = FieldMap::new().with("cpm", "10").with("ctr", "2%");
        let input = AdMetricsInput::from_fields(&fields).unwrap();
        assert_eq!(input.mode, AdMode::Rates);
        let result = run_fields::<AdMetrics>(&fields).unwrap();
        assert_eq!(result.cpc.value, 0.5);
    }

    #[test]
    fn test_ctr_out_of_range() {
        let fields = FieldMap::new().with("cpm", "10").with("ctr", "0");
        let err = run_fields::<AdMetrics>(&fields).unwrap_err();
        assert_eq!(err.field(), Some("ctr"));
    }
}
