//! Ad Platform Benchmarks
//!
//! Average cost-per-click, click-through rate and cost-per-thousand
//! impressions by platform, across all industries. Used to place a
//! campaign's metrics against typical market rates.

use serde::{Deserialize, Serialize};

use crate::validation::Choice;

/// Advertising platforms with published benchmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdPlatform {
    GoogleSearch,
    GoogleDisplay,
    Facebook,
    Instagram,
    #[serde(rename = "linkedin")]
    LinkedIn,
    Twitter,
    MicrosoftAds,
    #[serde(rename = "tiktok")]
    TikTok,
    Pinterest,
    #[serde(rename = "youtube")]
    YouTube,
}

impl Choice for AdPlatform {
    const OPTIONS: &'static [&'static str] = &[
        "google-search",
        "google-display",
        "facebook",
        "instagram",
        "linkedin",
        "twitter",
        "microsoft-ads",
        "tiktok",
        "pinterest",
        "youtube",
    ];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "google-search" | "google" | "google-ads" => Some(AdPlatform::GoogleSearch),
            "google-display" | "gdn" => Some(AdPlatform::GoogleDisplay),
            "facebook" | "meta" => Some(AdPlatform::Facebook),
            "instagram" => Some(AdPlatform::Instagram),
            "linkedin" => Some(AdPlatform::LinkedIn),
            "twitter" | "x" => Some(AdPlatform::Twitter),
            "microsoft-ads" | "bing" | "microsoft" => Some(AdPlatform::MicrosoftAds),
            "tiktok" => Some(AdPlatform::TikTok),
            "pinterest" => Some(AdPlatform::Pinterest),
            "youtube" => Some(AdPlatform::YouTube),
            _ => None,
        }
    }
}

/// Benchmark row for one platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformBenchmark {
    pub platform: AdPlatform,
    pub name: &'static str,
    /// Average cost per click ($)
    pub cpc: f64,
    /// Average click-through rate (%)
    pub ctr: f64,
    /// Average cost per 1000 impressions ($)
    pub cpm: f64,
}

pub const PLATFORM_BENCHMARKS: [PlatformBenchmark; 10] = [
    PlatformBenchmark { platform: AdPlatform::GoogleSearch, name: "Google Search", cpc: 2.69, ctr: 3.17, cpm: 38.40 },
    PlatformBenchmark { platform: AdPlatform::GoogleDisplay, name: "Google Display", cpc: 0.63, ctr: 0.46, cpm: 3.12 },
    PlatformBenchmark { platform: AdPlatform::Facebook, name: "Facebook", cpc: 1.72, ctr: 0.90, cpm: 14.40 },
    PlatformBenchmark { platform: AdPlatform::Instagram, name: "Instagram", cpc: 3.56, ctr: 0.22, cpm: 7.91 },
    PlatformBenchmark { platform: AdPlatform::LinkedIn, name: "LinkedIn", cpc: 5.26, ctr: 0.39, cpm: 33.80 },
    PlatformBenchmark { platform: AdPlatform::Twitter, name: "Twitter (X)", cpc: 0.38, ctr: 0.86, cpm: 6.46 },
    PlatformBenchmark { platform: AdPlatform::MicrosoftAds, name: "Microsoft Ads", cpc: 1.54, ctr: 2.83, cpm: 10.00 },
    PlatformBenchmark { platform: AdPlatform::TikTok, name: "TikTok", cpc: 1.00, ctr: 0.84, cpm: 10.00 },
    PlatformBenchmark { platform: AdPlatform::Pinterest, name: "Pinterest", cpc: 1.50, ctr: 0.30, cpm: 5.00 },
    PlatformBenchmark { platform: AdPlatform::YouTube, name: "YouTube", cpc: 0.49, ctr: 0.65, cpm: 9.68 },
];

/// Benchmark row for a platform. Every platform has one.
pub fn benchmark_for(platform: AdPlatform) -> Option<&'static PlatformBenchmark> {
    PLATFORM_BENCHMARKS.iter().find(|row| row.platform == platform)
}
