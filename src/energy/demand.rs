//! Demand projection over a selected timeframe

use crate::analysis::LocationDataset;
use serde::{Deserialize, Serialize};

/// Timeframe a daily demand figure is scaled to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    /// Number of days covered by this timeframe
    pub fn days(self) -> f64 {
        match self {
            Self::Daily => 1.0,
            Self::Weekly => 7.0,
            Self::Monthly => 30.0,
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::Daily
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            _ => {
                let names: Vec<String> = available_timeframes().iter().map(|tf| tf.to_string()).collect();
                Err(format!("Unknown timeframe: {} (available: {})", s, names.join(", ")))
            }
        }
    }
}

/// List all available timeframes
pub fn available_timeframes() -> Vec<Timeframe> {
    vec![Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly]
}

/// Project the community's electricity demand (kWh) over a timeframe
///
/// `houses × kWh/day/household × days`. Pure, so it can be re-run on every
/// timeframe change against an already-fused dataset.
pub fn project(dataset: &LocationDataset, timeframe: Timeframe) -> f64 {
    dataset.daily_demand_kwh() * timeframe.days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ClimateSummary, RegionCode};
    use approx::assert_relative_eq;
    use std::str::FromStr;

    fn dataset(houses: u64, region: &str) -> LocationDataset {
        LocationDataset::new(
            ClimateSummary {
                peak_sun_hours: 5.0,
                avg_wind_speed_mph: 8.0,
            },
            houses,
            RegionCode::new(region),
        )
    }

    #[test]
    fn test_projection_with_global_average() {
        let data = dataset(50, "DEFAULT");
        assert_relative_eq!(project(&data, Timeframe::Daily), 480.0, epsilon = 1e-9);
        assert_relative_eq!(project(&data, Timeframe::Weekly), 3360.0, epsilon = 1e-9);
        assert_relative_eq!(project(&data, Timeframe::Monthly), 14400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_uses_region_table() {
        let data = dataset(10, "US");
        assert_relative_eq!(project(&data, Timeframe::Daily), 290.0);
        assert_relative_eq!(project(&data, Timeframe::Weekly), 2030.0);
    }

    #[test]
    fn test_zero_houses() {
        let data = dataset(0, "US");
        assert_eq!(project(&data, Timeframe::Monthly), 0.0);
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!(Timeframe::from_str("weekly").unwrap(), Timeframe::Weekly);
        assert_eq!(Timeframe::from_str("Month").unwrap(), Timeframe::Monthly);
        let err = Timeframe::from_str("yearly").unwrap_err();
        assert!(err.contains("daily, weekly, monthly"));
    }

    #[test]
    fn test_timeframe_display_matches_parse() {
        for tf in available_timeframes() {
            assert_eq!(Timeframe::from_str(&tf.to_string()).unwrap(), tf);
        }
    }
}
