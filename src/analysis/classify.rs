//! Feasibility classifier
//!
//! First matching rule wins: strong wind, then strong sun, otherwise hybrid.

use crate::analysis::LocationDataset;
use crate::constants::thresholds::{SUN_HOURS, WIND_MPH};
use serde::{Deserialize, Serialize};

/// Recommended microgrid configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Solar,
    Wind,
    Hybrid,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Wind => "Wind Turbine",
            Self::Solar => "Solar Panels",
            Self::Hybrid => "Hybrid System (Solar + Storage)",
        }
    }

    pub fn rationale(self) -> &'static str {
        match self {
            Self::Wind => "Average wind speeds above 12 mph make a small wind turbine the most productive option.",
            Self::Solar => "More than 5.5 peak sun hours per day give solar panels a strong yield.",
            Self::Hybrid => {
                "Neither wind nor sun is strong enough alone; pair solar with battery storage to cover the gaps."
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solar => write!(f, "solar"),
            Self::Wind => write!(f, "wind"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub label: String,
    pub rationale: String,
}

impl From<Category> for Recommendation {
    fn from(category: Category) -> Self {
        Self {
            category,
            label: category.label().to_string(),
            rationale: category.rationale().to_string(),
        }
    }
}

/// Classify a dataset; total and side-effect free
pub fn classify(dataset: &LocationDataset) -> Recommendation {
    let category = if dataset.avg_wind_speed_mph() > WIND_MPH {
        Category::Wind
    } else if dataset.peak_sun_hours() > SUN_HOURS {
        Category::Solar
    } else {
        Category::Hybrid
    };
    category.into()
}
