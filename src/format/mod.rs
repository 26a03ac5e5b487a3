//! Output formatters
//!
//! Provides trait-based output formatting for analysis reports.

pub mod json;
pub mod text;

use crate::analysis::AnalysisReport;
use crate::energy::Timeframe;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format an analysis report
    ///
    /// # Arguments
    /// * `report` - The report to format
    /// * `timeframe` - Timeframe to present demand for
    fn format(&self, report: &AnalysisReport, timeframe: Timeframe) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON report".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
    ]
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::analysis::{AnalysisReport, ClimateSummary, Fused, LocationDataset, RegionCode};
    use crate::coord::Coordinates;

    pub fn report(warnings: Vec<String>) -> AnalysisReport {
        let dataset = LocationDataset::new(
            ClimateSummary {
                peak_sun_hours: 6.2,
                avg_wind_speed_mph: 7.5,
            },
            50,
            RegionCode::fallback(),
        );
        AnalysisReport::new(Coordinates::new(-23.5505, -46.6333), Fused { dataset, warnings })
    }
}
