//! Human-readable text output formatter

use crate::analysis::AnalysisReport;
use crate::energy::Timeframe;
use crate::error::Result;
use crate::format::OutputFormatter;

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &AnalysisReport, timeframe: Timeframe) -> Result<String> {
        let mut output = String::new();
        let dataset = &report.dataset;

        output.push_str(&format!("microgrid-scout analysis ({})\n", report.id));
        output.push_str(&format!("Location: {}\n\n", report.coordinates));

        output.push_str(&format!("Recommendation: {}\n", report.recommendation.label));
        output.push_str(&format!("  {}\n\n", report.recommendation.rationale));

        output.push_str("Site data:\n");
        output.push_str(&format!("  Peak sun hours:   {:.2} h/day\n", dataset.peak_sun_hours()));
        output.push_str(&format!("  Avg wind speed:   {:.1} mph\n", dataset.avg_wind_speed_mph()));
        output.push_str(&format!("  Houses (500 m):   {}\n", dataset.number_of_houses()));
        output.push_str(&format!("  Region:           {}\n", dataset.region()));
        output.push_str(&format!(
            "  Household usage:  {:.1} kWh/day\n\n",
            dataset.avg_daily_usage_kwh()
        ));

        output.push_str(&format!(
            "Estimated demand ({}): {:.0} kWh\n",
            timeframe,
            report.demand.get(timeframe)
        ));

        if !report.warnings.is_empty() {
            output.push_str("\nNotes:\n");
            for warning in &report.warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
        }

        Ok(output)
    }
}
