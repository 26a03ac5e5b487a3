//! JSON output formatter

use crate::analysis::AnalysisReport;
use crate::energy::Timeframe;
use crate::error::Result;
use crate::format::OutputFormatter;

/// JSON formatter - outputs the full report as pretty-printed JSON
///
/// All three demand figures are always present, so the timeframe is ignored.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON report"
    }

    fn format(&self, report: &AnalysisReport, _timeframe: Timeframe) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::report;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter
            .format(&report(vec!["degraded".to_string()]), Timeframe::Daily)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.get("id").is_some());
        assert_eq!(parsed["recommendation"]["category"], "solar");
        assert_eq!(parsed["dataset"]["region"], "DEFAULT");
        assert_eq!(parsed["dataset"]["number_of_houses"], 50);
        assert_eq!(parsed["warnings"][0], "degraded");
        assert!(parsed["demand"]["monthly"].is_number());
    }

    #[test]
    fn test_json_formatter_info() {
        assert_eq!(JsonFormatter.name(), "json");
        assert!(!JsonFormatter.description().is_empty());
    }
}
