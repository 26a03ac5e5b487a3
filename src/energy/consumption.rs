//! Average household electricity consumption by country
//!
//! kWh per household per day. Every lookup resolves: unknown, empty and
//! sentinel codes all fall back to the global average.

/// Global average used when the region is unknown
pub const GLOBAL_AVERAGE_KWH: f64 = 9.6;

/// Per-country household consumption (kWh/day), keyed by ISO 3166-1 alpha-2
const TABLE: &[(&str, f64)] = &[
    ("US", 29.0),
    ("CA", 30.0),
    ("AU", 16.0),
    ("NZ", 19.0),
    ("GB", 8.5),
    ("IE", 11.5),
    ("DE", 8.5),
    ("FR", 12.5),
    ("ES", 9.0),
    ("IT", 7.0),
    ("NL", 7.5),
    ("SE", 22.0),
    ("NO", 40.0),
    ("JP", 11.0),
    ("KR", 10.5),
    ("CN", 6.5),
    ("IN", 3.0),
    ("BR", 5.0),
    ("MX", 5.0),
    ("ZA", 10.0),
    ("NG", 1.5),
    ("KE", 0.8),
    ("EG", 4.5),
    ("SA", 36.0),
    ("AE", 42.0),
];

/// Look up average daily household consumption for a region code
///
/// Matching is case-insensitive. Anything not in the table, including the
/// `DEFAULT` sentinel and the empty string, yields [`GLOBAL_AVERAGE_KWH`].
pub fn average_daily_usage(region: &str) -> f64 {
    let code = region.trim();
    TABLE
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(code))
        .map(|&(_, kwh)| kwh)
        .unwrap_or(GLOBAL_AVERAGE_KWH)
}

/// Region codes with a table entry
pub fn known_regions() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|&(code, _)| code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_region() {
        assert_eq!(average_daily_usage("US"), 29.0);
        assert_eq!(average_daily_usage("IN"), 3.0);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(average_daily_usage("de"), average_daily_usage("DE"));
    }

    #[test]
    fn test_unknown_region_falls_back() {
        assert_eq!(average_daily_usage("ZZ"), GLOBAL_AVERAGE_KWH);
        assert_eq!(average_daily_usage("BT"), 9.6);
    }

    #[test]
    fn test_sentinel_and_empty_fall_back() {
        assert_eq!(average_daily_usage("DEFAULT"), 9.6);
        assert_eq!(average_daily_usage(""), 9.6);
        assert_eq!(average_daily_usage("   "), 9.6);
    }

    #[test]
    fn test_table_codes_are_uppercase_pairs() {
        for code in known_regions() {
            assert_eq!(code.len(), 2);
            assert_eq!(code, code.to_uppercase());
        }
    }
}
