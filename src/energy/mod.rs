//! Energy units, regional consumption and demand projection
//!
//! Pure functions and tables only; nothing in here touches the network.

pub mod consumption;
pub mod demand;

use crate::constants::climate::MJ_PER_KWH;

pub use consumption::average_daily_usage;
pub use demand::{project, Timeframe};

/// Convert a daily shortwave radiation sum (MJ/m²) to peak sun hours
///
/// One peak sun hour is 1 kWh/m² of irradiance, so this is a unit conversion.
pub fn sun_hours_from_radiation(radiation_mj: f64) -> f64 {
    radiation_mj / MJ_PER_KWH
}
