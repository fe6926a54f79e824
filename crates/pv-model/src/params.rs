//! Immutable input snapshot for one recompute.

use pv_core::{Real, ensure_finite, ensure_in_range};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Fixed site latitude (Jakarta), degrees.
pub const SITE_LATITUDE_DEG: Real = -6.2;

/// All inputs of the model, captured once per recompute.
///
/// Fractions (`cloud_cover`, `base_efficiency`) are stored in `[0, 1]`, not percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParameters {
    /// Day of the year, 1..=365
    pub day_of_year: u16,
    /// Local solar time in hours, 0..=24
    pub time_of_day_h: Real,
    /// Cloud cover fraction, 0..=1
    pub cloud_cover: Real,
    /// Ambient air temperature (°C)
    pub ambient_temp_c: Real,
    /// Panel area (m²)
    pub panel_area_m2: Real,
    /// Nameplate efficiency at 25 °C, 0..=1
    pub base_efficiency: Real,
    /// Panel tilt from horizontal (degrees)
    pub panel_angle_deg: Real,
    /// Site latitude (degrees, negative south)
    pub site_latitude_deg: Real,
    /// Installed system cost (currency)
    pub system_cost: Real,
    /// Electricity tariff (currency per kWh)
    pub tariff_per_kwh: Real,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            day_of_year: 172,
            time_of_day_h: 12.0,
            cloud_cover: 0.20,
            ambient_temp_c: 25.0,
            panel_area_m2: 10.0,
            base_efficiency: 0.22,
            panel_angle_deg: 15.0,
            site_latitude_deg: SITE_LATITUDE_DEG,
            system_cost: 25_000_000.0,
            tariff_per_kwh: 1_445.0,
        }
    }
}

impl SimulationParameters {
    /// Same snapshot at a different time of day.
    pub fn at_time(self, time_of_day_h: Real) -> Self {
        Self {
            time_of_day_h,
            ..self
        }
    }

    /// Reject snapshots outside the ranges the model is defined for.
    pub fn validate(&self) -> ModelResult<()> {
        if !(1..=365).contains(&self.day_of_year) {
            return Err(ModelError::InvalidParameter {
                what: "day_of_year",
                reason: format!("{} is outside 1..=365", self.day_of_year),
            });
        }
        ensure_in_range(self.time_of_day_h, 0.0, 24.0, "time_of_day_h")?;
        ensure_in_range(self.cloud_cover, 0.0, 1.0, "cloud_cover")?;
        ensure_finite(self.ambient_temp_c, "ambient_temp_c")?;
        ensure_in_range(self.panel_area_m2, 0.0, Real::MAX, "panel_area_m2")?;
        ensure_in_range(self.base_efficiency, 0.0, 1.0, "base_efficiency")?;
        ensure_in_range(self.panel_angle_deg, 0.0, 90.0, "panel_angle_deg")?;
        ensure_in_range(self.site_latitude_deg, -90.0, 90.0, "site_latitude_deg")?;
        ensure_in_range(self.system_cost, 0.0, Real::MAX, "system_cost")?;
        ensure_in_range(self.tariff_per_kwh, 0.0, Real::MAX, "tariff_per_kwh")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_set() {
        let p = SimulationParameters::default();
        assert_eq!(p.day_of_year, 172);
        assert_eq!(p.time_of_day_h, 12.0);
        assert_eq!(p.cloud_cover, 0.20);
        assert_eq!(p.ambient_temp_c, 25.0);
        assert_eq!(p.panel_area_m2, 10.0);
        assert_eq!(p.base_efficiency, 0.22);
        assert_eq!(p.panel_angle_deg, 15.0);
        assert_eq!(p.site_latitude_deg, -6.2);
        assert_eq!(p.system_cost, 25_000_000.0);
        assert_eq!(p.tariff_per_kwh, 1_445.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn at_time_only_changes_time() {
        let p = SimulationParameters::default();
        let q = p.at_time(7.5);
        assert_eq!(q.time_of_day_h, 7.5);
        assert_eq!(SimulationParameters { time_of_day_h: 12.0, ..q }, p);
    }

    #[test]
    fn validate_rejects_day_zero() {
        let p = SimulationParameters {
            day_of_year: 0,
            ..Default::default()
        };
        let err = p.validate().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                what: "day_of_year",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_nan_and_out_of_range() {
        let nan_temp = SimulationParameters {
            ambient_temp_c: Real::NAN,
            ..Default::default()
        };
        assert!(nan_temp.validate().is_err());

        let overcast = SimulationParameters {
            cloud_cover: 1.2,
            ..Default::default()
        };
        let err = overcast.validate().unwrap_err();
        assert!(err.to_string().contains("cloud_cover"));
    }
}
