//! Input controls and the parameter reader.
//!
//! [`ControlState`] is the mutable state behind the sliders and number fields,
//! kept in the units the user sees (percent, whole days). Each recompute reads
//! it once into an immutable [`SimulationParameters`] snapshot.

use std::ops::RangeInclusive;

use pv_core::Real;
use pv_model::{SITE_LATITUDE_DEG, SimulationParameters};
use tracing::warn;

pub const DAY_RANGE: RangeInclusive<u16> = 1..=365;
pub const TIME_RANGE_H: RangeInclusive<Real> = 0.0..=24.0;
pub const TIME_STEP_H: Real = 0.25;
pub const CLOUD_RANGE_PCT: RangeInclusive<Real> = 0.0..=100.0;
pub const TEMP_RANGE_C: RangeInclusive<Real> = 0.0..=50.0;
pub const AREA_RANGE_M2: RangeInclusive<Real> = 1.0..=100.0;
pub const EFFICIENCY_RANGE_PCT: RangeInclusive<Real> = 0.0..=100.0;
pub const ANGLE_RANGE_DEG: RangeInclusive<Real> = 0.0..=90.0;
pub const LATITUDE_RANGE_DEG: RangeInclusive<Real> = -90.0..=90.0;

// Temperature and area sliders cover the usual rooftop; the model accepts more.
const TEMP_DOMAIN_C: RangeInclusive<Real> = Real::MIN..=Real::MAX;
const AREA_DOMAIN_M2: RangeInclusive<Real> = 0.0..=Real::MAX;

/// Anything that can produce the parameter snapshot for a recompute.
pub trait ParameterSource {
    fn read(&self) -> SimulationParameters;
}

/// Current values of every input control.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlState {
    pub day_of_year: u16,
    pub time_of_day_h: Real,
    pub cloud_pct: Real,
    pub temp_c: Real,
    pub area_m2: Real,
    pub efficiency_pct: Real,
    pub angle_deg: Real,
    pub system_cost: Real,
    pub tariff_per_kwh: Real,
    /// Not exposed as a slider; only scenario files change it.
    pub latitude_deg: Real,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            day_of_year: 172,
            time_of_day_h: 12.0,
            cloud_pct: 20.0,
            temp_c: 25.0,
            area_m2: 10.0,
            efficiency_pct: 22.0,
            angle_deg: 15.0,
            system_cost: 25_000_000.0,
            tariff_per_kwh: 1_445.0,
            latitude_deg: SITE_LATITUDE_DEG,
        }
    }
}

impl ControlState {
    /// Controls showing the given snapshot.
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            day_of_year: params.day_of_year,
            time_of_day_h: params.time_of_day_h,
            cloud_pct: params.cloud_cover * 100.0,
            temp_c: params.ambient_temp_c,
            area_m2: params.panel_area_m2,
            efficiency_pct: params.base_efficiency * 100.0,
            angle_deg: params.panel_angle_deg,
            system_cost: params.system_cost,
            tariff_per_kwh: params.tariff_per_kwh,
            latitude_deg: params.site_latitude_deg,
        }
    }
}

fn clamp_to(v: Real, range: &RangeInclusive<Real>, fallback: Real, what: &str) -> Real {
    if !v.is_finite() {
        warn!(what, value = v, fallback, "Rejected non-finite control value");
        return fallback;
    }
    let clamped = v.clamp(*range.start(), *range.end());
    if clamped != v {
        warn!(what, value = v, clamped, "Control value outside model range");
    }
    clamped
}

/// Free-form money fields: anything unparseable or negative reads as zero.
fn money(v: Real, what: &str) -> Real {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        warn!(what, value = v, "Rejected money value, using 0");
        0.0
    }
}

impl ParameterSource for ControlState {
    fn read(&self) -> SimulationParameters {
        let defaults = ControlState::default();
        SimulationParameters {
            day_of_year: self
                .day_of_year
                .clamp(*DAY_RANGE.start(), *DAY_RANGE.end()),
            time_of_day_h: clamp_to(
                self.time_of_day_h,
                &TIME_RANGE_H,
                defaults.time_of_day_h,
                "time_of_day_h",
            ),
            cloud_cover: clamp_to(self.cloud_pct, &CLOUD_RANGE_PCT, defaults.cloud_pct, "cloud_pct") / 100.0,
            ambient_temp_c: clamp_to(self.temp_c, &TEMP_DOMAIN_C, defaults.temp_c, "temp_c"),
            panel_area_m2: clamp_to(self.area_m2, &AREA_DOMAIN_M2, defaults.area_m2, "area_m2"),
            base_efficiency: clamp_to(
                self.efficiency_pct,
                &EFFICIENCY_RANGE_PCT,
                defaults.efficiency_pct,
                "efficiency_pct",
            ) / 100.0,
            panel_angle_deg: clamp_to(self.angle_deg, &ANGLE_RANGE_DEG, defaults.angle_deg, "angle_deg"),
            site_latitude_deg: clamp_to(
                self.latitude_deg,
                &LATITUDE_RANGE_DEG,
                defaults.latitude_deg,
                "latitude_deg",
            ),
            system_cost: money(self.system_cost, "system_cost"),
            tariff_per_kwh: money(self.tariff_per_kwh, "tariff_per_kwh"),
        }
    }
}

impl ParameterSource for SimulationParameters {
    fn read(&self) -> SimulationParameters {
        *self
    }
}
