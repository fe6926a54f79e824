//! Instantaneous electrical output of a tilted panel.
//!
//! Pipeline: air mass (Kasten-Young) → clear-sky direct irradiance scaled by
//! cloud cover → cosine of incidence on the panel → simplified cell heating →
//! linear temperature derating. Every result is floored at zero; there is no
//! upper clamp.

use pv_core::{Irradiance, Power, Real, floor_zero, m2, safe_acos, to_watts, w, w_per_m2};

use crate::geometry::SolarAngles;
use crate::params::SimulationParameters;

/// Extraterrestrial irradiance (W/m²).
pub const SOLAR_CONSTANT_W_M2: Real = 1361.0;
/// Relative efficiency change per °C above the reference temperature.
pub const TEMP_COEFFICIENT_PER_C: Real = -0.004;
/// Cell temperature at which `base_efficiency` is rated (°C).
pub const REFERENCE_TEMP_C: Real = 25.0;

const CLEAR_SKY_TRANSMITTANCE: Real = 0.7;
const AIR_MASS_EXPONENT: Real = 0.678;

// Kasten-Young coefficients
const KY_A: Real = 0.50572;
const KY_B_DEG: Real = 6.07995;
const KY_C: Real = 1.6364;

/// Irradiance at which the cell runs `HEATING_RISE_C` above ambient.
const HEATING_REFERENCE_W_M2: Real = 800.0;
const HEATING_RISE_C: Real = 20.0;

/// Electrical output at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerResult {
    /// DC power delivered by the panel (≥ 0)
    pub power: Power,
    /// Effective conversion efficiency including angle and temperature losses
    pub actual_efficiency: Real,
}

impl PowerResult {
    /// Output with the sun below the horizon.
    pub fn dark() -> Self {
        Self {
            power: w(0.0),
            actual_efficiency: 0.0,
        }
    }

    pub fn watts(&self) -> Real {
        to_watts(self.power)
    }
}

/// Intermediate terms of one power evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerBreakdown {
    pub air_mass: Real,
    pub direct_irradiance: Irradiance,
    pub incidence_deg: Real,
    /// cos(incidence) floored at zero
    pub angle_factor: Real,
    pub panel_temp_c: Real,
    pub temp_factor: Real,
    pub effective_irradiance: Irradiance,
    pub result: PowerResult,
}

/// Relative optical path length through the atmosphere.
pub fn air_mass(altitude_deg: Real) -> Real {
    1.0 / (altitude_deg.to_radians().sin() + KY_A * (altitude_deg + KY_B_DEG).powf(-KY_C))
}

/// Evaluate the power model, keeping every intermediate term.
///
/// Returns `None` when the sun is not visible: altitude ≤ 0, or any term
/// evaluates to a non-finite number.
pub fn power_breakdown(params: &SimulationParameters, angles: &SolarAngles) -> Option<PowerBreakdown> {
    // Written so that NaN also lands here.
    if !(angles.altitude_deg > 0.0) {
        return None;
    }

    let alt = angles.altitude_deg.to_radians();
    let tilt = params.panel_angle_deg.to_radians();

    let am = air_mass(angles.altitude_deg);
    let direct_w_m2 = SOLAR_CONSTANT_W_M2
        * CLEAR_SKY_TRANSMITTANCE.powf(am.powf(AIR_MASS_EXPONENT))
        * (1.0 - params.cloud_cover);

    let incidence = safe_acos(
        alt.sin() * tilt.cos()
            + alt.cos() * tilt.sin() * (angles.azimuth_deg - 180.0).to_radians().cos(),
    );
    let angle_factor = floor_zero(incidence.cos());

    let panel_temp_c = params.ambient_temp_c + (direct_w_m2 / HEATING_REFERENCE_W_M2) * HEATING_RISE_C;
    let temp_factor = 1.0 + (panel_temp_c - REFERENCE_TEMP_C) * TEMP_COEFFICIENT_PER_C;

    let direct_irradiance = w_per_m2(direct_w_m2);
    let effective_irradiance = direct_irradiance * angle_factor;
    let raw_power: Power =
        effective_irradiance * m2(params.panel_area_m2) * (params.base_efficiency * temp_factor);
    let raw_efficiency = params.base_efficiency * temp_factor * angle_factor;

    let raw_watts = to_watts(raw_power);
    if ![am, direct_w_m2, incidence, panel_temp_c, raw_watts, raw_efficiency]
        .iter()
        .all(|v| v.is_finite())
    {
        return None;
    }

    Some(PowerBreakdown {
        air_mass: am,
        direct_irradiance,
        incidence_deg: incidence.to_degrees(),
        angle_factor,
        panel_temp_c,
        temp_factor,
        effective_irradiance,
        result: PowerResult {
            power: w(floor_zero(raw_watts)),
            actual_efficiency: floor_zero(raw_efficiency),
        },
    })
}

/// Instantaneous power and efficiency for the given sun position.
pub fn compute_power(params: &SimulationParameters, angles: &SolarAngles) -> PowerResult {
    power_breakdown(params, angles)
        .map(|b| b.result)
        .unwrap_or_else(PowerResult::dark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::solar_angles;
    use pv_core::to_w_per_m2;

    fn overhead() -> SolarAngles {
        SolarAngles {
            altitude_deg: 90.0,
            azimuth_deg: 180.0,
        }
    }

    #[test]
    fn air_mass_is_one_at_zenith_and_grows_toward_horizon() {
        assert!((air_mass(90.0) - 1.0).abs() < 1e-3);
        assert!(air_mass(30.0) > 1.9 && air_mass(30.0) < 2.1);
        assert!(air_mass(5.0) > air_mass(30.0));
    }

    #[test]
    fn below_horizon_is_exactly_zero() {
        let p = SimulationParameters::default();
        for alt in [0.0, -0.001, -45.0] {
            let r = compute_power(
                &p,
                &SolarAngles {
                    altitude_deg: alt,
                    azimuth_deg: 90.0,
                },
            );
            assert_eq!(r.watts(), 0.0);
            assert_eq!(r.actual_efficiency, 0.0);
        }
    }

    #[test]
    fn nan_altitude_is_treated_as_dark() {
        let p = SimulationParameters::default();
        let angles = SolarAngles {
            altitude_deg: Real::NAN,
            azimuth_deg: 180.0,
        };
        assert!(power_breakdown(&p, &angles).is_none());
        assert_eq!(compute_power(&p, &angles), PowerResult::dark());
    }

    #[test]
    fn full_overcast_produces_no_power() {
        let p = SimulationParameters {
            cloud_cover: 1.0,
            ..Default::default()
        };
        let r = compute_power(&p, &overhead());
        assert_eq!(r.watts(), 0.0);
    }

    #[test]
    fn flat_panel_under_zenith_sun() {
        let p = SimulationParameters {
            cloud_cover: 0.0,
            panel_angle_deg: 0.0,
            ..Default::default()
        };
        let b = power_breakdown(&p, &overhead()).unwrap();
        assert!(b.incidence_deg.abs() < 1e-6);
        assert!((b.angle_factor - 1.0).abs() < 1e-12);
        // 1361 * 0.7^1 ≈ 952.7 W/m²
        let g = to_w_per_m2(b.direct_irradiance);
        assert!(g > 950.0 && g < 955.0, "{g}");
        // 25 + 952.7/800*20 ≈ 48.8 °C
        assert!((b.panel_temp_c - (25.0 + g / 40.0)).abs() < 1e-9);
        let expected = g * 10.0 * 0.22 * b.temp_factor;
        assert!((b.result.watts() - expected).abs() < 1e-6);
    }

    #[test]
    fn default_noon_output() {
        let p = SimulationParameters::default();
        let a = solar_angles(p.day_of_year, p.time_of_day_h, p.site_latitude_deg);
        let b = power_breakdown(&p, &a).unwrap();
        // alt ≈ 60.35°, AM ≈ 1.150, G ≈ 735.6 W/m², T_cell ≈ 43.4 °C
        assert!((b.air_mass - 1.15).abs() < 0.01, "{}", b.air_mass);
        assert!((b.panel_temp_c - 43.39).abs() < 0.1, "{}", b.panel_temp_c);
        let r = b.result;
        assert!(r.watts() > 1_400.0 && r.watts() < 1_500.0, "{}", r.watts());
        assert!(r.actual_efficiency > 0.19 && r.actual_efficiency < 0.205);
    }

    #[test]
    fn sun_behind_panel_contributes_nothing() {
        // Steep panel facing 180°, low sun from the opposite bearing.
        let p = SimulationParameters {
            panel_angle_deg: 90.0,
            cloud_cover: 0.0,
            ..Default::default()
        };
        let angles = SolarAngles {
            altitude_deg: 10.0,
            azimuth_deg: 0.0,
        };
        let b = power_breakdown(&p, &angles).unwrap();
        assert_eq!(b.angle_factor, 0.0);
        assert_eq!(b.result.watts(), 0.0);
        assert_eq!(b.result.actual_efficiency, 0.0);
    }

    #[test]
    fn extreme_heat_floors_power_at_zero() {
        let p = SimulationParameters {
            ambient_temp_c: 400.0,
            cloud_cover: 0.0,
            ..Default::default()
        };
        let b = power_breakdown(&p, &overhead()).unwrap();
        assert!(b.temp_factor < 0.0);
        assert_eq!(b.result.watts(), 0.0);
        assert_eq!(b.result.actual_efficiency, 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::solar_angles;
    use proptest::prelude::*;

    fn params_strategy() -> impl Strategy<Value = SimulationParameters> {
        (
            1u16..=365,
            0.0_f64..=24.0,
            0.0_f64..=1.0,
            -10.0_f64..=60.0,
            0.0_f64..=100.0,
            0.0_f64..=1.0,
            0.0_f64..=90.0,
        )
            .prop_map(|(day, time, cloud, temp, area, eff, angle)| SimulationParameters {
                day_of_year: day,
                time_of_day_h: time,
                cloud_cover: cloud,
                ambient_temp_c: temp,
                panel_area_m2: area,
                base_efficiency: eff,
                panel_angle_deg: angle,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn power_is_never_negative(p in params_strategy()) {
            let a = solar_angles(p.day_of_year, p.time_of_day_h, p.site_latitude_deg);
            let r = compute_power(&p, &a);
            prop_assert!(r.watts() >= 0.0);
            prop_assert!(r.actual_efficiency >= 0.0);
            if !a.is_sun_up() {
                prop_assert_eq!(r.watts(), 0.0);
                prop_assert_eq!(r.actual_efficiency, 0.0);
            }
        }

        #[test]
        fn efficiency_never_exceeds_rating_when_warm(
            p in params_strategy(),
            temp in 25.0_f64..=60.0,
        ) {
            let p = SimulationParameters { ambient_temp_c: temp, ..p };
            let a = solar_angles(p.day_of_year, p.time_of_day_h, p.site_latitude_deg);
            let r = compute_power(&p, &a);
            prop_assert!(r.actual_efficiency <= p.base_efficiency + 1e-12);
        }

        #[test]
        fn power_monotone_in_area(p in params_strategy(), a1 in 0.0_f64..50.0, extra in 0.0_f64..50.0) {
            let angles = solar_angles(p.day_of_year, p.time_of_day_h, p.site_latitude_deg);
            let small = compute_power(&SimulationParameters { panel_area_m2: a1, ..p }, &angles);
            let large = compute_power(&SimulationParameters { panel_area_m2: a1 + extra, ..p }, &angles);
            prop_assert!(small.watts() <= large.watts());
        }

        #[test]
        fn power_monotone_in_efficiency(p in params_strategy(), e1 in 0.0_f64..0.5, extra in 0.0_f64..0.5) {
            let angles = solar_angles(p.day_of_year, p.time_of_day_h, p.site_latitude_deg);
            let low = compute_power(&SimulationParameters { base_efficiency: e1, ..p }, &angles);
            let high = compute_power(&SimulationParameters { base_efficiency: e1 + extra, ..p }, &angles);
            prop_assert!(low.watts() <= high.watts());
        }
    }
}
