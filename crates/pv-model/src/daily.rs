//! Daily sampling and financial summary.

use pv_core::{Energy, Power, Real, hours, kwh, to_kwh, to_watts};

use crate::geometry::{SolarAngles, solar_angles};
use crate::params::SimulationParameters;
use crate::power::compute_power;

/// First sampled hour of the daylight window.
pub const SAMPLE_START_H: Real = 5.0;
/// Last sampled hour of the daylight window.
pub const SAMPLE_END_H: Real = 19.0;
/// Spacing between samples (hours).
pub const SAMPLE_STEP_H: Real = 0.5;
/// Number of samples in [`SAMPLE_START_H`, `SAMPLE_END_H`].
pub const SAMPLE_COUNT: usize = 29;

/// Billing month length used for savings.
const DAYS_PER_MONTH: Real = 30.0;
const MONTHS_PER_YEAR: Real = 12.0;

/// Sample hours `5.0, 5.5, …, 19.0`, each computed from its index.
pub fn sample_hours() -> impl Iterator<Item = Real> {
    (0..SAMPLE_COUNT).map(|i| SAMPLE_START_H + i as Real * SAMPLE_STEP_H)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileSample {
    pub hour: Real,
    pub angles: SolarAngles,
    pub power: Power,
}

/// Power across the sampled day with every other parameter held fixed.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyProfile {
    samples: Vec<ProfileSample>,
}

impl DailyProfile {
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    /// Rectangle-rule integral of the samples.
    pub fn energy(&self) -> Energy {
        self.samples
            .iter()
            .fold(kwh(0.0), |acc, s| acc + s.power * hours(SAMPLE_STEP_H))
    }

    /// Highest sample; the earliest one wins ties.
    pub fn peak(&self) -> Option<&ProfileSample> {
        self.samples.iter().fold(None, |best, s| match best {
            Some(b) if to_watts(b.power) >= to_watts(s.power) => Some(b),
            _ => Some(s),
        })
    }

    /// `[hour, watts]` pairs in sample order.
    pub fn points(&self) -> Vec<[Real; 2]> {
        self.samples
            .iter()
            .map(|s| [s.hour, to_watts(s.power)])
            .collect()
    }
}

/// Evaluate geometry and power at every sample hour.
pub fn sample_day(params: &SimulationParameters) -> DailyProfile {
    let samples = sample_hours()
        .map(|hour| {
            let at = params.at_time(hour);
            let angles = solar_angles(at.day_of_year, hour, at.site_latitude_deg);
            let power = compute_power(&at, &angles).power;
            ProfileSample {
                hour,
                angles,
                power,
            }
        })
        .collect();
    DailyProfile { samples }
}

/// Payback period of the installation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Payback {
    Years(Real),
    /// No savings, so the system never pays for itself.
    NotApplicable,
}

impl Payback {
    pub fn years(&self) -> Option<Real> {
        match self {
            Payback::Years(y) => Some(*y),
            Payback::NotApplicable => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FinancialSummary {
    pub daily_energy: Energy,
    pub monthly_savings: Real,
    pub payback: Payback,
}

impl FinancialSummary {
    pub fn daily_energy_kwh(&self) -> Real {
        to_kwh(self.daily_energy)
    }
}

/// Daily energy, monthly savings and payback for the profile.
pub fn summarize(profile: &DailyProfile, params: &SimulationParameters) -> FinancialSummary {
    let daily_energy = profile.energy();
    let monthly_savings = to_kwh(daily_energy) * DAYS_PER_MONTH * params.tariff_per_kwh;

    let payback = if monthly_savings > 0.0 {
        let years = params.system_cost / (monthly_savings * MONTHS_PER_YEAR);
        if years.is_finite() {
            Payback::Years(years)
        } else {
            Payback::NotApplicable
        }
    } else {
        Payback::NotApplicable
    };

    FinancialSummary {
        daily_energy,
        monthly_savings,
        payback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pv_core::w;

    #[test]
    fn sample_grid_is_exact() {
        let hours: Vec<Real> = sample_hours().collect();
        assert_eq!(hours.len(), SAMPLE_COUNT);
        assert_eq!(hours[0], 5.0);
        assert_eq!(hours[1], 5.5);
        assert_eq!(hours[14], 12.0);
        assert_eq!(hours[SAMPLE_COUNT - 1], SAMPLE_END_H);
    }

    #[test]
    fn profile_is_dark_at_edges_and_peaks_near_noon() {
        let profile = sample_day(&SimulationParameters::default());
        let s = profile.samples();
        assert_eq!(s.len(), SAMPLE_COUNT);
        assert_eq!(to_watts(s[0].power), 0.0);
        assert_eq!(to_watts(s[SAMPLE_COUNT - 1].power), 0.0);
        let peak = profile.peak().unwrap();
        assert_eq!(peak.hour, 12.0);
    }

    #[test]
    fn energy_is_half_hour_rectangles() {
        let profile = sample_day(&SimulationParameters::default());
        let wh: Real = profile.points().iter().map(|p| p[1] * 0.5).sum();
        assert!((to_kwh(profile.energy()) - wh / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn default_financials() {
        let params = SimulationParameters::default();
        let summary = summarize(&sample_day(&params), &params);
        let e = summary.daily_energy_kwh();
        assert!(e > 10.0 && e < 10.5, "{e}");
        assert!((summary.monthly_savings - e * 30.0 * 1445.0).abs() < 1e-6);
        let years = summary.payback.years().unwrap();
        assert!(years > 4.5 && years < 4.9, "{years}");
    }

    #[test]
    fn no_savings_means_not_applicable() {
        let overcast = SimulationParameters {
            cloud_cover: 1.0,
            ..Default::default()
        };
        let summary = summarize(&sample_day(&overcast), &overcast);
        assert_eq!(summary.daily_energy_kwh(), 0.0);
        assert_eq!(summary.monthly_savings, 0.0);
        assert_eq!(summary.payback, Payback::NotApplicable);

        let free_power = SimulationParameters {
            tariff_per_kwh: 0.0,
            ..Default::default()
        };
        let summary = summarize(&sample_day(&free_power), &free_power);
        assert_eq!(summary.payback, Payback::NotApplicable);
        assert_eq!(summary.payback.years(), None);
    }

    #[test]
    fn peak_prefers_earliest_of_equal_samples() {
        let night = DailyProfile {
            samples: vec![
                ProfileSample {
                    hour: 5.0,
                    angles: SolarAngles {
                        altitude_deg: -10.0,
                        azimuth_deg: 110.0,
                    },
                    power: w(0.0),
                },
                ProfileSample {
                    hour: 5.5,
                    angles: SolarAngles {
                        altitude_deg: -5.0,
                        azimuth_deg: 111.0,
                    },
                    power: w(0.0),
                },
            ],
        };
        assert_eq!(night.peak().unwrap().hour, 5.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clear_sky_energy_monotone_in_area(
            day in 1u16..=365,
            angle in 0.0_f64..=90.0,
            a1 in 0.0_f64..50.0,
            extra in 0.0_f64..50.0,
        ) {
            let base = SimulationParameters {
                day_of_year: day,
                cloud_cover: 0.0,
                panel_angle_deg: angle,
                ..Default::default()
            };
            let small = SimulationParameters { panel_area_m2: a1, ..base };
            let large = SimulationParameters { panel_area_m2: a1 + extra, ..base };
            let e_small = sample_day(&small).energy();
            let e_large = sample_day(&large).energy();
            prop_assert!(to_kwh(e_small) <= to_kwh(e_large));
        }
    }
}
