//! Parameter sweeps over the daily model.
//!
//! A sweep varies one input across a linear range and evaluates the full
//! daily profile at each point. Points are independent, so they run on the
//! rayon pool; results come back in sweep order.

use std::fmt;

use pv_core::{Energy, Real, kwh, to_watts};
use pv_model::{FinancialSummary, SimulationParameters, sample_day, summarize};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{AppError, AppResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepParameter {
    DayOfYear,
    PanelAngle,
    CloudCover,
    PanelArea,
}

impl SweepParameter {
    /// Copy of `base` with this parameter set to `value`.
    ///
    /// Day values are rounded to the nearest day. Cloud cover is a fraction.
    pub fn apply(self, base: &SimulationParameters, value: Real) -> SimulationParameters {
        let mut params = *base;
        match self {
            SweepParameter::DayOfYear => {
                params.day_of_year = value.round().clamp(0.0, Real::from(u16::MAX)) as u16;
            }
            SweepParameter::PanelAngle => params.panel_angle_deg = value,
            SweepParameter::CloudCover => params.cloud_cover = value,
            SweepParameter::PanelArea => params.panel_area_m2 = value,
        }
        params
    }

    pub fn label(self) -> &'static str {
        match self {
            SweepParameter::DayOfYear => "day of year",
            SweepParameter::PanelAngle => "panel angle (°)",
            SweepParameter::CloudCover => "cloud cover (fraction)",
            SweepParameter::PanelArea => "panel area (m²)",
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Linear sweep of one parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepDefinition {
    pub parameter: SweepParameter,
    pub start: Real,
    pub end: Real,
    pub num_points: usize,
}

impl SweepDefinition {
    pub fn new(
        parameter: SweepParameter,
        start: Real,
        end: Real,
        num_points: usize,
    ) -> AppResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(AppError::Sweep("Sweep bounds must be finite".to_string()));
        }
        if num_points < 2 {
            return Err(AppError::Sweep(
                "Sweep must have at least 2 points".to_string(),
            ));
        }
        if (start - end).abs() < 1e-12 {
            return Err(AppError::Sweep(
                "Start and end values must be different".to_string(),
            ));
        }
        Ok(Self {
            parameter,
            start,
            end,
            num_points,
        })
    }

    /// Evenly spaced values; the last one is exactly `end`.
    pub fn points(&self) -> Vec<Real> {
        let delta = (self.end - self.start) / (self.num_points - 1) as Real;
        let mut points: Vec<Real> = (0..self.num_points)
            .map(|i| self.start + i as Real * delta)
            .collect();
        if let Some(last) = points.last_mut() {
            *last = self.end;
        }
        points
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} ({} points)",
            self.parameter, self.start, self.end, self.num_points
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPoint {
    pub value: Real,
    pub params: SimulationParameters,
    pub financial: FinancialSummary,
    /// Highest sampled power of the day
    pub peak_watts: Real,
}

/// Evaluate the daily model at every point of `sweep`.
///
/// Fails on the first point whose parameters are out of range.
pub fn run_sweep(base: &SimulationParameters, sweep: &SweepDefinition) -> AppResult<Vec<SweepPoint>> {
    let values = sweep.points();
    let params: Vec<SimulationParameters> = values
        .iter()
        .map(|&v| sweep.parameter.apply(base, v))
        .collect();
    for p in &params {
        p.validate()?;
    }

    debug!(%sweep, "Running sweep");
    let points = values
        .par_iter()
        .zip(params.par_iter())
        .map(|(&value, params)| {
            let profile = sample_day(params);
            let peak_watts = profile.peak().map_or(0.0, |s| to_watts(s.power));
            SweepPoint {
                value,
                params: *params,
                financial: summarize(&profile, params),
                peak_watts,
            }
        })
        .collect();
    Ok(points)
}

/// Sum of daily energy over days 1 to 365 with every other input held.
pub fn annual_energy(base: &SimulationParameters) -> AppResult<Energy> {
    base.validate()?;
    let total = (1..=365u16)
        .into_par_iter()
        .map(|day| {
            let params = SimulationParameters {
                day_of_year: day,
                ..*base
            };
            sample_day(&params).energy()
        })
        .reduce(|| kwh(0.0), |a, b| a + b);
    Ok(total)
}

/// Finest angle step `best_panel_angle` accepts, degrees.
pub const MIN_ANGLE_STEP_DEG: Real = 0.01;

/// Panel angle in `0..=90` (stepped by `step_deg`) with the most daily
/// energy. Lower angles win ties.
pub fn best_panel_angle(base: &SimulationParameters, step_deg: Real) -> AppResult<SweepPoint> {
    if !(step_deg.is_finite() && (MIN_ANGLE_STEP_DEG..=90.0).contains(&step_deg)) {
        return Err(AppError::Sweep(format!(
            "Angle step must be in [{MIN_ANGLE_STEP_DEG}, 90], got {step_deg}"
        )));
    }
    let num_points = (90.0 / step_deg).floor() as usize + 1;
    let end = step_deg * (num_points - 1) as Real;
    let sweep = SweepDefinition::new(SweepParameter::PanelAngle, 0.0, end, num_points)?;
    let points = run_sweep(base, &sweep)?;

    points
        .into_iter()
        .fold(None, |best: Option<SweepPoint>, p| match best {
            Some(b) if b.financial.daily_energy_kwh() >= p.financial.daily_energy_kwh() => Some(b),
            _ => Some(p),
        })
        .ok_or_else(|| AppError::Sweep("Angle sweep produced no points".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pv_core::to_kwh;

    #[test]
    fn definition_rejects_degenerate_ranges() {
        assert!(SweepDefinition::new(SweepParameter::PanelAngle, 0.0, 90.0, 1).is_err());
        assert!(SweepDefinition::new(SweepParameter::PanelAngle, 10.0, 10.0, 5).is_err());
        assert!(SweepDefinition::new(SweepParameter::PanelAngle, Real::NAN, 10.0, 5).is_err());
    }

    #[test]
    fn linear_points_hit_endpoints() {
        let sweep = SweepDefinition::new(SweepParameter::PanelAngle, 0.0, 90.0, 7).unwrap();
        let points = sweep.points();
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], 0.0);
        assert!((points[1] - 15.0).abs() < 1e-12);
        assert_eq!(points[6], 90.0);
    }

    #[test]
    fn apply_rounds_day() {
        let base = SimulationParameters::default();
        assert_eq!(SweepParameter::DayOfYear.apply(&base, 99.6).day_of_year, 100);
        assert_eq!(SweepParameter::CloudCover.apply(&base, 0.5).cloud_cover, 0.5);
        assert_eq!(SweepParameter::PanelArea.apply(&base, 20.0).panel_area_m2, 20.0);
    }

    #[test]
    fn sweep_results_stay_in_order() {
        let sweep = SweepDefinition::new(SweepParameter::PanelArea, 5.0, 50.0, 10).unwrap();
        let points = run_sweep(&SimulationParameters::default(), &sweep).unwrap();
        assert_eq!(points.len(), 10);
        for pair in points.windows(2) {
            assert!(pair[0].value < pair[1].value);
            assert!(pair[0].financial.daily_energy_kwh() < pair[1].financial.daily_energy_kwh());
        }
    }

    #[test]
    fn out_of_range_points_fail_the_sweep() {
        let sweep = SweepDefinition::new(SweepParameter::CloudCover, 0.0, 1.5, 4).unwrap();
        let err = run_sweep(&SimulationParameters::default(), &sweep).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn default_site_prefers_thirty_five_degrees() {
        let best = best_panel_angle(&SimulationParameters::default(), 5.0).unwrap();
        assert_eq!(best.value, 35.0);
        assert!(best.financial.daily_energy_kwh() > 11.0);
    }

    #[test]
    fn angle_step_must_be_positive() {
        let base = SimulationParameters::default();
        assert!(best_panel_angle(&base, 0.0).is_err());
        assert!(best_panel_angle(&base, 120.0).is_err());
        assert_eq!(best_panel_angle(&base, 90.0).unwrap().value, 0.0);
    }

    #[test]
    fn tiny_angle_steps_are_rejected() {
        let base = SimulationParameters::default();
        for step in [1e-300, 1e-6, MIN_ANGLE_STEP_DEG / 2.0] {
            let err = best_panel_angle(&base, step).unwrap_err();
            assert!(matches!(err, AppError::Sweep(_)), "{err}");
        }
    }

    #[test]
    fn annual_energy_is_between_extreme_days() {
        let base = SimulationParameters::default();
        let annual = to_kwh(annual_energy(&base).unwrap());
        // Daily yield ranges roughly 8.9 to 10.8 kWh across the year.
        assert!(annual > 365.0 * 8.5 && annual < 365.0 * 11.5, "{annual}");
    }
}
