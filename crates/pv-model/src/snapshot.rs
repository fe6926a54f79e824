//! One full recompute: geometry → power → daily aggregate.

use crate::daily::{DailyProfile, FinancialSummary, sample_day, summarize};
use crate::geometry::{SolarAngles, solar_angles};
use crate::params::SimulationParameters;
use crate::power::{PowerBreakdown, PowerResult, power_breakdown};

/// Everything derived from one parameter snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub params: SimulationParameters,
    pub angles: SolarAngles,
    pub power: PowerResult,
    /// Intermediate power terms; `None` while the sun is not visible
    pub breakdown: Option<PowerBreakdown>,
    pub profile: DailyProfile,
    pub financial: FinancialSummary,
}

/// Recompute every derived value from scratch.
pub fn recompute(params: SimulationParameters) -> Snapshot {
    let angles = solar_angles(
        params.day_of_year,
        params.time_of_day_h,
        params.site_latitude_deg,
    );
    let breakdown = power_breakdown(&params, &angles);
    let power = breakdown
        .map(|b| b.result)
        .unwrap_or_else(PowerResult::dark);
    let profile = sample_day(&params);
    let financial = summarize(&profile, &params);

    Snapshot {
        params,
        angles,
        power,
        breakdown,
        profile,
        financial,
    }
}
