//! Presentation boundary: turns a [`Snapshot`] into what a frontend shows.

use pv_core::{Real, to_watts};
use pv_model::Snapshot;

use crate::format::{
    format_angle, format_area, format_chart_label, format_clock, format_cloud, format_day,
    format_efficiency, format_energy, format_money, format_payback, format_power,
    format_temperature,
};
use crate::scene::SceneCues;

/// Formatted output readouts and input labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Readouts {
    pub power: String,
    pub daily_energy: String,
    pub actual_efficiency: String,
    pub monthly_savings: String,
    pub payback: String,
    pub peak: String,
    pub day: String,
    pub time: String,
    pub cloud: String,
    pub temperature: String,
    pub area: String,
    pub efficiency: String,
    pub angle: String,
}

impl Readouts {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let p = &snapshot.params;
        let peak = snapshot
            .profile
            .peak()
            .filter(|s| to_watts(s.power) > 0.0)
            .map(|s| {
                format!(
                    "{} at {}",
                    format_power(to_watts(s.power)),
                    format_clock(s.hour)
                )
            })
            .unwrap_or_else(|| "N/A".to_string());

        Self {
            power: format_power(snapshot.power.watts()),
            daily_energy: format_energy(snapshot.financial.daily_energy_kwh()),
            actual_efficiency: format_efficiency(snapshot.power.actual_efficiency),
            monthly_savings: format_money(snapshot.financial.monthly_savings),
            payback: format_payback(snapshot.financial.payback),
            peak,
            day: format_day(p.day_of_year),
            time: format_clock(p.time_of_day_h),
            cloud: format_cloud(p.cloud_cover),
            temperature: format_temperature(p.ambient_temp_c),
            area: format_area(p.panel_area_m2),
            efficiency: format_efficiency(p.base_efficiency),
            angle: format_angle(p.panel_angle_deg),
        }
    }
}

/// Power against time of day for the line chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    /// `[hour, watts]`
    pub points: Vec<[Real; 2]>,
}

impl ChartSeries {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let points = snapshot.profile.points();
        let labels = points.iter().map(|p| format_chart_label(p[0])).collect();
        Self { labels, points }
    }

    pub fn max_watts(&self) -> Real {
        self.points.iter().map(|p| p[1]).fold(0.0, Real::max)
    }
}

/// Everything one recompute hands to the display.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    pub readouts: Readouts,
    pub scene: SceneCues,
    pub chart: ChartSeries,
}

impl Presentation {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            readouts: Readouts::from_snapshot(snapshot),
            scene: SceneCues::from_snapshot(snapshot),
            chart: ChartSeries::from_snapshot(snapshot),
        }
    }
}

/// Receiver of every recompute's output.
///
/// Sinks replace what they show; a new chart series is drawn as-is, with no
/// transition from the previous one.
pub trait PresentationSink {
    fn present(&mut self, presentation: &Presentation);
}

/// Sink that keeps only the most recent presentation.
#[derive(Debug, Default)]
pub struct LatestPresentation {
    latest: Option<Presentation>,
    count: u64,
}

impl LatestPresentation {
    pub fn get(&self) -> Option<&Presentation> {
        self.latest.as_ref()
    }

    /// Number of presentations received so far.
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl PresentationSink for LatestPresentation {
    fn present(&mut self, presentation: &Presentation) {
        self.latest = Some(presentation.clone());
        self.count += 1;
    }
}
