//! Closed-form photovoltaic output model.
//!
//! Provides:
//! - Immutable parameter snapshots
//! - Solar geometry (declination, hour angle, altitude, azimuth)
//! - Instantaneous power with air-mass, incidence and temperature derating
//! - Daily sampling and financial summary
//! - A full-recompute pipeline producing a [`Snapshot`]

pub mod daily;
pub mod error;
pub mod geometry;
pub mod params;
pub mod power;
pub mod snapshot;

// Re-exports for public API
pub use daily::{DailyProfile, FinancialSummary, Payback, ProfileSample, sample_day, summarize};
pub use error::{ModelError, ModelResult};
pub use geometry::{SolarAngles, declination_deg, hour_angle_deg, solar_angles};
pub use params::{SITE_LATITUDE_DEG, SimulationParameters};
pub use power::{PowerBreakdown, PowerResult, compute_power, power_breakdown};
pub use snapshot::{Snapshot, recompute};
