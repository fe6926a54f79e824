//! Solar position from day of year, local solar time and latitude.

use std::f64::consts::TAU;

use pv_core::{Real, safe_acos, safe_asin};

/// Amplitude of the seasonal declination swing (degrees).
const MAX_DECLINATION_DEG: Real = 23.45;
/// Earth rotation rate (degrees of hour angle per hour).
const DEG_PER_HOUR: Real = 15.0;
const SOLAR_NOON_H: Real = 12.0;

/// Sun position relative to the site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarAngles {
    /// Angle above the horizon (degrees)
    pub altitude_deg: Real,
    /// Compass bearing centered on 180° at solar noon (degrees)
    pub azimuth_deg: Real,
}

impl SolarAngles {
    pub fn is_sun_up(&self) -> bool {
        self.altitude_deg > 0.0
    }
}

pub fn declination_deg(day_of_year: u16) -> Real {
    -MAX_DECLINATION_DEG * (TAU / 365.0 * (Real::from(day_of_year) + 10.0)).cos()
}

pub fn hour_angle_deg(time_of_day_h: Real) -> Real {
    DEG_PER_HOUR * (time_of_day_h - SOLAR_NOON_H)
}

/// Compute altitude and azimuth for the given instant.
///
/// The azimuth ratio is clamped into `[-1, 1]` before the arc-cosine; when its
/// denominator vanishes (sun at zenith or a polar site) the raw azimuth is taken
/// as 0°, i.e. the sun is placed on the meridian.
pub fn solar_angles(day_of_year: u16, time_of_day_h: Real, latitude_deg: Real) -> SolarAngles {
    let lat = latitude_deg.to_radians();
    let decl = declination_deg(day_of_year).to_radians();
    let hour = hour_angle_deg(time_of_day_h).to_radians();

    let altitude = safe_asin(lat.sin() * decl.sin() + lat.cos() * decl.cos() * hour.cos());

    let ratio = (decl.sin() - altitude.sin() * lat.sin()) / (altitude.cos() * lat.cos());
    let raw_azimuth_deg = if ratio.is_finite() {
        safe_acos(ratio).to_degrees()
    } else {
        0.0
    };

    let azimuth_deg = if time_of_day_h <= SOLAR_NOON_H {
        180.0 - raw_azimuth_deg
    } else {
        180.0 + raw_azimuth_deg
    };

    SolarAngles {
        altitude_deg: altitude.to_degrees(),
        azimuth_deg,
    }
}
