//! Visual cues for the animated scene: sun placement, sky gradient, cloud
//! drift, panel glow and cast shadow. Styling only; nothing here feeds back
//! into the model.

use pv_core::{Real, floor_zero};
use pv_model::Snapshot;

/// Clouds drawn in the scene.
pub const CLOUD_COUNT: usize = 3;

/// Power density at which the panel glow saturates (W per m² of panel).
const GLOW_FULL_W_PER_M2: Real = 200.0;
const GLOW_MAX_BLUR_PX: Real = 20.0;
const GLOW_MAX_ALPHA: Real = 0.7;
const MAX_CLOUD_OPACITY: Real = 0.8;
/// The shadow is hidden while the sun is this low or lower (degrees).
const SHADOW_MIN_ALTITUDE_DEG: Real = 1.0;

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: Real,
    pub s: Real,
    pub l: Real,
}

impl Hsl {
    pub fn to_rgb(self) -> [u8; 3] {
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = self.h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: Real| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(r), channel(g), channel(b)]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub skew_deg: Real,
    pub scale_y: Real,
    pub opacity: Real,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCues {
    /// Horizontal sun position, percent of scene width
    pub sun_x_pct: Real,
    /// Vertical sun position, percent of scene height from the top
    pub sun_y_pct: Real,
    pub sun_visible: bool,
    pub sky_top: Hsl,
    pub sky_bottom: Hsl,
    pub cloud_opacity: Real,
    pub time_of_day_h: Real,
    /// Panel rotation as drawn (90° minus tilt)
    pub panel_rotation_deg: Real,
    /// Current power relative to the glow saturation point, 0..=1
    pub glow_ratio: Real,
    pub glow_blur_px: Real,
    pub glow_alpha: Real,
    pub shadow: Option<Shadow>,
}

impl SceneCues {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let altitude = snapshot.angles.altitude_deg;
        let azimuth = snapshot.angles.azimuth_deg;
        let params = &snapshot.params;

        let brightness = floor_zero(altitude / 90.0);

        let capacity = params.panel_area_m2 * GLOW_FULL_W_PER_M2;
        let glow_ratio = if capacity > 0.0 {
            (snapshot.power.watts() / capacity).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let shadow = (altitude > SHADOW_MIN_ALTITUDE_DEG).then(|| Shadow {
            skew_deg: -(azimuth - 180.0) * 0.4,
            scale_y: 0.5 + altitude / 180.0,
            opacity: 0.1 + 0.2 * (altitude / 90.0),
        });

        Self {
            sun_x_pct: azimuth / 360.0 * 100.0,
            sun_y_pct: 90.0 - altitude,
            sun_visible: altitude > 0.0,
            sky_top: Hsl {
                h: 200.0,
                s: 70.0,
                l: 50.0 + brightness * 25.0,
            },
            sky_bottom: Hsl {
                h: 210.0,
                s: 70.0,
                l: 20.0 + brightness * 40.0,
            },
            cloud_opacity: (params.cloud_cover * 2.0).min(MAX_CLOUD_OPACITY),
            time_of_day_h: params.time_of_day_h,
            panel_rotation_deg: 90.0 - params.panel_angle_deg,
            glow_ratio,
            glow_blur_px: GLOW_MAX_BLUR_PX * glow_ratio,
            glow_alpha: GLOW_MAX_ALPHA * glow_ratio,
            shadow,
        }
    }

    /// Horizontal offset of cloud `index` (pixels) in a scene `width` wide.
    /// Clouds drift with the time of day and re-enter from the left.
    pub fn cloud_offset_px(&self, index: usize, width: Real) -> Real {
        let speed = 50.0 + index as Real * 20.0;
        let start = -200.0 - index as Real * 50.0;
        (self.time_of_day_h * speed).rem_euclid(width + 300.0) + start
    }
}
