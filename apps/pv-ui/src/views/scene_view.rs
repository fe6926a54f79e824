//! Painted rooftop scene: sky, sun, drifting clouds, the tilted panel with its
//! glow and the shadow it casts.

use egui::{Color32, Pos2, Rect, Sense, Shape, Stroke, Vec2, pos2, vec2};
use pv_app::SceneCues;
use pv_app::scene::{CLOUD_COUNT, Hsl};

const SCENE_HEIGHT: f32 = 260.0;
const SKY_BANDS: usize = 24;
const SUN_RADIUS: f32 = 22.0;
const PANEL_LENGTH: f32 = 110.0;
const PANEL_THICKNESS: f32 = 8.0;

#[derive(Default)]
pub struct SceneView;

fn color(hsl: Hsl) -> Color32 {
    let [r, g, b] = hsl.to_rgb();
    Color32::from_rgb(r, g, b)
}

fn mix(a: Color32, b: Color32, t: f32) -> Color32 {
    let channel = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    Color32::from_rgb(
        channel(a.r(), b.r()),
        channel(a.g(), b.g()),
        channel(a.b(), b.b()),
    )
}

fn alpha(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Corners of a `length` x `thickness` bar centred on `center`, rotated
/// `rotation_deg` clockwise from vertical.
fn rotated_bar(center: Pos2, length: f32, thickness: f32, rotation_deg: f32) -> Vec<Pos2> {
    let theta = rotation_deg.to_radians();
    let along = vec2(theta.sin(), -theta.cos()) * (length / 2.0);
    let across = vec2(theta.cos(), theta.sin()) * (thickness / 2.0);
    vec![
        center - along - across,
        center + along - across,
        center + along + across,
        center - along + across,
    ]
}

impl SceneView {
    pub fn show(&mut self, ui: &mut egui::Ui, scene: &SceneCues) {
        let size = vec2(ui.available_width(), SCENE_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;

        Self::paint_sky(&painter, rect, scene);

        if scene.sun_visible {
            let sun = pos2(
                rect.left() + rect.width() * (scene.sun_x_pct / 100.0) as f32,
                rect.top() + rect.height() * (scene.sun_y_pct / 100.0) as f32,
            );
            painter.circle_filled(
                sun,
                SUN_RADIUS * 1.6,
                Color32::from_rgba_unmultiplied(255, 220, 90, 50),
            );
            painter.circle_filled(sun, SUN_RADIUS, Color32::from_rgb(255, 214, 64));
        }

        Self::paint_clouds(&painter, rect, scene);

        let ground_top = rect.bottom() - rect.height() * 0.18;
        painter.rect_filled(
            Rect::from_min_max(pos2(rect.left(), ground_top), rect.right_bottom()),
            0.0,
            Color32::from_rgb(70, 110, 60),
        );

        Self::paint_panel(&painter, pos2(rect.center().x, ground_top), scene);
    }

    fn paint_sky(painter: &egui::Painter, rect: Rect, scene: &SceneCues) {
        let top = color(scene.sky_top);
        let bottom = color(scene.sky_bottom);
        let band_height = rect.height() / SKY_BANDS as f32;
        for i in 0..SKY_BANDS {
            let t = i as f32 / (SKY_BANDS - 1) as f32;
            let band = Rect::from_min_size(
                pos2(rect.left(), rect.top() + i as f32 * band_height),
                vec2(rect.width(), band_height + 1.0),
            );
            painter.rect_filled(band, 0.0, mix(top, bottom, t));
        }
    }

    fn paint_clouds(painter: &egui::Painter, rect: Rect, scene: &SceneCues) {
        let fill = Color32::from_white_alpha(alpha(scene.cloud_opacity));
        for i in 0..CLOUD_COUNT {
            let x = rect.left() + scene.cloud_offset_px(i, f64::from(rect.width())) as f32;
            let y = rect.top() + 30.0 + i as f32 * 28.0;
            for (dx, dy, r) in [(0.0, 0.0, 18.0), (20.0, -8.0, 22.0), (42.0, 0.0, 17.0)] {
                painter.circle_filled(pos2(x + dx, y + dy), r, fill);
            }
        }
    }

    fn paint_panel(painter: &egui::Painter, base: Pos2, scene: &SceneCues) {
        let center = base - vec2(0.0, PANEL_LENGTH * 0.45);

        if let Some(shadow) = scene.shadow {
            let skew = (shadow.skew_deg as f32).to_radians().tan();
            let height = PANEL_THICKNESS * 2.0 * shadow.scale_y as f32;
            let half = PANEL_LENGTH / 2.0;
            let points = vec![
                base + vec2(-half, 0.0),
                base + vec2(half, 0.0),
                base + vec2(half + skew * height, height),
                base + vec2(-half + skew * height, height),
            ];
            painter.add(Shape::convex_polygon(
                points,
                Color32::from_black_alpha(alpha(shadow.opacity)),
                Stroke::NONE,
            ));
        }

        painter.line_segment(
            [base, center + vec2(0.0, PANEL_LENGTH * 0.1)],
            Stroke::new(4.0, Color32::from_gray(90)),
        );

        let rotation = scene.panel_rotation_deg as f32;
        if scene.glow_ratio > 0.0 {
            let blur = scene.glow_blur_px as f32;
            let glow = rotated_bar(
                center,
                PANEL_LENGTH + blur * 2.0,
                PANEL_THICKNESS + blur * 2.0,
                rotation,
            );
            painter.add(Shape::convex_polygon(
                glow,
                Color32::from_rgba_unmultiplied(255, 230, 120, alpha(scene.glow_alpha * 0.6)),
                Stroke::NONE,
            ));
        }

        let panel = rotated_bar(center, PANEL_LENGTH, PANEL_THICKNESS, rotation);
        painter.add(Shape::convex_polygon(
            panel,
            Color32::from_rgb(30, 50, 110),
            Stroke::new(1.5, Color32::from_gray(200)),
        ));

        let label_pos = base + Vec2::new(0.0, 16.0);
        painter.text(
            label_pos,
            egui::Align2::CENTER_TOP,
            format!("{:.0}°", 90.0 - scene.panel_rotation_deg),
            egui::FontId::proportional(12.0),
            Color32::WHITE,
        );
    }
}
