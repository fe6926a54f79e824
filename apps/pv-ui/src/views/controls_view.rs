use pv_app::ControlState;
use pv_app::controls::{
    ANGLE_RANGE_DEG, AREA_RANGE_M2, CLOUD_RANGE_PCT, DAY_RANGE, EFFICIENCY_RANGE_PCT,
    TEMP_RANGE_C, TIME_RANGE_H, TIME_STEP_H,
};
use pv_app::format::{format_clock, format_day};

/// What the user asked for in the controls panel this frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct ControlActions {
    pub changed: bool,
    pub toggle_animation: bool,
    pub reset: bool,
}

#[derive(Default)]
pub struct ControlsView;

impl ControlsView {
    /// Edits `controls` in place. `animating` selects the Animate/Stop label.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        controls: &mut ControlState,
        animating: bool,
    ) -> ControlActions {
        let mut actions = ControlActions::default();

        ui.heading("Inputs");
        ui.separator();

        let mut changed = false;

        ui.label("Day of year");
        changed |= ui
            .add(
                egui::Slider::new(&mut controls.day_of_year, DAY_RANGE)
                    .custom_formatter(|v, _| format_day(v as u16)),
            )
            .changed();

        ui.label("Time of day");
        changed |= ui
            .add(
                egui::Slider::new(&mut controls.time_of_day_h, TIME_RANGE_H)
                    .step_by(TIME_STEP_H)
                    .custom_formatter(|v, _| format_clock(v)),
            )
            .changed();

        ui.label("Cloud cover");
        changed |= ui
            .add(egui::Slider::new(&mut controls.cloud_pct, CLOUD_RANGE_PCT).suffix("%"))
            .changed();

        ui.label("Ambient temperature");
        changed |= ui
            .add(
                egui::Slider::new(&mut controls.temp_c, TEMP_RANGE_C)
                    .clamp_to_range(false)
                    .suffix("°C"),
            )
            .changed();

        ui.label("Panel area");
        changed |= ui
            .add(
                egui::Slider::new(&mut controls.area_m2, AREA_RANGE_M2)
                    .clamp_to_range(false)
                    .suffix(" m²"),
            )
            .changed();

        ui.label("Panel efficiency");
        changed |= ui
            .add(
                egui::Slider::new(&mut controls.efficiency_pct, EFFICIENCY_RANGE_PCT)
                    .fixed_decimals(1)
                    .suffix("%"),
            )
            .changed();

        ui.label("Panel angle");
        changed |= ui
            .add(egui::Slider::new(&mut controls.angle_deg, ANGLE_RANGE_DEG).suffix("°"))
            .changed();

        ui.separator();
        ui.heading("Financials");

        egui::Grid::new("financial_inputs")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("System cost");
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut controls.system_cost)
                            .speed(100_000.0)
                            .range(0.0..=f64::MAX)
                            .prefix("Rp "),
                    )
                    .changed();
                ui.end_row();

                ui.label("Tariff / kWh");
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut controls.tariff_per_kwh)
                            .speed(5.0)
                            .range(0.0..=f64::MAX)
                            .prefix("Rp "),
                    )
                    .changed();
                ui.end_row();
            });

        ui.separator();
        ui.horizontal(|ui| {
            let label = if animating { "Stop" } else { "Animate day" };
            if ui.button(label).clicked() {
                actions.toggle_animation = true;
            }
            if ui.button("Reset").clicked() {
                actions.reset = true;
            }
        });

        actions.changed = changed;
        actions
    }
}
