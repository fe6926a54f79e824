use egui_extras::{Column, TableBuilder};
use pv_app::format::{format_clock, format_power};
use pv_core::to_watts;
use pv_model::ProfileSample;

#[derive(Default)]
pub struct TableView;

impl TableView {
    pub fn show(&mut self, ui: &mut egui::Ui, samples: &[ProfileSample], time_of_day_h: f64) {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(70.0).at_least(60.0)) // Time
            .column(Column::initial(90.0).at_least(70.0)) // Altitude
            .column(Column::initial(90.0).at_least(70.0)) // Azimuth
            .column(Column::remainder().at_least(90.0)) // Power
            .max_scroll_height(240.0)
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Time");
                });
                header.col(|ui| {
                    ui.strong("Altitude");
                });
                header.col(|ui| {
                    ui.strong("Azimuth");
                });
                header.col(|ui| {
                    ui.strong("Power");
                });
            })
            .body(|mut body| {
                for sample in samples {
                    let is_now = (sample.hour - time_of_day_h).abs() < 1e-9;
                    body.row(20.0, |mut row| {
                        row.col(|ui| {
                            let text = egui::RichText::new(format_clock(sample.hour));
                            ui.label(if is_now { text.strong() } else { text });
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}°", sample.angles.altitude_deg));
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}°", sample.angles.azimuth_deg));
                        });
                        row.col(|ui| {
                            ui.label(format_power(to_watts(sample.power)));
                        });
                    });
                }
            });
    }
}
