use pv_app::Readouts;

#[derive(Default)]
pub struct ReadoutView;

impl ReadoutView {
    pub fn show(&mut self, ui: &mut egui::Ui, readouts: &Readouts) {
        ui.horizontal_wrapped(|ui| {
            Self::card(ui, "Power", &readouts.power);
            Self::card(ui, "Daily energy", &readouts.daily_energy);
            Self::card(ui, "Efficiency", &readouts.actual_efficiency);
            Self::card(ui, "Monthly savings", &readouts.monthly_savings);
            Self::card(ui, "Payback", &readouts.payback);
            Self::card(ui, "Peak", &readouts.peak);
        });
    }

    fn card(ui: &mut egui::Ui, title: &str, value: &str) {
        ui.group(|ui| {
            ui.set_min_width(140.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(title).small().weak());
                ui.label(egui::RichText::new(value).size(18.0).strong());
            });
        });
    }
}
