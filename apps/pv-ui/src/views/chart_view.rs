use egui_plot::{Legend, Line, Plot, PlotPoints, Points, VLine};
use pv_app::ChartSeries;
use pv_app::format::{format_chart_label, format_power};

#[derive(Default)]
pub struct ChartView;

impl ChartView {
    /// Daily power curve with a marker at the current time of day.
    pub fn show(&mut self, ui: &mut egui::Ui, chart: &ChartSeries, time_of_day_h: f64) {
        ui.label(egui::RichText::new("Power over the day").strong());

        let line = Line::new(PlotPoints::from(chart.points.clone()))
            .name("Power (W)")
            .fill(0.0);

        let current = chart
            .points
            .iter()
            .find(|p| (p[0] - time_of_day_h).abs() < 1e-9)
            .copied();

        Plot::new("power_chart")
            .legend(Legend::default())
            .height(220.0)
            .include_x(5.0)
            .include_x(19.0)
            .include_y(0.0)
            .include_y(chart.max_watts() * 1.1)
            .x_axis_label("Time of day (h)")
            .y_axis_label("Power (W)")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .label_formatter(|_name, value| {
                format!(
                    "{}\n{}",
                    format_chart_label(value.x),
                    format_power(value.y.max(0.0))
                )
            })
            .show(ui, |plot_ui| {
                plot_ui.line(line);
                plot_ui.vline(VLine::new(time_of_day_h).name("Now"));
                if let Some(p) = current {
                    plot_ui.points(Points::new(vec![p]).radius(4.0));
                }
            });
    }
}
