use crate::views::{ChartView, ControlsView, ReadoutView, SceneView, TableView};
use egui_file_dialog::FileDialog;
use pv_app::{
    ControlState, LatestPresentation, ParameterSource, Scenario, Session, load_scenario,
    save_scenario,
};
use std::path::PathBuf;
use std::time::Instant;

pub struct PvSimApp {
    session: Session<LatestPresentation>,
    scenario_name: String,
    scenario_path: Option<PathBuf>,
    file_dialog: FileDialog,
    file_dialog_action: Option<FileDialogAction>,
    controls_view: ControlsView,
    readout_view: ReadoutView,
    scene_view: SceneView,
    chart_view: ChartView,
    table_view: TableView,
    status: Option<Status>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileDialogAction {
    Open,
    Save,
}

enum Status {
    Info(String),
    Error(String),
}

impl PvSimApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            session: Session::new(LatestPresentation::default()),
            scenario_name: Scenario::default().name,
            scenario_path: None,
            file_dialog: FileDialog::new(),
            file_dialog_action: None,
            controls_view: ControlsView,
            readout_view: ReadoutView,
            scene_view: SceneView,
            chart_view: ChartView,
            table_view: TableView,
            status: None,
        }
    }

    fn open_scenario(&mut self, path: PathBuf) {
        match load_scenario(&path) {
            Ok(scenario) => {
                self.session.stop_animation();
                self.session
                    .replace_controls(ControlState::from_params(&scenario.params));
                self.status = Some(Status::Info(format!("Loaded '{}'", scenario.name)));
                self.scenario_name = scenario.name;
                self.scenario_path = Some(path);
            }
            Err(e) => self.status = Some(Status::Error(e.to_string())),
        }
    }

    fn save_scenario_as(&mut self, path: PathBuf) {
        let scenario = Scenario::new(self.scenario_name.clone(), self.session.controls().read());
        match save_scenario(&path, &scenario) {
            Ok(()) => {
                self.status = Some(Status::Info(format!("Saved to {}", path.display())));
                self.scenario_path = Some(path);
            }
            Err(e) => self.status = Some(Status::Error(e.to_string())),
        }
    }
}

impl eframe::App for PvSimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.session.poll(now);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open scenario").clicked() {
                    self.file_dialog_action = Some(FileDialogAction::Open);
                    self.file_dialog.select_file();
                }

                if ui.button("Save scenario").clicked() {
                    match self.scenario_path.clone() {
                        Some(path) => self.save_scenario_as(path),
                        None => {
                            self.file_dialog_action = Some(FileDialogAction::Save);
                            self.file_dialog.save_file();
                        }
                    }
                }

                ui.separator();
                ui.label("Name:");
                ui.text_edit_singleline(&mut self.scenario_name);

                if let Some(status) = &self.status {
                    ui.separator();
                    match status {
                        Status::Info(msg) => ui.label(msg),
                        Status::Error(msg) => ui.colored_label(egui::Color32::RED, msg),
                    };
                }
            });
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            match self.file_dialog_action.take() {
                Some(FileDialogAction::Open) => self.open_scenario(path.to_path_buf()),
                Some(FileDialogAction::Save) => self.save_scenario_as(path.to_path_buf()),
                None => {}
            }
        }

        let animating = self.session.animation().is_running();
        let actions = egui::SidePanel::left("controls")
            .default_width(280.0)
            .show(ctx, |ui| {
                let mut controls = self.session.controls().clone();
                let actions = self.controls_view.show(ui, &mut controls, animating);
                if actions.changed {
                    self.session.replace_controls(controls);
                }
                actions
            })
            .inner;

        if actions.toggle_animation {
            self.session.toggle_animation(now);
        }
        if actions.reset {
            self.session.reset();
            self.status = None;
        }

        let time_of_day_h = self.session.latest().params.time_of_day_h;
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(presentation) = self.session.sink().get() else {
                return;
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.scene_view.show(ui, &presentation.scene);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(&presentation.readouts.day);
                    ui.separator();
                    ui.label(&presentation.readouts.time);
                    ui.separator();
                    ui.label(format!("Cloud {}", presentation.readouts.cloud));
                    ui.separator();
                    ui.label(&presentation.readouts.temperature);
                });
                ui.add_space(4.0);
                self.readout_view.show(ui, &presentation.readouts);
                ui.separator();
                self.chart_view
                    .show(ui, &presentation.chart, time_of_day_h);
                ui.separator();
                egui::CollapsingHeader::new("Daily samples")
                    .default_open(false)
                    .show(ui, |ui| {
                        self.table_view
                            .show(ui, self.session.latest().profile.samples(), time_of_day_h);
                    });
            });
        });

        if let Some(wait) = self.session.animation().time_until_next_tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
