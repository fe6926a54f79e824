//! Shared application service layer for the PV simulator.
//!
//! This crate sits between the physics in `pv-model` and the CLI and GUI
//! frontends: it owns the input controls, the animation clock, the
//! presentation boundary, scenario files and parameter sweeps.

pub mod animation;
pub mod controls;
pub mod error;
pub mod format;
pub mod present;
pub mod scenario;
pub mod scene;
pub mod session;
pub mod sweep;

// Re-export key types for convenience
pub use animation::{AnimationDriver, AnimationState, advance_time};
pub use controls::{ControlState, ParameterSource};
pub use error::{AppError, AppResult};
pub use present::{ChartSeries, LatestPresentation, Presentation, PresentationSink, Readouts};
pub use scenario::{
    LATEST_VERSION, Scenario, ScenarioFormat, load_scenario, parse_scenario, render_scenario,
    save_scenario,
};
pub use scene::{Hsl, SceneCues, Shadow};
pub use session::Session;
pub use sweep::{
    SweepDefinition, SweepParameter, SweepPoint, annual_energy, best_panel_angle, run_sweep,
};
