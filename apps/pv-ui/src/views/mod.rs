pub mod chart_view;
pub mod controls_view;
pub mod readout_view;
pub mod scene_view;
pub mod table_view;

pub use chart_view::ChartView;
pub use controls_view::{ControlActions, ControlsView};
pub use readout_view::ReadoutView;
pub use scene_view::SceneView;
pub use table_view::TableView;
