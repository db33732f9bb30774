mod aquarium_picker;
mod chart_panel;
mod dashboard;
mod modals;

pub use aquarium_picker::AquariumPicker;
pub use chart_panel::{ChartPanel, CHART_CANVAS_ID};
pub use dashboard::Dashboard;
pub use modals::FormModal;
