//! Chart assembly, rendering and the interactive session.

mod chart;
mod chart_renderer;
mod config;
mod render_style;
mod session;

pub use chart::ProcessChart;
pub use chart_renderer::{ChartGeometry, ChartRenderer};
pub use config::{ChartConfig, DEFAULT_EXPORT_PATH, DEFAULT_WINDOW_WIDTH};
pub use render_style::RenderStyle;
pub use session::ChartSession;
