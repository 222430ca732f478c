//! procchart: multi-lane process-control charts.
//!
//! Measurement rows are normalized, averaged per unit, checked against
//! per-parameter limits and laid out as one lane per parameter over a shared,
//! scrollable unit axis. Rendering goes through backend-agnostic frames.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod source;
pub mod telemetry;

pub use api::{ChartConfig, ChartRenderer, ChartSession, ProcessChart, RenderStyle};
pub use error::{ChartError, ChartResult};
