//! Scroll handling over the shared unit axis.

mod scrollbar;
mod viewport;

use serde::{Deserialize, Serialize};

pub use scrollbar::ScrollbarGeometry;
pub use viewport::{ViewportController, ViewportState};

/// Input delivered by the host event loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScrollEvent {
    /// Absolute offset, e.g. from a slider value. May be out of range.
    ScrollTo(i64),
    /// Relative step, e.g. from a wheel or arrow key.
    ScrollBy(i64),
    /// New number of visible units.
    Resize(usize),
    /// Scrollbar thumb dragged so its left edge sits at this pixel.
    DragThumbTo(f64),
}
