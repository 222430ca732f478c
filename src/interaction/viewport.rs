use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{ScrollEvent, ScrollbarGeometry};
use crate::error::ChartError;

/// Read-only snapshot of the scroll position over the unit axis.
///
/// Invariants: `window_width > 0`, `offset <= max_offset`,
/// `max_offset == total_units.saturating_sub(window_width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawViewportState")]
pub struct ViewportState {
    offset: usize,
    window_width: usize,
    total_units: usize,
}

/// Unchecked wire form of [`ViewportState`].
#[derive(Deserialize)]
struct RawViewportState {
    offset: usize,
    window_width: usize,
    total_units: usize,
}

impl TryFrom<RawViewportState> for ViewportState {
    type Error = ChartError;

    fn try_from(raw: RawViewportState) -> Result<Self, Self::Error> {
        let state = Self {
            offset: raw.offset,
            window_width: raw.window_width,
            total_units: raw.total_units,
        };
        if state.window_width == 0 {
            return Err(ChartError::InvalidData(
                "viewport window width must be > 0".to_owned(),
            ));
        }
        if state.offset > state.max_offset() {
            return Err(ChartError::InvalidData(format!(
                "viewport offset {} exceeds max offset {}",
                state.offset,
                state.max_offset()
            )));
        }
        Ok(state)
    }
}

impl ViewportState {
    #[must_use]
    pub fn offset(self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn window_width(self) -> usize {
        self.window_width
    }

    #[must_use]
    pub fn total_units(self) -> usize {
        self.total_units
    }

    #[must_use]
    pub fn max_offset(self) -> usize {
        self.total_units.saturating_sub(self.window_width)
    }

    /// Unit positions currently on screen; shorter than the window near the end
    /// of short data sets.
    #[must_use]
    pub fn visible_range(self) -> Range<usize> {
        let end = self
            .offset
            .saturating_add(self.window_width)
            .min(self.total_units);
        self.offset.min(end)..end
    }
}

/// Sole owner of [`ViewportState`].
///
/// Every transition is total: out-of-range requests clamp to the nearest
/// bound because scroll widgets overshoot at the ends of their travel.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    state: ViewportState,
    scrollbar_track: Option<(f64, f64)>,
}

impl ViewportController {
    /// Starts at offset 0. A zero window width is treated as 1.
    #[must_use]
    pub fn new(total_units: usize, window_width: usize) -> Self {
        Self {
            state: ViewportState {
                offset: 0,
                window_width: window_width.max(1),
                total_units,
            },
            scrollbar_track: None,
        }
    }

    /// Sets the scrollbar track span used to resolve thumb drags.
    pub fn set_scrollbar_track(&mut self, left_px: f64, right_px: f64) {
        self.scrollbar_track = Some((left_px, right_px));
    }

    #[must_use]
    pub fn scrollbar(&self) -> Option<ScrollbarGeometry> {
        self.scrollbar_track
            .map(|(left, right)| ScrollbarGeometry::for_state(self.state, left, right))
    }

    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.state.visible_range()
    }

    pub fn scroll_to(&mut self, requested_offset: i64) {
        let max_offset = self.state.max_offset();
        let clamped = if requested_offset <= 0 {
            0
        } else {
            usize::try_from(requested_offset).map_or(max_offset, |offset| offset.min(max_offset))
        };
        trace!(requested_offset, offset = clamped, max_offset, "scroll to");
        self.state.offset = clamped;
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let current = i64::try_from(self.state.offset).unwrap_or(i64::MAX);
        self.scroll_to(current.saturating_add(delta));
    }

    /// Changes the window width and re-clamps the offset.
    pub fn resize(&mut self, new_window_width: usize) {
        self.state.window_width = new_window_width.max(1);
        self.state.offset = self.state.offset.min(self.state.max_offset());
        trace!(
            window_width = self.state.window_width,
            offset = self.state.offset,
            "viewport resized"
        );
    }

    /// Applies one input event; returns whether the state changed.
    ///
    /// Thumb drags are ignored until a scrollbar track is known.
    pub fn handle(&mut self, event: ScrollEvent) -> bool {
        let before = self.state;
        match event {
            ScrollEvent::ScrollTo(offset) => self.scroll_to(offset),
            ScrollEvent::ScrollBy(delta) => self.scroll_by(delta),
            ScrollEvent::Resize(window_width) => self.resize(window_width),
            ScrollEvent::DragThumbTo(thumb_left_px) => {
                if let Some(scrollbar) = self.scrollbar() {
                    self.scroll_to(scrollbar.offset_for_thumb_left(thumb_left_px));
                }
            }
        }
        self.state != before
    }

    /// Back to the initial state for a new data set; the window width is kept.
    pub fn reset(&mut self, total_units: usize) {
        self.state = ViewportState {
            offset: 0,
            window_width: self.state.window_width,
            total_units,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::ViewportController;
    use crate::interaction::ScrollEvent;

    #[test]
    fn offset_clamps_to_both_bounds() {
        let mut controller = ViewportController::new(120, 50);
        assert_eq!(controller.state().max_offset(), 70);
        controller.scroll_to(200);
        assert_eq!(controller.state().offset(), 70);
        controller.scroll_to(-5);
        assert_eq!(controller.state().offset(), 0);
        controller.scroll_to(i64::MAX);
        assert_eq!(controller.state().offset(), 70);
    }

    #[test]
    fn window_wider_than_data_pins_offset_to_zero() {
        let mut controller = ViewportController::new(10, 50);
        controller.scroll_by(3);
        assert_eq!(controller.state().offset(), 0);
        assert_eq!(controller.visible_range(), 0..10);
    }

    #[test]
    fn handle_reports_changes_only() {
        let mut controller = ViewportController::new(120, 50);
        assert!(!controller.handle(ScrollEvent::ScrollBy(-1)));
        assert!(controller.handle(ScrollEvent::ScrollBy(10)));
        assert!(!controller.handle(ScrollEvent::DragThumbTo(40.0)));

        controller.set_scrollbar_track(0.0, 240.0);
        assert!(controller.handle(ScrollEvent::DragThumbTo(140.0)));
        assert_eq!(controller.state().offset(), 70);
    }
}
