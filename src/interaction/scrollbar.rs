use serde::{Deserialize, Serialize};

use super::ViewportState;

const MIN_THUMB_WIDTH_PX: f64 = 12.0;

/// Pixel geometry of the horizontal scrollbar below the lanes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollbarGeometry {
    pub track_left: f64,
    pub track_right: f64,
    pub thumb_left: f64,
    pub thumb_width: f64,
    max_offset: usize,
}

impl ScrollbarGeometry {
    /// Thumb width is proportional to the visible fraction, clamped to a
    /// minimum grab size; thumb travel maps linearly onto `0..=max_offset`.
    #[must_use]
    pub fn for_state(state: ViewportState, track_left: f64, track_right: f64) -> Self {
        let track_width = (track_right - track_left).max(0.0);
        let total = state.total_units().max(1) as f64;
        let visible_fraction = (state.window_width() as f64 / total).min(1.0);
        let thumb_width = (track_width * visible_fraction)
            .max(MIN_THUMB_WIDTH_PX)
            .min(track_width);
        let travel = track_width - thumb_width;
        let max_offset = state.max_offset();
        let thumb_left = if max_offset == 0 {
            track_left
        } else {
            track_left + travel * (state.offset() as f64 / max_offset as f64)
        };
        Self {
            track_left,
            track_right,
            thumb_left,
            thumb_width,
            max_offset,
        }
    }

    #[must_use]
    pub fn thumb_right(&self) -> f64 {
        self.thumb_left + self.thumb_width
    }

    /// Offset that puts the thumb's left edge nearest to `thumb_left_px`.
    /// Not clamped; feed it through `ViewportController::scroll_to`.
    #[must_use]
    pub fn offset_for_thumb_left(&self, thumb_left_px: f64) -> i64 {
        let travel = self.track_right - self.track_left - self.thumb_width;
        if self.max_offset == 0 || travel <= 0.0 || !thumb_left_px.is_finite() {
            return 0;
        }
        let ratio = (thumb_left_px - self.track_left) / travel;
        (ratio * self.max_offset as f64).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollbarGeometry;
    use crate::interaction::ViewportController;

    #[test]
    fn thumb_tracks_offset_across_the_travel() {
        let mut controller = ViewportController::new(100, 25);
        let start = ScrollbarGeometry::for_state(controller.state(), 0.0, 400.0);
        assert_eq!(start.thumb_left, 0.0);
        assert_eq!(start.thumb_width, 100.0);

        controller.scroll_to(75);
        let end = ScrollbarGeometry::for_state(controller.state(), 0.0, 400.0);
        assert_eq!(end.thumb_right(), 400.0);
        assert_eq!(end.offset_for_thumb_left(end.thumb_left), 75);
    }
}
