use serde::{Deserialize, Serialize};

/// Draw order inside one lane, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    /// Spec band and limit rules.
    Limits,
    Series,
    Overlay,
    Axis,
}

impl CanvasLayerKind {
    pub const CANONICAL: [Self; 6] = [
        Self::Background,
        Self::Grid,
        Self::Limits,
        Self::Series,
        Self::Overlay,
        Self::Axis,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneLayerStack {
    pub lane_index: usize,
    pub layers: Vec<CanvasLayerKind>,
}

impl LaneLayerStack {
    #[must_use]
    pub fn canonical_for_lane(lane_index: usize) -> Self {
        Self {
            lane_index,
            layers: CanvasLayerKind::CANONICAL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, LaneLayerStack};

    #[test]
    fn limits_sit_between_grid_and_series() {
        let stack = LaneLayerStack::canonical_for_lane(2);
        let position = |kind| stack.layers.iter().position(|layer| *layer == kind);
        assert!(position(CanvasLayerKind::Grid) < position(CanvasLayerKind::Limits));
        assert!(position(CanvasLayerKind::Limits) < position(CanvasLayerKind::Series));
    }
}
