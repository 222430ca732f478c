use crate::core::Viewport;

use super::{
    CanvasLayerKind, LaneLayerStack, LinePrimitive, MarkerPrimitive, RectPrimitive, RenderFrame,
    TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    fn empty(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            rects: Vec::new(),
            lines: Vec::new(),
            markers: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn append_to(&self, frame: &mut RenderFrame) {
        frame.rects.extend(self.rects.iter().copied());
        frame.lines.extend(self.lines.iter().copied());
        frame.markers.extend(self.markers.iter().copied());
        frame.texts.extend(self.texts.iter().cloned());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaneLayerFrame {
    pub lane_index: usize,
    pub plot_top: f64,
    pub plot_bottom: f64,
    pub layers: Vec<LayerPrimitives>,
}

/// Per-lane layered scene plus a chart-wide chrome layer (scrollbar, axis
/// title) drawn after every lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub lanes: Vec<LaneLayerFrame>,
    pub chrome: LayerPrimitives,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stacks(viewport: Viewport, stacks: Vec<LaneLayerStack>) -> Self {
        let default_bottom = f64::from(viewport.height);
        let lanes = stacks
            .into_iter()
            .map(|stack| LaneLayerFrame {
                lane_index: stack.lane_index,
                plot_top: 0.0,
                plot_bottom: default_bottom,
                layers: stack.layers.into_iter().map(LayerPrimitives::empty).collect(),
            })
            .collect();
        Self {
            viewport,
            lanes,
            chrome: LayerPrimitives::empty(CanvasLayerKind::Overlay),
        }
    }

    #[must_use]
    pub fn with_lane_regions(mut self, regions: &[(usize, f64, f64)]) -> Self {
        for lane in &mut self.lanes {
            if let Some((_, top, bottom)) = regions
                .iter()
                .find(|(index, _, _)| *index == lane.lane_index)
            {
                lane.plot_top = *top;
                lane.plot_bottom = *bottom;
            }
        }
        self
    }

    pub fn push_line(&mut self, lane_index: usize, kind: CanvasLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(lane_index, kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_rect(&mut self, lane_index: usize, kind: CanvasLayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(lane_index, kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_marker(
        &mut self,
        lane_index: usize,
        kind: CanvasLayerKind,
        marker: MarkerPrimitive,
    ) {
        if let Some(layer) = self.layer_mut(lane_index, kind) {
            layer.markers.push(marker);
        }
    }

    pub fn push_text(&mut self, lane_index: usize, kind: CanvasLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(lane_index, kind) {
            layer.texts.push(text);
        }
    }

    #[must_use]
    pub fn lane(&self, lane_index: usize) -> Option<&LaneLayerFrame> {
        self.lanes.iter().find(|lane| lane.lane_index == lane_index)
    }

    #[must_use]
    pub fn layer(&self, lane_index: usize, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.lane(lane_index)?
            .layers
            .iter()
            .find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for lane in &self.lanes {
            for layer in &lane.layers {
                layer.append_to(&mut frame);
            }
        }
        self.chrome.append_to(&mut frame);
        frame
    }

    #[must_use]
    pub fn flatten_lane(&self, lane_index: usize) -> Option<RenderFrame> {
        let lane = self.lane(lane_index)?;
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &lane.layers {
            layer.append_to(&mut frame);
        }
        Some(frame)
    }

    fn layer_mut(
        &mut self,
        lane_index: usize,
        kind: CanvasLayerKind,
    ) -> Option<&mut LayerPrimitives> {
        let lane = self
            .lanes
            .iter_mut()
            .find(|lane| lane.lane_index == lane_index)?;
        lane.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::LayeredRenderFrame;
    use crate::core::Viewport;
    use crate::render::{
        CanvasLayerKind, Color, LaneLayerStack, LinePrimitive, RectPrimitive, TextHAlign,
        TextPrimitive,
    };

    #[test]
    fn flatten_keeps_lane_order_then_chrome() {
        let mut layered = LayeredRenderFrame::from_stacks(
            Viewport::new(100, 50),
            vec![
                LaneLayerStack::canonical_for_lane(0),
                LaneLayerStack::canonical_for_lane(1),
            ],
        );

        layered.push_line(
            1,
            CanvasLayerKind::Series,
            LinePrimitive::new(0.0, 3.0, 5.0, 3.0, 1.0, Color::rgb(0.8, 0.2, 0.2)),
        );
        layered.push_line(
            0,
            CanvasLayerKind::Grid,
            LinePrimitive::new(0.0, 1.0, 5.0, 1.0, 1.0, Color::rgb(0.2, 0.2, 0.2)),
        );
        layered.push_text(
            0,
            CanvasLayerKind::Axis,
            TextPrimitive::new("x", 2.0, 4.0, 10.0, Color::rgb(0.0, 0.0, 0.0), TextHAlign::Right),
        );
        layered
            .chrome
            .rects
            .push(RectPrimitive::new(0.0, 45.0, 100.0, 5.0, Color::rgb(0.9, 0.9, 0.9)));

        let flattened = layered.flatten();
        assert_eq!(flattened.lines.len(), 2);
        assert_eq!(flattened.lines[0].y1, 1.0);
        assert_eq!(flattened.lines[1].y1, 3.0);
        assert_eq!(flattened.rects.len(), 1);
        assert_eq!(layered.flatten_lane(1).map(|frame| frame.lines.len()), Some(1));
        assert!(layered.flatten_lane(9).is_none());
    }
}
