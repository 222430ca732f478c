use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, MarkerPrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one chart draw pass.
///
/// Backends draw rects, then lines, then markers, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            lines: Vec::new(),
            markers: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: MarkerPrimitive) -> Self {
        self.markers.push(marker);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for marker in &self.markers {
            marker.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.markers.is_empty()
            && self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::Viewport;
    use crate::render::{
        Color, LinePrimitive, MarkerPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
    };

    #[test]
    fn validation_reaches_every_primitive_kind() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let frame = RenderFrame::new(Viewport::new(200, 100))
            .with_rect(RectPrimitive::new(0.0, 0.0, 10.0, 10.0, black))
            .with_line(LinePrimitive::new(0.0, 0.0, 5.0, 5.0, 1.0, black))
            .with_text(TextPrimitive::new("P1", 4.0, 4.0, 9.0, black, TextHAlign::Left));
        assert!(!frame.is_empty());
        assert!(frame.validate().is_ok());

        let broken = frame.with_marker(MarkerPrimitive::new(1.0, 1.0, 0.0, black));
        assert!(broken.validate().is_err());
        assert!(RenderFrame::new(Viewport::new(0, 10)).validate().is_err());
    }
}
