use tracing::{debug, info};

use crate::core::{RawTable, Viewport};
use crate::error::ChartResult;
use crate::interaction::{ScrollEvent, ViewportController, ViewportState};
use crate::render::{LayeredRenderFrame, Renderer};

use super::{ChartConfig, ChartGeometry, ChartRenderer, ProcessChart};

/// A built chart bound to a renderer and a scroll position.
///
/// Every accepted scroll event re-renders all lanes synchronously.
pub struct ChartSession<R: Renderer> {
    config: ChartConfig,
    chart: ProcessChart,
    controller: ViewportController,
    chart_renderer: ChartRenderer,
    renderer: R,
}

impl<R: Renderer> ChartSession<R> {
    pub fn new(config: ChartConfig, chart: ProcessChart, renderer: R) -> ChartResult<Self> {
        config.validate()?;
        let mut controller = ViewportController::new(chart.total_units(), config.window_width);
        let geometry = ChartGeometry::resolve(&config.style, config.viewport)?;
        controller.set_scrollbar_track(geometry.plot_left, geometry.plot_right);

        Ok(Self {
            chart_renderer: ChartRenderer::new(config.style.clone()),
            config,
            chart,
            controller,
            renderer,
        })
    }

    /// Builds the chart from both tables and binds it to `renderer`.
    pub fn build(
        config: ChartConfig,
        results: &RawTable,
        limits: &RawTable,
        renderer: R,
    ) -> ChartResult<Self> {
        let chart = ProcessChart::build(&config, results, limits)?;
        Self::new(config, chart, renderer)
    }

    #[must_use]
    pub fn chart(&self) -> &ProcessChart {
        &self.chart
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.controller.state()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Frame for the current scroll position without drawing it.
    pub fn frame(&self) -> ChartResult<LayeredRenderFrame> {
        self.chart_renderer
            .build_frame(&self.chart, self.controller.state(), self.config.viewport)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        self.chart_renderer.render(
            &mut self.renderer,
            &self.chart,
            self.controller.state(),
            self.config.viewport,
        )
    }

    /// Applies `event`, then redraws. Returns whether the scroll state changed.
    pub fn handle_scroll(&mut self, event: ScrollEvent) -> ChartResult<bool> {
        let changed = self.controller.handle(event);
        debug!(?event, changed, offset = self.controller.state().offset(), "scroll event");
        self.render()?;
        Ok(changed)
    }

    /// Changes the output size; the scroll position is kept.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        let geometry = ChartGeometry::resolve(&self.config.style, viewport)?;
        self.config.viewport = viewport;
        self.controller
            .set_scrollbar_track(geometry.plot_left, geometry.plot_right);
        self.render()
    }

    /// Rebuilds from fresh tables and scrolls back to the first unit.
    ///
    /// On failure the previous chart and scroll position stay in place.
    pub fn reload(&mut self, results: &RawTable, limits: &RawTable) -> ChartResult<()> {
        let chart = ProcessChart::build(&self.config, results, limits)?;
        self.replace_chart(chart);
        self.render()
    }

    /// Swaps in an already built chart and resets the scroll position.
    pub fn replace_chart(&mut self, chart: ProcessChart) {
        self.controller.reset(chart.total_units());
        info!(
            lanes = chart.lanes().len(),
            units = chart.total_units(),
            "chart reloaded"
        );
        self.chart = chart;
    }
}

#[cfg(feature = "cairo-backend")]
impl<R: Renderer> ChartSession<R> {
    /// Renders the current scroll position once into a PNG file.
    pub fn export_png(&self, path: impl AsRef<std::path::Path>) -> ChartResult<()> {
        let viewport = self.config.viewport;
        let width = i32::try_from(viewport.width).map_err(|_| {
            crate::error::ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            }
        })?;
        let height = i32::try_from(viewport.height).map_err(|_| {
            crate::error::ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            }
        })?;

        let mut cairo = crate::render::CairoRenderer::new(width, height)?;
        self.chart_renderer
            .render(&mut cairo, &self.chart, self.controller.state(), viewport)?;
        cairo.write_png(path)
    }

    /// Same as [`ChartSession::export_png`] at the configured export path.
    pub fn export_to_configured_path(&self) -> ChartResult<()> {
        self.export_png(&self.config.export_path)
    }
}
