use std::f64::consts::FRAC_PI_2;

use tracing::{debug, trace, warn};

use crate::core::{UnitAxis, UnitIndex, ValueScale, Viewport};
use crate::data::SpecStatus;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ScrollbarGeometry, ViewportState};
use crate::layout::{Lane, LaneRegion};
use crate::render::{
    CanvasLayerKind, Color, LaneLayerStack, LayeredRenderFrame, LinePrimitive, MarkerPrimitive,
    RectPrimitive, Renderer, TextHAlign, TextPrimitive,
};

use super::{ProcessChart, RenderStyle};

const LABEL_PAD_PX: f64 = 4.0;

/// Pixel rectangles shared by every lane for one viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub plot_left: f64,
    pub plot_right: f64,
    pub lanes_top: f64,
    pub lanes_bottom: f64,
    pub scrollbar_top: f64,
    /// Top of the unit-axis title, below the scrollbar and clear of the
    /// rotated unit labels.
    pub axis_title_top: f64,
}

impl ChartGeometry {
    pub fn resolve(style: &RenderStyle, viewport: Viewport) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);

        let plot_left = style.margin_left_px;
        let plot_right = width - style.margin_right_px;
        let axis_title_band = if style.unit_axis_title.trim().is_empty() {
            0.0
        } else {
            style.title_font_size_px + 2.0 * LABEL_PAD_PX
        };
        let scrollbar_top =
            height - style.margin_bottom_px - axis_title_band - style.scrollbar_height_px;
        let axis_title_top = scrollbar_top + style.scrollbar_height_px + LABEL_PAD_PX;
        let lanes_top = style.margin_top_px;
        let lanes_bottom = scrollbar_top - style.unit_label_band_px;
        if plot_right <= plot_left || lanes_bottom <= lanes_top {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        Ok(Self {
            plot_left,
            plot_right,
            lanes_top,
            lanes_bottom,
            scrollbar_top,
            axis_title_top,
        })
    }

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.plot_right - self.plot_left
    }
}

/// Turns a [`ProcessChart`] plus a scroll position into draw commands.
///
/// Stateless apart from its style; the same inputs always produce the same
/// frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartRenderer {
    style: RenderStyle,
}

impl ChartRenderer {
    #[must_use]
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn build_frame(
        &self,
        chart: &ProcessChart,
        state: ViewportState,
        viewport: Viewport,
    ) -> ChartResult<LayeredRenderFrame> {
        self.style.validate()?;
        let geometry = ChartGeometry::resolve(&self.style, viewport)?;

        let total_units = chart.total_units();
        let visible = {
            let range = state.visible_range();
            range.start.min(total_units)..range.end.min(total_units)
        };
        let unit_axis = UnitAxis::new(
            visible.clone(),
            state.window_width(),
            geometry.plot_left,
            geometry.plot_right,
        )?;

        let regions = chart.layout().lane_regions(
            geometry.lanes_top,
            geometry.lanes_bottom,
            self.style.lane_gap_px,
        );
        let stacks = regions
            .iter()
            .map(|region| LaneLayerStack::canonical_for_lane(region.lane_index))
            .collect();
        let region_bounds: Vec<(usize, f64, f64)> = regions
            .iter()
            .map(|region| (region.lane_index, region.top, region.bottom))
            .collect();
        let mut frame =
            LayeredRenderFrame::from_stacks(viewport, stacks).with_lane_regions(&region_bounds);

        for (lane, region) in chart.lanes().iter().zip(&regions) {
            self.draw_lane(&mut frame, lane, *region, &geometry, chart.units(), &unit_axis)?;
        }

        if let Some(bottom) = regions.last() {
            self.draw_unit_labels(&mut frame, chart, bottom.lane_index, &geometry, &unit_axis);
        }
        self.draw_chrome(&mut frame, state, &geometry);

        debug!(
            lanes = regions.len(),
            offset = state.offset(),
            visible_units = visible.len(),
            "built chart frame"
        );
        Ok(frame)
    }

    /// Builds the frame and hands its flattened form to `renderer`.
    pub fn render<R: Renderer>(
        &self,
        renderer: &mut R,
        chart: &ProcessChart,
        state: ViewportState,
        viewport: Viewport,
    ) -> ChartResult<()> {
        let frame = self.build_frame(chart, state, viewport)?;
        renderer.render(&frame.flatten())
    }

    fn draw_lane(
        &self,
        frame: &mut LayeredRenderFrame,
        lane: &Lane,
        region: LaneRegion,
        geometry: &ChartGeometry,
        units: &UnitIndex,
        unit_axis: &UnitAxis,
    ) -> ChartResult<()> {
        let style = &self.style;
        let index = region.lane_index;

        frame.push_rect(
            index,
            CanvasLayerKind::Background,
            RectPrimitive::new(
                geometry.plot_left,
                region.top,
                geometry.plot_width(),
                region.height(),
                Color::rgba(1.0, 1.0, 1.0, 0.0),
            )
            .with_border(style.lane_border_width, style.lane_border_color),
        );
        frame.push_text(
            index,
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                lane_title(lane),
                geometry.plot_left,
                (region.top - style.title_font_size_px - LABEL_PAD_PX).max(0.0),
                style.title_font_size_px,
                style.text_color,
                TextHAlign::Left,
            ),
        );

        if region.height() > 0.0 {
            self.draw_grid(frame, index, region, unit_axis);
        }

        if !lane.has_data() {
            frame.push_text(
                index,
                CanvasLayerKind::Overlay,
                TextPrimitive::new(
                    format!("No data found for {}", lane.parameter),
                    geometry.plot_left + 0.5 * geometry.plot_width(),
                    region.center() - 0.5 * style.title_font_size_px,
                    style.title_font_size_px,
                    style.muted_text_color,
                    TextHAlign::Center,
                ),
            );
            return Ok(());
        }

        if region.height() <= 0.0 {
            trace!(lane = index, "lane collapsed to zero height");
            return Ok(());
        }

        let scale = match ValueScale::fit(
            lane.series.samples.iter().map(|sample| sample.value),
            lane.limits.as_ref().map(|limits| limits.bounds()),
            style.value_scale_tuning,
        ) {
            Ok(scale) => scale,
            Err(err) => {
                warn!(
                    lane = index,
                    parameter = %lane.parameter,
                    error = %err,
                    "skipping lane values"
                );
                return Ok(());
            }
        };

        if let Some(limits) = &lane.limits {
            let (lower, upper) = limits.bounds();
            let lower_y = scale.value_to_pixel(lower, region.top, region.bottom)?;
            let upper_y = scale.value_to_pixel(upper, region.top, region.bottom)?;

            frame.push_rect(
                index,
                CanvasLayerKind::Limits,
                RectPrimitive::from_vertical_span(
                    geometry.plot_left,
                    geometry.plot_width(),
                    lower_y,
                    upper_y,
                    style.band_color,
                ),
            );
            for (y, color, label) in [
                (upper_y, style.upper_rule_color, format!("Upper: {}", format_bound(upper))),
                (lower_y, style.lower_rule_color, format!("Lower: {}", format_bound(lower))),
            ] {
                frame.push_line(
                    index,
                    CanvasLayerKind::Limits,
                    LinePrimitive::new(
                        geometry.plot_left,
                        y,
                        geometry.plot_right,
                        y,
                        style.rule_line_width,
                        color,
                    )
                    .with_stroke_style(style.rule_stroke_style),
                );
                frame.push_text(
                    index,
                    CanvasLayerKind::Axis,
                    TextPrimitive::new(
                        label,
                        geometry.plot_right + LABEL_PAD_PX,
                        y - 0.6 * style.rule_label_font_size_px,
                        style.rule_label_font_size_px,
                        color.with_alpha(1.0),
                        TextHAlign::Left,
                    ),
                );
            }
        }

        let mut previous: Option<(f64, f64)> = None;
        for sample in &lane.series.samples {
            let Some(x) = units
                .position(&sample.unit_id)
                .and_then(|position| unit_axis.position_to_pixel(position))
            else {
                continue;
            };
            let y = scale.value_to_pixel(sample.value, region.top, region.bottom)?;

            if let Some((previous_x, previous_y)) = previous {
                frame.push_line(
                    index,
                    CanvasLayerKind::Series,
                    LinePrimitive::new(
                        previous_x,
                        previous_y,
                        x,
                        y,
                        style.series_line_width,
                        style.series_color,
                    ),
                );
            }
            previous = Some((x, y));

            let color = match sample.status {
                SpecStatus::OutOfSpec => style.alert_color,
                SpecStatus::InSpec | SpecStatus::Unconstrained => style.series_color,
            };
            frame.push_marker(
                index,
                CanvasLayerKind::Series,
                MarkerPrimitive::new(x, y, style.marker_radius, color),
            );
        }

        trace!(lane = index, parameter = %lane.parameter, "lane drawn");
        Ok(())
    }

    /// One vertical rule per visible unit slot.
    fn draw_grid(
        &self,
        frame: &mut LayeredRenderFrame,
        index: usize,
        region: LaneRegion,
        unit_axis: &UnitAxis,
    ) {
        let style = &self.style;
        for x in unit_axis
            .visible()
            .filter_map(|position| unit_axis.position_to_pixel(position))
        {
            frame.push_line(
                index,
                CanvasLayerKind::Grid,
                LinePrimitive::new(
                    x,
                    region.top,
                    x,
                    region.bottom,
                    style.grid_line_width,
                    style.grid_color,
                )
                .with_stroke_style(style.grid_stroke_style),
            );
        }
    }

    fn draw_unit_labels(
        &self,
        frame: &mut LayeredRenderFrame,
        chart: &ProcessChart,
        bottom_lane: usize,
        geometry: &ChartGeometry,
        unit_axis: &UnitAxis,
    ) {
        let style = &self.style;
        for position in unit_axis.visible() {
            let (Some(unit_id), Some(x)) = (
                chart.units().unit(position),
                unit_axis.position_to_pixel(position),
            ) else {
                continue;
            };
            let color = if chart.is_unit_out_of_spec(unit_id) {
                style.alert_color
            } else {
                style.text_color
            };
            frame.push_text(
                bottom_lane,
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    unit_id,
                    x,
                    geometry.lanes_bottom + LABEL_PAD_PX,
                    style.unit_label_font_size_px,
                    color,
                    TextHAlign::Right,
                )
                .with_rotation(-FRAC_PI_2),
            );
        }
    }

    fn draw_chrome(
        &self,
        frame: &mut LayeredRenderFrame,
        state: ViewportState,
        geometry: &ChartGeometry,
    ) {
        let style = &self.style;
        let scrollbar = ScrollbarGeometry::for_state(state, geometry.plot_left, geometry.plot_right);

        frame.chrome.rects.push(RectPrimitive::new(
            scrollbar.track_left,
            geometry.scrollbar_top,
            scrollbar.track_right - scrollbar.track_left,
            style.scrollbar_height_px,
            style.scrollbar_track_color,
        ));
        frame.chrome.rects.push(RectPrimitive::new(
            scrollbar.thumb_left,
            geometry.scrollbar_top,
            scrollbar.thumb_width,
            style.scrollbar_height_px,
            style.scrollbar_thumb_color,
        ));

        if !style.unit_axis_title.trim().is_empty() {
            frame.chrome.texts.push(TextPrimitive::new(
                style.unit_axis_title.clone(),
                geometry.plot_left + 0.5 * geometry.plot_width(),
                geometry.axis_title_top,
                style.title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        }
    }
}

fn lane_title(lane: &Lane) -> String {
    let unit = lane
        .series
        .unit_of_measure
        .as_deref()
        .filter(|unit| !unit.trim().is_empty())
        .unwrap_or("Value");
    format!("{} ({unit})", lane.parameter)
}

/// Whole bounds keep one decimal so `10` reads as `10.0`.
fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
