use serde::{Deserialize, Serialize};

use crate::core::ValueScaleTuning;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle};

/// Visual configuration for the lane chart.
///
/// Pixel sizes are absolute; the plot area is the viewport minus the margins
/// and the unit-label band below the bottom lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub series_color: Color,
    pub series_line_width: f64,
    pub marker_radius: f64,
    pub alert_color: Color,
    pub band_color: Color,
    pub lower_rule_color: Color,
    pub upper_rule_color: Color,
    pub rule_line_width: f64,
    pub rule_stroke_style: LineStrokeStyle,
    pub grid_color: Color,
    pub grid_line_width: f64,
    pub grid_stroke_style: LineStrokeStyle,
    pub lane_border_color: Color,
    pub lane_border_width: f64,
    pub text_color: Color,
    pub muted_text_color: Color,
    pub scrollbar_track_color: Color,
    pub scrollbar_thumb_color: Color,
    pub margin_left_px: f64,
    pub margin_right_px: f64,
    pub margin_top_px: f64,
    pub margin_bottom_px: f64,
    pub lane_gap_px: f64,
    pub unit_label_band_px: f64,
    pub scrollbar_height_px: f64,
    pub title_font_size_px: f64,
    pub rule_label_font_size_px: f64,
    pub unit_label_font_size_px: f64,
    pub unit_axis_title: String,
    pub value_scale_tuning: ValueScaleTuning,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            series_color: Color::from_rgb8(0x00, 0x7a, 0xcc),
            series_line_width: 1.5,
            marker_radius: 3.0,
            alert_color: Color::rgb(1.0, 0.0, 0.0),
            band_color: Color::rgba(0.0, 0.5, 0.0, 0.1),
            lower_rule_color: Color::rgba(0.0, 0.5, 0.0, 0.6),
            upper_rule_color: Color::rgba(1.0, 0.0, 0.0, 0.6),
            rule_line_width: 1.0,
            rule_stroke_style: LineStrokeStyle::Dashed {
                dash_px: 6.0,
                gap_px: 4.0,
            },
            grid_color: Color::rgba(0.5, 0.5, 0.5, 0.4),
            grid_line_width: 1.0,
            grid_stroke_style: LineStrokeStyle::Dotted,
            lane_border_color: Color::rgb(0.75, 0.75, 0.75),
            lane_border_width: 1.0,
            text_color: Color::rgb(0.1, 0.1, 0.1),
            muted_text_color: Color::rgb(0.5, 0.5, 0.5),
            scrollbar_track_color: Color::rgb(0.9, 0.9, 0.9),
            scrollbar_thumb_color: Color::from_rgb8(0x46, 0x82, 0xb4),
            margin_left_px: 60.0,
            margin_right_px: 90.0,
            margin_top_px: 30.0,
            margin_bottom_px: 20.0,
            lane_gap_px: 28.0,
            unit_label_band_px: 90.0,
            scrollbar_height_px: 12.0,
            title_font_size_px: 13.0,
            rule_label_font_size_px: 10.0,
            unit_label_font_size_px: 9.0,
            unit_axis_title: "Unique Part ID".to_owned(),
            value_scale_tuning: ValueScaleTuning::default(),
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.series_color,
            self.alert_color,
            self.band_color,
            self.lower_rule_color,
            self.upper_rule_color,
            self.grid_color,
            self.lane_border_color,
            self.text_color,
            self.muted_text_color,
            self.scrollbar_track_color,
            self.scrollbar_thumb_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("series_line_width", self.series_line_width),
            ("marker_radius", self.marker_radius),
            ("rule_line_width", self.rule_line_width),
            ("grid_line_width", self.grid_line_width),
            ("lane_border_width", self.lane_border_width),
            ("title_font_size_px", self.title_font_size_px),
            ("rule_label_font_size_px", self.rule_label_font_size_px),
            ("unit_label_font_size_px", self.unit_label_font_size_px),
            ("scrollbar_height_px", self.scrollbar_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::Config(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }

        for (name, value) in [
            ("margin_left_px", self.margin_left_px),
            ("margin_right_px", self.margin_right_px),
            ("margin_top_px", self.margin_top_px),
            ("margin_bottom_px", self.margin_bottom_px),
            ("lane_gap_px", self.lane_gap_px),
            ("unit_label_band_px", self.unit_label_band_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::Config(format!(
                    "style `{name}` must be finite and >= 0"
                )));
            }
        }

        self.value_scale_tuning.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RenderStyle;

    #[test]
    fn default_style_is_valid() {
        assert!(RenderStyle::default().validate().is_ok());
    }

    #[test]
    fn negative_margin_is_rejected() {
        let style = RenderStyle {
            margin_left_px: -1.0,
            ..RenderStyle::default()
        };
        assert!(style.validate().is_err());
    }
}
