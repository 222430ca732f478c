use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Half-span applied around flat data, relative to the data magnitude.
const FLAT_RELATIVE_HALF_SPAN: f64 = 0.05;

/// Tuning controls for per-lane value-axis fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScaleTuning {
    pub top_padding_ratio: f64,
    pub bottom_padding_ratio: f64,
    pub min_span_absolute: f64,
}

impl Default for ValueScaleTuning {
    fn default() -> Self {
        Self {
            top_padding_ratio: 0.10,
            bottom_padding_ratio: 0.10,
            min_span_absolute: 1.0,
        }
    }
}

impl ValueScaleTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.top_padding_ratio.is_finite()
            || !self.bottom_padding_ratio.is_finite()
            || self.top_padding_ratio < 0.0
            || self.bottom_padding_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "value scale padding ratios must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(ChartError::InvalidData(
                "value scale min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Vertical value axis of one lane, mapped onto an upward-growing pixel band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    linear: LinearScale,
}

impl ValueScale {
    pub fn new(domain_min: f64, domain_max: f64) -> ChartResult<Self> {
        Ok(Self {
            linear: LinearScale::new(domain_min.min(domain_max), domain_min.max(domain_max))?,
        })
    }

    /// Fits the domain to every finite value plus the optional limit pair.
    ///
    /// The fit covers the whole series, not the visible window, so scrolling
    /// never rescales a lane. Without any input the domain is `[0, 1]`.
    pub fn fit(
        values: impl IntoIterator<Item = f64>,
        limits: Option<(f64, f64)>,
        tuning: ValueScaleTuning,
    ) -> ChartResult<Self> {
        let tuning = tuning.validate()?;

        let finite: Vec<OrderedFloat<f64>> = values
            .into_iter()
            .chain(limits.into_iter().flat_map(|(lower, upper)| [lower, upper]))
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
            .collect();

        let (Some(min), Some(max)) = (finite.iter().min(), finite.iter().max()) else {
            return Self::new(0.0, 1.0);
        };
        let (min, max) = (min.into_inner(), max.into_inner());

        // Halves keep the span finite even for values at opposite ends of f64.
        let half_span = 0.5 * max - 0.5 * min;
        if half_span <= 0.0 {
            let center = 0.5 * min + 0.5 * max;
            let half = (center.abs() * FLAT_RELATIVE_HALF_SPAN).max(0.5 * tuning.min_span_absolute);
            return Self::new(clamp_finite(center - half), clamp_finite(center + half));
        }

        Self::new(
            clamp_finite(min - 2.0 * half_span * tuning.bottom_padding_ratio),
            clamp_finite(max + 2.0 * half_span * tuning.top_padding_ratio),
        )
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    /// Maps a value into `[top_px, bottom_px]`, larger values higher up.
    pub fn value_to_pixel(self, value: f64, top_px: f64, bottom_px: f64) -> ChartResult<f64> {
        self.linear.domain_to_pixel(value, bottom_px, top_px)
    }

    pub fn pixel_to_value(self, pixel: f64, top_px: f64, bottom_px: f64) -> ChartResult<f64> {
        self.linear.pixel_to_domain(pixel, bottom_px, top_px)
    }
}

fn clamp_finite(value: f64) -> f64 {
    value.clamp(-f64::MAX, f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{ValueScale, ValueScaleTuning};

    #[test]
    fn fit_includes_limits_and_padding() {
        let scale = ValueScale::fit([9.0, 10.0], Some((5.0, 15.0)), ValueScaleTuning::default())
            .expect("fit");
        let (min, max) = scale.domain();
        assert!((min - 4.0).abs() <= 1e-9);
        assert!((max - 16.0).abs() <= 1e-9);
    }

    #[test]
    fn flat_values_get_a_non_empty_domain() {
        let scale = ValueScale::fit([42.0, 42.0], None, ValueScaleTuning::default()).expect("fit");
        let (min, max) = scale.domain();
        assert!(min < 42.0 && max > 42.0);
    }

    #[test]
    fn values_at_opposite_ends_of_f64_keep_a_finite_domain() {
        let scale = ValueScale::fit([-1e308, 1e308], None, ValueScaleTuning::default()).expect("fit");
        let (min, max) = scale.domain();
        assert_eq!((min, max), (-f64::MAX, f64::MAX));

        let top = scale.value_to_pixel(1e308, 100.0, 300.0).expect("top");
        let bottom = scale.value_to_pixel(-1e308, 100.0, 300.0).expect("bottom");
        assert!(top.is_finite() && bottom.is_finite());
        assert!(top < bottom);
    }

    #[test]
    fn empty_input_falls_back_to_unit_domain() {
        let scale = ValueScale::fit(Vec::new(), None, ValueScaleTuning::default()).expect("fit");
        assert_eq!(scale.domain(), (0.0, 1.0));
    }
}
