use crate::error::{ChartError, ChartResult};

/// Affine map between a finite value domain and a pixel span.
///
/// The pixel span may be reversed (`span_start > span_end`), which is how the
/// value axes of lanes grow upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, span_start: f64, span_end: f64) -> ChartResult<f64> {
        validate_span(span_start, span_end)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (0.5 * value - 0.5 * self.domain_start) / self.half_span();
        Ok(span_start + normalized * (span_end - span_start))
    }

    pub fn pixel_to_domain(self, pixel: f64, span_start: f64, span_end: f64) -> ChartResult<f64> {
        validate_span(span_start, span_end)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - span_start) / (span_end - span_start);
        Ok(self.domain_start + 2.0 * (normalized * self.half_span()))
    }

    /// Half of the domain width, finite for any pair of finite bounds.
    fn half_span(self) -> f64 {
        0.5 * self.domain_end - 0.5 * self.domain_start
    }
}

fn validate_span(span_start: f64, span_end: f64) -> ChartResult<()> {
    if !span_start.is_finite() || !span_end.is_finite() || span_start == span_end {
        return Err(ChartError::InvalidData(
            "pixel span must be finite and non-empty".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn reversed_span_maps_domain_end_to_top() {
        let scale = LinearScale::new(0.0, 10.0).expect("valid scale");
        let top = scale.domain_to_pixel(10.0, 200.0, 100.0).expect("top");
        let bottom = scale.domain_to_pixel(0.0, 200.0, 100.0).expect("bottom");
        assert_eq!(top, 100.0);
        assert_eq!(bottom, 200.0);
    }

    #[test]
    fn empty_span_is_rejected() {
        let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
        assert!(scale.domain_to_pixel(0.5, 10.0, 10.0).is_err());
    }
}
