use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Shared categorical x axis: every distinct unit id, sorted lexicographically.
///
/// All lanes resolve x positions through the same index so a unit lines up
/// vertically across lanes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitIndex {
    units: Vec<String>,
    positions: HashMap<String, usize>,
}

impl UnitIndex {
    #[must_use]
    pub fn from_unit_ids<'a>(unit_ids: impl IntoIterator<Item = &'a str>) -> Self {
        let sorted: BTreeSet<&str> = unit_ids.into_iter().collect();
        let units: Vec<String> = sorted.into_iter().map(str::to_owned).collect();
        let positions = units
            .iter()
            .enumerate()
            .map(|(index, unit)| (unit.clone(), index))
            .collect();
        Self { units, positions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn position(&self, unit_id: &str) -> Option<usize> {
        self.positions.get(unit_id).copied()
    }

    #[must_use]
    pub fn unit(&self, position: usize) -> Option<&str> {
        self.units.get(position).map(String::as_str)
    }

    #[must_use]
    pub fn units(&self) -> &[String] {
        &self.units
    }
}

/// Maps unit positions inside the visible window to horizontal pixels.
///
/// Each of the `window_width` slots gets an equal share of the plot width and
/// units sit at slot centers. Positions outside the window have no pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitAxis {
    visible: Range<usize>,
    window_width: usize,
    scale: LinearScale,
    plot_left: f64,
    plot_right: f64,
}

impl UnitAxis {
    pub fn new(
        visible: Range<usize>,
        window_width: usize,
        plot_left: f64,
        plot_right: f64,
    ) -> ChartResult<Self> {
        if window_width == 0 {
            return Err(ChartError::InvalidData(
                "unit window width must be > 0".to_owned(),
            ));
        }
        if !plot_left.is_finite() || !plot_right.is_finite() || plot_right <= plot_left {
            return Err(ChartError::InvalidData(
                "unit axis pixel span must be finite and increasing".to_owned(),
            ));
        }

        let first = visible.start as f64 - 0.5;
        let scale = LinearScale::new(first, first + window_width as f64)?;
        Ok(Self {
            visible,
            window_width,
            scale,
            plot_left,
            plot_right,
        })
    }

    #[must_use]
    pub fn visible(&self) -> Range<usize> {
        self.visible.clone()
    }

    #[must_use]
    pub fn slot_width(&self) -> f64 {
        (self.plot_right - self.plot_left) / self.window_width as f64
    }

    /// Returns the slot-center pixel of a visible unit position.
    #[must_use]
    pub fn position_to_pixel(&self, position: usize) -> Option<f64> {
        if !self.visible.contains(&position) {
            return None;
        }
        self.scale
            .domain_to_pixel(position as f64, self.plot_left, self.plot_right)
            .ok()
    }

    /// Hit-tests a pixel against the visible slots.
    #[must_use]
    pub fn pixel_to_position(&self, pixel: f64) -> Option<usize> {
        if !pixel.is_finite() || pixel < self.plot_left || pixel >= self.plot_right {
            return None;
        }
        let domain = self
            .scale
            .pixel_to_domain(pixel, self.plot_left, self.plot_right)
            .ok()?;
        let position = domain.round();
        if position < 0.0 {
            return None;
        }
        let position = position as usize;
        self.visible.contains(&position).then_some(position)
    }
}
