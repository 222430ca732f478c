use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::UnitIndex;
use crate::data::{AggregatedSeries, ClassifiedSeries, LimitTable, ParameterLimits, classify};

/// Where the top-to-bottom lane order comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LaneOrderSource {
    /// Limits-table order only; parameters without a limits row are not shown.
    LimitTable,
    /// Limits-table order, then parameters only present in the data, in
    /// first-seen order.
    #[default]
    LimitTableThenData,
    /// Caller-supplied order, verbatim.
    Explicit(Vec<String>),
}

/// Resolves the canonical parameter list, deduplicated with first occurrence kept.
#[must_use]
pub fn resolve_parameter_order(
    source: &LaneOrderSource,
    limits: &LimitTable,
    series: &IndexMap<String, AggregatedSeries>,
) -> Vec<String> {
    let ordered: IndexSet<String> = match source {
        LaneOrderSource::LimitTable => limits.ordered_parameters().map(str::to_owned).collect(),
        LaneOrderSource::LimitTableThenData => limits
            .ordered_parameters()
            .map(str::to_owned)
            .chain(series.keys().cloned())
            .collect(),
        LaneOrderSource::Explicit(parameters) => parameters
            .iter()
            .map(|parameter| parameter.trim().to_owned())
            .filter(|parameter| !parameter.is_empty())
            .collect(),
    };
    ordered.into_iter().collect()
}

/// One parameter's horizontal strip.
///
/// Built once per chart build and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub index: usize,
    pub parameter: String,
    pub series: ClassifiedSeries,
    pub limits: Option<ParameterLimits>,
}

impl Lane {
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }

    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self.limits.is_some()
    }
}

/// Vertical pixel band assigned to a lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneRegion {
    pub lane_index: usize,
    pub top: f64,
    pub bottom: f64,
}

impl LaneRegion {
    #[must_use]
    pub fn height(self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    #[must_use]
    pub fn center(self) -> f64 {
        0.5 * (self.top + self.bottom)
    }
}

/// Lane order plus the shared categorical x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneLayout {
    parameters: Vec<String>,
    units: UnitIndex,
}

impl LaneLayout {
    /// Lane order is taken verbatim from `parameter_order` (duplicates dropped).
    /// The unit axis is the sorted union of every series' unit ids.
    #[must_use]
    pub fn new(
        parameter_order: impl IntoIterator<Item = String>,
        series: &IndexMap<String, AggregatedSeries>,
    ) -> Self {
        let parameters: IndexSet<String> = parameter_order.into_iter().collect();
        let units = UnitIndex::from_unit_ids(
            series
                .values()
                .flat_map(|series| series.points.iter().map(|point| point.unit_id.as_str())),
        );
        debug!(
            lanes = parameters.len(),
            units = units.len(),
            "computed lane layout"
        );
        Self {
            parameters: parameters.into_iter().collect(),
            units,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.parameters.len()
    }

    #[must_use]
    pub fn units(&self) -> &UnitIndex {
        &self.units
    }

    #[must_use]
    pub fn lane_index(&self, parameter: &str) -> Option<usize> {
        self.parameters.iter().position(|name| name == parameter)
    }

    /// One lane per listed parameter; parameters without samples become empty lanes.
    #[must_use]
    pub fn build_lanes(
        &self,
        series: &IndexMap<String, AggregatedSeries>,
        limits: &LimitTable,
    ) -> Vec<Lane> {
        self.parameters
            .iter()
            .enumerate()
            .map(|(index, parameter)| {
                let lane_limits = limits.lookup(parameter);
                let classified = match series.get(parameter) {
                    Some(series) => classify(series, lane_limits),
                    None => classify(&AggregatedSeries::empty(parameter.as_str()), lane_limits),
                };
                Lane {
                    index,
                    parameter: parameter.clone(),
                    series: classified,
                    limits: lane_limits.cloned(),
                }
            })
            .collect()
    }

    /// Splits `[plot_top, plot_bottom]` into equal lane bands separated by `gap_px`.
    ///
    /// The last lane ends exactly at `plot_bottom`. Degenerate input collapses
    /// every lane to zero height at the top.
    #[must_use]
    pub fn lane_regions(&self, plot_top: f64, plot_bottom: f64, gap_px: f64) -> Vec<LaneRegion> {
        let count = self.lane_count();
        if count == 0 {
            return Vec::new();
        }

        let safe_top = if plot_top.is_finite() {
            plot_top.max(0.0)
        } else {
            0.0
        };
        let safe_bottom = if plot_bottom.is_finite() {
            plot_bottom.max(safe_top)
        } else {
            safe_top
        };
        let safe_gap = if gap_px.is_finite() {
            gap_px.max(0.0)
        } else {
            0.0
        };

        let total_gap = safe_gap * (count - 1) as f64;
        let lane_height = ((safe_bottom - safe_top - total_gap) / count as f64).max(0.0);
        if lane_height <= 0.0 {
            return (0..count)
                .map(|lane_index| LaneRegion {
                    lane_index,
                    top: safe_top,
                    bottom: safe_top,
                })
                .collect();
        }

        let last_index = count - 1;
        let mut cursor = safe_top;
        let mut regions = Vec::with_capacity(count);
        for lane_index in 0..count {
            let bottom = if lane_index == last_index {
                safe_bottom
            } else {
                (cursor + lane_height).min(safe_bottom)
            };
            regions.push(LaneRegion {
                lane_index,
                top: cursor,
                bottom,
            });
            cursor = (bottom + safe_gap).min(safe_bottom);
        }
        regions
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::LaneLayout;

    #[test]
    fn lane_regions_split_plot_area_with_gaps() {
        let layout = LaneLayout::new(
            ["A", "B", "C"].map(str::to_owned),
            &IndexMap::new(),
        );
        let regions = layout.lane_regions(0.0, 320.0, 10.0);
        assert_eq!(regions.len(), 3);
        assert!((regions[0].height() - 100.0).abs() <= 1e-9);
        assert!((regions[1].top - 110.0).abs() <= 1e-9);
        assert!((regions[2].bottom - 320.0).abs() <= 1e-9);
    }

    #[test]
    fn duplicate_parameters_keep_first_position() {
        let layout = LaneLayout::new(["B", "A", "B"].map(str::to_owned), &IndexMap::new());
        assert_eq!(layout.parameters(), ["B", "A"]);
        assert_eq!(layout.lane_index("A"), Some(1));
    }
}
