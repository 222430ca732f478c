use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::core::{RawTable, UnitIndex};
use crate::data::{
    DiagnosticsReport, LimitTable, NormalizedSamples, RowDropCounts, Sample, SeriesAggregator,
    SeriesNormalizer,
};
use crate::error::ChartResult;
use crate::layout::{Lane, LaneLayout, LaneOrderSource, resolve_parameter_order};

use super::ChartConfig;

/// Fully derived chart: lanes, the shared unit axis, the cross-lane
/// out-of-spec set and the diagnostics of the build that produced it.
///
/// Immutable once built; scrolling never touches it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessChart {
    layout: LaneLayout,
    lanes: Vec<Lane>,
    out_of_spec_units: BTreeSet<String>,
    diagnostics: DiagnosticsReport,
}

impl ProcessChart {
    /// Runs the whole pipeline over a measurement table and a limits table.
    ///
    /// Fails only on schema errors; row-level problems end up in
    /// [`ProcessChart::diagnostics`].
    pub fn build(config: &ChartConfig, results: &RawTable, limits: &RawTable) -> ChartResult<Self> {
        let normalized = SeriesNormalizer::new(config.columns.clone(), config.rename_map.clone())
            .normalize(results)?;
        let limit_table =
            LimitTable::from_raw_table(limits, &config.limit_columns, &config.rename_map)?;
        Ok(Self::assemble(
            &config.lane_order_source,
            normalized,
            &limit_table,
        ))
    }

    /// Builds from samples that were already validated elsewhere.
    #[must_use]
    pub fn from_samples(
        order_source: &LaneOrderSource,
        samples: Vec<Sample>,
        limits: &LimitTable,
    ) -> Self {
        let rows_seen = samples.len();
        Self::assemble(
            order_source,
            NormalizedSamples {
                samples,
                rows_seen,
                dropped: RowDropCounts::default(),
            },
            limits,
        )
    }

    fn assemble(
        order_source: &LaneOrderSource,
        normalized: NormalizedSamples,
        limits: &LimitTable,
    ) -> Self {
        let series = SeriesAggregator.aggregate_by_parameter(&normalized.samples);
        let order = resolve_parameter_order(order_source, limits, &series);
        let layout = LaneLayout::new(order, &series);
        let lanes = layout.build_lanes(&series, limits);
        let out_of_spec_units = collect_out_of_spec_units(&lanes);

        let diagnostics = DiagnosticsReport {
            rows_seen: normalized.rows_seen,
            samples_kept: normalized.samples.len(),
            dropped: normalized.dropped,
            limit_issues: limits.issues().to_vec(),
            empty_parameters: lanes
                .iter()
                .filter(|lane| !lane.has_data())
                .map(|lane| lane.parameter.clone())
                .collect(),
        };
        for parameter in &diagnostics.empty_parameters {
            debug!(parameter = %parameter, "lane has no data");
        }
        info!(
            lanes = lanes.len(),
            units = layout.units().len(),
            out_of_spec_units = out_of_spec_units.len(),
            summary = %diagnostics.summary_line(),
            "process chart built"
        );

        Self {
            layout,
            lanes,
            out_of_spec_units,
            diagnostics,
        }
    }

    #[must_use]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[must_use]
    pub fn lane(&self, parameter: &str) -> Option<&Lane> {
        self.layout
            .lane_index(parameter)
            .and_then(|index| self.lanes.get(index))
    }

    #[must_use]
    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    #[must_use]
    pub fn units(&self) -> &UnitIndex {
        self.layout.units()
    }

    #[must_use]
    pub fn total_units(&self) -> usize {
        self.layout.units().len()
    }

    /// Units out of spec in at least one lane.
    #[must_use]
    pub fn out_of_spec_units(&self) -> &BTreeSet<String> {
        &self.out_of_spec_units
    }

    #[must_use]
    pub fn is_unit_out_of_spec(&self, unit_id: &str) -> bool {
        self.out_of_spec_units.contains(unit_id)
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticsReport {
        &self.diagnostics
    }
}

fn collect_out_of_spec_units(lanes: &[Lane]) -> BTreeSet<String> {
    lanes
        .iter()
        .flat_map(|lane| lane.series.out_of_spec_units())
        .map(str::to_owned)
        .collect()
}
