use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CellValue, RawTable};
use crate::data::{
    ColumnConfig, RawRow, RenameMap, RowDropCounts, RowDropReason, Sample, resolve_columns,
};
use crate::error::ChartResult;

/// Canonical samples plus the row-level accounting that produced them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedSamples {
    pub samples: Vec<Sample>,
    pub rows_seen: usize,
    pub dropped: RowDropCounts,
}

/// Turns a decoded measurement table into validated [`Sample`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesNormalizer {
    columns: ColumnConfig,
    rename_map: RenameMap,
    source_name: String,
}

impl SeriesNormalizer {
    #[must_use]
    pub fn new(columns: ColumnConfig, rename_map: RenameMap) -> Self {
        Self {
            columns,
            rename_map,
            source_name: "results".to_owned(),
        }
    }

    /// Names the source in schema errors and log events.
    #[must_use]
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }

    /// Binds the header once, then converts every row.
    ///
    /// A missing required column fails the whole table. Row-level defects are
    /// dropped and counted.
    pub fn normalize(&self, table: &RawTable) -> ChartResult<NormalizedSamples> {
        let resolved = resolve_columns(
            &self.source_name,
            table,
            &self.rename_map,
            &self.columns.required(),
        )?;
        let unit_id_at = resolved.require(&self.columns.unit_id)?;
        let parameter_at = resolved.require(&self.columns.parameter)?;
        let result_at = resolved.require(&self.columns.result)?;
        let unit_of_measure_at = self
            .columns
            .unit_of_measure
            .as_deref()
            .and_then(|name| resolved.position(name));
        let min_row_len = unit_id_at.max(parameter_at).max(result_at) + 1;

        let mut normalized = NormalizedSamples {
            samples: Vec::with_capacity(table.rows.len()),
            rows_seen: table.rows.len(),
            dropped: RowDropCounts::default(),
        };

        for (row_index, cells) in table.rows.iter().enumerate() {
            if cells.len() < min_row_len {
                debug!(row_index, cells = cells.len(), "dropping short row");
                normalized.dropped.record(RowDropReason::ShortRow);
                continue;
            }

            let raw = RawRow {
                row_index,
                unit_id: cells[unit_id_at].to_text(),
                parameter_name: cells[parameter_at].to_text(),
                result: cells[result_at].clone(),
                unit_of_measure: unit_of_measure_at
                    .and_then(|at| cells.get(at))
                    .and_then(CellValue::to_text),
            };

            match raw.into_sample() {
                Ok(sample) => normalized.samples.push(sample),
                Err(reason) => {
                    debug!(row_index, ?reason, "dropping row");
                    normalized.dropped.record(reason);
                }
            }
        }

        debug!(
            source = %self.source_name,
            rows_seen = normalized.rows_seen,
            samples = normalized.samples.len(),
            dropped = normalized.dropped.total(),
            "normalized measurement rows"
        );
        Ok(normalized)
    }
}
