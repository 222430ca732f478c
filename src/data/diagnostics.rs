use serde::{Deserialize, Serialize};

use crate::data::{LimitIssue, RowDropReason};
use crate::error::{ChartError, ChartResult};

/// Per-reason tally of dropped measurement rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowDropCounts {
    pub short_row: usize,
    pub missing_unit_id: usize,
    pub missing_parameter: usize,
    pub missing_result: usize,
    pub non_numeric_result: usize,
    pub non_finite_result: usize,
}

impl RowDropCounts {
    pub fn record(&mut self, reason: RowDropReason) {
        let slot = match reason {
            RowDropReason::ShortRow => &mut self.short_row,
            RowDropReason::MissingUnitId => &mut self.missing_unit_id,
            RowDropReason::MissingParameter => &mut self.missing_parameter,
            RowDropReason::MissingResult => &mut self.missing_result,
            RowDropReason::NonNumericResult => &mut self.non_numeric_result,
            RowDropReason::NonFiniteResult => &mut self.non_finite_result,
        };
        *slot += 1;
    }

    #[must_use]
    pub fn count(self, reason: RowDropReason) -> usize {
        match reason {
            RowDropReason::ShortRow => self.short_row,
            RowDropReason::MissingUnitId => self.missing_unit_id,
            RowDropReason::MissingParameter => self.missing_parameter,
            RowDropReason::MissingResult => self.missing_result,
            RowDropReason::NonNumericResult => self.non_numeric_result,
            RowDropReason::NonFiniteResult => self.non_finite_result,
        }
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.short_row
            + self.missing_unit_id
            + self.missing_parameter
            + self.missing_result
            + self.non_numeric_result
            + self.non_finite_result
    }
}

/// Soft failures collected while building one chart.
///
/// None of these stop a build; a best-effort chart is still produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub rows_seen: usize,
    pub samples_kept: usize,
    pub dropped: RowDropCounts,
    pub limit_issues: Vec<LimitIssue>,
    /// Lanes whose parameter has no samples.
    pub empty_parameters: Vec<String>,
}

impl DiagnosticsReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped.total() == 0 && self.limit_issues.is_empty() && self.empty_parameters.is_empty()
    }

    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{} rows read, {} samples kept, {} rows dropped, {} limit issue(s), {} empty lane(s)",
            self.rows_seen,
            self.samples_kept,
            self.dropped.total(),
            self.limit_issues.len(),
            self.empty_parameters.len()
        )
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize diagnostics json: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagnosticsReport, RowDropCounts};
    use crate::data::RowDropReason;

    #[test]
    fn drop_counts_tally_per_reason() {
        let mut counts = RowDropCounts::default();
        counts.record(RowDropReason::NonNumericResult);
        counts.record(RowDropReason::NonNumericResult);
        counts.record(RowDropReason::MissingUnitId);
        assert_eq!(counts.count(RowDropReason::NonNumericResult), 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn summary_mentions_every_counter() {
        let report = DiagnosticsReport {
            rows_seen: 10,
            samples_kept: 8,
            empty_parameters: vec!["Voltage".to_owned()],
            ..DiagnosticsReport::default()
        };
        assert!(!report.is_clean());
        assert_eq!(
            report.summary_line(),
            "10 rows read, 8 samples kept, 0 rows dropped, 0 limit issue(s), 1 empty lane(s)"
        );
    }
}
