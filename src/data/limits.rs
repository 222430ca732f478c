use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use tracing::{debug, warn};

use crate::core::{CellCoercionError, CellValue, RawTable};
use crate::data::{LimitColumnConfig, RenameMap, resolve_columns};
use crate::error::{ChartError, ChartResult};

/// Closed acceptance interval of one parameter. Invariant: `lower <= upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterLimits {
    pub parameter: String,
    pub lower: f64,
    pub upper: f64,
}

impl ParameterLimits {
    pub fn new(parameter: impl Into<String>, lower: f64, upper: f64) -> ChartResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(ChartError::InvalidData(
                "limit bounds must be finite".to_owned(),
            ));
        }
        if lower > upper {
            return Err(ChartError::InvalidData(format!(
                "lower limit {lower} exceeds upper limit {upper}"
            )));
        }
        Ok(Self {
            parameter: parameter.into(),
            lower,
            upper,
        })
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }
}

/// One limits-table row as received from the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitRow {
    pub row_index: usize,
    pub parameter: Option<String>,
    pub lower: CellValue,
    pub upper: CellValue,
}

impl LimitRow {
    #[must_use]
    pub fn new(
        row_index: usize,
        parameter: impl Into<String>,
        lower: impl Into<CellValue>,
        upper: impl Into<CellValue>,
    ) -> Self {
        Self {
            row_index,
            parameter: Some(parameter.into()),
            lower: lower.into(),
            upper: upper.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitBound {
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitParseErrorKind {
    MissingParameter,
    InvalidBound {
        bound: LimitBound,
        cause: CellCoercionError,
    },
}

/// A limits row that could not be read; its parameter stays unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitParseError {
    pub row_index: usize,
    pub parameter: Option<String>,
    pub kind: LimitParseErrorKind,
}

impl fmt::Display for LimitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameter = self.parameter.as_deref().unwrap_or("<no parameter>");
        write!(f, "limits row {} ({parameter}): ", self.row_index)?;
        match self.kind {
            LimitParseErrorKind::MissingParameter => f.write_str("parameter name is missing"),
            LimitParseErrorKind::InvalidBound { bound, cause } => {
                let bound = match bound {
                    LimitBound::Lower => "lower",
                    LimitBound::Upper => "upper",
                };
                write!(f, "{bound} bound {cause}")
            }
        }
    }
}

impl std::error::Error for LimitParseError {}

/// Non-fatal findings recorded while building a [`LimitTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LimitIssue {
    Parse(LimitParseError),
    /// Bounds arrived as `lower > upper` and were swapped.
    Inverted {
        row_index: usize,
        parameter: String,
        lower: f64,
        upper: f64,
    },
    /// A later row repeated an already-listed parameter and was ignored.
    Duplicate { row_index: usize, parameter: String },
}

/// Ordered parameter → acceptance-interval table.
///
/// Every named parameter keeps its table position, including parameters whose
/// bounds failed to parse; those look up as unconstrained.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LimitTable {
    entries: IndexMap<String, Option<ParameterLimits>>,
    issues: Vec<LimitIssue>,
}

impl LimitTable {
    /// Builds the table; the first row naming a parameter decides its limits.
    pub fn from_rows(rows: impl IntoIterator<Item = LimitRow>) -> Self {
        let mut table = Self::default();
        for row in rows {
            table.insert_row(row);
        }
        debug!(
            parameters = table.entries.len(),
            constrained = table.entries.values().filter(|entry| entry.is_some()).count(),
            issues = table.issues.len(),
            "built limit table"
        );
        table
    }

    /// Binds the limit columns of a decoded table, then builds as `from_rows`.
    pub fn from_raw_table(
        table: &RawTable,
        columns: &LimitColumnConfig,
        rename_map: &RenameMap,
    ) -> ChartResult<Self> {
        let resolved = resolve_columns(
            "limits",
            table,
            rename_map,
            &[
                columns.parameter.as_str(),
                columns.lower.as_str(),
                columns.upper.as_str(),
            ],
        )?;
        let parameter_at = resolved.require(&columns.parameter)?;
        let lower_at = resolved.require(&columns.lower)?;
        let upper_at = resolved.require(&columns.upper)?;

        let cell = |cells: &[CellValue], at: usize| cells.get(at).cloned().unwrap_or_default();
        let rows = table
            .rows
            .iter()
            .enumerate()
            .map(|(row_index, cells)| LimitRow {
                row_index,
                parameter: cells.get(parameter_at).and_then(CellValue::to_text),
                lower: cell(cells, lower_at),
                upper: cell(cells, upper_at),
            });
        Ok(Self::from_rows(rows))
    }

    fn insert_row(&mut self, row: LimitRow) {
        let Some(parameter) = row
            .parameter
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
        else {
            self.record(LimitIssue::Parse(LimitParseError {
                row_index: row.row_index,
                parameter: None,
                kind: LimitParseErrorKind::MissingParameter,
            }));
            return;
        };

        if self.entries.contains_key(&parameter) {
            self.record(LimitIssue::Duplicate {
                row_index: row.row_index,
                parameter,
            });
            return;
        }

        let bounds = parse_bound(&row.lower, LimitBound::Lower).and_then(|lower| {
            parse_bound(&row.upper, LimitBound::Upper).map(|upper| (lower, upper))
        });
        let (lower, upper) = match bounds {
            Ok(bounds) => bounds,
            Err(kind) => {
                self.entries.insert(parameter.clone(), None);
                self.record(LimitIssue::Parse(LimitParseError {
                    row_index: row.row_index,
                    parameter: Some(parameter),
                    kind,
                }));
                return;
            }
        };

        let limits = ParameterLimits {
            parameter: parameter.clone(),
            lower: lower.min(upper),
            upper: lower.max(upper),
        };
        self.entries.insert(parameter.clone(), Some(limits));
        if lower > upper {
            self.record(LimitIssue::Inverted {
                row_index: row.row_index,
                parameter,
                lower,
                upper,
            });
        }
    }

    fn record(&mut self, issue: LimitIssue) {
        warn!(?issue, "limits row issue");
        self.issues.push(issue);
    }

    #[must_use]
    pub fn lookup(&self, parameter: &str) -> Option<&ParameterLimits> {
        self.entries.get(parameter.trim()).and_then(Option::as_ref)
    }

    /// Parameter names in table order.
    pub fn ordered_parameters(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains_parameter(&self, parameter: &str) -> bool {
        self.entries.contains_key(parameter.trim())
    }

    #[must_use]
    pub fn issues(&self) -> &[LimitIssue] {
        &self.issues
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_bound(cell: &CellValue, bound: LimitBound) -> Result<f64, LimitParseErrorKind> {
    cell.to_finite_f64()
        .map_err(|cause| LimitParseErrorKind::InvalidBound { bound, cause })
}

#[cfg(test)]
mod tests {
    use super::{LimitIssue, LimitRow, LimitTable};
    use crate::core::CellValue;

    #[test]
    fn first_occurrence_wins_and_duplicates_are_reported() {
        let table = LimitTable::from_rows([
            LimitRow::new(0, "A", 1.0, 2.0),
            LimitRow::new(1, "A", 5.0, 6.0),
        ]);
        assert_eq!(table.lookup("A").map(|limits| limits.bounds()), Some((1.0, 2.0)));
        assert!(matches!(
            table.issues(),
            [LimitIssue::Duplicate { row_index: 1, .. }]
        ));
    }

    #[test]
    fn unparsable_bounds_keep_the_parameter_unconstrained() {
        let table = LimitTable::from_rows([
            LimitRow::new(0, "A", "low", 2.0),
            LimitRow::new(1, "B", 0.0, CellValue::Empty),
        ]);
        assert_eq!(table.ordered_parameters().collect::<Vec<_>>(), ["A", "B"]);
        assert!(table.lookup("A").is_none());
        assert!(table.lookup("B").is_none());
        assert_eq!(table.issues().len(), 2);
    }
}
