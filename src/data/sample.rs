use serde::{Deserialize, Serialize};

use crate::core::{CellCoercionError, CellValue};

/// Typed measurement record bound at the ingestion boundary.
///
/// Fields are still unvalidated; [`RawRow::into_sample`] decides whether the
/// row survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub row_index: usize,
    pub unit_id: Option<String>,
    pub parameter_name: Option<String>,
    pub result: CellValue,
    pub unit_of_measure: Option<String>,
}

/// One validated observation of a parameter on a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub unit_id: String,
    pub parameter: String,
    pub value: f64,
    pub unit_of_measure: Option<String>,
}

impl Sample {
    #[must_use]
    pub fn new(unit_id: impl Into<String>, parameter: impl Into<String>, value: f64) -> Self {
        Self {
            unit_id: unit_id.into(),
            parameter: parameter.into(),
            value,
            unit_of_measure: None,
        }
    }

    #[must_use]
    pub fn with_unit_of_measure(mut self, unit_of_measure: impl Into<String>) -> Self {
        self.unit_of_measure = Some(unit_of_measure.into());
        self
    }
}

/// Why a single measurement row was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowDropReason {
    /// The row has fewer cells than a required column position.
    ShortRow,
    MissingUnitId,
    MissingParameter,
    MissingResult,
    NonNumericResult,
    NonFiniteResult,
}

impl RawRow {
    pub fn into_sample(self) -> Result<Sample, RowDropReason> {
        let unit_id = non_blank(self.unit_id).ok_or(RowDropReason::MissingUnitId)?;
        let parameter = non_blank(self.parameter_name).ok_or(RowDropReason::MissingParameter)?;
        let value = self.result.to_finite_f64().map_err(|err| match err {
            CellCoercionError::Missing => RowDropReason::MissingResult,
            CellCoercionError::NotNumeric => RowDropReason::NonNumericResult,
            CellCoercionError::NonFinite => RowDropReason::NonFiniteResult,
        })?;

        Ok(Sample {
            unit_id,
            parameter,
            value,
            unit_of_measure: non_blank(self.unit_of_measure),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{RawRow, RowDropReason};
    use crate::core::CellValue;

    fn row(unit_id: Option<&str>, parameter: Option<&str>, result: CellValue) -> RawRow {
        RawRow {
            row_index: 0,
            unit_id: unit_id.map(str::to_owned),
            parameter_name: parameter.map(str::to_owned),
            result,
            unit_of_measure: Some("  ".to_owned()),
        }
    }

    #[test]
    fn valid_row_becomes_trimmed_sample() {
        let sample = row(Some(" P1 "), Some("Pressure "), CellValue::text("1.5"))
            .into_sample()
            .expect("valid row");
        assert_eq!(sample.unit_id, "P1");
        assert_eq!(sample.parameter, "Pressure");
        assert_eq!(sample.value, 1.5);
        assert_eq!(sample.unit_of_measure, None);
    }

    #[test]
    fn row_defects_map_to_drop_reasons() {
        assert_eq!(
            row(None, Some("A"), CellValue::Float(1.0)).into_sample(),
            Err(RowDropReason::MissingUnitId)
        );
        assert_eq!(
            row(Some("P1"), Some(" "), CellValue::Float(1.0)).into_sample(),
            Err(RowDropReason::MissingParameter)
        );
        assert_eq!(
            row(Some("P1"), Some("A"), CellValue::text("abc")).into_sample(),
            Err(RowDropReason::NonNumericResult)
        );
        assert_eq!(
            row(Some("P1"), Some("A"), CellValue::Float(f64::INFINITY)).into_sample(),
            Err(RowDropReason::NonFiniteResult)
        );
        assert_eq!(
            row(Some("P1"), Some("A"), CellValue::Empty).into_sample(),
            Err(RowDropReason::MissingResult)
        );
    }
}
