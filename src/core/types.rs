use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1500, 900)
    }
}

/// One decoded cell as handed over by a table loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Reason a cell could not be read as a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CellCoercionError {
    #[error("value is missing")]
    Missing,
    #[error("value is not numeric")]
    NotNumeric,
    #[error("value is not finite")]
    NonFinite,
}

impl CellValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns `true` for empty cells, whitespace-only text and NaN floats.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Integer(_) => false,
            Self::Float(value) => value.is_nan(),
        }
    }

    /// Coerces any scalar to trimmed, non-empty text.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        match self {
            Self::Empty => None,
            Self::Text(text) => Some(text.trim().to_owned()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Float(value) => Some(value.to_string()),
        }
    }

    pub fn to_finite_f64(&self) -> Result<f64, CellCoercionError> {
        let value = match self {
            Self::Empty => return Err(CellCoercionError::Missing),
            Self::Float(value) if value.is_nan() => return Err(CellCoercionError::Missing),
            Self::Float(value) => *value,
            Self::Integer(value) => *value as f64,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(CellCoercionError::Missing);
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| CellCoercionError::NotNumeric)?
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(CellCoercionError::NonFinite)
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Decoded tabular input: a header row plus data rows of cells.
///
/// Rows may be shorter or longer than the header; binding to typed records
/// happens in the normalizer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    #[must_use]
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_row<C: Into<CellValue>>(mut self, row: impl IntoIterator<Item = C>) -> Self {
        self.push_row(row);
        self
    }

    pub fn push_row<C: Into<CellValue>>(&mut self, row: impl IntoIterator<Item = C>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Canonical form used for case-insensitive column matching.
///
/// Strips a leading byte-order mark and surrounding whitespace, then lowercases.
#[must_use]
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}
