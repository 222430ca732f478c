use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::core::{RawTable, normalize_column_name};
use crate::error::{ChartError, ChartResult};

/// Column names of the measurement table, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub unit_id: String,
    pub parameter: String,
    pub result: String,
    pub unit_of_measure: Option<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            unit_id: "uniquepart_id".to_owned(),
            parameter: "parameter".to_owned(),
            result: "result".to_owned(),
            unit_of_measure: Some("unit".to_owned()),
        }
    }
}

impl ColumnConfig {
    #[must_use]
    pub fn required(&self) -> [&str; 3] {
        [
            self.unit_id.as_str(),
            self.parameter.as_str(),
            self.result.as_str(),
        ]
    }
}

/// Column names of the limits table, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitColumnConfig {
    pub parameter: String,
    pub lower: String,
    pub upper: String,
}

impl Default for LimitColumnConfig {
    fn default() -> Self {
        Self {
            parameter: "parameter".to_owned(),
            lower: "lower ok".to_owned(),
            upper: "upper ok".to_owned(),
        }
    }
}

/// Header aliases applied before column matching (`param_name → parameter`).
///
/// Keys and values are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, String>", into = "IndexMap<String, String>")]
pub struct RenameMap(IndexMap<String, String>);

impl Default for RenameMap {
    fn default() -> Self {
        Self::empty().with_alias("param_name", "parameter")
    }
}

impl RenameMap {
    #[must_use]
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }

    #[must_use]
    pub fn with_alias(mut self, from: &str, to: &str) -> Self {
        self.0
            .insert(normalize_column_name(from), normalize_column_name(to));
        self
    }

    #[must_use]
    pub fn apply<'a>(&'a self, normalized: &'a str) -> &'a str {
        self.0.get(normalized).map_or(normalized, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<IndexMap<String, String>> for RenameMap {
    fn from(raw: IndexMap<String, String>) -> Self {
        raw.iter()
            .fold(Self::empty(), |map, (from, to)| map.with_alias(from, to))
    }
}

impl From<RenameMap> for IndexMap<String, String> {
    fn from(map: RenameMap) -> Self {
        map.0
    }
}

/// Header positions keyed by canonical (normalized, renamed) column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    positions: HashMap<String, usize>,
    available: Vec<String>,
    rename_map: RenameMap,
}

impl ResolvedColumns {
    /// Position of a column, looked up by any spelling of its name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        let normalized = normalize_column_name(name);
        self.positions
            .get(self.rename_map.apply(&normalized))
            .copied()
    }

    pub fn require(&self, name: &str) -> ChartResult<usize> {
        self.position(name).ok_or_else(|| {
            ChartError::InvalidData(format!("column `{name}` was not resolved"))
        })
    }

    #[must_use]
    pub fn available(&self) -> &[String] {
        &self.available
    }
}

/// Binds header names to positions and checks that every required column exists.
///
/// When two headers resolve to the same canonical name the leftmost wins.
/// A missing required column is a structural mismatch and is reported once as
/// [`ChartError::Schema`].
pub fn resolve_columns(
    source_name: &str,
    table: &RawTable,
    rename_map: &RenameMap,
    required: &[&str],
) -> ChartResult<ResolvedColumns> {
    let mut positions = HashMap::with_capacity(table.headers.len());
    let mut available = Vec::with_capacity(table.headers.len());
    for (index, header) in table.headers.iter().enumerate() {
        let normalized = normalize_column_name(header);
        let canonical = rename_map.apply(&normalized).to_owned();
        available.push(canonical.clone());
        positions.entry(canonical).or_insert(index);
    }

    let missing: Vec<String> = required
        .iter()
        .map(|name| rename_map.apply(&normalize_column_name(name)).to_owned())
        .filter(|name| !positions.contains_key(name))
        .collect();
    if !missing.is_empty() {
        error!(
            source = source_name,
            missing = ?missing,
            available = ?available,
            "required columns missing from header"
        );
        return Err(ChartError::Schema {
            source_name: source_name.to_owned(),
            missing,
            available,
        });
    }

    Ok(ResolvedColumns {
        positions,
        available,
        rename_map: rename_map.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{RenameMap, resolve_columns};
    use crate::core::RawTable;
    use crate::error::ChartError;

    #[test]
    fn rename_map_applies_before_matching() {
        let table = RawTable::new([" UniquePart_ID", "PARAM_NAME", "Result "]);
        let resolved = resolve_columns(
            "results",
            &table,
            &RenameMap::default(),
            &["uniquepart_id", "parameter", "result"],
        )
        .expect("columns resolve");
        assert_eq!(resolved.position("Parameter"), Some(1));
        assert_eq!(resolved.position("result"), Some(2));
    }

    #[test]
    fn missing_columns_are_named_with_available_ones() {
        let table = RawTable::new(["id", "param_name"]);
        let err = resolve_columns(
            "results",
            &table,
            &RenameMap::default(),
            &["uniquepart_id", "parameter", "result"],
        )
        .expect_err("schema mismatch");
        match err {
            ChartError::Schema {
                missing, available, ..
            } => {
                assert_eq!(missing, ["uniquepart_id", "result"]);
                assert_eq!(available, ["id", "parameter"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
