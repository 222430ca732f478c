use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::data::{ColumnConfig, LimitColumnConfig, RenameMap};
use crate::error::{ChartError, ChartResult};
use crate::layout::LaneOrderSource;
use crate::source::EncodingFallback;

use super::RenderStyle;

/// Number of unit slots visible at once: a 15 inch wide figure at one slot
/// per 1/2.54 inch.
pub const DEFAULT_WINDOW_WIDTH: usize = 38;

pub const DEFAULT_EXPORT_PATH: &str = "complete_process_graphs.png";

/// Everything one chart build needs besides the two input tables.
///
/// Serializable so hosts can persist chart setup as JSON. Every field has a
/// default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub columns: ColumnConfig,
    pub limit_columns: LimitColumnConfig,
    pub rename_map: RenameMap,
    pub encoding_fallback: EncodingFallback,
    pub window_width: usize,
    pub lane_order_source: LaneOrderSource,
    pub viewport: Viewport,
    pub style: RenderStyle,
    pub export_path: PathBuf,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            columns: ColumnConfig::default(),
            limit_columns: LimitColumnConfig::default(),
            rename_map: RenameMap::default(),
            encoding_fallback: EncodingFallback::default(),
            window_width: DEFAULT_WINDOW_WIDTH,
            lane_order_source: LaneOrderSource::default(),
            viewport: Viewport::default(),
            style: RenderStyle::default(),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_window_width(mut self, window_width: usize) -> Self {
        self.window_width = window_width;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_lane_order_source(mut self, lane_order_source: LaneOrderSource) -> Self {
        self.lane_order_source = lane_order_source;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_rename_map(mut self, rename_map: RenameMap) -> Self {
        self.rename_map = rename_map;
        self
    }

    #[must_use]
    pub fn with_export_path(mut self, export_path: impl Into<PathBuf>) -> Self {
        self.export_path = export_path.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for (name, value) in [
            ("columns.unit_id", self.columns.unit_id.as_str()),
            ("columns.parameter", self.columns.parameter.as_str()),
            ("columns.result", self.columns.result.as_str()),
            ("limit_columns.parameter", self.limit_columns.parameter.as_str()),
            ("limit_columns.lower", self.limit_columns.lower.as_str()),
            ("limit_columns.upper", self.limit_columns.upper.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(ChartError::Config(format!("`{name}` must not be empty")));
            }
        }

        if self.export_path.as_os_str().is_empty() {
            return Err(ChartError::Config("`export_path` must not be empty".to_owned()));
        }

        self.style.validate()
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Config(format!("failed to parse chart config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Config(format!("failed to serialize chart config json: {e}")))
    }
}
