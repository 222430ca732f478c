//! Measurement pipeline: raw rows to classified per-parameter series.

pub mod aggregator;
pub mod classifier;
pub mod columns;
pub mod diagnostics;
pub mod limits;
pub mod normalizer;
pub mod sample;

pub use aggregator::{AggregatedPoint, AggregatedSeries, SeriesAggregator};
pub use classifier::{ClassifiedSample, ClassifiedSeries, SpecStatus, classify};
pub use columns::{ColumnConfig, LimitColumnConfig, RenameMap, ResolvedColumns, resolve_columns};
pub use diagnostics::{DiagnosticsReport, RowDropCounts};
pub use limits::{
    LimitBound, LimitIssue, LimitParseError, LimitParseErrorKind, LimitRow, LimitTable,
    ParameterLimits,
};
pub use normalizer::{NormalizedSamples, SeriesNormalizer};
pub use sample::{RawRow, RowDropReason, Sample};
