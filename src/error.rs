use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// A required column is absent from a source header. Nothing is drawn for
    /// that source.
    #[error(
        "{source_name}: missing required column(s) {missing:?}; available columns: {available:?}"
    )]
    Schema {
        source_name: String,
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    #[must_use]
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}
