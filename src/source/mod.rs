//! Table loaders feeding [`RawTable`](crate::core::RawTable).

use serde::{Deserialize, Serialize};

#[cfg(feature = "csv-source")]
mod csv_source;
#[cfg(feature = "csv-source")]
pub use csv_source::{decode_text, read_table_from_bytes, read_table_from_path};

/// What to do when input bytes are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingFallback {
    /// Reject the input.
    Utf8Only,
    /// Decode as Latin-1, which accepts every byte sequence.
    #[default]
    Utf8ThenLatin1,
}
