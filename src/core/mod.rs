pub mod scale;
pub mod types;
pub mod unit_axis;
pub mod value_scale;

pub use scale::LinearScale;
pub use types::{CellCoercionError, CellValue, RawTable, Viewport, normalize_column_name};
pub use unit_axis::{UnitAxis, UnitIndex};
pub use value_scale::{ValueScale, ValueScaleTuning};
