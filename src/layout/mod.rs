mod lane_layout;

pub use lane_layout::{Lane, LaneLayout, LaneOrderSource, LaneRegion, resolve_parameter_order};
