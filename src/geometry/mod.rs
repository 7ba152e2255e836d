pub mod interval;
pub mod position;
pub mod proportional_bb;

pub use interval::{DimensionRanges, IntervalMath, OverlapArea, Span};
pub use position::{Position, Size};
pub use proportional_bb::ProportionalBoundingBox;
