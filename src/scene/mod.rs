pub mod frame;
pub mod intersection;
pub mod widget;

pub use frame::Frame;
pub use intersection::Intersection;
pub use widget::{Widget, WidgetKind};
