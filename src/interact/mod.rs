mod event;
mod tooltip;

pub use event::{Axis, Event, Outcome};
pub use tooltip::{TOOLTIP_OFFSET, Tooltip};
