mod mark;
mod reconcile;
mod tween;

pub use mark::{Mark, MarkKey, MarkStyle, ResolvedMark};
pub use reconcile::{JoinCounts, Scene, TRANSITION_DURATION};
pub use tween::Tween;
