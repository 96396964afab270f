use crate::data::{DistrictId, MetricField};
use crate::scene::{JoinCounts, MarkKey};

use super::tooltip::Tooltip;

/// Which scatter axis a selection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// User-interaction messages dispatched into the dashboard. Each variant
/// corresponds to one gesture on the rendered surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Replace one axis of the metric selection.
    SetAxis { axis: Axis, field: MetricField },
    /// The pointer entered a mark, at `pointer` surface coordinates.
    Hover { key: MarkKey, pointer: (f64, f64) },
    /// The pointer left whatever mark it was on.
    HoverEnd,
    /// A mark was clicked.
    Click { key: MarkKey },
    /// Advance the animation clock by `dt` time units.
    Advance { dt: f64 },
}

/// What one event dispatch did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The scene was repainted; counts from the reconcile pass.
    Rendered(JoinCounts),
    /// A tooltip is now showing.
    TooltipShown(Tooltip),
    /// The tooltip was dismissed.
    TooltipHidden,
    /// A drill-down view was built for the district.
    DrilldownBuilt(DistrictId),
    /// The clock moved forward.
    Advanced,
    /// The event referenced an unknown mark; state is unchanged.
    Ignored,
}
