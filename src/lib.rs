#![doc = "DistrictLens public API"]
mod common;
mod dashboard;
mod data;
mod drill;
mod interact;
mod scale;
mod scene;

#[doc(inline)]
pub use data::{
    CampusRecord, Dataset, DistrictId, DistrictRecord, MetricField, OverUnder, SchoolType,
    read_campuses, read_districts, unique,
};

#[doc(inline)]
pub use scale::{BandScale, CategoryColors, FillMode, LinearScale, PALETTE, Rgb, extent, turbo};

#[doc(inline)]
pub use scene::{
    JoinCounts, Mark, MarkKey, MarkStyle, ResolvedMark, Scene, TRANSITION_DURATION, Tween,
};

#[doc(inline)]
pub use interact::{Axis, Event, Outcome, TOOLTIP_OFFSET, Tooltip};

#[doc(inline)]
pub use drill::{CampusKey, DrillRow, DrilldownView};

#[doc(inline)]
pub use dashboard::{AxisSelection, Dashboard, Phase};
