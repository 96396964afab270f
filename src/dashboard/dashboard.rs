use std::sync::Arc;

use tracing::debug;

use crate::data::{Dataset, DistrictId, MetricField};
use crate::drill::DrilldownView;
use crate::interact::{Axis, Event, Outcome, Tooltip};
use crate::scale::{CategoryColors, FillMode, LinearScale, ramp_t, turbo};
use crate::scene::{JoinCounts, MarkKey, MarkStyle, Scene};

pub(crate) const WIDTH: f64 = 900.0;
pub(crate) const HEIGHT: f64 = 700.0;
pub(crate) const MARGIN_TOP: f64 = 10.0;
pub(crate) const MARGIN_LEFT: f64 = 50.0;
pub(crate) const MARGIN_RIGHT: f64 = 300.0;
pub(crate) const MARGIN_BOTTOM: f64 = 50.0;
/// Plot area inside the margins.
pub(crate) const PLOT_WIDTH: f64 = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
pub(crate) const PLOT_HEIGHT: f64 = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

const MARK_RADIUS: f64 = 3.0;

/// The current X/Y metric pair. Changing an axis replaces the whole pair;
/// nothing downstream caches pieces of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSelection {
    pub x: MetricField,
    pub y: MetricField,
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self {
            x: MetricField::EconomicallyDisadvantagedPct,
            y: MetricField::OverallScoreMean,
        }
    }
}

impl AxisSelection {
    /// The pair with one axis replaced.
    pub fn with(self, axis: Axis, field: MetricField) -> Self {
        match axis {
            Axis::X => Self { x: field, ..self },
            Axis::Y => Self { y: field, ..self },
        }
    }
}

/// Lifecycle of a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, nothing painted yet.
    Idle,
    /// The scatter scene has been painted at least once.
    Rendered,
    /// A drill-down view is open beneath the scatter.
    DrilledDown,
}

/// The orchestrator. Owns every piece of mutable state: the dataset handle,
/// the axis selection, the color mapping, the mark scene, the open tooltip
/// and drill-down, and the animation clock. Interactions arrive as [`Event`]s
/// (or the equivalent named methods) and mutate state by recomputation;
/// no derived value is patched in place.
#[derive(Debug)]
pub struct Dashboard {
    data: Arc<Dataset>,
    selection: AxisSelection,
    colors: CategoryColors,
    fill_mode: FillMode,
    scene: Scene,
    tooltip: Option<Tooltip>,
    selected: Option<DistrictId>,
    drilldown: Option<DrilldownView>,
    time: f64,
    painted: bool,
}

impl Dashboard {
    /// Create an idle dashboard over the dataset. The category color mapping
    /// is fixed here, once, so it never shifts between renders.
    pub fn new(data: impl Into<Arc<Dataset>>) -> Self {
        let data: Arc<Dataset> = data.into();
        let colors = CategoryColors::build(data.districts());
        Self {
            data,
            selection: AxisSelection::default(),
            colors,
            fill_mode: FillMode::default(),
            scene: Scene::new(),
            tooltip: None,
            selected: None,
            drilldown: None,
            time: 0.0,
            painted: false,
        }
    }

    // --- Accessors ---

    #[inline]
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    #[inline]
    pub fn selection(&self) -> AxisSelection {
        self.selection
    }

    #[inline]
    pub fn colors(&self) -> &CategoryColors {
        &self.colors
    }

    #[inline]
    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// District of the open drill-down, if any.
    #[inline]
    pub fn selected(&self) -> Option<&DistrictId> {
        self.selected.as_ref()
    }

    #[inline]
    pub fn drilldown(&self) -> Option<&DrilldownView> {
        self.drilldown.as_ref()
    }

    /// Current animation clock reading.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn phase(&self) -> Phase {
        if self.drilldown.is_some() {
            Phase::DrilledDown
        } else if self.painted {
            Phase::Rendered
        } else {
            Phase::Idle
        }
    }

    /// Pick which fill channel paints the marks. Takes effect on the next
    /// render; the legend always describes the category channel.
    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.fill_mode = mode;
    }

    /// The X/Y scales for the current selection over the current data. The Y
    /// range is inverted so the data minimum lands at the bottom pixel.
    pub fn compute_scales(&self) -> (LinearScale, LinearScale) {
        let x = LinearScale::fit(
            self.data.districts().iter().map(|d| d.metric(self.selection.x)),
            (0.0, PLOT_WIDTH),
        );
        let y = LinearScale::fit(
            self.data.districts().iter().map(|d| d.metric(self.selection.y)),
            (PLOT_HEIGHT, 0.0),
        );
        (x, y)
    }

    /// Paint or repaint the scatter scene for the current selection. Marks
    /// are keyed by district id, so a repaint moves existing marks instead
    /// of replacing them; positions animate, styles apply at once.
    pub fn render(&mut self) -> JoinCounts {
        let (x_scale, y_scale) = self.compute_scales();
        let selection = self.selection;
        let fill_mode = self.fill_mode;
        let colors = &self.colors;
        let districts = self.data.districts();
        let n = districts.len();

        let counts = self.scene.reconcile(
            districts,
            self.time,
            |d| MarkKey::new(d.district_id.as_str()),
            |d| (x_scale.apply(d.metric(selection.x)), y_scale.apply(d.metric(selection.y))),
            |d, slot| MarkStyle {
                fill: match fill_mode {
                    FillMode::Category => colors.color(&d.tea_description),
                    FillMode::Ramp => turbo(ramp_t(slot, n)),
                },
                radius: MARK_RADIUS,
            },
        );
        self.painted = true;

        debug!(
            x = %selection.x,
            y = %selection.y,
            entered = counts.entered,
            updated = counts.updated,
            exited = counts.exited,
            "scatter rendered"
        );
        counts
    }

    /// Replace the whole axis pair and repaint.
    pub fn set_selection(&mut self, selection: AxisSelection) -> JoinCounts {
        self.selection = selection;
        self.render()
    }

    /// Replace one axis of the pair and repaint (the axis-menu handler).
    pub fn set_axis(&mut self, axis: Axis, field: MetricField) -> JoinCounts {
        self.set_selection(self.selection.with(axis, field))
    }

    /// Pointer entered a mark: open (or move) the tooltip for its district.
    /// An unknown key clears any open tooltip instead.
    pub fn hover(&mut self, key: &MarkKey, pointer: (f64, f64)) -> Option<Tooltip> {
        let id = DistrictId::new(key.as_str());
        match self.data.district(&id) {
            Some(district) => {
                let tooltip = Tooltip::for_district(district, pointer);
                self.tooltip = Some(tooltip.clone());
                Some(tooltip)
            }
            None => {
                self.tooltip = None;
                None
            }
        }
    }

    /// Pointer left the mark: dismiss the tooltip.
    pub fn hover_end(&mut self) {
        self.tooltip = None;
    }

    /// A mark was clicked: replace any open drill-down with a freshly built
    /// view for the mark's district. Returns the district id, or None for an
    /// unknown key (state untouched).
    pub fn click(&mut self, key: &MarkKey) -> Option<DistrictId> {
        let id = DistrictId::new(key.as_str());
        let Some(district) = self.data.district(&id) else {
            debug!(key = %key, "click ignored, unknown mark key");
            return None;
        };

        // At most one detail panel: drop any previous view before building.
        self.drilldown = None;
        let campuses = self.data.campuses(&district.district_id);
        let view = DrilldownView::build(district, campuses);
        debug!(district = %district.district_id, rows = view.row_count(), "drill-down replaced");

        let id = district.district_id.clone();
        self.selected = Some(id.clone());
        self.drilldown = Some(view);
        Some(id)
    }

    /// Advance the animation clock. The clock never runs backwards.
    pub fn advance(&mut self, dt: f64) {
        self.time += dt.max(0.0);
    }

    /// Dispatch one interaction event against the current state.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        match event {
            Event::SetAxis { axis, field } => Outcome::Rendered(self.set_axis(axis, field)),
            Event::Hover { key, pointer } => match self.hover(&key, pointer) {
                Some(tooltip) => Outcome::TooltipShown(tooltip),
                None => Outcome::Ignored,
            },
            Event::HoverEnd => {
                self.hover_end();
                Outcome::TooltipHidden
            }
            Event::Click { key } => match self.click(&key) {
                Some(id) => Outcome::DrilldownBuilt(id),
                None => Outcome::Ignored,
            },
            Event::Advance { dt } => {
                self.advance(dt);
                Outcome::Advanced
            }
        }
    }
}
