use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::common::fmt_num;
use crate::data::{CampusRecord, DistrictRecord, OverUnder};
use crate::scale::{BandScale, LinearScale, Rgb};

/// Fixed score domain: accountability scores are graded on this band, and
/// the clamped scale clips the rare stray value to it.
pub(crate) const SCORE_DOMAIN: (f64, f64) = (50.0, 100.0);
/// Width of the comparison chart area.
pub(crate) const PLOT_WIDTH: f64 = 500.0;
/// Height of one campus row.
pub(crate) const ROW_HEIGHT: f64 = 20.0;

pub(crate) const MARGIN_TOP: f64 = 70.0;
pub(crate) const MARGIN_LEFT: f64 = 200.0;
pub(crate) const MARGIN_RIGHT: f64 = 530.0;
pub(crate) const MARGIN_BOTTOM: f64 = 50.0;

pub(crate) const OVER_COLOR: Rgb = Rgb::new(0xaa, 0xaa, 0xaa);
pub(crate) const UNDER_COLOR: Rgb = Rgb::new(0x94, 0x00, 0x00);
pub(crate) const ACTUAL_COLOR: Rgb = Rgb::new(0x3a, 0x38, 0x38);
pub(crate) const PREDICTED_COLOR: Rgb = Rgb::new(0x33, 0x4e, 0x8b);
pub(crate) const RULE_COLOR: Rgb = Rgb::new(0x87, 0x76, 0x2f);

/// Footnotes explaining the table's abbreviated headings.
pub(crate) const FOOTNOTES: [&str; 4] = [
    "*School types: E - Elementary, M - Middle, S - High, B - More than One",
    "**LEP - Limited English Proficiency",
    "***SPED - Special Education Status",
    "****Student mobility rate indicates the fraction of students leaving and entering the school each year.",
];

/// Row identity within one drill-down: campus name plus its position in the
/// sorted order, so districts with duplicate campus names still give every
/// row its own slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CampusKey {
    pub name: String,
    pub index: usize,
}

impl CampusKey {
    fn new(name: &str, index: usize) -> Self {
        Self { name: name.to_string(), index }
    }
}

/// One laid-out campus row.
#[derive(Debug, Clone)]
pub struct DrillRow {
    pub key: CampusKey,
    pub campus: CampusRecord,
    /// Top of the row's slot within the plot area.
    pub y: f64,
    /// Pixel position of the actual score.
    pub actual_x: f64,
    /// Pixel position of the predicted score.
    pub model_x: f64,
    /// Connector color, by overperformance sign.
    pub connector: Rgb,
    /// The six table cells, in column order.
    pub cells: SmallVec<[String; 6]>,
}

impl DrillRow {
    /// Right edge of the campus label: just left of whichever marker
    /// comes first.
    pub fn label_x(&self) -> f64 {
        self.actual_x.min(self.model_x) - 10.0
    }
}

/// The per-district detail view: campuses ranked by overperformance, each
/// with its actual and predicted score positions and a strip of table cells.
/// Built fresh on every click; nothing in it animates.
#[derive(Debug, Clone)]
pub struct DrilldownView {
    title: String,
    rows: Vec<DrillRow>,
    x_scale: LinearScale,
}

impl DrilldownView {
    /// Lay out the view for one district. Campuses sort ascending by
    /// overperformance (most underperforming first, ties keeping source
    /// order); a campus list of any length is fine, including empty.
    pub fn build(district: &DistrictRecord, campuses: &[CampusRecord]) -> Self {
        let mut sorted: Vec<CampusRecord> = campuses.to_vec();
        sorted.sort_by(|a, b| a.overperformance.total_cmp(&b.overperformance));

        let keys: Vec<CampusKey> = sorted
            .iter()
            .enumerate()
            .map(|(index, campus)| CampusKey::new(&campus.campus_name, index))
            .collect();

        let plot_height = ROW_HEIGHT * sorted.len() as f64;
        let y_scale = BandScale::new(keys.iter().cloned(), (0.0, plot_height));
        let x_scale = LinearScale::new(SCORE_DOMAIN, (0.0, PLOT_WIDTH));

        let rows: Vec<DrillRow> = sorted
            .into_iter()
            .zip(keys)
            .map(|(campus, key)| {
                let y = y_scale.position(&key).unwrap_or(0.0);
                let actual_x = x_scale.apply(campus.overall_score);
                let model_x = x_scale.apply(campus.model_overall_score);
                let connector = match campus.sign() {
                    OverUnder::Over => OVER_COLOR,
                    OverUnder::Under => UNDER_COLOR,
                };
                let cells = smallvec![
                    fmt_num(campus.student_count),
                    campus.school_type.code().to_string(),
                    fmt_num(campus.economically_disadvantaged_pct),
                    fmt_num(campus.lep_pct),
                    fmt_num(campus.sped_pct),
                    fmt_num(campus.student_mobility_pct),
                ];
                DrillRow { key, campus, y, actual_x, model_x, connector, cells }
            })
            .collect();

        debug!(district = %district.district_id, rows = rows.len(), "drill-down built");

        Self { title: district.district_name.clone(), rows, x_scale }
    }

    /// District name shown as the view title.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Laid-out rows, most underperforming first.
    #[inline]
    pub fn rows(&self) -> &[DrillRow] {
        &self.rows
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Height of the chart area: one fixed-height slot per campus row.
    #[inline]
    pub fn plot_height(&self) -> f64 {
        ROW_HEIGHT * self.rows.len() as f64
    }

    /// Total view height. Grows with the campus count so rows never clip
    /// or overlap.
    pub fn height(&self) -> f64 {
        MARGIN_TOP + self.plot_height() + MARGIN_BOTTOM
    }

    /// Total view width.
    pub fn width(&self) -> f64 {
        MARGIN_LEFT + PLOT_WIDTH + MARGIN_RIGHT
    }

    /// The score scale (fixed domain, clamped).
    #[inline]
    pub(crate) fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }
}
