use crate::common::fmt_num;
use crate::data::DistrictRecord;

/// Pointer-to-tooltip offset, in surface pixels: up and to the left so the
/// panel never sits under the pointer.
pub const TOOLTIP_OFFSET: (f64, f64) = (-345.0, -150.0);

/// Hover detail for one district: a fixed set of description lines plus an
/// anchor near the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    lines: Vec<String>,
    anchor: (f64, f64),
}

impl Tooltip {
    /// Assemble the nine description lines for `district`, anchored at the
    /// pointer position plus the constant offset. Missing metrics print as
    /// "n/a" rather than dropping the line.
    pub fn for_district(district: &DistrictRecord, pointer: (f64, f64)) -> Self {
        let lines = vec![
            format!("District: {}", district.district_name),
            format!("Region: {}", district.region_name),
            format!("Student Count: {}", fmt_num(district.student_count)),
            format!("Number of Campuses: {}", fmt_num(district.campuses)),
            format!("Mean Overall Score: {}", fmt_num(district.overall_score_mean)),
            format!(
                "Mean Overperformance Score: {}",
                fmt_num(district.overperformance_score_mean)
            ),
            format!("Econ. Disadv.: {}%", fmt_num(district.economically_disadvantaged_pct)),
            format!("Limited English Proficiency: {}%", fmt_num(district.lep_pct)),
            format!("Special Education: {}%", fmt_num(district.sped_pct)),
        ];
        let anchor = (pointer.0 + TOOLTIP_OFFSET.0, pointer.1 + TOOLTIP_OFFSET.1);
        Self { lines, anchor }
    }

    /// The description lines, in display order.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Top-left anchor position on the surface.
    #[inline]
    pub fn anchor(&self) -> (f64, f64) {
        self.anchor
    }

    /// The lines joined for single-string consumers.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district() -> DistrictRecord {
        DistrictRecord {
            district_id: "101912".into(),
            district_name: "Houston ISD".to_string(),
            region_name: "Region 4".to_string(),
            student_count: 196943.0,
            campuses: 274.0,
            overall_score_mean: 78.5,
            overperformance_score_mean: -0.25,
            economically_disadvantaged_pct: 79.1,
            lep_pct: 35.0,
            sped_pct: 7.6,
            ..DistrictRecord::default()
        }
    }

    #[test]
    fn nine_lines_in_fixed_order() {
        let tooltip = Tooltip::for_district(&district(), (400.0, 300.0));
        assert_eq!(tooltip.lines().len(), 9);
        assert_eq!(tooltip.lines()[0], "District: Houston ISD");
        assert_eq!(tooltip.lines()[3], "Number of Campuses: 274");
        assert_eq!(tooltip.lines()[5], "Mean Overperformance Score: -0.25");
        assert_eq!(tooltip.lines()[8], "Special Education: 7.6%");
    }

    #[test]
    fn anchor_offsets_from_the_pointer() {
        let tooltip = Tooltip::for_district(&district(), (400.0, 300.0));
        assert_eq!(tooltip.anchor(), (55.0, 150.0));
    }

    #[test]
    fn missing_metrics_degrade_to_na() {
        let bare = DistrictRecord { district_name: "Empty ISD".to_string(), ..DistrictRecord::default() };
        let tooltip = Tooltip::for_district(&bare, (0.0, 0.0));
        assert_eq!(tooltip.lines()[2], "Student Count: n/a");
        assert_eq!(tooltip.lines()[7], "Limited English Proficiency: n/a%");
    }
}
