use std::{io::Write, path::Path};

use anyhow::{Ok, Result};

use crate::common::{SvgWriter, draw_axis_bottom, draw_axis_top, xml_escape};
use crate::drill::view::{
    ACTUAL_COLOR, DrilldownView, FOOTNOTES, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP,
    OVER_COLOR, PLOT_WIDTH, PREDICTED_COLOR, RULE_COLOR, UNDER_COLOR,
};

/// Ticks requested from the score axes.
const TICK_COUNT: usize = 10;

impl DrilldownView {
    /// Export the drill-down as an SVG file.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        let mut writer = SvgWriter::create(path)?;
        self.write_svg(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Render the drill-down into an in-memory string.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut writer = SvgWriter::from_writer(Vec::new());
        self.write_svg(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write_svg<W: Write>(&self, writer: &mut SvgWriter<W>) -> Result<()> {
        let width = self.width();
        let height = self.height();
        let plot_height = self.plot_height();

        writer.write_header(width, height)?;
        writer.write_styles()?;

        writeln!(
            writer,
            r##"<text class="title" x="10" y="20">{}</text>"##,
            xml_escape(self.title())
        )?;

        // --- Dumbbell legend ---
        writeln!(writer, r##"<g class="legend" transform="translate({MARGIN_LEFT}, 5)">"##)?;
        writeln!(writer, r##"<circle cx="0" cy="0" r="3.5" fill="{ACTUAL_COLOR}"/>"##)?;
        writeln!(writer, r##"<text x="5" y="5" font-size="11">Actual Score</text>"##)?;
        writeln!(writer, r##"<circle cx="100" cy="0" r="3.5" fill="{PREDICTED_COLOR}"/>"##)?;
        writeln!(writer, r##"<text x="105" y="5" font-size="11">Predicted Score</text>"##)?;
        writeln!(writer, r##"<line x1="210" y1="2" x2="240" y2="2" stroke="{UNDER_COLOR}" stroke-width="2"/>"##)?;
        writeln!(writer, r##"<text x="245" y="5" font-size="11">Underperforms</text>"##)?;
        writeln!(writer, r##"<line x1="370" y1="2" x2="400" y2="2" stroke="{OVER_COLOR}" stroke-width="2"/>"##)?;
        writeln!(writer, r##"<text x="405" y="5" font-size="11">Overperforms</text>"##)?;
        writeln!(writer, "</g>")?;

        // --- Score axes: gridded on top, plain on the bottom ---
        let axis_y = 2.0 * MARGIN_TOP / 3.0;
        draw_axis_top(writer, self.x_scale(), (MARGIN_LEFT, axis_y), TICK_COUNT, plot_height + 25.0)?;
        draw_axis_bottom(writer, self.x_scale(), (MARGIN_LEFT, height - MARGIN_BOTTOM), TICK_COUNT)?;

        // --- Table headings ---
        let heading_y = axis_y - 5.0;
        for (offset, heading) in [
            (20.0, "Student Count"),
            (115.0, "Type*"),
            (170.0, "Pct Econ. Disadv."),
            (275.0, "Pct LEP**"),
            (350.0, "Pct SPED***"),
            (425.0, "Pct Mobility****"),
        ] {
            writeln!(
                writer,
                r##"<text class="heading" x="{:.1}" y="{heading_y:.1}">{heading}</text>"##,
                MARGIN_LEFT + PLOT_WIDTH + offset
            )?;
        }

        // --- Campus rows ---
        if self.is_empty() {
            writeln!(
                writer,
                r##"<text class="label" x="{MARGIN_LEFT}" y="{:.1}">No campus records for this district.</text>"##,
                MARGIN_TOP + 10.0
            )?;
        }
        writeln!(
            writer,
            r##"<g class="rows" text-anchor="end" transform="translate({MARGIN_LEFT}, {MARGIN_TOP})">"##
        )?;
        for row in self.rows() {
            writeln!(writer, r##"<g transform="translate(0, {:.1})">"##, row.y)?;
            writeln!(
                writer,
                r##"<line x1="{:.1}" y1="-5" x2="{:.1}" y2="-5" stroke="{}" stroke-width="2"/>"##,
                row.actual_x, row.model_x, row.connector
            )?;
            writeln!(
                writer,
                r##"<circle cx="{:.1}" cy="-5" r="3.5" fill="{ACTUAL_COLOR}"/>"##,
                row.actual_x
            )?;
            writeln!(
                writer,
                r##"<circle cx="{:.1}" cy="-5" r="3.5" fill="{PREDICTED_COLOR}"/>"##,
                row.model_x
            )?;
            writeln!(
                writer,
                r##"<text x="{:.1}" y="0">{}</text>"##,
                row.label_x(),
                xml_escape(&row.campus.campus_name)
            )?;
            writeln!(
                writer,
                r##"<line x1="{:.1}" y1="5" x2="{:.1}" y2="5" stroke="{RULE_COLOR}"/>"##,
                PLOT_WIDTH + 20.0,
                PLOT_WIDTH + MARGIN_RIGHT
            )?;
            for (cell, offset) in row.cells.iter().zip([60.0, 135.0, 220.0, 305.0, 385.0, 475.0]) {
                writeln!(
                    writer,
                    r##"<text x="{:.1}" y="0">{}</text>"##,
                    PLOT_WIDTH + offset,
                    xml_escape(cell)
                )?;
            }
            writeln!(writer, "</g>")?;
        }
        writeln!(writer, "</g>")?;

        // --- Footnotes under the table ---
        let notes_y = MARGIN_TOP + plot_height;
        for (line, note) in FOOTNOTES.iter().enumerate() {
            writeln!(
                writer,
                r##"<text class="note" x="{:.1}" y="{:.1}">{note}</text>"##,
                MARGIN_LEFT + PLOT_WIDTH + 30.0,
                notes_y + 15.0 * line as f64
            )?;
        }

        writer.write_footer()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::data::{CampusRecord, DistrictRecord};

    use super::*;

    fn view(campus_names: &[&str]) -> DrilldownView {
        let district = DistrictRecord {
            district_id: "1".into(),
            district_name: "Sample ISD".to_string(),
            ..DistrictRecord::default()
        };
        let campuses: Vec<CampusRecord> = campus_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut campus = CampusRecord {
                    district_id: "1".into(),
                    campus_name: name.to_string(),
                    overall_score: 70.0 + i as f64,
                    model_overall_score: 72.0,
                    ..CampusRecord::default()
                };
                campus.normalize();
                campus
            })
            .collect();
        DrilldownView::build(&district, &campuses)
    }

    #[test]
    fn renders_one_row_group_per_campus() {
        let svg = view(&["North El", "South El"]).to_svg_string().unwrap();
        assert_eq!(svg.matches("<g transform=\"translate(0,").count(), 2);
        assert!(svg.contains(">North El</text>"));
        assert!(svg.contains(">South El</text>"));
        assert!(svg.contains(">Sample ISD</text>"));
    }

    #[test]
    fn empty_view_renders_a_notice_instead_of_rows() {
        let svg = view(&[]).to_svg_string().unwrap();
        assert!(svg.contains("No campus records for this district."));
        assert_eq!(svg.matches("<circle").count(), 2); // legend markers only
        assert!(svg.contains(r#"viewBox="0 0 1230 120""#));
    }

    #[test]
    fn campus_names_are_escaped() {
        let svg = view(&["A&M Consolidated"]).to_svg_string().unwrap();
        assert!(svg.contains("A&amp;M Consolidated"));
    }

    #[test]
    fn footnotes_and_headings_are_present() {
        let svg = view(&["X"]).to_svg_string().unwrap();
        assert!(svg.contains("Pct Mobility****"));
        assert!(svg.contains("**LEP - Limited English Proficiency"));
    }
}
