use std::{io::Write, path::Path};

use anyhow::{Ok, Result};

use crate::common::{SvgWriter, draw_axis_bottom, draw_axis_left, xml_escape};
use crate::dashboard::dashboard::{
    Dashboard, HEIGHT, MARGIN_LEFT, MARGIN_TOP, PLOT_HEIGHT, PLOT_WIDTH, WIDTH,
};
use crate::data::DistrictId;
use crate::interact::Tooltip;

/// Ticks requested from both axes.
const TICK_COUNT: usize = 10;

impl Dashboard {
    /// Export the scatter as an SVG file, marks frozen at the current clock.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        let mut writer = SvgWriter::create(path)?;
        self.write_svg(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Render the scatter into an in-memory string.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut writer = SvgWriter::from_writer(Vec::new());
        self.write_svg(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write_svg<W: Write>(&self, writer: &mut SvgWriter<W>) -> Result<()> {
        let (x_scale, y_scale) = self.compute_scales();

        writer.write_header(WIDTH, HEIGHT)?;
        writer.write_styles()?;

        writeln!(writer, r##"<g transform="translate({MARGIN_LEFT}, {MARGIN_TOP})">"##)?;

        // --- Axes and their metric labels ---
        draw_axis_bottom(writer, &x_scale, (0.0, PLOT_HEIGHT), TICK_COUNT)?;
        draw_axis_left(writer, &y_scale, (0.0, 0.0), TICK_COUNT)?;
        writeln!(
            writer,
            r##"<text class="label" x="{}" y="{}" text-anchor="middle">{}</text>"##,
            PLOT_WIDTH / 2.0,
            PLOT_HEIGHT + 40.0,
            self.selection().x
        )?;
        writeln!(writer, r##"<g transform="translate(-35, {})">"##, PLOT_HEIGHT / 2.0)?;
        writeln!(
            writer,
            r##"<text class="label" text-anchor="middle" transform="rotate(-90)">{}</text>"##,
            self.selection().y
        )?;
        writeln!(writer, "</g>")?;

        // --- District marks ---
        for mark in self.scene().resolve(self.time()) {
            write!(
                writer,
                r##"<circle cx="{}" cy="{}" r="{}" fill="{}">"##,
                mark.cx, mark.cy, mark.radius, mark.fill
            )?;
            // hover text for static viewers; the anchor is irrelevant here
            let id = DistrictId::new(mark.key.as_str());
            if let Some(district) = self.dataset().district(&id) {
                let tooltip = Tooltip::for_district(district, (0.0, 0.0));
                write!(writer, "<title>{}</title>", xml_escape(&tooltip.text()))?;
            }
            writeln!(writer, "</circle>")?;
        }

        writeln!(writer, "</g>")?;

        // --- Category legend ---
        // Always keyed by category, whatever channel paints the marks.
        writeln!(
            writer,
            r##"<g class="legend" transform="translate({}, {})">"##,
            MARGIN_LEFT + PLOT_WIDTH + 20.0,
            PLOT_HEIGHT / 3.0
        )?;
        writeln!(writer, r##"<text x="0" y="0">Legend</text>"##)?;
        for (slot, category) in self.colors().categories().iter().enumerate() {
            let y = slot as f64 * 20.0;
            writeln!(
                writer,
                r##"<rect x="0" y="{}" width="15" height="15" fill="{}"/>"##,
                y + 20.0,
                self.colors().color(category)
            )?;
            writeln!(writer, r##"<text x="20" y="{}">{}</text>"##, y + 30.0, xml_escape(category))?;
        }
        writeln!(writer, "</g>")?;

        writer.write_footer()?;
        Ok(())
    }
}
