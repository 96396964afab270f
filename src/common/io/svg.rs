use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Ok, Result};

use crate::common::fmt_num;
use crate::scale::LinearScale;

/// Length of axis tick marks, in pixels.
const TICK_SIZE: f64 = 6.0;

pub(crate) struct SvgWriter<W: Write> {
    writer: W,
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl<W: Write> Write for SvgWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl SvgWriter<BufWriter<File>> {
    /// Create a new SVG writer to a file path
    pub(crate) fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[to_svg] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

impl<W: Write> SvgWriter<W> {
    /// Wrap an arbitrary sink (in-memory buffers for tests and embedding).
    pub(crate) fn from_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying sink.
    pub(crate) fn into_inner(self) -> W {
        self.writer
    }

    /// Write the SVG header, including the XML declaration and opening <svg> tag.
    pub(crate) fn write_header(&mut self, width: f64, height: f64) -> Result<()> {
        writeln!(self, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
        writeln!(self, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##)?;
        writeln!(self, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
        Ok(())
    }

    /// Write SVG styles for chart features.
    pub(crate) fn write_styles(&mut self) -> Result<()> {
        writeln!(self, r##"<defs>
<style>
    text {{ font-family: sans-serif; fill: #111827; }}
    .axis line {{ stroke: #111827; stroke-width: 1; }}
    .axis text {{ font-size: 10px; }}
    .title {{ font-size: 16px; font-weight: bold; }}
    .label {{ font-size: 12px; }}
    .legend text {{ font-size: 14px; }}
    .rows text {{ font-size: 10px; }}
    .heading {{ font-size: 10px; font-weight: bold; }}
    .note {{ font-size: 10px; }}
</style>
</defs>"##)?;
        Ok(())
    }

    /// Write the closing </svg> tag.
    pub(crate) fn write_footer(&mut self) -> Result<()> {
        writeln!(self, "</svg>")?;
        Ok(())
    }
}

/// Escape text for XML content and attribute values.
pub(crate) fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Draw a horizontal axis below the plot area: baseline, downward ticks,
/// labels under the ticks.
pub(crate) fn draw_axis_bottom(
    out: &mut impl Write,
    scale: &LinearScale,
    origin: (f64, f64),
    count: usize,
) -> Result<()> {
    let (x, y) = origin;
    let (r0, r1) = scale.range();
    writeln!(out, r##"<g class="axis" transform="translate({x},{y})">"##)?;
    writeln!(out, r##"<line x1="{:.1}" y1="0" x2="{:.1}" y2="0"/>"##, r0.min(r1), r0.max(r1))?;
    for tick in scale.ticks(count) {
        let px = scale.apply(tick);
        writeln!(out, r##"<line x1="{px:.1}" y1="0" x2="{px:.1}" y2="{TICK_SIZE}"/>"##)?;
        writeln!(out, r##"<text x="{px:.1}" y="18" text-anchor="middle">{}</text>"##, fmt_num(tick))?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

/// Draw a vertical axis along the left edge: baseline, leftward ticks,
/// end-anchored labels.
pub(crate) fn draw_axis_left(
    out: &mut impl Write,
    scale: &LinearScale,
    origin: (f64, f64),
    count: usize,
) -> Result<()> {
    let (x, y) = origin;
    let (r0, r1) = scale.range();
    writeln!(out, r##"<g class="axis" transform="translate({x},{y})">"##)?;
    writeln!(out, r##"<line x1="0" y1="{:.1}" x2="0" y2="{:.1}"/>"##, r0.min(r1), r0.max(r1))?;
    for tick in scale.ticks(count) {
        let py = scale.apply(tick);
        writeln!(out, r##"<line x1="-{TICK_SIZE}" y1="{py:.1}" x2="0" y2="{py:.1}"/>"##)?;
        writeln!(out, r##"<text x="-9" y="{:.1}" text-anchor="end">{}</text>"##, py + 3.0, fmt_num(tick))?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

/// Draw a horizontal axis above the plot area whose ticks extend downward
/// across it as grid lines.
pub(crate) fn draw_axis_top(
    out: &mut impl Write,
    scale: &LinearScale,
    origin: (f64, f64),
    count: usize,
    grid_len: f64,
) -> Result<()> {
    let (x, y) = origin;
    let (r0, r1) = scale.range();
    writeln!(out, r##"<g class="axis" transform="translate({x},{y})">"##)?;
    writeln!(out, r##"<line x1="{:.1}" y1="0" x2="{:.1}" y2="0"/>"##, r0.min(r1), r0.max(r1))?;
    for tick in scale.ticks(count) {
        let px = scale.apply(tick);
        writeln!(out, r##"<line x1="{px:.1}" y1="0" x2="{px:.1}" y2="{grid_len:.1}"/>"##)?;
        writeln!(out, r##"<text x="{px:.1}" y="-8" text-anchor="middle">{}</text>"##, fmt_num(tick))?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(xml_escape("A&M <Consolidated>"), "A&amp;M &lt;Consolidated&gt;");
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn header_and_footer_bracket_the_document() {
        let mut svg = SvgWriter::from_writer(Vec::new());
        svg.write_header(100.0, 50.0).unwrap();
        svg.write_footer().unwrap();
        let text = String::from_utf8(svg.into_inner()).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.contains(r#"viewBox="0 0 100 50""#));
        assert!(text.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn bottom_axis_places_ticks_by_scale() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        let mut out = Vec::new();
        draw_axis_bottom(&mut out, &scale, (0.0, 0.0), 5).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(r#"<text x="40.0" y="18""#));
        assert!(text.contains(">4</text>"));
    }
}
