use std::{fmt, str::FromStr};

use anyhow::bail;

use crate::data::{DistrictRecord, unique};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Componentwise linear interpolation toward `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Prints as a hex color, e.g. "#940000".
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The fixed category palette, in assignment order.
pub const PALETTE: [Rgb; 8] = [
    Rgb::new(0x94, 0x00, 0x00),
    Rgb::new(0xc9, 0xa3, 0x05),
    Rgb::new(0x3a, 0x38, 0x38),
    Rgb::new(0xa9, 0xa9, 0xa9),
    Rgb::new(0x87, 0x76, 0x2f),
    Rgb::new(0x36, 0x7c, 0x54),
    Rgb::new(0x33, 0x4e, 0x8b),
    Rgb::new(0xff, 0x6a, 0x6a),
];

/// Categorical color assignment over the accountability descriptions:
/// first-seen categories take palette entries in order, cycling when the
/// palette runs out. Built once per dataset so the pairing never shifts
/// between renders.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    categories: Vec<String>,
}

impl CategoryColors {
    /// Build the mapping from the distinct `TEADescription` values of the
    /// district rows, in first-seen order.
    pub fn build(districts: &[DistrictRecord]) -> Self {
        let categories = unique(districts, |d| d.tea_description.clone());
        Self { categories }
    }

    /// Categories in assignment order (the legend rows).
    #[inline]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Color for a category. A value outside the built domain takes the
    /// entry it would receive if appended, without growing the mapping.
    pub fn color(&self, category: &str) -> Rgb {
        let slot = self
            .categories
            .iter()
            .position(|c| c == category)
            .unwrap_or(self.categories.len());
        PALETTE[slot % PALETTE.len()]
    }
}

/// Which fill channel paints the scatter marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Category color from the palette (what the legend describes).
    #[default]
    Category,
    /// Positional sample of the turbo colormap.
    Ramp,
}

impl FromStr for FillMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "category" => Ok(FillMode::Category),
            "ramp" => Ok(FillMode::Ramp),
            _ => bail!("[FillMode] Unknown fill mode: {s:?} (expected \"category\" or \"ramp\")"),
        }
    }
}

/// The turbo colormap sampled at `t` in [0, 1], via the published polynomial
/// approximation.
pub fn turbo(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Rgb {
        r: channel(34.61 + t * (1172.33 - t * (10793.56 - t * (33300.12 - t * (38394.49 - t * 14825.05))))),
        g: channel(23.31 + t * (557.33 + t * (1225.33 - t * (3574.96 - t * (1073.77 + t * 707.56))))),
        b: channel(27.2 + t * (3211.1 - t * (15327.97 - t * (27814.0 - t * (22569.18 - t * 6838.66))))),
    }
}

/// Ramp parameter for slot `i` of `n`: evenly spaced over [0, 1].
pub fn ramp_t(i: usize, n: usize) -> f64 {
    if n <= 1 { 0.0 } else { i as f64 / (n - 1) as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district(id: &str, category: &str) -> DistrictRecord {
        DistrictRecord {
            district_id: id.into(),
            tea_description: category.to_string(),
            ..DistrictRecord::default()
        }
    }

    #[test]
    fn hex_formatting_pads_channels() {
        assert_eq!(Rgb::new(0x94, 0x00, 0x00).to_string(), "#940000");
        assert_eq!(Rgb::new(255, 106, 106).to_string(), "#ff6a6a");
    }

    #[test]
    fn lerp_interpolates_and_clamps() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.lerp(white, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(black.lerp(white, -1.0), black);
        assert_eq!(black.lerp(white, 2.0), white);
    }

    #[test]
    fn categories_are_assigned_in_first_seen_order() {
        let rows = [district("1", "B"), district("2", "A"), district("3", "B")];
        let colors = CategoryColors::build(&rows);
        assert_eq!(colors.categories(), ["B", "A"]);
        assert_eq!(colors.color("B"), PALETTE[0]);
        assert_eq!(colors.color("A"), PALETTE[1]);
    }

    #[test]
    fn palette_cycles_past_eight_categories() {
        let rows: Vec<DistrictRecord> =
            (0..10).map(|i| district(&i.to_string(), &format!("cat{i}"))).collect();
        let colors = CategoryColors::build(&rows);
        assert_eq!(colors.color("cat8"), PALETTE[0]);
        assert_eq!(colors.color("cat9"), PALETTE[1]);
    }

    #[test]
    fn unknown_category_takes_the_next_slot_without_growing() {
        let rows = [district("1", "A")];
        let colors = CategoryColors::build(&rows);
        assert_eq!(colors.color("mystery"), PALETTE[1]);
        assert_eq!(colors.categories().len(), 1);
    }

    #[test]
    fn turbo_matches_published_endpoints() {
        assert_eq!(turbo(0.0), Rgb::new(35, 23, 27));
        assert_eq!(turbo(1.0), Rgb::new(144, 12, 0));
        assert_eq!(turbo(-0.5), turbo(0.0)); // clamped
    }

    #[test]
    fn ramp_parameter_spans_the_unit_interval() {
        assert_eq!(ramp_t(0, 5), 0.0);
        assert_eq!(ramp_t(4, 5), 1.0);
        assert_eq!(ramp_t(0, 1), 0.0);
        assert_eq!(ramp_t(0, 0), 0.0);
    }
}
