/// The (min, max) of the finite values in `values`, or None when there are
/// none. NaN and infinities never contaminate the bounds.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        bounds = Some(match bounds {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    bounds
}

/// Maps a numeric domain onto a pixel range. The range may be inverted
/// (data minimum at the larger pixel). Inputs outside the domain are clamped
/// to its edges, and non-finite inputs fall back to the domain minimum, so
/// the output is always a usable coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Fit a scale over the finite values of a column: domain is their
    /// extent, padded to a unit span when every value is identical, and
    /// [0, 1] when no finite value exists.
    pub fn fit(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let domain = match extent(values) {
            Some((lo, hi)) if lo < hi => (lo, hi),
            Some((v, _)) => (v - 0.5, v + 0.5),
            None => (0.0, 1.0),
        };
        Self { domain, range }
    }

    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[inline]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a data value to a pixel coordinate.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 <= d0 {
            return (r0 + r1) / 2.0;
        }
        let value = if value.is_finite() { value } else { d0 };
        let t = ((value - d0) / (d1 - d0)).clamp(0.0, 1.0);
        r0 + t * (r1 - r0)
    }

    /// Round tick values covering the domain: steps are 1, 2 or 5 times a
    /// power of ten, aiming for roughly `count` ticks.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = self.domain;
        let span = hi - lo;
        if !(span > 0.0) {
            return vec![lo];
        }
        let rough = span / count.max(1) as f64;
        let magnitude = 10f64.powf(rough.log10().floor());
        let normalized = rough / magnitude;
        let step = magnitude
            * if normalized < 1.5 {
                1.0
            } else if normalized < 3.5 {
                2.0
            } else if normalized < 7.5 {
                5.0
            } else {
                10.0
            };

        let first = (lo / step - 1e-9).ceil();
        let last = (hi / step + 1e-9).floor();
        let mut ticks = Vec::new();
        let mut i = first;
        while i <= last {
            ticks.push(i * step);
            i += 1.0;
        }
        if ticks.is_empty() {
            return vec![lo, hi];
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_skips_non_finite_values() {
        let values = [3.0, f64::NAN, -1.0, f64::INFINITY, 7.5];
        assert_eq!(extent(values), Some((-1.0, 7.5)));
        assert_eq!(extent([f64::NAN]), None);
        assert_eq!(extent([]), None);
    }

    #[test]
    fn fit_pads_a_degenerate_domain() {
        let scale = LinearScale::fit([4.0, 4.0, 4.0], (0.0, 100.0));
        assert_eq!(scale.domain(), (3.5, 4.5));
        assert_eq!(scale.apply(4.0), 50.0);
    }

    #[test]
    fn fit_defaults_when_no_finite_values() {
        let scale = LinearScale::fit([f64::NAN, f64::NAN], (0.0, 10.0));
        assert_eq!(scale.domain(), (0.0, 1.0));
    }

    #[test]
    fn apply_clamps_out_of_domain_values() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(scale.apply(5.0), 50.0);
        assert_eq!(scale.apply(-3.0), 0.0);
        assert_eq!(scale.apply(42.0), 100.0);
    }

    #[test]
    fn apply_maps_non_finite_to_the_domain_minimum() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(scale.apply(f64::NAN), 0.0);
        assert_eq!(scale.apply(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn inverted_range_puts_the_minimum_at_the_far_pixel() {
        let scale = LinearScale::new((0.0, 10.0), (640.0, 0.0));
        assert_eq!(scale.apply(0.0), 640.0);
        assert_eq!(scale.apply(10.0), 0.0);
        assert_eq!(scale.apply(5.0), 320.0);
    }

    #[test]
    fn ticks_step_by_round_numbers() {
        let scale = LinearScale::new((60.0, 80.0), (0.0, 550.0));
        let ticks = scale.ticks(10);
        assert_eq!(ticks.first().copied(), Some(60.0));
        assert_eq!(ticks.last().copied(), Some(80.0));
        assert_eq!(ticks.len(), 11); // every 2 units
    }

    #[test]
    fn ticks_cover_fractional_domains() {
        let scale = LinearScale::new((0.0, 0.3), (0.0, 100.0));
        let ticks = scale.ticks(3);
        assert!((ticks.last().copied().unwrap() - 0.3).abs() < 1e-9);
    }
}
