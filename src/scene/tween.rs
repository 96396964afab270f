/// One animated numeric channel. Retargeting samples the current value
/// first, so an in-flight animation is discarded and the new one starts
/// from wherever the channel happens to be, never from the old endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
}

impl Tween {
    /// A channel resting at `value`.
    pub fn fixed(value: f64) -> Self {
        Self { from: value, to: value, start: 0.0, duration: 0.0 }
    }

    /// Final value once the animation completes.
    #[inline]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Value at time `now`: linear interpolation, held at the endpoints
    /// outside the animation window.
    pub fn value_at(&self, now: f64) -> f64 {
        if self.duration <= 0.0 || now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = (now - self.start) / self.duration;
        self.from + (self.to - self.from) * t
    }

    /// Whether the channel is still moving at `now`.
    pub fn is_animating(&self, now: f64) -> bool {
        self.from != self.to && self.duration > 0.0 && now < self.start + self.duration
    }

    /// Begin animating from the current value toward `to` over `duration`.
    pub fn retarget(&mut self, to: f64, now: f64, duration: f64) {
        let from = self.value_at(now);
        *self = Self { from, to, start: now, duration };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_channel_never_moves() {
        let tween = Tween::fixed(5.0);
        assert_eq!(tween.value_at(0.0), 5.0);
        assert_eq!(tween.value_at(1000.0), 5.0);
        assert!(!tween.is_animating(0.0));
    }

    #[test]
    fn interpolates_linearly_between_endpoints() {
        let mut tween = Tween::fixed(0.0);
        tween.retarget(100.0, 0.0, 300.0);
        assert_eq!(tween.value_at(0.0), 0.0);
        assert_eq!(tween.value_at(150.0), 50.0);
        assert_eq!(tween.value_at(300.0), 100.0);
        assert_eq!(tween.value_at(1000.0), 100.0);
    }

    #[test]
    fn retarget_resumes_from_the_interpolated_value() {
        let mut tween = Tween::fixed(0.0);
        tween.retarget(100.0, 0.0, 300.0);
        // halfway through, send it back to zero
        tween.retarget(0.0, 150.0, 300.0);
        assert_eq!(tween.value_at(150.0), 50.0);
        assert_eq!(tween.value_at(300.0), 25.0);
        assert_eq!(tween.value_at(450.0), 0.0);
    }

    #[test]
    fn animation_window_is_half_open() {
        let mut tween = Tween::fixed(0.0);
        tween.retarget(10.0, 100.0, 300.0);
        assert!(tween.is_animating(100.0));
        assert!(tween.is_animating(399.0));
        assert!(!tween.is_animating(400.0));
    }

    #[test]
    fn retarget_to_the_same_value_is_a_no_op_visually() {
        let mut tween = Tween::fixed(42.0);
        tween.retarget(42.0, 10.0, 300.0);
        assert_eq!(tween.value_at(10.0), 42.0);
        assert_eq!(tween.value_at(160.0), 42.0);
        assert!(!tween.is_animating(160.0));
    }
}
