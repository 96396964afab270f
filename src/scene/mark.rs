use std::{fmt, sync::Arc};

use crate::scale::Rgb;

use super::tween::Tween;

/// Stable identity a mark is reconciled by. Derived from the row's key
/// column, never from its slot in the data array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkKey(Arc<str>);

impl MarkKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MarkKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Non-animated visual attributes of a mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub fill: Rgb,
    pub radius: f64,
}

/// One circle mark in the scene. Position channels animate; style applies
/// immediately.
#[derive(Debug, Clone)]
pub struct Mark {
    pub(crate) key: MarkKey,
    pub(crate) cx: Tween,
    pub(crate) cy: Tween,
    pub(crate) fill: Rgb,
    pub(crate) radius: f64,
}

impl Mark {
    #[inline]
    pub fn key(&self) -> &MarkKey {
        &self.key
    }

    #[inline]
    pub fn fill(&self) -> Rgb {
        self.fill
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Position at time `now`.
    pub fn position_at(&self, now: f64) -> (f64, f64) {
        (self.cx.value_at(now), self.cy.value_at(now))
    }

    /// Final position once any transition completes.
    pub fn target(&self) -> (f64, f64) {
        (self.cx.target(), self.cy.target())
    }

    /// Whether either position channel is still moving at `now`.
    pub fn is_animating(&self, now: f64) -> bool {
        self.cx.is_animating(now) || self.cy.is_animating(now)
    }
}

/// A mark resolved to concrete attributes at one instant, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMark {
    pub key: MarkKey,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Rgb,
}
