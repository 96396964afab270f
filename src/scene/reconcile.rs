use ahash::AHashSet;
use tracing::debug;

use super::mark::{Mark, MarkKey, MarkStyle, ResolvedMark};
use super::tween::Tween;

/// Position transition length, in the same units the caller advances the
/// clock with.
pub const TRANSITION_DURATION: f64 = 300.0;

/// Counts from one reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinCounts {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// A persistent set of circle marks reconciled against a data array by key.
///
/// Entering marks take their position and style immediately. Marks whose key
/// is already present animate toward the new position over
/// `TRANSITION_DURATION` and pick up the new style at once. Marks whose key
/// is absent from the array are removed in place, leaving the survivors'
/// relative order untouched.
#[derive(Debug, Default)]
pub struct Scene {
    marks: Vec<Mark>,
    index: ahash::AHashMap<MarkKey, usize>, // key -> slot in `marks`
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Marks in stable (first-entered) order.
    #[inline]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Look up a mark by key.
    pub fn mark(&self, key: &MarkKey) -> Option<&Mark> {
        self.index.get(key).map(|&slot| &self.marks[slot])
    }

    /// Reconcile the scene against one data array.
    ///
    /// `key_of` must yield a stable identity per row; a duplicate key within
    /// one pass updates the mark its first occurrence created. `style_of`
    /// also receives the row's slot in the array, for styles that depend on
    /// position in the collection.
    pub fn reconcile<T>(
        &mut self,
        data: &[T],
        now: f64,
        mut key_of: impl FnMut(&T) -> MarkKey,
        mut position_of: impl FnMut(&T) -> (f64, f64),
        mut style_of: impl FnMut(&T, usize) -> MarkStyle,
    ) -> JoinCounts {
        let mut counts = JoinCounts::default();
        let mut live: AHashSet<MarkKey> = AHashSet::with_capacity(data.len());

        for (slot, row) in data.iter().enumerate() {
            let key = key_of(row);
            let (x, y) = position_of(row);
            let style = style_of(row, slot);
            live.insert(key.clone());

            match self.index.get(&key) {
                Some(&at) => {
                    let mark = &mut self.marks[at];
                    mark.cx.retarget(x, now, TRANSITION_DURATION);
                    mark.cy.retarget(y, now, TRANSITION_DURATION);
                    mark.fill = style.fill;
                    mark.radius = style.radius;
                    counts.updated += 1;
                }
                None => {
                    self.index.insert(key.clone(), self.marks.len());
                    self.marks.push(Mark {
                        key,
                        cx: Tween::fixed(x),
                        cy: Tween::fixed(y),
                        fill: style.fill,
                        radius: style.radius,
                    });
                    counts.entered += 1;
                }
            }
        }

        if live.len() < self.marks.len() {
            let before = self.marks.len();
            self.marks.retain(|mark| live.contains(&mark.key));
            counts.exited = before - self.marks.len();
            self.reindex();
        }

        debug!(
            entered = counts.entered,
            updated = counts.updated,
            exited = counts.exited,
            "scene reconciled"
        );
        counts
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (slot, mark) in self.marks.iter().enumerate() {
            self.index.insert(mark.key.clone(), slot);
        }
    }

    /// Every mark resolved to concrete attributes at `now`, in stable order.
    pub fn resolve(&self, now: f64) -> Vec<ResolvedMark> {
        self.marks
            .iter()
            .map(|mark| {
                let (cx, cy) = mark.position_at(now);
                ResolvedMark { key: mark.key.clone(), cx, cy, radius: mark.radius, fill: mark.fill }
            })
            .collect()
    }

    /// Whether any mark is still animating at `now`.
    pub fn is_animating(&self, now: f64) -> bool {
        self.marks.iter().any(|mark| mark.is_animating(now))
    }
}
