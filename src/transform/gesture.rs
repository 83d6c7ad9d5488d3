use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{FramefitError, FramefitResult};

/// Screen-to-reference conversion for pointer coordinates.
///
/// The preview surface may be displayed at any on-screen size; pointer
/// positions are rescaled by `reference / displayed` per axis before they
/// touch the transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerMapping {
    factor: Vec2,
}

impl PointerMapping {
    /// Mapping for a canvas of `reference` units displayed at `displayed` pixels.
    pub fn new(reference: f64, displayed: Vec2) -> FramefitResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(reference) || !valid(displayed.x) || !valid(displayed.y) {
            return Err(FramefitError::validation(format!(
                "pointer mapping needs positive sizes, got reference {reference} displayed {displayed:?}"
            )));
        }
        Ok(Self {
            factor: Vec2::new(reference / displayed.x, reference / displayed.y),
        })
    }

    /// Mapping for coordinates that are already in reference units.
    pub fn identity() -> Self {
        Self {
            factor: Vec2::new(1.0, 1.0),
        }
    }

    /// Per-axis scale factor.
    pub fn factor(self) -> Vec2 {
        self.factor
    }

    /// Convert a screen-space point to reference units.
    pub fn to_reference(self, p: Point) -> Point {
        Point::new(p.x * self.factor.x, p.y * self.factor.y)
    }
}

impl Default for PointerMapping {
    fn default() -> Self {
        Self::identity()
    }
}

/// Distance between two touch points, the input to pinch steps.
pub fn pinch_distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Apply the zoom upper bound; the cover floor wins when it exceeds the cap.
pub fn bound_scale(scale: f64, max_scale: f64, cover_scale: f64) -> f64 {
    scale.min(max_scale.max(cover_scale))
}

/// In-flight drag and pinch bookkeeping.
///
/// The tracker only turns raw pointer/touch steps into deltas; applying them
/// to a transform (and clamping) is the caller's job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureTracker {
    drag_last: Option<Point>,
    pinch_last: Option<f64>,
}

impl GestureTracker {
    /// Begin a drag at `p` (reference units).
    pub fn drag_start(&mut self, p: Point) {
        self.drag_last = Some(p);
    }

    /// Advance a drag to `p`, returning the offset delta since the last step.
    ///
    /// Returns `None` when no drag is active.
    pub fn drag_move(&mut self, p: Point) -> Option<Vec2> {
        let last = self.drag_last?;
        self.drag_last = Some(p);
        Some(p - last)
    }

    /// Stop the current drag, if any.
    pub fn drag_end(&mut self) {
        self.drag_last = None;
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_last.is_some()
    }

    /// Begin a pinch with the current finger distance.
    pub fn pinch_start(&mut self, distance: f64) {
        self.pinch_last = Some(distance);
    }

    /// Advance a pinch, returning the scale factor `distance / previous`.
    ///
    /// The previous distance is updated on every step. No factor is produced
    /// when there is no usable previous distance.
    pub fn pinch_move(&mut self, distance: f64) -> Option<f64> {
        let prev = self.pinch_last.replace(distance)?;
        (prev.is_finite() && prev > 0.0 && distance.is_finite()).then(|| distance / prev)
    }

    /// Forget the pinch baseline.
    pub fn pinch_end(&mut self) {
        self.pinch_last = None;
    }

    /// Whether a pinch baseline is recorded.
    pub fn is_pinching(&self) -> bool {
        self.pinch_last.is_some()
    }

    /// Drop all in-flight gesture state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/gesture.rs"]
mod tests;
