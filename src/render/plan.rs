use crate::foundation::core::{ImageSize, Point, Rect, Size};
use crate::foundation::error::{FramefitError, FramefitResult};
use crate::transform::state::TransformState;

/// Which asset a draw op samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// The user's photo, placed by the transform.
    Photo,
    /// The decorative frame, stretched over the whole target.
    Frame,
}

/// One image draw: sample `layer` into `dest` (target pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOp {
    /// Source asset.
    pub layer: Layer,
    /// Destination rectangle in target pixels.
    pub dest: Rect,
}

/// Backend-agnostic geometry for one composite at a given output size.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositePlan {
    /// Side of the square output in pixels.
    pub target_size: u32,
    /// Reference-space transform after clamping.
    pub transform: TransformState,
    /// Draw ops in painter's order.
    pub ops: Vec<DrawOp>,
}

/// Lay out photo and frame for a `target_size × target_size` output.
///
/// The transform is re-clamped against `reference` first; target geometry is
/// then the reference geometry scaled by `target_size / reference`, so plans
/// for different sizes are exact multiples of each other.
pub fn plan_composite(
    state: TransformState,
    image: ImageSize,
    reference: f64,
    target_size: u32,
) -> FramefitResult<CompositePlan> {
    if !(reference.is_finite() && reference > 0.0) {
        return Err(FramefitError::validation(format!(
            "reference size must be finite and > 0, got {reference}"
        )));
    }
    if target_size == 0 {
        return Err(FramefitError::validation("target size must be > 0"));
    }

    let transform = state.clamp(image, reference);
    let target = f64::from(target_size);
    let sf = target / reference;
    let extent = image.scaled(transform.scale);

    let photo = Rect::from_origin_size(
        Point::new(transform.offset.x * sf, transform.offset.y * sf),
        Size::new(extent.x * sf, extent.y * sf),
    );
    let frame = Rect::new(0.0, 0.0, target, target);

    Ok(CompositePlan {
        target_size,
        transform,
        ops: vec![
            DrawOp {
                layer: Layer::Photo,
                dest: photo,
            },
            DrawOp {
                layer: Layer::Frame,
                dest: frame,
            },
        ],
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
