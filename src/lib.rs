//! framefit places a user photo behind a fixed decorative frame and exports a
//! square PNG.
//!
//! The photo is positioned by a single uniform scale plus a translation, both
//! expressed in a square *reference space* (1080×1080 by default). The engine
//! keeps the photo covering that square under any pan or zoom, and renders the
//! same transform at any output size, so the export is a faithful upscale of
//! the preview.
//!
//! # Pipeline overview
//!
//! 1. **Load**: declared-type check, then background decode into a [`PendingImage`]
//! 2. **Transform**: auto-fit on install, gestures mutate a [`TransformState`], [`TransformState::clamp`] after every step
//! 3. **Plan**: [`plan_composite`] turns the transform into target-pixel rectangles
//! 4. **Render**: [`CpuRenderer`] rasterizes the plan (photo first, frame on top)
//! 5. **Export**: the [`Session`] renders at the export size and encodes PNG
//!
//! Most callers only need [`Session`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod render;
mod session;
mod transform;

pub use assets::decode::{ImageKind, PreparedImage, decode_image, declared_type_for_path};
pub use assets::pending::{LoadState, PendingImage};
pub use config::EngineConfig;
pub use foundation::core::{Affine, ImageSize, Point, Rect, Size, Vec2};
pub use foundation::error::{FramefitError, FramefitResult};
pub use render::cpu::CpuRenderer;
pub use render::plan::{CompositePlan, DrawOp, Layer, plan_composite};
pub use render::surface::Surface;
pub use session::{Export, LoadEvent, Notice, Session};
pub use transform::gesture::{GestureTracker, PointerMapping, bound_scale, pinch_distance};
pub use transform::state::TransformState;
