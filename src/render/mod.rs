//! Resolution-parametric compositing.
//!
//! A [`plan::CompositePlan`] fixes the geometry for one output size; the CPU
//! backend turns it into pixels.

/// CPU rasterizer built on `vello_cpu`.
pub mod cpu;
/// Draw-op geometry derived from a transform and a target size.
pub mod plan;
/// Rendered surfaces and PNG encoding.
pub mod surface;
