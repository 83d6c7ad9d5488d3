//! Pan/zoom transform model.
//!
//! All state lives in the square reference space; nothing here knows about
//! output resolutions.

/// Pointer, pinch and zoom-slider mapping onto transform deltas.
pub mod gesture;
/// Transform state with cover-fit and clamping.
pub mod state;
