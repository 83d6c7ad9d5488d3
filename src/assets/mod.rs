/// Declared-type checks and image decoding.
pub mod decode;
/// Background decode handles with an explicit pending/ready/failed state.
pub mod pending;
