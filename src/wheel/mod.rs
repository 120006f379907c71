//! Wheel segments and wheel geometry.
//!
//! ## Key Types
//!
//! - `CandidateSet`: Ordered set of segments currently on the wheel
//! - `SpinPlan`: Final rotation for an animated spin landing on a chosen segment
//!
//! Segment order is display order only. The resolver never uses a
//! candidate's position to decide anything.

pub mod set;
pub mod geometry;

pub use set::{CandidateSet, DEFAULT_PALETTE};
pub use geometry::SpinPlan;
