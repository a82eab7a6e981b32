//! Pure geometry→zone resolution for the two target layouts.
//!
//! Resolvers work in a center-relative coordinate frame: the target center is
//! the origin and distances are fractions of the board size. Screen
//! convention, y grows downward. The embedding UI usually produces
//! unit-square positions (0..1 on both axes); [`from_unit`] converts those.
//!
//! Resolution is total: every finite point maps to exactly one zone, and
//! non-finite input falls through to a miss.

pub mod dartboard;
pub mod ring;

pub use dartboard::Dartboard;
pub use ring::RingTarget;

use nalgebra::Point2;

/// Convert a unit-square position into the center-relative frame.
pub fn from_unit(x: f32, y: f32) -> Point2<f32> {
    Point2::new(x - 0.5, y - 0.5)
}
