//! Standard numbered dartboard: twenty 18° wedges, double/triple bands and
//! the two bulls.

use nalgebra::Point2;

use crate::models::zone::DartHit;

/// Segment values clockwise from the top wedge.
pub const SEGMENT_ORDER: [u8; 20] =
    [20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5];

/// Reference board size the radii below are expressed against.
const BOARD_SIZE: f32 = 500.0;

#[derive(Debug, Clone, Copy)]
pub struct Dartboard {
    pub double_bull_radius: f32,
    pub single_bull_radius: f32,
    pub triple_inner_radius: f32,
    pub triple_outer_radius: f32,
    pub double_inner_radius: f32,
    pub double_outer_radius: f32,
}

impl Default for Dartboard {
    fn default() -> Self {
        Dartboard::standard()
    }
}

impl Dartboard {
    pub fn standard() -> Self {
        Dartboard {
            double_bull_radius: 10.0 / BOARD_SIZE,
            single_bull_radius: 26.0 / BOARD_SIZE,
            triple_inner_radius: 123.0 / BOARD_SIZE,
            triple_outer_radius: 138.0 / BOARD_SIZE,
            double_inner_radius: 207.0 / BOARD_SIZE,
            double_outer_radius: 220.0 / BOARD_SIZE,
        }
    }

    /// Map a center-relative point to a dart hit.
    ///
    /// Bulls take precedence over wedges; beyond the double ring is a miss.
    /// Band boundaries are inclusive toward the inner band, so a distance
    /// exactly on the triple ring's outer edge is still a triple.
    pub fn resolve(&self, point: Point2<f32>) -> DartHit {
        let distance = point.coords.norm();

        if distance <= self.double_bull_radius {
            return DartHit::new(50, 1);
        }
        if distance <= self.single_bull_radius {
            return DartHit::new(25, 1);
        }
        if !(distance <= self.double_outer_radius) {
            return DartHit::MISS;
        }

        let segment = self.segment_at(point);
        if distance <= self.triple_inner_radius {
            return DartHit::new(segment, 1);
        }
        if distance <= self.triple_outer_radius {
            return DartHit::new(segment, 3);
        }
        if distance <= self.double_inner_radius {
            return DartHit::new(segment, 1);
        }
        DartHit::new(segment, 2)
    }

    /// Resolve a unit-square position (0..1 both axes).
    pub fn resolve_unit(&self, x: f32, y: f32) -> DartHit {
        self.resolve(super::from_unit(x, y))
    }

    /// Segment under a point, by wedge angle.
    ///
    /// Angle is measured clockwise from straight up; wedges are offset by 9°
    /// so segment 20 straddles the top.
    fn segment_at(&self, point: Point2<f32>) -> u8 {
        let mut angle = point.x.atan2(-point.y).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        let index = (((angle + 9.0) / 18.0).floor() as usize) % 20;
        SEGMENT_ORDER[index]
    }
}
