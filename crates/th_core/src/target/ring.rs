//! Concentric-ring target with optional killshot discs.
//!
//! The standard layout mirrors the venue's 500-unit display boards: the main
//! target radius is 0.44 of the board size and the ring radii are fractions
//! of that. Band boundaries are inclusive toward the inner (higher-scoring)
//! zone; the killshot discs use strict containment since they are free
//! standing circles, not bands.

use nalgebra::Point2;

use crate::models::zone::RingZone;

/// Main target radius as a fraction of the board size (220/500).
pub const TARGET_RADIUS_RATIO: f32 = 0.44;

/// Ring radii as fractions of the main target radius, inner to outer.
const RING_FRACTIONS: [(RingZone, f32); 5] = [
    (RingZone::Bullseye, 0.08),
    (RingZone::Zone4, 0.20),
    (RingZone::Zone3, 0.40),
    (RingZone::Zone2, 0.65),
    (RingZone::Zone1, 0.90),
];

/// Killshot disc radius as a fraction of the board size (18/500).
const KILLSHOT_RADIUS: f32 = 18.0 / 500.0;
/// Killshot centers, board-size fractions from the target center (155/500
/// out, 185/500 up).
const KILLSHOT_OFFSET_X: f32 = 155.0 / 500.0;
const KILLSHOT_OFFSET_Y: f32 = -185.0 / 500.0;

/// One scoring band: everything from the previous band's edge out to
/// `outer_radius` (inclusive).
#[derive(Debug, Clone, Copy)]
pub struct RingBand {
    pub zone: RingZone,
    pub outer_radius: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct KillshotDisc {
    pub center: Point2<f32>,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct RingTarget {
    bands: Vec<RingBand>,
    killshots: Vec<KillshotDisc>,
}

impl Default for RingTarget {
    fn default() -> Self {
        RingTarget::standard()
    }
}

impl RingTarget {
    /// The five-ring competition layout with two killshot discs.
    pub fn standard() -> Self {
        let bands = RING_FRACTIONS
            .iter()
            .map(|(zone, fraction)| RingBand {
                zone: *zone,
                outer_radius: fraction * TARGET_RADIUS_RATIO,
            })
            .collect();
        let killshots = [-1.0f32, 1.0]
            .iter()
            .map(|side| KillshotDisc {
                center: Point2::new(side * KILLSHOT_OFFSET_X, KILLSHOT_OFFSET_Y),
                radius: KILLSHOT_RADIUS,
            })
            .collect();
        RingTarget { bands, killshots }
    }

    /// Map a center-relative point to its zone.
    ///
    /// Killshot discs are checked first, and only when armed for the current
    /// throw. A distance exactly on a band boundary resolves to the inner
    /// band.
    pub fn resolve(&self, point: Point2<f32>, killshots_armed: bool) -> RingZone {
        if killshots_armed {
            for disc in &self.killshots {
                if (point - disc.center).norm() < disc.radius {
                    return RingZone::Killshot;
                }
            }
        }

        let distance = point.coords.norm();
        for band in &self.bands {
            if distance <= band.outer_radius {
                return band.zone;
            }
        }
        RingZone::Miss
    }

    /// Resolve a unit-square position (0..1 both axes).
    pub fn resolve_unit(&self, x: f32, y: f32, killshots_armed: bool) -> RingZone {
        self.resolve(super::from_unit(x, y), killshots_armed)
    }

    /// Outer edge of the scoring area (fraction of the board size).
    pub fn outer_radius(&self) -> f32 {
        self.bands.last().map(|b| b.outer_radius).unwrap_or(0.0)
    }

    pub fn bands(&self) -> &[RingBand] {
        &self.bands
    }

    pub fn killshots(&self) -> &[KillshotDisc] {
        &self.killshots
    }
}
