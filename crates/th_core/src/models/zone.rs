use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scoring zone of the concentric-ring target.
///
/// Zones are ordered from the center outward; `Killshot` is the pair of
/// small discs in the upper corners and `Miss` is everything beyond the
/// outermost ring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum RingZone {
    Bullseye,
    Zone4,
    Zone3,
    Zone2,
    Zone1,
    Killshot,
    Miss,
}

impl RingZone {
    /// Points awarded for a throw landing in this zone.
    pub fn points(self) -> u32 {
        match self {
            RingZone::Bullseye => 6,
            RingZone::Zone4 => 4,
            RingZone::Zone3 => 3,
            RingZone::Zone2 => 2,
            RingZone::Zone1 => 1,
            RingZone::Killshot => 8,
            RingZone::Miss => 0,
        }
    }

    /// Display label for scoreboards.
    pub fn label(self) -> &'static str {
        match self {
            RingZone::Bullseye => "Bullseye",
            RingZone::Zone4 => "Zone 4",
            RingZone::Zone3 => "Zone 3",
            RingZone::Zone2 => "Zone 2",
            RingZone::Zone1 => "Zone 1",
            RingZone::Killshot => "Killshot",
            RingZone::Miss => "Miss",
        }
    }

    /// Whether a throw in this zone counts as a hit.
    pub fn is_hit(self) -> bool {
        self.points() > 0
    }

    /// Bullseyes and killshots are tallied separately in player statistics.
    pub fn is_exceptional(self) -> bool {
        matches!(self, RingZone::Bullseye | RingZone::Killshot)
    }
}

/// Ring classification of a dartboard hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DartRing {
    DoubleBull,
    SingleBull,
    Single,
    Double,
    Triple,
    Miss,
}

/// A resolved dartboard hit: segment value, multiplier and ring.
///
/// Bulls are encoded the way venue scoreboards show them: segment 50 for the
/// double bull and 25 for the single bull, both with multiplier 1. A miss is
/// segment 0 with multiplier 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct DartHit {
    pub segment: u8,
    pub multiplier: u8,
    pub ring: DartRing,
}

impl DartHit {
    pub const MISS: DartHit = DartHit { segment: 0, multiplier: 0, ring: DartRing::Miss };

    /// Build a hit from a segment/multiplier pair, classifying the ring.
    pub fn new(segment: u8, multiplier: u8) -> Self {
        let ring = match (segment, multiplier) {
            (50, _) => DartRing::DoubleBull,
            (25, _) => DartRing::SingleBull,
            (0, _) => DartRing::Miss,
            (_, 2) => DartRing::Double,
            (_, 3) => DartRing::Triple,
            _ => DartRing::Single,
        };
        let multiplier = match ring {
            DartRing::Miss => 0,
            DartRing::DoubleBull | DartRing::SingleBull => 1,
            _ => multiplier,
        };
        DartHit { segment, multiplier, ring }
    }

    pub fn points(&self) -> u32 {
        u32::from(self.segment) * u32::from(self.multiplier)
    }

    pub fn is_bull(&self) -> bool {
        matches!(self.ring, DartRing::DoubleBull | DartRing::SingleBull)
    }

    /// Scoreboard notation: "T20", "D16", "5", "25", "50" or "Miss".
    pub fn label(&self) -> String {
        match self.ring {
            DartRing::Miss => "Miss".to_string(),
            DartRing::DoubleBull => "50".to_string(),
            DartRing::SingleBull => "25".to_string(),
            DartRing::Double => format!("D{}", self.segment),
            DartRing::Triple => format!("T{}", self.segment),
            DartRing::Single => format!("{}", self.segment),
        }
    }
}
