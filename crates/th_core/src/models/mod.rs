pub mod game_result;
pub mod player;
pub mod setup;
pub mod team;
pub mod zone;

pub use game_result::{GameResult, GameStatus, GameSummary, RankingEntry, Winner};
pub use player::{Player, PlayerStats, ThrowRecord};
pub use setup::{
    BullseyeOptions, ClassicOptions, CountdownOptions, ExactScoreOptions, GameSetup, ModeConfig,
    ModeKind, RaceOptions,
};
pub use team::{Team, TeamId, TeamPair};
pub use zone::{DartHit, DartRing, RingZone};
