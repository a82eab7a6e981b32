//! Game setup: mode selection, options and roster description.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use super::team::TeamId;

/// The eight game modes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Classic,
    Countdown,
    Grid,
    Elimination,
    Race,
    Sequence,
    BullseyeCount,
    ExactScore,
}

impl ModeKind {
    pub fn label(self) -> &'static str {
        match self {
            ModeKind::Classic => "Classic",
            ModeKind::Countdown => "Countdown",
            ModeKind::Grid => "Grid",
            ModeKind::Elimination => "Elimination",
            ModeKind::Race => "Race",
            ModeKind::Sequence => "Sequence",
            ModeKind::BullseyeCount => "Bullseye Hunt",
            ModeKind::ExactScore => "Exact Score",
        }
    }

    /// Modes that support two-team play.
    pub fn supports_teams(self) -> bool {
        matches!(self, ModeKind::Classic | ModeKind::Countdown | ModeKind::Grid)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ClassicOptions {
    /// Number of series in a game.
    pub series: u32,
    /// Throws per player per series.
    pub throws_per_series: u32,
    /// Throw index on which the killshot discs are armed; 0 arms every throw.
    pub killshot_throw: u32,
}

impl Default for ClassicOptions {
    fn default() -> Self {
        ClassicOptions { series: 5, throws_per_series: 3, killshot_throw: 3 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct CountdownOptions {
    pub start_score: u32,
}

impl Default for CountdownOptions {
    fn default() -> Self {
        CountdownOptions { start_score: 301 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct RaceOptions {
    pub target_score: u32,
}

impl Default for RaceOptions {
    fn default() -> Self {
        RaceOptions { target_score: 25 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct BullseyeOptions {
    pub target_hits: u32,
}

impl Default for BullseyeOptions {
    fn default() -> Self {
        BullseyeOptions { target_hits: 5 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ExactScoreOptions {
    pub target_score: u32,
}

impl Default for ExactScoreOptions {
    fn default() -> Self {
        ExactScoreOptions { target_score: 20 }
    }
}

/// Mode choice plus its options, as one tagged value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModeConfig {
    Classic(ClassicOptions),
    Countdown(CountdownOptions),
    Grid,
    Elimination,
    Race(RaceOptions),
    Sequence,
    BullseyeCount(BullseyeOptions),
    ExactScore(ExactScoreOptions),
}

impl ModeConfig {
    pub fn kind(&self) -> ModeKind {
        match self {
            ModeConfig::Classic(_) => ModeKind::Classic,
            ModeConfig::Countdown(_) => ModeKind::Countdown,
            ModeConfig::Grid => ModeKind::Grid,
            ModeConfig::Elimination => ModeKind::Elimination,
            ModeConfig::Race(_) => ModeKind::Race,
            ModeConfig::Sequence => ModeKind::Sequence,
            ModeConfig::BullseyeCount(_) => ModeKind::BullseyeCount,
            ModeConfig::ExactScore(_) => ModeKind::ExactScore,
        }
    }

    /// Default options for a mode.
    pub fn default_for(kind: ModeKind) -> ModeConfig {
        match kind {
            ModeKind::Classic => ModeConfig::Classic(ClassicOptions::default()),
            ModeKind::Countdown => ModeConfig::Countdown(CountdownOptions::default()),
            ModeKind::Grid => ModeConfig::Grid,
            ModeKind::Elimination => ModeConfig::Elimination,
            ModeKind::Race => ModeConfig::Race(RaceOptions::default()),
            ModeKind::Sequence => ModeConfig::Sequence,
            ModeKind::BullseyeCount => ModeConfig::BullseyeCount(BullseyeOptions::default()),
            ModeKind::ExactScore => ModeConfig::ExactScore(ExactScoreOptions::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            ModeConfig::Classic(opts) => {
                if opts.series == 0 || opts.throws_per_series == 0 {
                    return Err(GameError::InvalidConfig(
                        "series and throws_per_series must be at least 1".to_string(),
                    ));
                }
                if opts.killshot_throw > opts.throws_per_series {
                    return Err(GameError::InvalidConfig(format!(
                        "killshot_throw {} exceeds throws_per_series {}",
                        opts.killshot_throw, opts.throws_per_series
                    )));
                }
            }
            ModeConfig::Countdown(opts) if opts.start_score == 0 => {
                return Err(GameError::InvalidConfig("start_score must be positive".to_string()));
            }
            ModeConfig::Race(opts) if opts.target_score == 0 => {
                return Err(GameError::InvalidConfig("target_score must be positive".to_string()));
            }
            ModeConfig::BullseyeCount(opts) if opts.target_hits == 0 => {
                return Err(GameError::InvalidConfig("target_hits must be positive".to_string()));
            }
            ModeConfig::ExactScore(opts) if opts.target_score == 0 => {
                return Err(GameError::InvalidConfig("target_score must be positive".to_string()));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Everything needed to start (or restart) a game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GameSetup {
    pub mode: ModeConfig,
    /// Display names in roster order; blank entries get defaults.
    pub player_names: Vec<String>,
    /// Team assignment parallel to `player_names`; `None` for individual play.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<TeamId>>,
}

impl GameSetup {
    pub fn new(mode: ModeConfig, player_names: Vec<String>) -> Self {
        GameSetup { mode, player_names, teams: None }
    }

    pub fn with_teams(mut self, teams: Vec<TeamId>) -> Self {
        self.teams = Some(teams);
        self
    }

    /// Setup with the mode's default options.
    pub fn with_defaults(kind: ModeKind, player_names: Vec<String>) -> Self {
        GameSetup::new(ModeConfig::default_for(kind), player_names)
    }

    pub fn team_mode(&self) -> bool {
        self.teams.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        self.mode.validate()?;

        let count = self.player_names.len();
        if count == 0 {
            return Err(GameError::InvalidPlayerCount {
                expected: "at least 1".to_string(),
                found: 0,
            });
        }

        let kind = self.mode.kind();
        if kind == ModeKind::Elimination && count < 2 {
            return Err(GameError::InvalidPlayerCount {
                expected: "at least 2".to_string(),
                found: count,
            });
        }

        match (&self.teams, kind) {
            (None, ModeKind::Grid) if count != 2 => {
                return Err(GameError::InvalidPlayerCount {
                    expected: "exactly 2".to_string(),
                    found: count,
                });
            }
            (Some(_), k) if !k.supports_teams() => {
                return Err(GameError::InvalidTeamAssignment(format!(
                    "{} has no team play",
                    k.label()
                )));
            }
            (Some(teams), k) => {
                if teams.len() != count {
                    return Err(GameError::InvalidTeamAssignment(format!(
                        "{} assignments for {} players",
                        teams.len(),
                        count
                    )));
                }
                let team1 = teams.iter().filter(|t| **t == TeamId::Team1).count();
                let team2 = count - team1;
                if team1 == 0 || team2 == 0 {
                    return Err(GameError::InvalidTeamAssignment(
                        "both teams need at least one player".to_string(),
                    ));
                }
                if k == ModeKind::Grid && (count != 4 || team1 != 2) {
                    return Err(GameError::InvalidPlayerCount {
                        expected: "exactly 2 per team".to_string(),
                        found: count,
                    });
                }
            }
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{}", i + 1)).collect()
    }

    #[test]
    fn test_default_options_per_mode() {
        for kind in ModeKind::iter() {
            let config = ModeConfig::default_for(kind);
            assert_eq!(config.kind(), kind);
        }
        assert_eq!(ModeConfig::default_for(ModeKind::Countdown), ModeConfig::Countdown(CountdownOptions { start_score: 301 }));
        assert_eq!(ModeConfig::default_for(ModeKind::Race), ModeConfig::Race(RaceOptions { target_score: 25 }));
        assert_eq!(ModeConfig::default_for(ModeKind::BullseyeCount), ModeConfig::BullseyeCount(BullseyeOptions { target_hits: 5 }));
        assert_eq!(ModeConfig::default_for(ModeKind::ExactScore), ModeConfig::ExactScore(ExactScoreOptions { target_score: 20 }));
    }

    #[test]
    fn test_mode_config_serde_tagging() {
        let json = serde_json::to_string(&ModeConfig::default_for(ModeKind::Countdown)).unwrap();
        assert_eq!(json, "{\"mode\":\"countdown\",\"start_score\":301}");
        let grid: ModeConfig = serde_json::from_str("{\"mode\":\"grid\"}").unwrap();
        assert_eq!(grid, ModeConfig::Grid);
    }

    #[test]
    fn test_empty_roster_rejected() {
        let setup = GameSetup::with_defaults(ModeKind::Classic, vec![]);
        assert!(matches!(
            setup.validate(),
            Err(GameError::InvalidPlayerCount { found: 0, .. })
        ));
    }

    #[test]
    fn test_elimination_needs_two_players() {
        let setup = GameSetup::with_defaults(ModeKind::Elimination, names(1));
        assert!(setup.validate().is_err());
        let setup = GameSetup::with_defaults(ModeKind::Elimination, names(2));
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn test_grid_roster_sizes() {
        assert!(GameSetup::with_defaults(ModeKind::Grid, names(2)).validate().is_ok());
        assert!(GameSetup::with_defaults(ModeKind::Grid, names(3)).validate().is_err());

        let teams = vec![TeamId::Team1, TeamId::Team1, TeamId::Team2, TeamId::Team2];
        let setup = GameSetup::with_defaults(ModeKind::Grid, names(4)).with_teams(teams);
        assert!(setup.validate().is_ok());

        let lopsided = vec![TeamId::Team1, TeamId::Team1, TeamId::Team1, TeamId::Team2];
        let setup = GameSetup::with_defaults(ModeKind::Grid, names(4)).with_teams(lopsided);
        assert!(setup.validate().is_err());
    }

    #[test]
    fn test_teams_only_where_supported() {
        let setup = GameSetup::with_defaults(ModeKind::Race, names(2))
            .with_teams(vec![TeamId::Team1, TeamId::Team2]);
        assert!(matches!(setup.validate(), Err(GameError::InvalidTeamAssignment(_))));
    }

    #[test]
    fn test_team_assignment_must_cover_roster() {
        let setup = GameSetup::with_defaults(ModeKind::Classic, names(3))
            .with_teams(vec![TeamId::Team1, TeamId::Team2]);
        assert!(setup.validate().is_err());

        let setup = GameSetup::with_defaults(ModeKind::Classic, names(3))
            .with_teams(vec![TeamId::Team1, TeamId::Team1, TeamId::Team1]);
        assert!(matches!(setup.validate(), Err(GameError::InvalidTeamAssignment(_))));
    }

    #[test]
    fn test_bad_options_rejected() {
        let setup = GameSetup::new(
            ModeConfig::Classic(ClassicOptions { series: 0, throws_per_series: 3, killshot_throw: 0 }),
            names(2),
        );
        assert!(matches!(setup.validate(), Err(GameError::InvalidConfig(_))));

        let setup = GameSetup::new(
            ModeConfig::Classic(ClassicOptions { series: 5, throws_per_series: 3, killshot_throw: 4 }),
            names(2),
        );
        assert!(setup.validate().is_err());

        let setup = GameSetup::new(ModeConfig::Countdown(CountdownOptions { start_score: 0 }), names(2));
        assert!(setup.validate().is_err());
    }
}
