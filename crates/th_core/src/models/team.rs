use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One of the two sides of a team game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TeamId {
    Team1,
    Team2,
}

impl TeamId {
    pub const BOTH: [TeamId; 2] = [TeamId::Team1, TeamId::Team2];

    pub fn index(self) -> usize {
        match self {
            TeamId::Team1 => 0,
            TeamId::Team2 => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn other(self) -> TeamId {
        match self {
            TeamId::Team1 => TeamId::Team2,
            TeamId::Team2 => TeamId::Team1,
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            TeamId::Team1 => "Team 1",
            TeamId::Team2 => "Team 2",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub score: u32,
}

/// The two team ledgers of a team game.
///
/// In team mode these scores are authoritative; individual ledgers are kept
/// for per-player statistics only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct TeamPair {
    teams: [Team; 2],
}

impl TeamPair {
    /// Both teams starting from the same score (0 for point-accumulation
    /// games, the start score for Countdown).
    pub fn new(initial_score: u32) -> Self {
        let teams = TeamId::BOTH.map(|id| Team {
            id,
            name: id.default_name().to_string(),
            score: initial_score,
        });
        TeamPair { teams }
    }

    pub fn get(&self, id: TeamId) -> &Team {
        &self.teams[id.index()]
    }

    pub fn get_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[id.index()]
    }

    pub fn credit(&mut self, id: TeamId, points: u32) {
        self.get_mut(id).score += points;
    }

    pub fn debit(&mut self, id: TeamId, points: u32) {
        let team = self.get_mut(id);
        team.score = team.score.saturating_sub(points);
    }

    /// Team with the strictly higher score; `None` on a tie.
    pub fn leader(&self) -> Option<TeamId> {
        let (a, b) = (self.teams[0].score, self.teams[1].score);
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Some(TeamId::Team1),
            std::cmp::Ordering::Less => Some(TeamId::Team2),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.teams[0].score, self.teams[1].score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_and_debit() {
        let mut pair = TeamPair::new(0);
        pair.credit(TeamId::Team1, 6);
        pair.credit(TeamId::Team2, 4);
        pair.credit(TeamId::Team1, 2);
        assert_eq!(pair.scores(), (8, 4));

        pair.debit(TeamId::Team1, 3);
        assert_eq!(pair.get(TeamId::Team1).score, 5);
    }

    #[test]
    fn test_debit_saturates_at_zero() {
        let mut pair = TeamPair::new(10);
        pair.debit(TeamId::Team2, 25);
        assert_eq!(pair.get(TeamId::Team2).score, 0);
    }

    #[test]
    fn test_leader_and_tie() {
        let mut pair = TeamPair::new(0);
        assert_eq!(pair.leader(), None);
        pair.credit(TeamId::Team2, 1);
        assert_eq!(pair.leader(), Some(TeamId::Team2));
        pair.credit(TeamId::Team1, 1);
        assert_eq!(pair.leader(), None);
    }

    #[test]
    fn test_default_names() {
        let pair = TeamPair::new(301);
        assert_eq!(pair.get(TeamId::Team1).name, "Team 1");
        assert_eq!(pair.get(TeamId::Team2).name, "Team 2");
        assert_eq!(pair.get(TeamId::Team2).score, 301);
    }
}
