//! Team identification and per-team score state.
//!
//! ## TeamId
//!
//! Type-safe team identifier. Indices are 0-based and double as turn order.
//!
//! ## Team
//!
//! Display data (name, color) plus the mutable score state the rules
//! operate on: position, owned regions, points, streak, skip.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::region::RegionId;

/// Maximum number of teams; one per palette color.
pub const MAX_TEAMS: usize = TEAM_COLORS.len();

/// Board colors, assigned to teams in order.
pub const TEAM_COLORS: [&str; 6] = [
    "#ef4444", "#22c55e", "#3b82f6", "#f59e0b", "#a855f7", "#14b8a6",
];

/// Team identifier.
///
/// The first team is `TeamId(0)`; it is displayed as `team-1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw team index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all team IDs for a game with `team_count` teams.
    ///
    /// ```
    /// use region_conquest::core::TeamId;
    ///
    /// let teams: Vec<_> = TeamId::all(3).collect();
    /// assert_eq!(teams, vec![TeamId::new(0), TeamId::new(1), TeamId::new(2)]);
    /// ```
    pub fn all(team_count: usize) -> impl Iterator<Item = TeamId> {
        (0..team_count.min(MAX_TEAMS) as u8).map(TeamId)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "team-{}", u16::from(self.0) + 1)
    }
}

/// One team and its score state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Identifier, equal to the team's turn-order index.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Board color (`#rrggbb`).
    pub color: String,
    /// Home region (home-base mode only).
    pub home: Option<RegionId>,
    /// Region the team's token stands on.
    pub position: RegionId,
    /// Regions this team owns.
    pub owned: OrdSet<RegionId>,
    /// Score, never negative.
    pub points: u32,
    /// Consecutive successful captures.
    pub streak: u32,
    /// Turns this team must still forfeit.
    pub skip: u32,
}

impl Team {
    /// Create a team with zeroed score state, standing on `start`.
    #[must_use]
    pub fn new(id: TeamId, start: RegionId) -> Self {
        Self {
            id,
            name: format!("Team {}", id.index() + 1),
            color: TEAM_COLORS[id.index() % TEAM_COLORS.len()].to_string(),
            home: None,
            position: start,
            owned: OrdSet::new(),
            points: 0,
            streak: 0,
            skip: 0,
        }
    }

    /// Check whether this team owns a region.
    #[must_use]
    pub fn owns(&self, region: &RegionId) -> bool {
        self.owned.contains(region)
    }

    /// Number of regions owned.
    #[must_use]
    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }

    /// Deduct points, flooring at zero.
    pub fn penalize(&mut self, amount: u32) {
        self.points = self.points.saturating_sub(amount);
    }

    /// Consume one pending skip. Returns false if none was pending.
    pub fn take_skip(&mut self) -> bool {
        if self.skip == 0 {
            return false;
        }
        self.skip -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_basics() {
        let t0 = TeamId::new(0);
        let t5 = TeamId::new(5);

        assert_eq!(t0.index(), 0);
        assert_eq!(t5.index(), 5);
        assert_eq!(format!("{}", t0), "team-1");
        assert_eq!(format!("{}", t5), "team-6");
    }

    #[test]
    fn test_team_id_all_caps_at_palette() {
        assert_eq!(TeamId::all(4).count(), 4);
        assert_eq!(TeamId::all(40).count(), MAX_TEAMS);
    }

    #[test]
    fn test_new_team_defaults() {
        let team = Team::new(TeamId::new(2), RegionId::new("a"));

        assert_eq!(team.name, "Team 3");
        assert_eq!(team.color, "#3b82f6");
        assert_eq!(team.position, RegionId::new("a"));
        assert!(team.owned.is_empty());
        assert_eq!((team.points, team.streak, team.skip), (0, 0, 0));
        assert!(team.home.is_none());
    }

    #[test]
    fn test_palette_colors_distinct() {
        let mut colors = TEAM_COLORS.to_vec();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), MAX_TEAMS);
    }

    #[test]
    fn test_penalize_floors_at_zero() {
        let mut team = Team::new(TeamId::new(0), RegionId::new("a"));
        team.points = 1;
        team.penalize(1);
        assert_eq!(team.points, 0);
        team.penalize(1);
        assert_eq!(team.points, 0);
    }

    #[test]
    fn test_take_skip() {
        let mut team = Team::new(TeamId::new(0), RegionId::new("a"));
        assert!(!team.take_skip());

        team.skip = 2;
        assert!(team.take_skip());
        assert_eq!(team.skip, 1);
    }

    #[test]
    fn test_team_serialization() {
        let mut team = Team::new(TeamId::new(1), RegionId::new("a"));
        team.owned.insert(RegionId::new("b"));
        team.points = 4;

        let json = serde_json::to_string(&team).unwrap();
        let deserialized: Team = serde_json::from_str(&json).unwrap();
        assert_eq!(team, deserialized);
    }
}
