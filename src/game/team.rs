//! Teams and the team catalog.

use serde::{Serialize, Deserialize};

use crate::error::TeamError;
use crate::SQUAD_SIZE;

// =============================================================================
// LINEUP
// =============================================================================

/// Ordered batting lineup of exactly [`SQUAD_SIZE`] players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup(Vec<String>);

impl Lineup {
    /// Build a lineup, rejecting anything other than eleven names.
    pub fn new<I, S>(team: &str, players: I) -> Result<Self, TeamError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players: Vec<String> = players.into_iter().map(Into::into).collect();
        if players.len() != SQUAD_SIZE {
            return Err(TeamError::BadLineup {
                team: team.to_string(),
                count: players.len(),
                expected: SQUAD_SIZE,
            });
        }
        Ok(Self(players))
    }

    /// Player at batting position `index` (0-based).
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Iterate players in batting order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Always [`SQUAD_SIZE`].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed lineup.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// TEAM
// =============================================================================

/// A named team with its batting lineup. Immutable once selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    name: String,
    lineup: Lineup,
}

impl Team {
    /// Create a team from a name and eleven player names.
    pub fn new<I, S>(name: impl Into<String>, players: I) -> Result<Self, TeamError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let lineup = Lineup::new(&name, players)?;
        Ok(Self { name, lineup })
    }

    /// Team name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Batting lineup.
    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }
}

// =============================================================================
// CATALOG
// =============================================================================

const DEFAULT_TEAMS: [(&str, [&str; SQUAD_SIZE]); 4] = [
    ("India", [
        "Rohit", "Virat", "Dhoni", "Hardik", "Jadeja", "Bumrah",
        "Shami", "Kuldeep", "Rahul", "Pant", "Iyer",
    ]),
    ("Australia", [
        "Warner", "Smith", "Finch", "Maxwell", "Stoinis", "Starc",
        "Hazlewood", "Lyon", "Carey", "Labuschagne", "Zampa",
    ]),
    ("England", [
        "Root", "Stokes", "Butler", "Morgan", "Bairstow", "Archer",
        "Broad", "Anderson", "Woakes", "Rashid", "Moeen",
    ]),
    ("Pakistan", [
        "Babar", "Rizwan", "Fakhar", "Hafeez", "Shadab", "Shaheen",
        "Hasan", "Wasim", "Haris", "Azam", "Nawaz",
    ]),
];

/// Fixed, read-only catalog of selectable teams (at least two).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCatalog {
    teams: Vec<Team>,
}

impl TeamCatalog {
    /// Build a catalog from custom teams.
    ///
    /// Team names must be unique and there must be at least two teams.
    pub fn new(teams: Vec<Team>) -> Result<Self, TeamError> {
        if teams.len() < 2 {
            return Err(TeamError::CatalogTooSmall(teams.len()));
        }
        for (i, team) in teams.iter().enumerate() {
            if teams[..i].iter().any(|t| t.name == team.name) {
                return Err(TeamError::Duplicate(team.name.clone()));
            }
        }
        Ok(Self { teams })
    }

    /// Look up a team by exact name.
    pub fn get(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    /// Team names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|t| t.name())
    }

    /// All teams in catalog order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Number of teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Never true for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl Default for TeamCatalog {
    fn default() -> Self {
        let teams = DEFAULT_TEAMS
            .iter()
            .map(|(name, players)| Team {
                name: (*name).to_string(),
                lineup: Lineup(players.iter().map(|p| (*p).to_string()).collect()),
            })
            .collect();
        Self { teams }
    }
}
