//! League tags - club/league affiliation roles that drive the nickname suffix

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Club or league affiliation
///
/// Declaration order is the fixed priority used when several tag roles are
/// added in the same role-set change: the smallest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeagueTag {
    Ligue1,
    SerieA,
    Bundesliga,
    LaLiga,
    PremierLeague,
    Manc,
    Everton,
    Neutral,
    Londoner,
    OtherClub,
}

impl LeagueTag {
    pub const ALL: [LeagueTag; 10] = [
        Self::Ligue1,
        Self::SerieA,
        Self::Bundesliga,
        Self::LaLiga,
        Self::PremierLeague,
        Self::Manc,
        Self::Everton,
        Self::Neutral,
        Self::Londoner,
        Self::OtherClub,
    ];

    /// Nickname suffix and display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Ligue1 => "Ligue 1",
            Self::SerieA => "Serie A",
            Self::Bundesliga => "Bundesliga",
            Self::LaLiga => "La Liga",
            Self::PremierLeague => "PL",
            Self::Manc => "Manc",
            Self::Everton => "Everton",
            Self::Neutral => "Neutral",
            Self::Londoner => "Londoner",
            Self::OtherClub => "Other Club",
        }
    }

    /// Nickname for a member carrying this tag
    pub fn nickname_for(self, username: &str) -> String {
        format!("{username} | {}", self.label())
    }
}

impl fmt::Display for LeagueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeagueTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Invalid league tag: {s}"))
    }
}
