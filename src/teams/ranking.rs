use std::fmt;
use std::str::FromStr;

use crate::teams::TeamResult;

/// Presentation order for enumerated teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamOrder {
    /// Order in which the search found them.
    #[default]
    Discovery,
    TotalDescending,
    TotalAscending,
}

impl FromStr for TeamOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discovery" | "none" => Ok(Self::Discovery),
            "total" | "total-desc" | "desc" => Ok(Self::TotalDescending),
            "total-asc" | "asc" => Ok(Self::TotalAscending),
            other => Err(format!(
                "unknown sort order '{other}' (expected discovery, total-desc or total-asc)"
            )),
        }
    }
}

impl fmt::Display for TeamOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Discovery => "discovery",
            Self::TotalDescending => "total-desc",
            Self::TotalAscending => "total-asc",
        })
    }
}

/// Stable sort: teams with equal totals keep their discovery order.
pub fn sort_teams(teams: &mut [TeamResult], order: TeamOrder) {
    match order {
        TeamOrder::Discovery => {}
        TeamOrder::TotalDescending => teams.sort_by(|left, right| right.total.cmp(&left.total)),
        TeamOrder::TotalAscending => teams.sort_by(|left, right| left.total.cmp(&right.total)),
    }
}
