pub mod composition;
pub mod enumerator;
pub mod ranking;

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::data::character::{CharacterName, StatDimension};
use crate::data::roster::Roster;
use crate::error::ConfigError;
use crate::teams::composition::TierComposition;
use crate::teams::enumerator::TeamSearch;

/// Members per team.
pub const TEAM_SIZE: usize = 4;
/// Default ceiling on the summed stats of all four members.
pub const DEFAULT_TOTAL_CAP: u32 = 76;

/// Everything that constrains one enumeration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRules {
    pub dimension: StatDimension,
    pub composition: TierComposition,
    /// Teams whose summed stats exceed this are dropped.
    pub total_cap: u32,
    /// When true, at least one member must be able to play from reserve.
    pub require_reserve_capable: bool,
    /// Every returned team contains all of these.
    pub include: BTreeSet<CharacterName>,
    /// Removed from the pool before any combination is built.
    pub exclude: BTreeSet<CharacterName>,
}

impl Default for TeamRules {
    fn default() -> Self {
        Self {
            dimension: StatDimension::Strength,
            composition: TierComposition::default(),
            total_cap: DEFAULT_TOTAL_CAP,
            require_reserve_capable: true,
            include: BTreeSet::new(),
            exclude: BTreeSet::new(),
        }
    }
}

impl TeamRules {
    /// Build rules from raw parameter text. Invalid dimension or composition fails here,
    /// before any roster is touched.
    pub fn from_parts<I, E>(
        stat_dimension: &str,
        composition: &str,
        total_cap: u32,
        require_reserve_capable: bool,
        include: I,
        exclude: E,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            dimension: stat_dimension.parse()?,
            composition: composition.parse()?,
            total_cap,
            require_reserve_capable,
            include: canonical_set(include),
            exclude: canonical_set(exclude),
        })
    }
}

fn canonical_set<I>(names: I) -> BTreeSet<CharacterName>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| CharacterName::canonical(name.as_ref()))
        .filter(|name| !name.is_empty())
        .collect()
}

/// One valid team: members in generation order (highest tier first) and their stat total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamResult {
    pub members: [CharacterName; TEAM_SIZE],
    pub total: u32,
}

impl TeamResult {
    pub fn member_set(&self) -> BTreeSet<&CharacterName> {
        self.members.iter().collect()
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub pool_size: usize,
    pub combinations_visited: usize,
    pub branches_pruned: usize,
    pub rejected_include: usize,
    pub rejected_cap: usize,
    pub rejected_reserve: usize,
    pub duplicates_skipped: usize,
    pub teams_found: usize,
}

/// Every valid team for `rules`, in discovery order.
pub fn enumerate_teams(roster: &Roster, rules: &TeamRules) -> Vec<TeamResult> {
    enumerate_teams_with_stats(roster, rules).0
}

pub fn enumerate_teams_with_stats(roster: &Roster, rules: &TeamRules) -> (Vec<TeamResult>, SearchStats) {
    for name in rules.exclude.iter().filter(|name| !roster.contains(name)) {
        warn!(character = %name, "excluded character is not in the roster");
    }

    let pool: Vec<_> = roster
        .iter()
        .filter(|record| !rules.exclude.contains(&record.name))
        .collect();

    if let Some(missing) = rules
        .include
        .iter()
        .find(|name| !pool.iter().any(|record| &record.name == *name))
    {
        warn!(character = %missing, "included character is not available; no team can contain it");
        let stats = SearchStats {
            pool_size: pool.len(),
            ..SearchStats::default()
        };
        return (Vec::new(), stats);
    }

    let (teams, stats) = TeamSearch::new(&pool, rules).run();
    debug!(
        dimension = %rules.dimension,
        composition = %rules.composition,
        pool = stats.pool_size,
        visited = stats.combinations_visited,
        pruned = stats.branches_pruned,
        rejected_include = stats.rejected_include,
        rejected_cap = stats.rejected_cap,
        rejected_reserve = stats.rejected_reserve,
        duplicates = stats.duplicates_skipped,
        teams = stats.teams_found,
        "team search finished"
    );
    (teams, stats)
}
