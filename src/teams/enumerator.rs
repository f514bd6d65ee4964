//! Tiered backtracking search over per-requirement buckets.
//!
//! Requirements are filled highest tier first. Each level draws its members from its own
//! bucket minus anything already placed at a higher level; a level with fewer eligible
//! candidates than it needs cuts the branch. Complete teams pass through the include, cap
//! and reserve checks in that order.

use std::collections::HashSet;

use crate::data::character::{CharacterName, CharacterRecord};
use crate::teams::{SearchStats, TeamResult, TeamRules, TEAM_SIZE};

pub(crate) struct TeamSearch<'a> {
    pool: &'a [&'a CharacterRecord],
    rules: &'a TeamRules,
    /// Pool indices per requirement, in pool order.
    buckets: Vec<Vec<usize>>,
    counts: Vec<usize>,
    /// Only needed when a record can land in more than one bucket.
    dedupe: bool,
    seen: HashSet<[usize; TEAM_SIZE]>,
    team: Vec<usize>,
    results: Vec<TeamResult>,
    stats: SearchStats,
}

impl<'a> TeamSearch<'a> {
    pub(crate) fn new(pool: &'a [&'a CharacterRecord], rules: &'a TeamRules) -> Self {
        let requirements = rules.composition.requirements();
        let buckets = requirements
            .iter()
            .map(|req| {
                pool.iter()
                    .enumerate()
                    .filter(|(_, record)| req.matches(record.stats.get(rules.dimension)))
                    .map(|(index, _)| index)
                    .collect()
            })
            .collect();

        Self {
            pool,
            rules,
            buckets,
            counts: requirements.iter().map(|req| req.count).collect(),
            dedupe: rules.composition.has_overlapping_tiers(),
            seen: HashSet::new(),
            team: Vec::with_capacity(TEAM_SIZE),
            results: Vec::new(),
            stats: SearchStats {
                pool_size: pool.len(),
                ..SearchStats::default()
            },
        }
    }

    pub(crate) fn run(mut self) -> (Vec<TeamResult>, SearchStats) {
        self.fill_level(0);
        self.stats.teams_found = self.results.len();
        (self.results, self.stats)
    }

    fn fill_level(&mut self, level: usize) {
        if level == self.buckets.len() {
            self.evaluate();
            return;
        }

        let needed = self.counts[level];
        let eligible: Vec<usize> = self.buckets[level]
            .iter()
            .copied()
            .filter(|index| !self.team.contains(index))
            .collect();
        if eligible.len() < needed {
            self.stats.branches_pruned += 1;
            return;
        }
        self.choose(level, &eligible, 0, needed);
    }

    /// Lexicographic k-combinations of `eligible`, descending into the next level for each.
    fn choose(&mut self, level: usize, eligible: &[usize], start: usize, remaining: usize) {
        if remaining == 0 {
            self.fill_level(level + 1);
            return;
        }
        for position in start..=eligible.len() - remaining {
            self.team.push(eligible[position]);
            self.choose(level, eligible, position + 1, remaining - 1);
            self.team.pop();
        }
    }

    fn evaluate(&mut self) {
        self.stats.combinations_visited += 1;
        let members: Vec<&CharacterRecord> = self.team.iter().map(|&index| self.pool[index]).collect();

        if !self
            .rules
            .include
            .iter()
            .all(|name| members.iter().any(|record| &record.name == name))
        {
            self.stats.rejected_include += 1;
            return;
        }

        let total: u32 = members.iter().map(|record| record.stats.total()).sum();
        if total > self.rules.total_cap {
            self.stats.rejected_cap += 1;
            return;
        }

        if self.rules.require_reserve_capable
            && !members.iter().any(|record| record.is_reserve_capable())
        {
            self.stats.rejected_reserve += 1;
            return;
        }

        if self.dedupe {
            let mut key = [0usize; TEAM_SIZE];
            key.copy_from_slice(&self.team);
            key.sort_unstable();
            if !self.seen.insert(key) {
                self.stats.duplicates_skipped += 1;
                return;
            }
        }

        let members: [CharacterName; TEAM_SIZE] =
            std::array::from_fn(|slot| members[slot].name.clone());
        self.results.push(TeamResult { members, total });
    }
}
