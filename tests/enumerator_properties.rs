use std::collections::BTreeSet;

use overpower::{
    enumerate_teams, CharacterName, CharacterRecord, Roster, StatDimension, StatLine,
    TierComposition, TeamResult, TeamRules,
};
use proptest::prelude::*;

const COMPOSITIONS: [&str; 6] = [
    "8:3,7:1",
    "8:3,7+:1",
    "8:2,7:2",
    "7+:4",
    "8:1,7:1,6:1,5:1",
    "8+:2,6+:2",
];

#[derive(Debug, Clone)]
struct Scenario {
    roster: Roster,
    rules: TeamRules,
}

fn roster_strategy() -> impl Strategy<Value = Roster> {
    prop::collection::vec((prop::array::uniform4(4u8..=9), any::<bool>()), 4..11).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (stats, special))| {
                    CharacterRecord::new(
                        &format!("c{i}"),
                        StatLine(stats),
                        "t",
                        if special { "reserve" } else { "" },
                    )
                })
                .collect()
        },
    )
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (
        roster_strategy(),
        0usize..4,
        0usize..COMPOSITIONS.len(),
        60u32..=140,
        any::<bool>(),
        prop::collection::btree_set(0usize..11, 0..2),
        prop::collection::btree_set(0usize..11, 0..3),
    )
        .prop_map(|(roster, dim, comp, cap, reserve, include, exclude)| {
            let name = |i: usize| CharacterName::canonical(&format!("c{i}"));
            Scenario {
                roster,
                rules: TeamRules {
                    dimension: StatDimension::ALL[dim],
                    composition: COMPOSITIONS[comp].parse().expect("fixture composition"),
                    total_cap: cap,
                    require_reserve_capable: reserve,
                    include: include.into_iter().map(name).collect(),
                    exclude: exclude.into_iter().map(name).collect(),
                },
            }
        })
}

/// Slot `k` of a generated team belongs to the requirement covering position `k`.
fn slots_match(members: &[&CharacterRecord], composition: &TierComposition, dim: StatDimension) -> bool {
    let mut slot = 0;
    for req in composition.requirements() {
        for _ in 0..req.count {
            if !req.matches(members[slot].stats.get(dim)) {
                return false;
            }
            slot += 1;
        }
    }
    true
}

fn permutations(items: [usize; 4]) -> Vec<[usize; 4]> {
    let mut out = Vec::with_capacity(24);
    for a in 0..4 {
        for b in 0..4 {
            for c in 0..4 {
                for d in 0..4 {
                    let picks = [a, b, c, d];
                    let distinct: BTreeSet<_> = picks.iter().collect();
                    if distinct.len() == 4 {
                        out.push(picks.map(|i| items[i]));
                    }
                }
            }
        }
    }
    out
}

/// Every qualifying member set, found by checking all 4-subsets of the pool.
fn brute_force(scenario: &Scenario) -> BTreeSet<BTreeSet<CharacterName>> {
    let rules = &scenario.rules;
    let pool: Vec<&CharacterRecord> = scenario
        .roster
        .iter()
        .filter(|record| !rules.exclude.contains(&record.name))
        .collect();
    let n = pool.len();
    let mut found = BTreeSet::new();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    let members = [pool[a], pool[b], pool[c], pool[d]];
                    let composed = permutations([0, 1, 2, 3]).into_iter().any(|order| {
                        let arranged: Vec<&CharacterRecord> =
                            order.iter().map(|&i| members[i]).collect();
                        slots_match(&arranged, &rules.composition, rules.dimension)
                    });
                    let names: BTreeSet<CharacterName> =
                        members.iter().map(|record| record.name.clone()).collect();
                    let total: u32 = members.iter().map(|record| record.stats.total()).sum();
                    let reserve_ok = !rules.require_reserve_capable
                        || members.iter().any(|record| record.is_reserve_capable());
                    if composed
                        && rules.include.is_subset(&names)
                        && total <= rules.total_cap
                        && reserve_ok
                    {
                        found.insert(names);
                    }
                }
            }
        }
    }
    found
}

fn member_records<'a>(roster: &'a Roster, team: &TeamResult) -> Vec<&'a CharacterRecord> {
    team.members
        .iter()
        .map(|name| roster.get(name).expect("member must exist in roster"))
        .collect()
}

proptest! {
    #[test]
    fn every_team_satisfies_every_rule(scenario in scenario_strategy()) {
        let rules = &scenario.rules;
        let teams = enumerate_teams(&scenario.roster, rules);
        let mut seen = BTreeSet::new();

        for team in &teams {
            let members = member_records(&scenario.roster, team);
            let names = team.member_set();
            prop_assert_eq!(names.len(), 4);
            prop_assert!(seen.insert(names.clone()), "duplicate member set {:?}", names);

            let total: u32 = members.iter().map(|record| record.stats.total()).sum();
            prop_assert_eq!(total, team.total);
            prop_assert!(team.total <= rules.total_cap);

            if rules.require_reserve_capable {
                prop_assert!(members.iter().any(|record| record.is_reserve_capable()));
            }
            for name in &rules.include {
                prop_assert!(names.contains(name));
            }
            for name in &rules.exclude {
                prop_assert!(!names.contains(name));
            }
            prop_assert!(slots_match(&members, &rules.composition, rules.dimension));
        }
    }

    #[test]
    fn search_finds_exactly_the_brute_force_set(scenario in scenario_strategy()) {
        let teams = enumerate_teams(&scenario.roster, &scenario.rules);
        let found: BTreeSet<BTreeSet<CharacterName>> = teams
            .iter()
            .map(|team| team.members.iter().cloned().collect())
            .collect();
        prop_assert_eq!(found.len(), teams.len());
        prop_assert_eq!(found, brute_force(&scenario));
    }

    #[test]
    fn repeated_runs_are_identical(scenario in scenario_strategy()) {
        let first = enumerate_teams(&scenario.roster, &scenario.rules);
        let second = enumerate_teams(&scenario.roster, &scenario.rules);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn exact_composition_counts_are_honored(roster in roster_strategy(), dim in 0usize..4) {
        let dimension = StatDimension::ALL[dim];
        let rules = TeamRules {
            dimension,
            composition: "8:3,7:1".parse().expect("fixture composition"),
            total_cap: u32::MAX,
            require_reserve_capable: false,
            ..TeamRules::default()
        };
        for team in enumerate_teams(&roster, &rules) {
            let tiers: Vec<u8> = member_records(&roster, &team)
                .iter()
                .map(|record| record.stats.get(dimension))
                .collect();
            prop_assert_eq!(tiers.iter().filter(|&&t| t == 8).count(), 3);
            prop_assert_eq!(tiers.iter().filter(|&&t| t == 7).count(), 1);
        }
    }
}
