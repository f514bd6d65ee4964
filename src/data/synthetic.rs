//! Deterministic rosters for the benchmark binary and the criterion bench.

use crate::data::character::{CharacterRecord, StatLine};
use crate::data::roster::Roster;

/// Roster of `size` characters with stats in 3..=8 drawn from an LCG, so roughly a
/// quarter of each stat column lands at tier 7 or 8 and a third can play from reserve.
pub fn synthetic_roster(size: usize, seed: u64) -> Roster {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as u8
    };
    (0..size)
        .map(|i| {
            let stats = std::array::from_fn(|_| 3 + next() % 6);
            let special = if next() % 3 == 0 { "reserve" } else { "" };
            CharacterRecord::new(&format!("character {i}"), StatLine(stats), "t", special)
        })
        .collect()
}
