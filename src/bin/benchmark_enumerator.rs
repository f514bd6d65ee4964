//! Time the team search and optionally append one line to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_enumerator
//!   cargo run --release --bin benchmark_enumerator -- --log
//!   cargo run --release --bin benchmark_enumerator -- --roster data/characters.csv
//!
//! --log  Append one row to benchmark_log.csv (date, searches_per_sec, roster_size, teams_found).

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use overpower::data::loader::load_roster;
use overpower::data::synthetic::synthetic_roster;
use overpower::{enumerate_teams_with_stats, TeamRules};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let log = args.iter().any(|a| a == "--log");
    let roster_path = args
        .iter()
        .position(|a| a == "--roster")
        .and_then(|i| args.get(i + 1));

    let roster = match roster_path {
        Some(path) => load_roster(&[path])?.0,
        None => synthetic_roster(150, 7),
    };
    let rules = TeamRules::default();

    const MIN_DURATION_MS: u128 = 2000;
    const MIN_SEARCHES: u32 = 20;

    let start = Instant::now();
    let mut searches: u32 = 0;
    let mut last = None;
    while start.elapsed().as_millis() < MIN_DURATION_MS || searches < MIN_SEARCHES {
        last = Some(enumerate_teams_with_stats(&roster, &rules));
        searches += 1;
    }
    let elapsed_secs = start.elapsed().as_secs_f64();
    let searches_per_sec = f64::from(searches) / elapsed_secs;
    let (teams, stats) = last.ok_or("no search ran")?;

    println!("Enumerator benchmark ({} characters):", roster.len());
    println!("  Searches:      {searches}");
    println!("  Duration:      {elapsed_secs:.2} s");
    println!("  Searches/s:    {searches_per_sec:.2}");
    println!("  Visited:       {}", stats.combinations_visited);
    println!("  Pruned:        {}", stats.branches_pruned);
    println!("  Teams found:   {}", teams.len());

    if log {
        let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!(
            "{},{:.4},{},{}\n",
            date,
            searches_per_sec,
            roster.len(),
            teams.len()
        );
        let path = "benchmark_log.csv";
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata().map(|m| m.len() == 0).unwrap_or(true) {
            file.write_all(b"date,searches_per_sec,roster_size,teams_found\n")?;
        }
        file.write_all(line.as_bytes())?;
        file.flush()?;
        println!("Appended to {path}");
    }
    Ok(())
}
