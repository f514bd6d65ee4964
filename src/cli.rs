use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::data::character::StatDimension;
use crate::data::loader::load_roster;
use crate::data::roster::Roster;
use crate::data::validate::{validate_roster, ValidationSeverity};
use crate::error::{Error, PresentError};
use crate::present::html::{write_html, HtmlOptions};
use crate::present::text::{render_text_table, write_text_table};
use crate::present::viewer::open_in_viewer;
use crate::present::{render_json, OutputFormat};
use crate::teams::composition::TierComposition;
use crate::teams::ranking::{sort_teams, TeamOrder};
use crate::teams::{enumerate_teams, TeamResult, TeamRules};

#[derive(Debug, Parser)]
#[command(
    name = "overpower",
    version,
    about = "Build every legal OverPower team from a character roster"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enumerate teams for one stat.
    Teams(TeamsArgs),
    /// Check roster files and report problems.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct TeamsArgs {
    /// Roster files (.csv, .xlsx, .xls, .ods), merged in order.
    #[arg(required = true)]
    pub rosters: Vec<PathBuf>,
    /// Stat the tiers are read from: Energy, Fighting, Strength or Intellect.
    #[arg(short, long, default_value = "Strength")]
    pub stat: String,
    /// Tier mix such as "8:3,7+:1" (three exactly 8, one 7 or better).
    #[arg(long)]
    pub composition: Option<String>,
    /// Highest allowed sum of all four stats across the team.
    #[arg(long)]
    pub cap: Option<u32>,
    /// Allow teams where nobody can play from reserve.
    #[arg(long)]
    pub no_reserve_rule: bool,
    /// Character every team must contain (repeatable).
    #[arg(short, long = "include")]
    pub include: Vec<String>,
    /// Character removed from the pool (repeatable).
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,
    #[arg(long, default_value = "discovery")]
    pub sort: TeamOrder,
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
    /// Write output to a file (`--save=FILE`); bare `--save` uses <Stat>_teams.<ext> in the
    /// output directory.
    #[arg(long, num_args = 0..=1, require_equals = true, value_name = "FILE")]
    pub save: Option<Option<PathBuf>>,
    /// Write the HTML page without opening it.
    #[arg(long)]
    pub no_open: bool,
    /// YAML config file (falls back to $OVERPOWER_CONFIG).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(required = true)]
    pub rosters: Vec<PathBuf>,
}

/// Parse `args` (including the program name) and run. Returns the process exit code.
pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let result = match cli.command {
        Command::Teams(args) => handle_teams(&args),
        Command::Validate(args) => handle_validate(&args),
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

fn build_rules(args: &TeamsArgs, config: &AppConfig) -> Result<TeamRules, Error> {
    let composition = match &args.composition {
        Some(raw) => raw.parse::<TierComposition>()?,
        None => config.composition.clone(),
    };
    let rules = TeamRules::from_parts(
        &args.stat,
        &composition.to_string(),
        args.cap.unwrap_or(config.total_cap),
        config.require_reserve && !args.no_reserve_rule,
        &args.include,
        &args.exclude,
    )?;
    Ok(rules)
}

fn handle_teams(args: &TeamsArgs) -> Result<i32, Error> {
    let config = AppConfig::resolve(args.config.as_deref())?;
    let rules = build_rules(args, &config)?;
    let (roster, _) = load_roster(&args.rosters)?;

    let mut teams = enumerate_teams(&roster, &rules);
    sort_teams(&mut teams, args.sort);

    let default_path = || {
        config
            .output_dir
            .join(format!("{}_teams.{}", rules.dimension, args.format.extension()))
    };
    let save_path = args
        .save
        .as_ref()
        .map(|path| path.clone().unwrap_or_else(default_path));

    match args.format {
        OutputFormat::Text => match save_path {
            Some(path) => {
                let count = write_text_table(&teams, &roster, &path)?;
                println!("Exported {count} teams to '{}'.", path.display());
            }
            None => {
                println!("{}", render_text_table(&teams, &roster));
                println!("{}", found_line(teams.len()));
            }
        },
        OutputFormat::Json => {
            let payload = render_json(&teams)?;
            match save_path {
                Some(path) => {
                    write_file(&path, &payload)?;
                    println!("Exported {} teams to '{}'.", teams.len(), path.display());
                }
                None => println!("{payload}"),
            }
        }
        OutputFormat::Html => {
            let path = save_path.unwrap_or_else(default_path);
            present_html(&teams, &roster, rules.dimension, &config, &path, !args.no_open)?;
        }
    }
    Ok(0)
}

fn found_line(count: usize) -> String {
    format!("{count} team{} found", if count == 1 { "" } else { "s" })
}

fn present_html(
    teams: &[TeamResult],
    roster: &Roster,
    dimension: StatDimension,
    config: &AppConfig,
    path: &Path,
    open: bool,
) -> Result<(), Error> {
    let options = HtmlOptions {
        search_url: config.search_url.clone(),
        ..HtmlOptions::new(dimension)
    };
    let count = write_html(teams, roster, &options, path)?;
    println!("Exported {count} teams to '{}'.", path.display());
    if open {
        if let Err(err) = open_in_viewer(path) {
            eprintln!("{err}");
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), PresentError> {
    std::fs::write(path, contents).map_err(|source| PresentError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn handle_validate(args: &ValidateArgs) -> Result<i32, Error> {
    let (roster, load) = load_roster(&args.rosters)?;
    let report = validate_roster(&roster, &load);

    for diagnostic in &report.diagnostics {
        println!("{diagnostic}");
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} issue(s)",
            report.count(ValidationSeverity::Error)
        );
        return Ok(1);
    }
    println!(
        "validation passed: {} characters, {} warning(s)",
        roster.len(),
        report.count(ValidationSeverity::Warning)
    );
    Ok(0)
}
