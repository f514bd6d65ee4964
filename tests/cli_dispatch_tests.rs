use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_overpower")
}

const ROSTER: &str = "\
Character,Energy,Fighting,Strength,Intellect,Threat,Special
Hulk (H),1,3,8,1,Major,
Thing,2,3,8,2,Major,
Colossus,1,3,8,2,Mid,Can be played from reserve
She-Hulk,2,3,7,2,Mid,
Storm,8,2,2,5,Mid,
Hulk (V),1,3,8,1,Major,
";

fn write_roster(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("characters.csv");
    fs::write(&path, ROSTER).expect("fixture should be written");
    path
}

#[test]
fn teams_command_prints_table_and_count() {
    let dir = TempDir::new().expect("temp dir");
    let roster = write_roster(&dir);

    let output = Command::new(bin())
        .args(["teams", roster.to_string_lossy().as_ref(), "--stat", "strength"])
        .output()
        .expect("teams should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("Character 1"));
    assert!(lines[1].starts_with("===="));
    assert!(lines[2].starts_with("Hulk [1, 3, 8, 1]"));
    assert!(lines[2].contains("Colossus [1, 3, 8, 2] (Can be played from reserve)"));
    assert!(lines[2].trim_end().ends_with("56"));
    assert_eq!(lines[3], "1 team found");
}

#[test]
fn teams_command_saves_text_file() {
    let dir = TempDir::new().expect("temp dir");
    let roster = write_roster(&dir);
    let out = dir.path().join("strength.txt");

    let output = Command::new(bin())
        .args([
            "teams",
            roster.to_string_lossy().as_ref(),
            format!("--save={}", out.display()).as_str(),
        ])
        .output()
        .expect("teams should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Exported 1 teams to"));
    let saved = fs::read_to_string(&out).expect("table should be written");
    assert_eq!(saved.lines().count(), 3);
    assert!(saved.ends_with('\n'));
}

#[test]
fn teams_command_emits_json() {
    let dir = TempDir::new().expect("temp dir");
    let roster = write_roster(&dir);

    let output = Command::new(bin())
        .args([
            "teams",
            roster.to_string_lossy().as_ref(),
            "--format",
            "json",
            "--no-reserve-rule",
            "--exclude",
            "colossus",
        ])
        .output()
        .expect("teams should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("teams should emit json");
    assert_eq!(payload.as_array().map(Vec::len), Some(0));
}

#[test]
fn teams_command_writes_html_without_opening() {
    let dir = TempDir::new().expect("temp dir");
    let roster = write_roster(&dir);
    let page = dir.path().join("teams.html");

    let output = Command::new(bin())
        .args([
            "teams",
            roster.to_string_lossy().as_ref(),
            "--format",
            "html",
            "--no-open",
            format!("--save={}", page.display()).as_str(),
        ])
        .output()
        .expect("teams should run");

    assert_eq!(output.status.code(), Some(0));
    let html = fs::read_to_string(&page).expect("page should be written");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("1 team found."));
    assert!(html.contains(">She-Hulk</a>"));
}

#[test]
fn invalid_stat_is_a_usage_error() {
    let dir = TempDir::new().expect("temp dir");
    let roster = write_roster(&dir);

    let output = Command::new(bin())
        .args(["teams", roster.to_string_lossy().as_ref(), "--stat", "speed"])
        .output()
        .expect("teams should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid stat name 'speed'"));
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_roster_aborts_without_output() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.csv");
    fs::write(
        &path,
        "Character,Energy,Fighting,Strength,Intellect,Threat,Special\nHulk,1,x,8,1,Major,\n",
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["teams", path.to_string_lossy().as_ref()])
        .output()
        .expect("teams should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("row 2: invalid Fighting value 'x'"));
}

#[test]
fn validate_command_reports_merged_duplicates() {
    let dir = TempDir::new().expect("temp dir");
    let roster = write_roster(&dir);

    let output = Command::new(bin())
        .args(["validate", roster.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[warning] character 'hulk': appears more than once"));
    assert!(stdout.contains("validation passed: 5 characters"));
}

#[test]
fn validate_command_fails_on_tiny_roster() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("tiny.csv");
    fs::write(
        &path,
        "Character,Energy,Fighting,Strength,Intellect,Threat,Special\nHulk,1,3,8,1,Major,\n",
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let roster = write_roster(&dir);
    let config = dir.path().join("overpower.yaml");
    fs::write(&config, "total_cap: 50\n").expect("config should be written");

    let output = Command::new(bin())
        .args([
            "teams",
            roster.to_string_lossy().as_ref(),
            "--config",
            config.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("teams should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0 teams found"));
}
