//! Fixed-width text table: four left-aligned member columns and a right-aligned total.

use std::fs;
use std::path::Path;

use crate::data::character::CharacterName;
use crate::data::roster::Roster;
use crate::error::PresentError;
use crate::teams::TeamResult;

const HEADERS: [&str; 5] = ["Character 1", "Character 2", "Character 3", "Character 4", "Total"];
const COLUMN_GAP: &str = "  ";

/// `Display Name [e, f, s, i]`, followed by ` (special)` when the character has one.
pub fn member_cell(name: &CharacterName, roster: &Roster) -> String {
    let mut cell = name.display_name();
    if let Some(record) = roster.get(name) {
        cell.push(' ');
        cell.push_str(&record.stats.to_string());
        if record.is_reserve_capable() {
            cell.push_str(&format!(" ({})", record.special));
        }
    }
    cell
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i < HEADERS.len() - 1 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

/// Header, `=` separator as wide as the header line, then one line per team.
pub fn render_text_table(teams: &[TeamResult], roster: &Roster) -> String {
    let rows: Vec<Vec<String>> = teams
        .iter()
        .map(|team| {
            team.members
                .iter()
                .map(|name| member_cell(name, roster))
                .chain(std::iter::once(team.total.to_string()))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let header_line = format_line(&headers, &widths);
    let separator = "=".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(separator);
    lines.extend(rows.iter().map(|row| format_line(row, &widths)));
    lines.join("\n")
}

/// Write the table plus a trailing newline. Returns the number of teams written.
pub fn write_text_table(
    teams: &[TeamResult],
    roster: &Roster,
    path: &Path,
) -> Result<usize, PresentError> {
    let mut output = render_text_table(teams, roster);
    output.push('\n');
    fs::write(path, output).map_err(|source| PresentError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(teams.len())
}
