//! Self-contained HTML page: one row per team, every member linked to a card search.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::data::character::{CharacterName, StatDimension};
use crate::data::roster::Roster;
use crate::error::PresentError;
use crate::teams::TeamResult;

/// Search link template; `{query}` is replaced by the encoded character name.
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=Marvel+OverPower+{query}";

const STYLE: &str = "body{font-family:sans-serif;margin:2em;background:#fafafa;color:#222}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:6px 8px;vertical-align:top}\
th{background:#2a3f5f;color:#fff;text-align:left}\
tr:nth-child(even){background:#eef2f7}\
td.total{text-align:right;font-weight:bold}\
.stats{color:#555;font-size:0.9em}\
.special{display:block;color:#8a3b12;font-size:0.85em}";

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub dimension: StatDimension,
    pub search_url: String,
    pub generated_at: DateTime<Utc>,
}

impl HtmlOptions {
    pub fn new(dimension: StatDimension) -> Self {
        Self {
            dimension,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            generated_at: Utc::now(),
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Query-string encoding: unreserved bytes pass through, spaces become `+`.
pub fn encode_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

pub fn search_link(template: &str, name: &CharacterName) -> String {
    template.replace("{query}", &encode_query(&name.display_name()))
}

fn member_cell(name: &CharacterName, roster: &Roster, options: &HtmlOptions) -> String {
    let display = escape_html(&name.display_name());
    let href = escape_html(&search_link(&options.search_url, name));
    let mut cell = format!("<a href=\"{href}\" target=\"_blank\" rel=\"noopener\">{display}</a>");
    if let Some(record) = roster.get(name) {
        let _ = write!(cell, " <span class=\"stats\">{}</span>", record.stats);
        if record.is_reserve_capable() {
            let _ = write!(
                cell,
                "<span class=\"special\">{}</span>",
                escape_html(&record.special)
            );
        }
    }
    cell
}

pub fn render_html(teams: &[TeamResult], roster: &Roster, options: &HtmlOptions) -> String {
    let title = format!("{} Teams", options.dimension);
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"en\">");
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, "<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(html, "<h1>{title}</h1>");
    let _ = writeln!(
        html,
        "<p class=\"count\">{} team{} found. Generated {}.</p>",
        teams.len(),
        if teams.len() == 1 { "" } else { "s" },
        options.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(html, "<table>");
    let _ = writeln!(
        html,
        "<thead><tr><th>Character 1</th><th>Character 2</th><th>Character 3</th><th>Character 4</th><th>Total</th></tr></thead>"
    );
    let _ = writeln!(html, "<tbody>");
    for team in teams {
        html.push_str("<tr>");
        for name in &team.members {
            let _ = write!(html, "<td>{}</td>", member_cell(name, roster, options));
        }
        let _ = writeln!(html, "<td class=\"total\">{}</td></tr>", team.total);
    }
    let _ = writeln!(html, "</tbody>");
    let _ = writeln!(html, "</table>");
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    html
}

pub fn write_html(
    teams: &[TeamResult],
    roster: &Roster,
    options: &HtmlOptions,
    path: &Path,
) -> Result<usize, PresentError> {
    fs::write(path, render_html(teams, roster, options)).map_err(|source| PresentError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(teams.len())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::data::character::{CharacterRecord, StatLine};

    fn options() -> HtmlOptions {
        HtmlOptions {
            dimension: StatDimension::Strength,
            search_url: "https://cards.example/search?q={query}".to_string(),
            generated_at: Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_result_renders_empty_table_and_count() {
        let html = render_html(&[], &Roster::new(), &options());
        assert!(html.contains("<title>Strength Teams</title>"));
        assert!(html.contains("0 teams found. Generated 2025-08-01 12:00 UTC."));
        assert!(html.contains("<tbody>\n</tbody>"));
    }

    #[test]
    fn members_link_out_with_stats_and_special() {
        let roster: Roster = [
            CharacterRecord::new("Mr. Fantastic", StatLine::new(6, 5, 4, 8), "t", "Stretch <far>"),
            CharacterRecord::new("Storm", StatLine::new(8, 4, 3, 6), "t", ""),
            CharacterRecord::new("Cyclops", StatLine::new(8, 5, 3, 6), "t", ""),
            CharacterRecord::new("Jean Grey", StatLine::new(8, 3, 3, 7), "t", ""),
        ]
        .into_iter()
        .collect();
        let team = TeamResult {
            members: ["storm", "cyclops", "jean grey", "mr. fantastic"].map(CharacterName::canonical),
            total: 87,
        };

        let html = render_html(&[team], &roster, &options());
        assert!(html.contains("1 team found."));
        assert!(html.contains(
            "<a href=\"https://cards.example/search?q=Jean+Grey\" target=\"_blank\" rel=\"noopener\">Jean Grey</a>"
        ));
        assert!(html.contains("q=Mr.+Fantastic"));
        assert!(html.contains("<span class=\"stats\">[6, 5, 4, 8]</span>"));
        assert!(html.contains("<span class=\"special\">Stretch &lt;far&gt;</span>"));
        assert!(html.contains("<td class=\"total\">87</td></tr>"));
    }

    #[test]
    fn query_encoding_escapes_reserved_bytes() {
        assert_eq!(encode_query("Spider-Man & Co"), "Spider-Man+%26+Co");
        assert_eq!(encode_query("Ms. Marvel/2"), "Ms.+Marvel%2F2");
    }
}
