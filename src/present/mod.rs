//! Rendering of enumerated teams. File writes and viewer launches live here so the search
//! itself stays free of side effects.

pub mod html;
pub mod text;
pub mod viewer;

use std::fmt;
use std::str::FromStr;

use crate::error::PresentError;
use crate::teams::TeamResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}' (expected text, html or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Json => "json",
        })
    }
}

pub fn render_json(teams: &[TeamResult]) -> Result<String, PresentError> {
    Ok(serde_json::to_string_pretty(teams)?)
}
