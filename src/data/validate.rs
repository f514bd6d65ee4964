use std::fmt;

use crate::data::character::StatDimension;
use crate::data::loader::LoadReport;
use crate::data::roster::Roster;
use crate::teams::TEAM_SIZE;

/// Highest value printed on a character card in any stat.
pub const MAX_PRINTED_STAT: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.count(ValidationSeverity::Error) > 0
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Check a loaded roster for problems that would silently shrink or empty the search.
pub fn validate_roster(roster: &Roster, load: &LoadReport) -> ValidationReport {
    let mut report = ValidationReport::default();

    if roster.len() < TEAM_SIZE {
        report.push(
            ValidationSeverity::Error,
            "roster",
            format!(
                "only {} character(s); a team needs {TEAM_SIZE}",
                roster.len()
            ),
        );
    }

    for name in &load.merged {
        report.push(
            ValidationSeverity::Warning,
            format!("character '{name}'"),
            "appears more than once; the last record was kept",
        );
    }

    for record in roster.iter() {
        let context = format!("character '{}'", record.name);
        for dimension in StatDimension::ALL {
            let value = record.stats.get(dimension);
            if value > MAX_PRINTED_STAT {
                report.push(
                    ValidationSeverity::Warning,
                    context.clone(),
                    format!("{dimension} {value} is above the printed maximum {MAX_PRINTED_STAT}"),
                );
            }
        }
        if record.threat.is_empty() {
            report.push(ValidationSeverity::Warning, context, "threat label is empty");
        }
    }

    let reserve_capable = roster.iter().filter(|record| record.is_reserve_capable()).count();
    if reserve_capable == 0 && !roster.is_empty() {
        report.push(
            ValidationSeverity::Warning,
            "roster",
            "no character has a special ability; the reserve rule rejects every team",
        );
    } else {
        report.push(
            ValidationSeverity::Info,
            "roster",
            format!("{reserve_capable} of {} characters can play from reserve", roster.len()),
        );
    }

    for dimension in StatDimension::ALL {
        let top = roster.with_tier(dimension, MAX_PRINTED_STAT).len();
        report.push(
            ValidationSeverity::Info,
            format!("{dimension}"),
            format!("{top} character(s) at tier {MAX_PRINTED_STAT}"),
        );
    }

    report
}
