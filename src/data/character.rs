use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// Variant markers printed on alternate versions of the same character card.
const VARIANT_SUFFIXES: [&str; 2] = ["(v)", "(h)"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatDimension {
    Energy,
    Fighting,
    Strength,
    Intellect,
}

impl StatDimension {
    /// Column order of the roster files.
    pub const ALL: [StatDimension; 4] = [
        StatDimension::Energy,
        StatDimension::Fighting,
        StatDimension::Strength,
        StatDimension::Intellect,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Energy => 0,
            Self::Fighting => 1,
            Self::Strength => 2,
            Self::Intellect => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Fighting => "Fighting",
            Self::Strength => "Strength",
            Self::Intellect => "Intellect",
        }
    }
}

impl fmt::Display for StatDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatDimension {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::InvalidDimension(s.to_string()))
    }
}

/// The four printed stats of a character card, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatLine(pub [u8; 4]);

impl StatLine {
    pub fn new(energy: u8, fighting: u8, strength: u8, intellect: u8) -> Self {
        Self([energy, fighting, strength, intellect])
    }

    pub fn get(&self, dimension: StatDimension) -> u8 {
        self.0[dimension.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|&value| u32::from(value)).sum()
    }
}

impl fmt::Display for StatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [e, fi, s, i] = self.0;
        write!(f, "[{e}, {fi}, {s}, {i}]")
    }
}

/// Canonical character key. Variant-suffixed spellings of the same character
/// ("Spider-Man (H)", "spider-man (v)") collapse onto one key; `_` reads as a space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CharacterName(String);

impl<'de> Deserialize<'de> for CharacterName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::canonical(&raw))
    }
}

impl CharacterName {
    pub fn canonical(raw: &str) -> Self {
        let mut name = raw.replace('_', " ").to_lowercase();
        loop {
            let trimmed = name.trim_end();
            let stripped = VARIANT_SUFFIXES
                .iter()
                .find_map(|suffix| trimmed.strip_suffix(suffix));
            match stripped {
                Some(rest) => name = rest.to_string(),
                None => break,
            }
        }
        Self(name.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Presentation form: every word capitalized after any non-letter boundary.
    pub fn display_name(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut previous_is_letter = false;
        for c in self.0.chars() {
            if c.is_alphabetic() {
                if previous_is_letter {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                }
                previous_is_letter = true;
            } else {
                out.push(c);
                previous_is_letter = false;
            }
        }
        out
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterName {
    fn from(raw: &str) -> Self {
        Self::canonical(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: CharacterName,
    pub stats: StatLine,
    /// Threat label as printed; carried through for display only.
    pub threat: String,
    /// Special ability text. Empty means the character cannot be played from reserve.
    pub special: String,
}

impl CharacterRecord {
    pub fn new(name: &str, stats: StatLine, threat: &str, special: &str) -> Self {
        Self {
            name: CharacterName::canonical(name),
            stats,
            threat: threat.trim().to_string(),
            special: special.trim().to_string(),
        }
    }

    pub fn is_reserve_capable(&self) -> bool {
        !self.special.trim().is_empty()
    }
}
