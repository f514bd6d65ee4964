//! Required tier mix for the four team slots, e.g. `8:3,7+:1` (three exactly-8 members and
//! one member at 7 or better).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;
use crate::teams::TEAM_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierMatch {
    Exact,
    AtLeast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TierRequirement {
    pub tier: u8,
    pub mode: TierMatch,
    pub count: usize,
}

impl TierRequirement {
    pub fn exact(tier: u8, count: usize) -> Self {
        Self {
            tier,
            mode: TierMatch::Exact,
            count,
        }
    }

    pub fn at_least(tier: u8, count: usize) -> Self {
        Self {
            tier,
            mode: TierMatch::AtLeast,
            count,
        }
    }

    pub fn matches(&self, value: u8) -> bool {
        match self.mode {
            TierMatch::Exact => value == self.tier,
            TierMatch::AtLeast => value >= self.tier,
        }
    }

    /// Highest tier first; at equal tier the exact bucket is filled before the open-ended one.
    fn search_order(&self, other: &Self) -> Ordering {
        other.tier.cmp(&self.tier).then_with(|| {
            let rank = |mode: TierMatch| match mode {
                TierMatch::Exact => 0,
                TierMatch::AtLeast => 1,
            };
            rank(self.mode).cmp(&rank(other.mode))
        })
    }
}

impl fmt::Display for TierRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            TierMatch::Exact => write!(f, "{}:{}", self.tier, self.count),
            TierMatch::AtLeast => write!(f, "{}+:{}", self.tier, self.count),
        }
    }
}

/// A validated multiset of tier requirements covering exactly [TEAM_SIZE] slots, kept in
/// search order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierComposition {
    requirements: Vec<TierRequirement>,
}

impl TierComposition {
    pub fn new(requirements: Vec<TierRequirement>) -> Result<Self, ConfigError> {
        let describe = || {
            requirements
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        if let Some(empty) = requirements.iter().find(|req| req.count == 0) {
            return Err(ConfigError::InvalidComposition {
                input: describe(),
                reason: format!("tier {} has a count of zero", empty.tier),
            });
        }
        let total = requirements
            .iter()
            .try_fold(0usize, |acc, req| acc.checked_add(req.count));
        match total {
            Some(TEAM_SIZE) => {}
            Some(total) => {
                return Err(ConfigError::InvalidComposition {
                    input: describe(),
                    reason: format!("counts total {total}, expected {TEAM_SIZE}"),
                })
            }
            None => {
                return Err(ConfigError::InvalidComposition {
                    input: describe(),
                    reason: format!("counts overflow, expected a total of {TEAM_SIZE}"),
                })
            }
        }

        let mut merged: Vec<TierRequirement> = Vec::with_capacity(requirements.len());
        for req in &requirements {
            match merged
                .iter_mut()
                .find(|existing| existing.tier == req.tier && existing.mode == req.mode)
            {
                Some(existing) => existing.count += req.count,
                None => merged.push(*req),
            }
        }
        merged.sort_by(TierRequirement::search_order);
        Ok(Self {
            requirements: merged,
        })
    }

    pub fn requirements(&self) -> &[TierRequirement] {
        &self.requirements
    }

    /// True when some roster value could satisfy more than one requirement, which means the
    /// same member set can be reached along different branches.
    pub fn has_overlapping_tiers(&self) -> bool {
        self.requirements.iter().enumerate().any(|(i, a)| {
            self.requirements.iter().skip(i + 1).any(|b| {
                let (low, high) = if a.tier <= b.tier { (a, b) } else { (b, a) };
                match (low.mode, high.mode) {
                    (TierMatch::AtLeast, _) => true,
                    (TierMatch::Exact, TierMatch::AtLeast) => high.tier <= low.tier,
                    (TierMatch::Exact, TierMatch::Exact) => false,
                }
            })
        })
    }
}

impl Default for TierComposition {
    fn default() -> Self {
        Self {
            requirements: vec![TierRequirement::exact(8, 3), TierRequirement::at_least(7, 1)],
        }
    }
}

impl fmt::Display for TierComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, req) in self.requirements.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{req}")?;
        }
        Ok(())
    }
}

impl FromStr for TierComposition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ConfigError::InvalidComposition {
            input: s.to_string(),
            reason,
        };

        let mut requirements = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (tier_part, count_part) = entry
                .split_once(':')
                .or_else(|| entry.split_once('x'))
                .ok_or_else(|| invalid(format!("entry '{entry}' is not TIER:COUNT")))?;
            let tier_part = tier_part.trim();
            let (tier_text, mode) = match tier_part.strip_suffix('+') {
                Some(rest) => (rest.trim(), TierMatch::AtLeast),
                None => (tier_part, TierMatch::Exact),
            };
            let tier = tier_text
                .parse::<u8>()
                .map_err(|_| invalid(format!("tier '{tier_text}' is not a number")))?;
            let count = count_part
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid(format!("count '{}' is not a number", count_part.trim())))?;
            requirements.push(TierRequirement { tier, mode, count });
        }
        if requirements.is_empty() {
            return Err(invalid("no tier entries".to_string()));
        }

        TierComposition::new(requirements).map_err(|err| match err {
            ConfigError::InvalidComposition { reason, .. } => invalid(reason),
            other => other,
        })
    }
}

impl Serialize for TierComposition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TierComposition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
