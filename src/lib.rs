//! Enumerate legal four-character teams for the OverPower card game from a roster of
//! character stats, and render them as text, HTML or JSON.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod present;
pub mod teams;

pub use data::character::{CharacterName, CharacterRecord, StatDimension, StatLine};
pub use data::roster::Roster;
pub use error::{ConfigError, DataError, Error, PresentError};
pub use teams::composition::{TierComposition, TierMatch, TierRequirement};
pub use teams::{enumerate_teams, enumerate_teams_with_stats, SearchStats, TeamResult, TeamRules};
