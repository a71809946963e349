// src/tournament/mod.rs

pub mod league;
pub mod standings;

pub use league::{League, LeagueError};
pub use standings::StandingsAggregator;
