//! Доменная модель крикета: мячи, оверы, игроки, команды, записи матчей, конфиг.

pub mod ball;
pub mod config;
pub mod match_record;
pub mod overs;
pub mod player;
pub mod team;

// Базовые идентификаторы. Игрок и команда идентифицируются по имени.
pub type PlayerId = String;
pub type TeamName = String;
pub type MatchId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::BallEvent и т.п.
pub use ball::*;
pub use config::*;
pub use match_record::*;
pub use overs::*;
pub use player::*;
pub use team::*;
