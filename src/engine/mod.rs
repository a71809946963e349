//! Движок подсчёта матча: иннингс, переходы фаз, undo, статистика игроков.
//!
//! Высокоуровневый объект: `MatchEngine`
//! Основные операции:
//!   - `start` – стартовать матч (команды + стартовая тройка)
//!   - `apply_ball` – записать мяч
//!   - `undo` – отменить последний мяч текущего овера
//!   - `select_batsman` / `select_bowler` / `select_openers` – ответить на запрос выбора

pub mod ball_history;
pub mod errors;
pub mod innings;
pub mod match_loop;
pub mod match_manager;
pub mod player_stats;
pub mod validation;

pub use ball_history::{BallHistory, BallRecord};
pub use errors::{EngineError, StateError, ValidationError};
pub use innings::{InningsEnd, InningsOutcome, InningsState, InningsTracker};
pub use match_loop::{
    MatchEngine, MatchPhase, MatchResult, MatchSetup, MatchState, MatchStatus, PendingSelection,
    ResultMargin,
};
pub use match_manager::{ManagerError, MatchManager};
pub use player_stats::{merge_into_career, PlayerStatAccumulator};

use crate::domain::player::RosterPlayer;

/// Источник составов команд.
/// Реализации – в infra (in-memory) или у вызывающего кода.
pub trait RosterProvider {
    /// Игроки команды в порядке состава. Пустой список = команды нет.
    fn players(&self, team: &str) -> Vec<RosterPlayer>;
}
