use serde::{Deserialize, Serialize};

use crate::domain::config::MatchConfig;
use crate::domain::player::RosterPlayer;
use crate::domain::TeamName;
use crate::engine::ball_history::BallHistory;
use crate::engine::innings::InningsTracker;
use crate::engine::match_loop::{MatchEngine, MatchPhase, MatchResult, MatchState, PendingSelection};
use crate::engine::player_stats::PlayerStatAccumulator;

/// Снэпшот MatchEngine, который можно хранить снаружи.
/// Это «замороженный» матч: всё, что нужно, чтобы восстановить MatchEngine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    pub config: MatchConfig,
    pub phase: MatchPhase,
    pub team_a: TeamName,
    pub team_b: TeamName,
    pub roster_a: Vec<RosterPlayer>,
    pub roster_b: Vec<RosterPlayer>,
    pub state: MatchState,
    pub innings: Option<InningsTracker>,
    pub history: BallHistory,
    pub stats: PlayerStatAccumulator,
    pub pending: Vec<PendingSelection>,
    pub result: Option<MatchResult>,
}

impl MatchSnapshot {
    /// Упаковать живой MatchEngine в снапшот.
    pub fn from_engine(engine: &MatchEngine) -> Self {
        Self {
            config: engine.config,
            phase: engine.phase,
            team_a: engine.team_a.clone(),
            team_b: engine.team_b.clone(),
            roster_a: engine.roster_a.clone(),
            roster_b: engine.roster_b.clone(),
            state: engine.state.clone(),
            innings: engine.innings.clone(),
            history: engine.history.clone(),
            stats: engine.stats.clone(),
            pending: engine.pending.clone(),
            result: engine.result.clone(),
        }
    }

    /// Развернуть снапшот обратно в MatchEngine (в памяти).
    pub fn into_engine(self) -> MatchEngine {
        MatchEngine {
            config: self.config,
            phase: self.phase,
            team_a: self.team_a,
            team_b: self.team_b,
            roster_a: self.roster_a,
            roster_b: self.roster_b,
            state: self.state,
            innings: self.innings,
            history: self.history,
            stats: self.stats,
            pending: self.pending,
            result: self.result,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
