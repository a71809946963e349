use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Амплуа игрока в составе. На выбор игроков движком не влияет.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

/// Игрок из состава команды (то, что отдаёт roster provider).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterPlayer {
    pub name: PlayerId,
    pub role: PlayerRole,
}

impl RosterPlayer {
    pub fn new(name: impl Into<PlayerId>, role: PlayerRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Статистика игрока в рамках одного матча.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerMatchStat {
    pub runs: u32,
    pub balls: u32,
    pub wickets: u32,
}

impl PlayerMatchStat {
    /// Применить дельту (может быть отрицательной при undo).
    pub fn apply_delta(&mut self, runs: i32, balls: i32, wickets: i32) {
        self.runs = self.runs.saturating_add_signed(runs);
        self.balls = self.balls.saturating_add_signed(balls);
        self.wickets = self.wickets.saturating_add_signed(wickets);
    }
}

/// Карьерная статистика игрока (сохраняется между матчами).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerCareerStat {
    pub runs: u64,
    pub balls: u64,
    pub wickets: u64,
    pub innings: u64,
}

impl PlayerCareerStat {
    /// Влить результат одного матча: сумма по полям + один иннингс.
    pub fn merge_match(&mut self, stat: &PlayerMatchStat) {
        self.runs += u64::from(stat.runs);
        self.balls += u64::from(stat.balls);
        self.wickets += u64::from(stat.wickets);
        self.innings += 1;
    }
}
