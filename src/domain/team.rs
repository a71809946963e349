use serde::{Deserialize, Serialize};

use crate::domain::overs::Overs;
use crate::domain::TeamName;

/// Сторона матча. Команда A всегда бьёт первой.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn opponent(self) -> TeamSide {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

/// Ключ сравнения названий команд: без пробелов по краям и без учёта регистра.
/// Один и тот же для реестра лиги, составов и проверки старта.
pub fn team_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Итог матча в терминах сторон.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Winner {
    A,
    B,
    Tie,
}

impl Winner {
    /// Сторона-победитель (None для ничьей).
    pub fn side(self) -> Option<TeamSide> {
        match self {
            Winner::A => Some(TeamSide::A),
            Winner::B => Some(TeamSide::B),
            Winner::Tie => None,
        }
    }
}

/// Строка турнирной таблицы для одной команды.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamRecord {
    pub name: TeamName,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub points: u32,
    pub runs_for: u32,
    pub runs_against: u32,
    pub overs_faced: Overs,
    pub overs_bowled: Overs,
}

impl TeamRecord {
    pub fn new(name: impl Into<TeamName>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Net run rate: runs_for/overs_faced - runs_against/overs_bowled.
    ///
    /// Ноль оверов в знаменателе считается единицей.
    pub fn net_run_rate(&self) -> f64 {
        let scored = f64::from(self.runs_for) / self.overs_faced.rate_denominator();
        let conceded = f64::from(self.runs_against) / self.overs_bowled.rate_denominator();
        scored - conceded
    }

    /// Применить дельту одного матча.
    pub fn apply_delta(&mut self, delta: &TeamRecordDelta) {
        self.played += delta.played;
        self.won += delta.won;
        self.lost += delta.lost;
        self.tied += delta.tied;
        self.points += delta.points;
        self.runs_for += delta.runs_for;
        self.runs_against += delta.runs_against;
        self.overs_faced += delta.overs_faced;
        self.overs_bowled += delta.overs_bowled;
    }
}

/// Вклад одного завершённого матча в запись команды.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamRecordDelta {
    pub team: TeamName,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub points: u32,
    pub runs_for: u32,
    pub runs_against: u32,
    pub overs_faced: Overs,
    pub overs_bowled: Overs,
}
