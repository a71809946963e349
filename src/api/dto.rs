use serde::{Deserialize, Serialize};

use crate::domain::match_record::{InningsSummary, MatchRecord};
use crate::domain::{MatchId, PlayerId, TeamName};
use crate::engine::{MatchPhase, PendingSelection};

/// Сколько ещё нужно догоняющей команде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChaseDto {
    pub runs_needed: u32,
    pub balls_remaining: u32,
}

/// DTO табло матча.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoreboardDto {
    pub match_id: MatchId,
    pub phase: MatchPhase,
    pub innings_number: u8,
    pub batting_team: TeamName,
    pub bowling_team: TeamName,
    pub runs: u32,
    pub wickets: u32,
    /// "O.B".
    pub overs: String,
    pub total_overs: u32,
    /// Токены текущего овера.
    pub current_over: Vec<String>,
    pub striker: Option<PlayerId>,
    pub non_striker: Option<PlayerId>,
    pub bowler: Option<PlayerId>,
    /// CRR, два знака.
    pub current_run_rate: f64,
    /// Только во втором иннингсе.
    pub required_run_rate: Option<f64>,
    /// Только в первом иннингсе.
    pub projected_score: Option<u32>,
    pub target: Option<u32>,
    pub chase: Option<ChaseDto>,
    pub first_innings: Option<InningsSummary>,
    pub pending: Option<PendingSelection>,
    pub result: Option<String>,
}

/// Строка турнирной таблицы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StandingsRowDto {
    pub position: u32,
    pub team: TeamName,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub points: u32,
    /// NRR, три знака.
    pub net_run_rate: f64,
}

/// DTO одного сыгранного матча (для истории).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchHistoryItemDto {
    pub date: String,
    pub team_a: TeamName,
    /// "145/6" или "DNB".
    pub team_a_score: String,
    pub team_b: TeamName,
    pub team_b_score: String,
    pub result: String,
}

impl From<&MatchRecord> for MatchHistoryItemDto {
    fn from(record: &MatchRecord) -> Self {
        Self {
            date: record.date.to_string(),
            team_a: record.team_a.clone(),
            team_a_score: record.first_innings_line(),
            team_b: record.team_b.clone(),
            team_b_score: record.second_innings.score_line(),
            result: record.result.clone(),
        }
    }
}

/// Карьерная статистика игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CareerDto {
    pub player: PlayerId,
    pub runs: u64,
    pub balls: u64,
    pub wickets: u64,
    pub innings: u64,
    /// runs * 100 / balls, None если мячей не было.
    pub strike_rate: Option<f64>,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Создан новый матч.
    MatchCreated { match_id: MatchId },

    /// Обновлённое табло.
    Scoreboard(ScoreboardDto),

    /// Результат undo: undone = false, если откатывать было нечего.
    UndoApplied {
        undone: bool,
        scoreboard: ScoreboardDto,
    },

    /// Матч сохранён.
    MatchSaved(MatchHistoryItemDto),

    /// Таблица после изменения реестра команд.
    Standings(Vec<StandingsRowDto>),
}

/// Округление до `digits` знаков для табло.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
