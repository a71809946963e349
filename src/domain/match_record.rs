use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::overs::Overs;
use crate::domain::team::Winner;
use crate::domain::TeamName;

/// Короткая сводка иннингса: 145/6 (20.0).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InningsSummary {
    pub runs: u32,
    pub wickets: u32,
    pub overs: Overs,
}

impl InningsSummary {
    /// "145/6".
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.runs, self.wickets)
    }
}

/// Запись сыгранного матча для истории.
///
/// Форма сохраняется как есть: её читает экран истории.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub team_a: TeamName,
    pub team_b: TeamName,
    /// None = первая команда не била (в истории показывается как DNB).
    pub first_innings: Option<InningsSummary>,
    pub second_innings: InningsSummary,
    pub result: String,
    pub winner: Winner,
}

impl MatchRecord {
    pub fn first_innings_line(&self) -> String {
        self.first_innings
            .as_ref()
            .map(InningsSummary::score_line)
            .unwrap_or_else(|| "DNB".to_string())
    }
}
