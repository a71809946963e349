// src/tournament/league.rs

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::domain::config::{ConfigError, PointsConfig};
use crate::domain::team::{team_key, TeamRecord, TeamRecordDelta};
use crate::tournament::standings::StandingsAggregator;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeagueError {
    #[error("название команды пустое")]
    EmptyName,

    #[error("команда {0} уже есть в таблице")]
    DuplicateTeam(String),

    #[error("команда {0} не найдена")]
    TeamNotFound(String),
}

/// Турнирная таблица:
/// - реестр команд (имена сравниваются без учёта регистра);
/// - текущие очки за победу/ничью;
/// - применение дельт завершённых матчей.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct League {
    teams: Vec<TeamRecord>,
    points: PointsConfig,
}

impl League {
    pub fn new(points: PointsConfig) -> Self {
        Self {
            teams: Vec::new(),
            points,
        }
    }

    pub fn points(&self) -> PointsConfig {
        self.points
    }

    /// Поменять очки. Уже начисленные очки не пересчитываются.
    pub fn set_points(&mut self, points: PointsConfig) -> Result<(), ConfigError> {
        points.validate()?;
        self.points = points;
        Ok(())
    }

    /// Агрегатор с текущими очками лиги.
    pub fn aggregator(&self) -> StandingsAggregator {
        StandingsAggregator::new(self.points)
    }

    pub fn add_team(&mut self, name: &str) -> Result<(), LeagueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::EmptyName);
        }
        if self.index_of(name).is_some() {
            return Err(LeagueError::DuplicateTeam(name.to_string()));
        }
        self.teams.push(TeamRecord::new(name));
        Ok(())
    }

    pub fn remove_team(&mut self, name: &str) -> Result<TeamRecord, LeagueError> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| LeagueError::TeamNotFound(name.to_string()))?;
        Ok(self.teams.remove(idx))
    }

    pub fn team(&self, name: &str) -> Option<&TeamRecord> {
        self.index_of(name).map(|i| &self.teams[i])
    }

    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    /// Применить дельту. Команды не из реестра пропускаются (false).
    pub fn apply_delta(&mut self, delta: &TeamRecordDelta) -> bool {
        match self.index_of(&delta.team) {
            Some(idx) => {
                self.teams[idx].apply_delta(delta);
                true
            }
            None => {
                warn!(team = %delta.team, "команды нет в таблице, дельта пропущена");
                false
            }
        }
    }

    /// Таблица: очки, потом победы, потом NRR, потом имя.
    pub fn standings(&self) -> Vec<&TeamRecord> {
        let mut rows: Vec<&TeamRecord> = self.teams.iter().collect();
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| b.won.cmp(&a.won))
                .then_with(|| {
                    b.net_run_rate()
                        .partial_cmp(&a.net_run_rate())
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.name.cmp(&b.name))
        });
        rows
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        let key = team_key(name);
        self.teams.iter().position(|t| team_key(&t.name) == key)
    }
}
