// src/engine/match_manager.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::config::{MatchConfig, PointsConfig};
use crate::domain::{BallKind, MatchId};
use crate::engine::{EngineError, MatchEngine, MatchResult, MatchSetup, MatchStatus, RosterProvider};
use crate::infra::autoplay::play_to_completion;
use crate::infra::persistence::{MatchSaveBundle, PersistenceError, PersistenceSink};
use crate::infra::rng::RandomSource;
use crate::tournament::StandingsAggregator;

/// Ошибки уровня менеджера матчей (над движком одного матча).
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Матч {0} не найден")]
    MatchNotFound(MatchId),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Менеджер матчей:
/// - хранит независимые движки по MatchId (общего состояния между матчами нет);
/// - даёт методы поверх MatchEngine;
/// - при сохранении собирает дельты и отдаёт их в PersistenceSink.
#[derive(Debug, Default)]
pub struct MatchManager {
    matches: HashMap<MatchId, MatchEngine>,
    next_match_id: MatchId,
}

impl MatchManager {
    pub fn new() -> Self {
        Self {
            matches: HashMap::new(),
            // id начинаем с 1.
            next_match_id: 1,
        }
    }

    /// Создать матч в фазе SettingUp.
    pub fn create_match(&mut self, config: MatchConfig) -> MatchId {
        let id = self.next_match_id.max(1);
        self.next_match_id = id + 1;
        self.matches.insert(id, MatchEngine::new(config));
        id
    }

    /// Вернуть ранее сохранённый движок (например, из снапшота).
    pub fn insert_match(&mut self, id: MatchId, engine: MatchEngine) {
        self.next_match_id = self.next_match_id.max(id + 1);
        self.matches.insert(id, engine);
    }

    pub fn has_match(&self, id: MatchId) -> bool {
        self.matches.contains_key(&id)
    }

    pub fn engine(&self, id: MatchId) -> Option<&MatchEngine> {
        self.matches.get(&id)
    }

    pub fn match_ids(&self) -> Vec<MatchId> {
        let mut ids: Vec<MatchId> = self.matches.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn start_match<P: RosterProvider + ?Sized>(
        &mut self,
        id: MatchId,
        setup: MatchSetup,
        roster: &P,
    ) -> Result<MatchStatus, ManagerError> {
        Ok(self.engine_mut(id)?.start(setup, roster)?)
    }

    pub fn apply_ball(&mut self, id: MatchId, kind: BallKind) -> Result<MatchStatus, ManagerError> {
        let engine = self.engine_mut(id)?;
        engine.apply_ball(kind).map_err(|e| {
            warn!(match_id = id, error = %e, "мяч отклонён");
            ManagerError::Engine(e)
        })
    }

    pub fn undo(&mut self, id: MatchId) -> Result<bool, ManagerError> {
        Ok(self.engine_mut(id)?.undo()?)
    }

    pub fn select_batsman(&mut self, id: MatchId, player: &str) -> Result<MatchStatus, ManagerError> {
        Ok(self.engine_mut(id)?.select_batsman(player)?)
    }

    pub fn select_bowler(&mut self, id: MatchId, player: &str) -> Result<MatchStatus, ManagerError> {
        Ok(self.engine_mut(id)?.select_bowler(player)?)
    }

    pub fn select_openers(
        &mut self,
        id: MatchId,
        striker: &str,
        non_striker: &str,
        bowler: &str,
    ) -> Result<MatchStatus, ManagerError> {
        Ok(self
            .engine_mut(id)?
            .select_openers(striker, non_striker, bowler)?)
    }

    /// Доиграть матч случайными мячами. None – не уложились в лимит шагов.
    pub fn autoplay<R: RandomSource>(
        &mut self,
        id: MatchId,
        rng: &mut R,
    ) -> Result<Option<MatchResult>, ManagerError> {
        Ok(play_to_completion(self.engine_mut(id)?, rng)?)
    }

    /// Бросить матч до конца. Никакой очистки, движок просто выкидывается.
    pub fn abandon(&mut self, id: MatchId) -> Result<MatchEngine, ManagerError> {
        let engine = self
            .matches
            .remove(&id)
            .ok_or(ManagerError::MatchNotFound(id))?;
        info!(match_id = id, phase = ?engine.phase, "матч брошен");
        Ok(engine)
    }

    /// Собрать всё, что нужно сохранить по завершённому матчу.
    pub fn build_save_bundle(
        &self,
        id: MatchId,
        date: NaiveDate,
        points: PointsConfig,
    ) -> Result<MatchSaveBundle, ManagerError> {
        let engine = self
            .matches
            .get(&id)
            .ok_or(ManagerError::MatchNotFound(id))?;

        let record = engine.match_record(date)?;
        let team_deltas = StandingsAggregator::new(points).apply(&record);

        Ok(MatchSaveBundle {
            match_id: id,
            player_stats: engine.stats.finalize(),
            team_deltas,
            record,
        })
    }

    /// Сохранить завершённый матч и убрать его из менеджера.
    ///
    /// Если sink отказал, матч остаётся в менеджере.
    pub fn save_match<S: PersistenceSink + ?Sized>(
        &mut self,
        id: MatchId,
        date: NaiveDate,
        points: PointsConfig,
        sink: &mut S,
    ) -> Result<MatchSaveBundle, ManagerError> {
        let bundle = self.build_save_bundle(id, date, points)?;
        sink.commit(bundle.clone())?;
        self.matches.remove(&id);
        info!(match_id = id, result = %bundle.record.result, "матч сохранён");
        Ok(bundle)
    }

    fn engine_mut(&mut self, id: MatchId) -> Result<&mut MatchEngine, ManagerError> {
        self.matches
            .get_mut(&id)
            .ok_or(ManagerError::MatchNotFound(id))
    }
}
