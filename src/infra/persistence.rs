use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::match_record::MatchRecord;
use crate::domain::player::{PlayerCareerStat, PlayerMatchStat, RosterPlayer};
use crate::domain::team::{team_key, TeamRecordDelta};
use crate::domain::{MatchId, PlayerId};
use crate::engine::{merge_into_career, RosterProvider};
use crate::state::MatchSnapshot;
use crate::tournament::League;

/// Всё, что нужно сохранить по одному завершённому матчу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchSaveBundle {
    pub match_id: MatchId,
    pub record: MatchRecord,
    pub player_stats: BTreeMap<PlayerId, PlayerMatchStat>,
    /// (команда A, команда B).
    pub team_deltas: (TeamRecordDelta, TeamRecordDelta),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("матч {0} уже сохранён")]
    DuplicateMatch(MatchId),
}

/// Приёмник сохранений.
///
/// Реализация обязана применять пакет атомарно и не применять один
/// матч дважды: карьерная статистика складывается.
pub trait PersistenceSink {
    fn commit(&mut self, bundle: MatchSaveBundle) -> Result<(), PersistenceError>;
}

/// Хранилище незавершённых матчей (для продолжения после перезапуска).
pub trait SnapshotStore {
    fn load_active_match(&self, id: MatchId) -> Option<MatchSnapshot>;

    /// Сохранить / очистить снапшот.
    fn save_active_match(&mut self, id: MatchId, snapshot: Option<MatchSnapshot>);
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    league: League,
    careers: BTreeMap<PlayerId, PlayerCareerStat>,
    /// Новые матчи в начале.
    history: Vec<(MatchId, MatchRecord)>,
    committed: BTreeSet<MatchId>,
    active: HashMap<MatchId, MatchSnapshot>,
    /// Ключ – имя команды в нижнем регистре.
    rosters: HashMap<String, Vec<RosterPlayer>>,
}

impl InMemoryStorage {
    pub fn new(league: League) -> Self {
        Self {
            league,
            ..Self::default()
        }
    }

    pub fn league(&self) -> &League {
        &self.league
    }

    pub fn league_mut(&mut self) -> &mut League {
        &mut self.league
    }

    pub fn careers(&self) -> &BTreeMap<PlayerId, PlayerCareerStat> {
        &self.careers
    }

    pub fn career(&self, player: &str) -> Option<&PlayerCareerStat> {
        self.careers.get(player)
    }

    /// История матчей, новые первыми.
    pub fn history(&self) -> impl Iterator<Item = &MatchRecord> {
        self.history.iter().map(|(_, r)| r)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn set_roster(&mut self, team: &str, players: Vec<RosterPlayer>) {
        self.rosters.insert(team_key(team), players);
    }
}

impl RosterProvider for InMemoryStorage {
    fn players(&self, team: &str) -> Vec<RosterPlayer> {
        self.rosters
            .get(&team_key(team))
            .cloned()
            .unwrap_or_default()
    }
}

impl PersistenceSink for InMemoryStorage {
    fn commit(&mut self, bundle: MatchSaveBundle) -> Result<(), PersistenceError> {
        // Проверки до любых изменений – пакет применяется целиком или никак.
        if !self.committed.insert(bundle.match_id) {
            return Err(PersistenceError::DuplicateMatch(bundle.match_id));
        }

        let (delta_a, delta_b) = &bundle.team_deltas;
        self.league.apply_delta(delta_a);
        self.league.apply_delta(delta_b);

        merge_into_career(&mut self.careers, &bundle.player_stats);

        self.history.insert(0, (bundle.match_id, bundle.record));
        self.active.remove(&bundle.match_id);

        info!(
            match_id = bundle.match_id,
            players = bundle.player_stats.len(),
            "матч записан в хранилище"
        );
        Ok(())
    }
}

impl SnapshotStore for InMemoryStorage {
    fn load_active_match(&self, id: MatchId) -> Option<MatchSnapshot> {
        self.active.get(&id).cloned()
    }

    fn save_active_match(&mut self, id: MatchId, snapshot: Option<MatchSnapshot>) {
        if let Some(s) = snapshot {
            self.active.insert(id, s);
        } else {
            self.active.remove(&id);
        }
    }
}
