use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::player::{PlayerCareerStat, PlayerMatchStat};
use crate::domain::{BallEvent, BallKind, PlayerId};

/// Статистика игроков за текущий матч.
///
/// Сбрасывается при старте матча, в карьеру вливается при сохранении.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStatAccumulator {
    stats: BTreeMap<PlayerId, PlayerMatchStat>,
}

impl PlayerStatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Игрок вышел к калитке или получил мяч: появляется в статистике
    /// даже с нулями. true, если игрока раньше не было.
    pub fn register(&mut self, player: &str) -> bool {
        if self.stats.contains_key(player) {
            return false;
        }
        self.stats.insert(player.to_string(), PlayerMatchStat::default());
        true
    }

    /// Убрать игрока, зарегистрированного выбором, который потом откатили.
    pub fn unregister(&mut self, player: &str) {
        self.stats.remove(player);
    }

    /// Аддитивная дельта. Отрицательные значения используются при undo.
    pub fn record(&mut self, player: &str, runs: i32, balls: i32, wickets: i32) {
        self.stats
            .entry(player.to_string())
            .or_default()
            .apply_delta(runs, balls, wickets);
    }

    /// Записать вклад мяча (sign = 1) или откатить его (sign = -1).
    pub fn record_ball(&mut self, event: &BallEvent, sign: i32) {
        match event.kind {
            BallKind::Run(n) => self.record(&event.striker, sign * i32::from(n), sign, 0),
            BallKind::Wicket => {
                self.record(&event.striker, 0, sign, 0);
                self.record(&event.bowler, 0, 0, sign);
            }
            // Экстра идёт в счёт команды, игрокам не пишется.
            BallKind::Extra(_) => {}
        }
    }

    pub fn get(&self, player: &str) -> Option<&PlayerMatchStat> {
        self.stats.get(player)
    }

    pub fn reset(&mut self) {
        self.stats.clear();
    }

    /// Полная статистика матча для слияния с карьерой.
    pub fn finalize(&self) -> BTreeMap<PlayerId, PlayerMatchStat> {
        self.stats.clone()
    }
}

/// Влить статистику матча в карьерные записи.
///
/// Игроки, которых нет в `match_stats`, не трогаются.
pub fn merge_into_career(
    career: &mut BTreeMap<PlayerId, PlayerCareerStat>,
    match_stats: &BTreeMap<PlayerId, PlayerMatchStat>,
) {
    for (player, stat) in match_stats {
        career.entry(player.clone()).or_default().merge_match(stat);
    }
}
