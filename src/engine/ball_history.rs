use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::{BallEvent, PlayerId};

/// Сколько мячей держим для undo. Хватает на любой овер с запасом на экстры.
pub const BALL_HISTORY_CAPACITY: usize = 64;

/// Применённый мяч + то, что нужно для его отката.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BallRecord {
    pub event: BallEvent,
    /// Кто стоял у калитки до мяча.
    pub striker_before: PlayerId,
    pub non_striker_before: PlayerId,
    pub bowler_before: PlayerId,
    pub legal: bool,
    /// Игрок, впервые попавший в статистику выбором после этого мяча
    /// (новый бэтсмен после калитки). При откате убирается из статистики.
    #[serde(default)]
    pub registered_player: Option<PlayerId>,
}

/// История мячей текущего овера текущего иннингса.
///
/// Это не лог матча: очищается на границе овера и иннингса,
/// нужна только для одношагового undo.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BallHistory {
    entries: VecDeque<BallRecord>,
}

impl Default for BallHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl BallHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, record: BallRecord) {
        if self.entries.len() == BALL_HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(record);
    }

    pub fn pop(&mut self) -> Option<BallRecord> {
        self.entries.pop_back()
    }

    pub fn last_mut(&mut self) -> Option<&mut BallRecord> {
        self.entries.back_mut()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
