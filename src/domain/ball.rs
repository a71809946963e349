use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Максимум пробежек с одного мяча (шестёрка).
pub const MAX_RUNS_PER_BALL: u8 = 6;

/// Тип экстра-мяча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExtraKind {
    Wide,
    NoBall,
}

impl ExtraKind {
    /// Токен для отображения в текущем овере.
    pub fn token(self) -> &'static str {
        match self {
            ExtraKind::Wide => "Wd",
            ExtraKind::NoBall => "Nb",
        }
    }
}

/// Что произошло на мяче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BallKind {
    /// Пробежки с биты (0..=6).
    Run(u8),
    /// Аут. Пробежек с биты нет.
    Wicket,
    /// Экстра: +1 к счёту команды, мяч не легальный.
    Extra(ExtraKind),
}

impl BallKind {
    /// Сколько очков мяч добавляет команде.
    pub fn team_runs(self) -> u32 {
        match self {
            BallKind::Run(n) => u32::from(n),
            BallKind::Wicket => 0,
            BallKind::Extra(_) => 1,
        }
    }

    /// Легальный ли мяч (засчитывается в овер).
    pub fn is_legal(self) -> bool {
        !matches!(self, BallKind::Extra(_))
    }

    /// Меняются ли бэтсмены местами после этого мяча.
    pub fn rotates_strike(self) -> bool {
        matches!(self, BallKind::Run(n) if n % 2 == 1)
    }

    pub fn token(self) -> String {
        match self {
            BallKind::Run(n) => n.to_string(),
            BallKind::Wicket => "W".to_string(),
            BallKind::Extra(kind) => kind.token().to_string(),
        }
    }
}

/// Один мяч: исход + кто отбивал и кто подавал.
///
/// После записи не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BallEvent {
    pub kind: BallKind,
    pub striker: PlayerId,
    pub bowler: PlayerId,
}

impl BallEvent {
    pub fn new(kind: BallKind, striker: impl Into<PlayerId>, bowler: impl Into<PlayerId>) -> Self {
        Self {
            kind,
            striker: striker.into(),
            bowler: bowler.into(),
        }
    }

    pub fn is_legal(&self) -> bool {
        self.kind.is_legal()
    }
}
