use crate::domain::config::ConfigError;
use crate::domain::{PlayerId, TeamName};
use crate::engine::match_loop::{MatchPhase, PendingSelection};

use thiserror::Error;

/// Ошибки движка матча.
///
/// Любая ошибка означает, что команда отклонена и состояние не менялось.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Неверные входные данные: {0}")]
    Validation(#[from] ValidationError),

    #[error("Недопустимо в текущем состоянии матча: {0}")]
    InvalidState(#[from] StateError),

    #[error("В составе команды {team} нет доступных игроков")]
    RosterEmpty { team: TeamName },
}

/// Ошибки валидации (выбор игроков, команды, конфиг).
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("не задано название команды")]
    EmptyTeamName,

    #[error("команда не может играть сама с собой: {0}")]
    SameTeams(TeamName),

    #[error("не выбран игрок: {0}")]
    MissingSelection(&'static str),

    #[error("стартовые игроки должны быть разными")]
    NonDistinctOpeners,

    #[error("игрок {player} не входит в состав {team}")]
    NotInRoster { player: PlayerId, team: TeamName },

    #[error("игрок {0} уже выбыл или стоит у калитки")]
    PlayerUnavailable(PlayerId),

    #[error("недопустимое количество пробежек с мяча: {0}")]
    InvalidRuns(u8),

    #[error("мяч записан не на того бэтсмена/боулера")]
    PlayerMismatch,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Команда пришла не вовремя.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("сначала нужно выбрать: {0:?}")]
    SelectionPending(PendingSelection),

    #[error("ожидалась фаза {expected}, сейчас {actual:?}")]
    WrongPhase {
        expected: &'static str,
        actual: MatchPhase,
    },

    #[error("матч уже завершён")]
    MatchFinished,

    #[error("выбор {0:?} сейчас не требуется")]
    SelectionNotRequested(PendingSelection),
}

impl EngineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, EngineError::InvalidState(_))
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Validation(ValidationError::Config(err))
    }
}
