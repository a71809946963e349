use serde::{Deserialize, Serialize};

use crate::domain::config::ConfigError;
use crate::domain::MatchId;
use crate::engine::{EngineError, ManagerError};
use crate::infra::persistence::PersistenceError;
use crate::tournament::LeagueError;

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (битый JSON, плохой конфиг).
    BadRequest(String),

    /// Матч не найден.
    MatchNotFound(MatchId),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),

    /// Ошибка движка (валидация мяча, выбора игроков).
    EngineError(String),

    /// Ошибка таблицы или хранилища.
    Storage(String),

    /// Внутренняя ошибка.
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        if err.is_invalid_state() {
            ApiError::InvalidCommand(err.to_string())
        } else {
            ApiError::EngineError(err.to_string())
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::MatchNotFound(id) => ApiError::MatchNotFound(id),
            ManagerError::Engine(e) => e.into(),
            ManagerError::Persistence(e) => e.into(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl From<LeagueError> for ApiError {
    fn from(err: LeagueError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
