use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::config::{MatchConfig, PointsConfig};
use crate::domain::{BallKind, MatchId, PlayerId, TeamName};
use crate::engine::MatchSetup;

/// Команда верхнего уровня.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Создать новый матч (фаза SettingUp).
    CreateMatch(CreateMatchCommand),

    /// Операция над конкретным матчем.
    MatchCommand(MatchCommand),

    /// Команды турнирной таблицы:
    /// - добавить/удалить команду;
    /// - поменять очки за победу/ничью;
    /// - очистить историю матчей.
    LeagueCommand(LeagueCommand),
}

/// Команда создания матча.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateMatchCommand {
    /// Оверы и очки. Проверяются при старте матча.
    pub config: MatchConfig,
}

/// Команды, которые относятся к существующему матчу.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum MatchCommand {
    /// Команды + стартовая тройка.
    Start(StartMatchCommand),

    /// Записать мяч.
    Ball(BallCommand),

    /// Отменить последний мяч текущего овера.
    Undo(UndoCommand),

    /// Новый бэтсмен после калитки.
    SelectBatsman(SelectPlayerCommand),

    /// Боулер на следующий овер.
    SelectBowler(SelectPlayerCommand),

    /// Стартовая тройка второго иннингса.
    SelectOpeners(SelectOpenersCommand),

    /// Сохранить завершённый матч (таблица + карьера + история).
    Save(SaveMatchCommand),

    /// Бросить матч без сохранения.
    Abandon(AbandonMatchCommand),

    /// Поднять незавершённый матч из снапшота хранилища.
    Resume(ResumeMatchCommand),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartMatchCommand {
    pub match_id: MatchId,
    pub setup: MatchSetup,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BallCommand {
    pub match_id: MatchId,
    pub kind: BallKind,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UndoCommand {
    pub match_id: MatchId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectPlayerCommand {
    pub match_id: MatchId,
    pub player: PlayerId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectOpenersCommand {
    pub match_id: MatchId,
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub bowler: PlayerId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveMatchCommand {
    pub match_id: MatchId,
    /// Дата матча для истории.
    pub date: NaiveDate,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AbandonMatchCommand {
    pub match_id: MatchId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResumeMatchCommand {
    pub match_id: MatchId,
}

/// Команды турнирной таблицы.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LeagueCommand {
    AddTeam { name: TeamName },
    RemoveTeam { name: TeamName },
    /// Новые очки действуют только на следующие матчи.
    SetPoints(PointsConfig),
    ClearHistory,
}
