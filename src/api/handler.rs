//! Диспетчер команд и запросов поверх MatchManager + InMemoryStorage.

use tracing::{info, warn};

use crate::domain::MatchId;
use crate::engine::MatchManager;
use crate::infra::persistence::{InMemoryStorage, SnapshotStore};
use crate::state::MatchSnapshot;

use super::commands::{Command, LeagueCommand, MatchCommand};
use super::dto::{CommandResponse, MatchHistoryItemDto};
use super::errors::ApiError;
use super::queries::{build_career, build_scoreboard_view, build_standings, Query, QueryResponse};

/// Выполнить команду.
///
/// После каждой удачной команды над матчем его снапшот кладётся
/// в хранилище, чтобы матч можно было поднять через Resume.
pub fn handle_command(
    manager: &mut MatchManager,
    storage: &mut InMemoryStorage,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    match command {
        Command::CreateMatch(cmd) => {
            cmd.config.validate()?;
            let match_id = manager.create_match(cmd.config);
            info!(match_id, overs = cmd.config.total_overs, "матч создан");
            Ok(CommandResponse::MatchCreated { match_id })
        }
        Command::MatchCommand(cmd) => handle_match_command(manager, storage, cmd),
        Command::LeagueCommand(cmd) => handle_league_command(storage, cmd),
    }
}

fn handle_match_command(
    manager: &mut MatchManager,
    storage: &mut InMemoryStorage,
    command: MatchCommand,
) -> Result<CommandResponse, ApiError> {
    match command {
        MatchCommand::Start(cmd) => {
            manager.start_match(cmd.match_id, cmd.setup, &*storage)?;
            scoreboard(manager, storage, cmd.match_id)
        }
        MatchCommand::Ball(cmd) => {
            manager.apply_ball(cmd.match_id, cmd.kind)?;
            scoreboard(manager, storage, cmd.match_id)
        }
        MatchCommand::Undo(cmd) => {
            let undone = manager.undo(cmd.match_id)?;
            match scoreboard(manager, storage, cmd.match_id)? {
                CommandResponse::Scoreboard(scoreboard) => {
                    Ok(CommandResponse::UndoApplied { undone, scoreboard })
                }
                other => Ok(other),
            }
        }
        MatchCommand::SelectBatsman(cmd) => {
            manager.select_batsman(cmd.match_id, &cmd.player)?;
            scoreboard(manager, storage, cmd.match_id)
        }
        MatchCommand::SelectBowler(cmd) => {
            manager.select_bowler(cmd.match_id, &cmd.player)?;
            scoreboard(manager, storage, cmd.match_id)
        }
        MatchCommand::SelectOpeners(cmd) => {
            manager.select_openers(cmd.match_id, &cmd.striker, &cmd.non_striker, &cmd.bowler)?;
            scoreboard(manager, storage, cmd.match_id)
        }
        MatchCommand::Save(cmd) => {
            let points = storage.league().points();
            let bundle = manager.save_match(cmd.match_id, cmd.date, points, storage)?;
            Ok(CommandResponse::MatchSaved(MatchHistoryItemDto::from(
                &bundle.record,
            )))
        }
        MatchCommand::Abandon(cmd) => {
            manager.abandon(cmd.match_id)?;
            storage.save_active_match(cmd.match_id, None);
            Ok(CommandResponse::Ok)
        }
        MatchCommand::Resume(cmd) => {
            if manager.has_match(cmd.match_id) {
                return Err(ApiError::InvalidCommand(format!(
                    "матч {} уже активен",
                    cmd.match_id
                )));
            }
            let snapshot = storage
                .load_active_match(cmd.match_id)
                .ok_or(ApiError::MatchNotFound(cmd.match_id))?;
            manager.insert_match(cmd.match_id, snapshot.into_engine());
            info!(match_id = cmd.match_id, "матч поднят из снапшота");
            scoreboard(manager, storage, cmd.match_id)
        }
    }
}

fn handle_league_command(
    storage: &mut InMemoryStorage,
    command: LeagueCommand,
) -> Result<CommandResponse, ApiError> {
    match command {
        LeagueCommand::AddTeam { name } => {
            storage.league_mut().add_team(&name)?;
            Ok(CommandResponse::Standings(build_standings(storage.league())))
        }
        LeagueCommand::RemoveTeam { name } => {
            storage.league_mut().remove_team(&name)?;
            Ok(CommandResponse::Standings(build_standings(storage.league())))
        }
        LeagueCommand::SetPoints(points) => {
            storage.league_mut().set_points(points)?;
            info!(
                win = points.win_points,
                tie = points.tie_points,
                "очки за матч изменены"
            );
            Ok(CommandResponse::Ok)
        }
        LeagueCommand::ClearHistory => {
            storage.clear_history();
            Ok(CommandResponse::Ok)
        }
    }
}

/// Табло после команды + снапшот в хранилище.
fn scoreboard(
    manager: &MatchManager,
    storage: &mut InMemoryStorage,
    match_id: MatchId,
) -> Result<CommandResponse, ApiError> {
    let engine = manager
        .engine(match_id)
        .ok_or(ApiError::MatchNotFound(match_id))?;
    storage.save_active_match(match_id, Some(MatchSnapshot::from_engine(engine)));
    Ok(CommandResponse::Scoreboard(build_scoreboard_view(
        match_id, engine,
    )))
}

/// Выполнить запрос "только чтение".
pub fn handle_query(
    manager: &MatchManager,
    storage: &InMemoryStorage,
    query: Query,
) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetScoreboard { match_id } => {
            let engine = manager
                .engine(match_id)
                .ok_or(ApiError::MatchNotFound(match_id))?;
            Ok(QueryResponse::Scoreboard(build_scoreboard_view(
                match_id, engine,
            )))
        }
        Query::ListMatches => Ok(QueryResponse::Matches(manager.match_ids())),
        Query::GetPendingCandidates { match_id } => {
            let engine = manager
                .engine(match_id)
                .ok_or(ApiError::MatchNotFound(match_id))?;
            let candidates = engine.pending_candidates().map_err(|e| {
                warn!(match_id, error = %e, "нет кандидатов на выбор");
                ApiError::from(e)
            })?;
            Ok(QueryResponse::Candidates(candidates))
        }
        Query::GetStandings => Ok(QueryResponse::Standings(build_standings(storage.league()))),
        Query::GetHistory => Ok(QueryResponse::History(
            storage.history().map(MatchHistoryItemDto::from).collect(),
        )),
        Query::GetCareer { player } => Ok(QueryResponse::Career(
            storage.career(&player).map(|s| build_career(&player, s)),
        )),
        Query::ListCareers => Ok(QueryResponse::Careers(
            storage
                .careers()
                .iter()
                .map(|(name, s)| build_career(name, s))
                .collect(),
        )),
    }
}
