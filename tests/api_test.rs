// tests/api_test.rs
//
// Внешний API: команды и запросы поверх MatchManager + InMemoryStorage.
//
//  1) Полный матч через команды: табло, сохранение, таблица, история, карьера
//  2) Табло: CRR, прогноз, RRR, "нужно N с M мячей"
//  3) Ошибки: матч не найден, неверное состояние, валидация, плохой конфиг
//  4) Undo через API
//  5) Resume из снапшота
//  6) Команды лиги

use chrono::NaiveDate;

use cricket_engine::api::{
    handle_command, handle_query, AbandonMatchCommand, ApiError, BallCommand, Command,
    CommandResponse, CreateMatchCommand, LeagueCommand, MatchCommand, Query, QueryResponse,
    ResumeMatchCommand, SaveMatchCommand, ScoreboardDto, SelectOpenersCommand,
    SelectPlayerCommand, StartMatchCommand, UndoCommand,
};
use cricket_engine::domain::config::{MatchConfig, PointsConfig};
use cricket_engine::domain::player::{PlayerRole, RosterPlayer};
use cricket_engine::domain::{BallKind, MatchId};
use cricket_engine::engine::{MatchManager, MatchPhase, MatchSetup, MatchStatus, PendingSelection};
use cricket_engine::infra::InMemoryStorage;
use cricket_engine::tournament::League;

// -----------------------------
// ВСПОМОГАТЕЛЬНЫЕ КОНСТРУКТОРЫ
// -----------------------------

fn squad(team: &str) -> Vec<RosterPlayer> {
    (1..=11)
        .map(|n| RosterPlayer::new(format!("{team} {n}"), PlayerRole::AllRounder))
        .collect()
}

fn world() -> (MatchManager, InMemoryStorage) {
    let mut storage = InMemoryStorage::new(League::default());
    storage.set_roster("Hawks", squad("Hawks"));
    storage.set_roster("Owls", squad("Owls"));
    let mut manager = MatchManager::new();
    for name in ["Hawks", "Owls"] {
        handle_command(
            &mut manager,
            &mut storage,
            Command::LeagueCommand(LeagueCommand::AddTeam {
                name: name.to_string(),
            }),
        )
        .unwrap();
    }
    (manager, storage)
}

fn create_and_start(manager: &mut MatchManager, storage: &mut InMemoryStorage, overs: u32) -> MatchId {
    let match_id = match handle_command(
        manager,
        storage,
        Command::CreateMatch(CreateMatchCommand {
            config: MatchConfig::with_overs(overs),
        }),
    )
    .unwrap()
    {
        CommandResponse::MatchCreated { match_id } => match_id,
        other => panic!("ожидали MatchCreated, получили {other:?}"),
    };

    let setup = MatchSetup {
        team_a: "Hawks".to_string(),
        team_b: "Owls".to_string(),
        striker: "Hawks 1".to_string(),
        non_striker: "Hawks 2".to_string(),
        bowler: "Owls 11".to_string(),
    };
    match_cmd(
        manager,
        storage,
        MatchCommand::Start(StartMatchCommand { match_id, setup }),
    )
    .unwrap();
    match_id
}

fn match_cmd(
    manager: &mut MatchManager,
    storage: &mut InMemoryStorage,
    cmd: MatchCommand,
) -> Result<CommandResponse, ApiError> {
    handle_command(manager, storage, Command::MatchCommand(cmd))
}

fn scoreboard_of(resp: CommandResponse) -> ScoreboardDto {
    match resp {
        CommandResponse::Scoreboard(s) => s,
        other => panic!("ожидали Scoreboard, получили {other:?}"),
    }
}

/// Мяч через API + выбор первого кандидата на все ожидания.
fn ball(
    manager: &mut MatchManager,
    storage: &mut InMemoryStorage,
    match_id: MatchId,
    kind: BallKind,
) -> ScoreboardDto {
    let board = scoreboard_of(
        match_cmd(manager, storage, MatchCommand::Ball(BallCommand { match_id, kind })).unwrap(),
    );

    while let Some(MatchStatus::AwaitingSelection(p)) =
        manager.engine(match_id).map(|e| e.status())
    {
        let player = match handle_query(manager, storage, Query::GetPendingCandidates { match_id })
            .unwrap()
        {
            QueryResponse::Candidates(c) => c[0].clone(),
            other => panic!("ожидали Candidates, получили {other:?}"),
        };
        let cmd = SelectPlayerCommand { match_id, player };
        let cmd = match p {
            PendingSelection::NewBatsman => MatchCommand::SelectBatsman(cmd),
            PendingSelection::NextBowler => MatchCommand::SelectBowler(cmd),
            PendingSelection::OpeningPair => unreachable!(),
        };
        match_cmd(manager, storage, cmd).unwrap();
    }
    board
}

fn openers(manager: &mut MatchManager, storage: &mut InMemoryStorage, match_id: MatchId) -> ScoreboardDto {
    scoreboard_of(
        match_cmd(
            manager,
            storage,
            MatchCommand::SelectOpeners(SelectOpenersCommand {
                match_id,
                striker: "Owls 1".to_string(),
                non_striker: "Owls 2".to_string(),
                bowler: "Hawks 11".to_string(),
            }),
        )
        .unwrap(),
    )
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

// -----------------------------
// 1. ПОЛНЫЙ МАТЧ
// -----------------------------

#[test]
fn full_match_through_api_updates_standings_history_and_careers() {
    let (mut manager, mut storage) = world();
    let id = create_and_start(&mut manager, &mut storage, 2);

    for _ in 0..6 {
        ball(&mut manager, &mut storage, id, BallKind::Run(4));
    }
    for _ in 0..6 {
        ball(&mut manager, &mut storage, id, BallKind::Run(0));
    }
    let board = openers(&mut manager, &mut storage, id);
    assert_eq!(board.target, Some(25));
    assert_eq!(board.batting_team, "Owls");

    for _ in 0..3 {
        ball(&mut manager, &mut storage, id, BallKind::Wicket);
    }
    for _ in 0..6 {
        ball(&mut manager, &mut storage, id, BallKind::Run(4));
    }
    let board = ball(&mut manager, &mut storage, id, BallKind::Run(1));
    assert_eq!(board.phase, MatchPhase::Finished);
    assert_eq!(board.result.as_deref(), Some("Owls Won by 7 wickets!"));
    assert_eq!(board.pending, None);

    let saved = match_cmd(
        &mut manager,
        &mut storage,
        MatchCommand::Save(SaveMatchCommand { match_id: id, date: date() }),
    )
    .unwrap();
    match saved {
        CommandResponse::MatchSaved(item) => {
            assert_eq!(item.team_a_score, "24/0");
            assert_eq!(item.team_b_score, "25/3");
            assert_eq!(item.date, "2024-06-15");
        }
        other => panic!("ожидали MatchSaved, получили {other:?}"),
    }
    assert!(!manager.has_match(id));

    let rows = match handle_query(&manager, &storage, Query::GetStandings).unwrap() {
        QueryResponse::Standings(rows) => rows,
        other => panic!("{other:?}"),
    };
    assert_eq!(rows[0].team, "Owls");
    assert_eq!((rows[0].position, rows[0].won, rows[0].points), (1, 1, 2));
    assert_eq!((rows[1].position, rows[1].lost, rows[1].points), (2, 1, 0));
    assert!(rows[0].net_run_rate > 0.0);
    assert!(rows[1].net_run_rate < 0.0);

    match handle_query(&manager, &storage, Query::GetHistory).unwrap() {
        QueryResponse::History(items) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].result, "Owls Won by 7 wickets!");
        }
        other => panic!("{other:?}"),
    }

    match handle_query(
        &manager,
        &storage,
        Query::GetCareer {
            player: "Hawks 1".to_string(),
        },
    )
    .unwrap()
    {
        QueryResponse::Career(Some(c)) => {
            assert_eq!(c.innings, 1);
            assert!(c.balls > 0);
        }
        other => panic!("{other:?}"),
    }

    // Боулер первого овера второго иннингса взял три калитки.
    match handle_query(
        &manager,
        &storage,
        Query::GetCareer {
            player: "Hawks 11".to_string(),
        },
    )
    .unwrap()
    {
        QueryResponse::Career(Some(c)) => assert_eq!(c.wickets, 3),
        other => panic!("{other:?}"),
    }
}

// -----------------------------
// 2. ТАБЛО
// -----------------------------

#[test]
fn scoreboard_rates_in_first_innings() {
    let (mut manager, mut storage) = world();
    let id = create_and_start(&mut manager, &mut storage, 2);

    let board = match handle_query(&manager, &storage, Query::GetScoreboard { match_id: id }).unwrap() {
        QueryResponse::Scoreboard(s) => s,
        other => panic!("{other:?}"),
    };
    assert_eq!(board.current_run_rate, 0.0);
    assert_eq!(board.projected_score, Some(0));
    assert_eq!(board.overs, "0.0");

    for _ in 0..3 {
        ball(&mut manager, &mut storage, id, BallKind::Run(4));
    }
    let board = ball(&mut manager, &mut storage, id, BallKind::Run(1));
    // 13 с 4 мячей.
    assert_eq!(board.overs, "0.4");
    assert_eq!(board.current_run_rate, 19.5);
    assert_eq!(board.projected_score, Some(39));
    assert_eq!(board.required_run_rate, None);
    assert_eq!(board.chase, None);
    assert_eq!(
        board.current_over,
        vec!["4".to_string(), "4".to_string(), "4".to_string(), "1".to_string()]
    );
    assert_eq!(board.striker.as_deref(), Some("Hawks 2"));
    assert_eq!(board.bowler.as_deref(), Some("Owls 11"));
}

#[test]
fn scoreboard_chase_numbers() {
    let (mut manager, mut storage) = world();
    let id = create_and_start(&mut manager, &mut storage, 2);
    for _ in 0..6 {
        ball(&mut manager, &mut storage, id, BallKind::Run(4));
    }
    for _ in 0..6 {
        ball(&mut manager, &mut storage, id, BallKind::Run(0));
    }

    let board = match handle_query(&manager, &storage, Query::GetScoreboard { match_id: id }).unwrap() {
        QueryResponse::Scoreboard(s) => s,
        other => panic!("{other:?}"),
    };
    // Перерыв: счёт второго иннингса нулевой, первый виден в сводке.
    assert_eq!(board.phase, MatchPhase::InningsBreak);
    assert_eq!((board.runs, board.wickets), (0, 0));
    assert_eq!(board.first_innings.as_ref().map(|s| s.runs), Some(24));
    assert_eq!(board.striker, None);

    openers(&mut manager, &mut storage, id);
    for _ in 0..6 {
        ball(&mut manager, &mut storage, id, BallKind::Run(2));
    }

    let board = match handle_query(&manager, &storage, Query::GetScoreboard { match_id: id }).unwrap() {
        QueryResponse::Scoreboard(s) => s,
        other => panic!("{other:?}"),
    };
    let chase = board.chase.clone().unwrap();
    assert_eq!((chase.runs_needed, chase.balls_remaining), (13, 6));
    assert_eq!(board.required_run_rate, Some(13.0));
    assert_eq!(board.current_run_rate, 12.0);
    assert_eq!(board.projected_score, None);
}

// -----------------------------
// 3. ОШИБКИ
// -----------------------------

#[test]
fn api_errors_are_mapped() {
    let (mut manager, mut storage) = world();

    let err = match_cmd(
        &mut manager,
        &mut storage,
        MatchCommand::Ball(BallCommand {
            match_id: 42,
            kind: BallKind::Run(1),
        }),
    )
    .unwrap_err();
    assert_eq!(err, ApiError::MatchNotFound(42));

    let err = handle_command(
        &mut manager,
        &mut storage,
        Command::CreateMatch(CreateMatchCommand {
            config: MatchConfig::with_overs(0),
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let id = create_and_start(&mut manager, &mut storage, 2);
    ball(&mut manager, &mut storage, id, BallKind::Run(1));

    // Валидация.
    let err = match_cmd(
        &mut manager,
        &mut storage,
        MatchCommand::Ball(BallCommand {
            match_id: id,
            kind: BallKind::Run(9),
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::EngineError(_)));

    // Не то состояние.
    let err = match_cmd(
        &mut manager,
        &mut storage,
        MatchCommand::Save(SaveMatchCommand { match_id: id, date: date() }),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCommand(_)));
    assert!(manager.has_match(id));
    assert_eq!(storage.history().count(), 0);
}

// -----------------------------
// 4. UNDO
// -----------------------------

#[test]
fn undo_through_api_reports_flag() {
    let (mut manager, mut storage) = world();
    let id = create_and_start(&mut manager, &mut storage, 2);
    ball(&mut manager, &mut storage, id, BallKind::Run(6));

    match match_cmd(&mut manager, &mut storage, MatchCommand::Undo(UndoCommand { match_id: id })).unwrap() {
        CommandResponse::UndoApplied { undone, scoreboard } => {
            assert!(undone);
            assert_eq!(scoreboard.runs, 0);
        }
        other => panic!("{other:?}"),
    }
    match match_cmd(&mut manager, &mut storage, MatchCommand::Undo(UndoCommand { match_id: id })).unwrap() {
        CommandResponse::UndoApplied { undone, .. } => assert!(!undone),
        other => panic!("{other:?}"),
    }
}

// -----------------------------
// 5. RESUME / ABANDON
// -----------------------------

#[test]
fn match_can_be_resumed_from_snapshot() {
    let (mut manager, mut storage) = world();
    let id = create_and_start(&mut manager, &mut storage, 2);
    ball(&mut manager, &mut storage, id, BallKind::Run(4));
    let before = ball(&mut manager, &mut storage, id, BallKind::Run(3));

    // "Перезапуск": менеджер пустой, хранилище живо.
    let mut fresh = MatchManager::new();
    let resumed = scoreboard_of(
        match_cmd(&mut fresh, &mut storage, MatchCommand::Resume(ResumeMatchCommand { match_id: id }))
            .unwrap(),
    );
    assert_eq!(resumed, before);

    // Повторно поднять активный матч нельзя.
    let err = match_cmd(&mut fresh, &mut storage, MatchCommand::Resume(ResumeMatchCommand { match_id: id }))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCommand(_)));

    // Новые матчи не переиспользуют id.
    let next = match handle_command(
        &mut fresh,
        &mut storage,
        Command::CreateMatch(CreateMatchCommand {
            config: MatchConfig::with_overs(1),
        }),
    )
    .unwrap()
    {
        CommandResponse::MatchCreated { match_id } => match_id,
        other => panic!("{other:?}"),
    };
    assert!(next > id);
}

#[test]
fn abandoned_match_leaves_no_trace() {
    let (mut manager, mut storage) = world();
    let id = create_and_start(&mut manager, &mut storage, 2);
    ball(&mut manager, &mut storage, id, BallKind::Run(4));

    let resp = match_cmd(
        &mut manager,
        &mut storage,
        MatchCommand::Abandon(AbandonMatchCommand { match_id: id }),
    )
    .unwrap();
    assert_eq!(resp, CommandResponse::Ok);
    assert!(!manager.has_match(id));

    let err = match_cmd(&mut manager, &mut storage, MatchCommand::Resume(ResumeMatchCommand { match_id: id }))
        .unwrap_err();
    assert_eq!(err, ApiError::MatchNotFound(id));

    match handle_query(&manager, &storage, Query::GetStandings).unwrap() {
        QueryResponse::Standings(rows) => assert!(rows.iter().all(|r| r.played == 0)),
        other => panic!("{other:?}"),
    }
}

// -----------------------------
// 6. ЛИГА
// -----------------------------

#[test]
fn league_commands() {
    let (mut manager, mut storage) = world();

    let err = handle_command(
        &mut manager,
        &mut storage,
        Command::LeagueCommand(LeagueCommand::AddTeam {
            name: "hawks".to_string(),
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Storage(_)));

    let err = handle_command(
        &mut manager,
        &mut storage,
        Command::LeagueCommand(LeagueCommand::SetPoints(PointsConfig {
            win_points: 1,
            tie_points: 2,
        })),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    match handle_command(
        &mut manager,
        &mut storage,
        Command::LeagueCommand(LeagueCommand::RemoveTeam {
            name: "Owls".to_string(),
        }),
    )
    .unwrap()
    {
        CommandResponse::Standings(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].team, "Hawks");
        }
        other => panic!("{other:?}"),
    }

    let resp = handle_command(
        &mut manager,
        &mut storage,
        Command::LeagueCommand(LeagueCommand::ClearHistory),
    )
    .unwrap();
    assert_eq!(resp, CommandResponse::Ok);
}
