// src/bin/cricket_dev_cli.rs

use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cricket_engine::api::{
    handle_command, handle_query, BallCommand, Command, CommandResponse, CreateMatchCommand,
    LeagueCommand, MatchCommand, Query, QueryResponse, SaveMatchCommand, ScoreboardDto,
    SelectOpenersCommand, SelectPlayerCommand, StartMatchCommand,
};
use cricket_engine::domain::config::MatchConfig;
use cricket_engine::domain::player::{PlayerRole, RosterPlayer};
use cricket_engine::domain::team::TeamSide;
use cricket_engine::domain::{MatchId, PlayerId};
use cricket_engine::engine::{MatchManager, MatchSetup, MatchStatus, PendingSelection};
use cricket_engine::infra::{DeterministicRng, InMemoryStorage, RandomSource, SystemRng};
use cricket_engine::tournament::League;

/// Dev-CLI: один матч через API с печатью табло после каждого овера.
#[derive(Parser)]
struct Opt {
    /// Оверов на иннингс (игнорируется, если задан --config).
    #[arg(short, long, default_value_t = 2)]
    overs: u32,
    /// Seed для воспроизводимого матча.
    #[arg(short, long)]
    seed: Option<u64>,
    /// JSON с MatchConfig.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "Lions")]
    team_a: String,
    #[arg(long, default_value = "Tigers")]
    team_b: String,
    /// Размер состава каждой команды.
    #[arg(long, default_value_t = 11)]
    squad: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opt = Opt::parse();

    let config = match &opt.config {
        Some(path) => MatchConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => MatchConfig::with_overs(opt.overs),
    };

    println!("cricket_dev_cli: стартуем матч {} vs {}…", opt.team_a, opt.team_b);

    let mut manager = MatchManager::new();
    let mut storage = InMemoryStorage::new(League::new(config.points));

    // 1. Составы и таблица.
    for team in [&opt.team_a, &opt.team_b] {
        storage.set_roster(team, generated_squad(team, opt.squad));
        run(
            &mut manager,
            &mut storage,
            Command::LeagueCommand(LeagueCommand::AddTeam { name: team.clone() }),
        )?;
    }

    // 2. Матч.
    let match_id = match run(
        &mut manager,
        &mut storage,
        Command::CreateMatch(CreateMatchCommand { config }),
    )? {
        CommandResponse::MatchCreated { match_id } => match_id,
        other => return Err(format!("неожиданный ответ: {other:?}").into()),
    };

    let setup = MatchSetup {
        team_a: opt.team_a.clone(),
        team_b: opt.team_b.clone(),
        striker: format!("{} 1", opt.team_a),
        non_striker: format!("{} 2", opt.team_a),
        bowler: format!("{} {}", opt.team_b, opt.squad),
    };
    run(
        &mut manager,
        &mut storage,
        Command::MatchCommand(MatchCommand::Start(StartMatchCommand { match_id, setup })),
    )?;

    // 3. Играем.
    match opt.seed {
        Some(seed) => {
            let mut rng = DeterministicRng::from_seed(seed);
            play(&mut manager, &mut storage, match_id, &mut rng)?
        }
        None => play(&mut manager, &mut storage, match_id, &mut SystemRng)?,
    }

    // 4. Сохраняем и печатаем таблицу.
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("плохая дата")?;
    if let CommandResponse::MatchSaved(item) = run(
        &mut manager,
        &mut storage,
        Command::MatchCommand(MatchCommand::Save(SaveMatchCommand { match_id, date })),
    )? {
        println!();
        println!(
            "[CLI] Сохранено: {} {} vs {} {} – {}",
            item.team_a, item.team_a_score, item.team_b, item.team_b_score, item.result
        );
    }

    let standings =
        handle_query(&manager, &storage, Query::GetStandings).map_err(|e| format!("{e:?}"))?;
    if let QueryResponse::Standings(rows) = standings {
        println!();
        println!("================ STANDINGS =================");
        println!("{:<3} {:<12} {:>3} {:>3} {:>3} {:>3} {:>4} {:>7}", "#", "Team", "P", "W", "L", "T", "Pts", "NRR");
        for r in rows {
            println!(
                "{:<3} {:<12} {:>3} {:>3} {:>3} {:>3} {:>4} {:>+7.3}",
                r.position, r.team, r.played, r.won, r.lost, r.tied, r.points, r.net_run_rate
            );
        }
    }

    println!("[CLI] Завершение работы dev-CLI.");
    Ok(())
}

fn run(
    manager: &mut MatchManager,
    storage: &mut InMemoryStorage,
    command: Command,
) -> Result<CommandResponse, Box<dyn Error>> {
    handle_command(manager, storage, command).map_err(|e| format!("{e:?}").into())
}

/// "{team} 1" .. "{team} size": первые шесть бэтсмены.
fn generated_squad(team: &str, size: usize) -> Vec<RosterPlayer> {
    (1..=size)
        .map(|n| {
            let role = if n <= 6 { PlayerRole::Batsman } else { PlayerRole::Bowler };
            RosterPlayer::new(format!("{team} {n}"), role)
        })
        .collect()
}

/// Играть до Finished, печатая табло на границах оверов и иннингсов.
fn play<R: RandomSource>(
    manager: &mut MatchManager,
    storage: &mut InMemoryStorage,
    match_id: MatchId,
    rng: &mut R,
) -> Result<(), Box<dyn Error>> {
    const MAX_STEPS: u32 = 10_000;

    for _ in 0..MAX_STEPS {
        let status = manager
            .engine(match_id)
            .map(|e| e.status())
            .ok_or("матч пропал из менеджера")?;

        let command = match status {
            MatchStatus::Finished(result) => {
                println!();
                println!("================ RESULT: {} =================", result.text);
                return Ok(());
            }
            MatchStatus::Live => MatchCommand::Ball(BallCommand {
                match_id,
                kind: rng.next_ball(),
            }),
            MatchStatus::AwaitingSelection(PendingSelection::NewBatsman) => {
                let player = pick(rng, &candidates(manager, storage, match_id)?);
                println!("[CLI] Калитка! Новый бэтсмен: {player}");
                MatchCommand::SelectBatsman(SelectPlayerCommand { match_id, player })
            }
            MatchStatus::AwaitingSelection(PendingSelection::NextBowler) => {
                print_scoreboard(manager, storage, match_id)?;
                let player = pick(rng, &candidates(manager, storage, match_id)?);
                MatchCommand::SelectBowler(SelectPlayerCommand { match_id, player })
            }
            MatchStatus::InningsBreak { target } => {
                println!();
                println!("================ INNINGS BREAK, target {target} =================");
                let mut batters = candidates(manager, storage, match_id)?;
                let striker = batters.remove(rng.choose_index(batters.len()));
                let non_striker = batters.remove(rng.choose_index(batters.len()));
                let bowler = pick(rng, &bowling_side(manager, match_id)?);
                MatchCommand::SelectOpeners(SelectOpenersCommand {
                    match_id,
                    striker,
                    non_striker,
                    bowler,
                })
            }
            other => return Err(format!("неожиданный статус: {other:?}").into()),
        };

        run(manager, storage, Command::MatchCommand(command))?;
    }

    Err(format!("превышен лимит шагов ({MAX_STEPS})").into())
}

fn candidates(
    manager: &MatchManager,
    storage: &InMemoryStorage,
    match_id: MatchId,
) -> Result<Vec<PlayerId>, Box<dyn Error>> {
    match handle_query(manager, storage, Query::GetPendingCandidates { match_id }) {
        Ok(QueryResponse::Candidates(c)) if !c.is_empty() => Ok(c),
        Ok(other) => Err(format!("нет кандидатов: {other:?}").into()),
        Err(e) => Err(format!("{e:?}").into()),
    }
}

fn bowling_side(manager: &MatchManager, match_id: MatchId) -> Result<Vec<PlayerId>, Box<dyn Error>> {
    let engine = manager.engine(match_id).ok_or("матч не найден")?;
    let names: Vec<PlayerId> = engine
        .lineup(TeamSide::A)
        .players
        .iter()
        .map(|p| p.name.clone())
        .collect();
    if names.is_empty() {
        return Err("пустой состав боулеров".into());
    }
    Ok(names)
}

fn pick<R: RandomSource>(rng: &mut R, names: &[PlayerId]) -> PlayerId {
    names[rng.choose_index(names.len())].clone()
}

fn print_scoreboard(
    manager: &MatchManager,
    storage: &InMemoryStorage,
    match_id: MatchId,
) -> Result<(), Box<dyn Error>> {
    if let QueryResponse::Scoreboard(s) =
        handle_query(manager, storage, Query::GetScoreboard { match_id })
            .map_err(|e| format!("{e:?}"))?
    {
        debug_print_scoreboard(&s);
    }
    Ok(())
}

fn debug_print_scoreboard(s: &ScoreboardDto) {
    println!();
    println!(
        "[{}] {} {}/{} ({} / {} ov)  CRR {:.2}",
        s.innings_number, s.batting_team, s.runs, s.wickets, s.overs, s.total_overs, s.current_run_rate
    );
    if let Some(projected) = s.projected_score {
        println!("    Projected: {projected}");
    }
    if let (Some(chase), Some(rrr)) = (&s.chase, s.required_run_rate) {
        println!(
            "    Need {} runs in {} balls  RRR {:.2}",
            chase.runs_needed, chase.balls_remaining, rrr
        );
    }
    if let (Some(striker), Some(non_striker), Some(bowler)) = (&s.striker, &s.non_striker, &s.bowler) {
        println!("    {striker}* & {non_striker}  |  bowler: {bowler}");
    }
}
