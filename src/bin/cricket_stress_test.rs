// src/bin/cricket_stress_test.rs

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cricket_engine::domain::config::MatchConfig;
use cricket_engine::domain::team::Winner;
use cricket_engine::engine::{MatchManager, MatchPhase, MatchSetup, ManagerError};
use cricket_engine::infra::{
    DeterministicRng, InMemoryStorage, RandomSource, StaticRoster, SystemRng,
};
use cricket_engine::tournament::League;

/// Стресс-тест: много случайных матчей по кругу между командами,
/// проверка инвариантов таблицы в конце.
#[derive(Parser)]
struct Opt {
    /// Сколько матчей сыграть.
    #[arg(short, long, default_value_t = 500)]
    matches: usize,
    /// Оверов на иннингс.
    #[arg(short, long, default_value_t = 20)]
    overs: u32,
    /// Базовый seed. Без него – thread_rng.
    #[arg(short, long)]
    seed: Option<u64>,
}

const TEAMS: [&str; 4] = ["Lions", "Tigers", "Eagles", "Sharks"];
const SQUAD: usize = 11;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let opt = Opt::parse();
    println!("cricket_stress_test: стартуем стресс-тест движка матчей…");

    let mut roster = StaticRoster::new();
    let mut league = League::default();
    for team in TEAMS {
        roster = roster.with_generated_team(team, SQUAD);
        if let Err(e) = league.add_team(team) {
            eprintln!("[STRESS] не удалось добавить {team}: {e}");
            return;
        }
    }

    let mut storage = InMemoryStorage::new(league);
    let mut manager = MatchManager::new();
    let config = MatchConfig::with_overs(opt.overs);
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN);

    // Статистика.
    let mut finished: u64 = 0;
    let mut ties: u64 = 0;
    let mut chases_won: u64 = 0;
    let mut total_runs: u64 = 0;
    let mut max_score: u32 = 0;
    let mut failures: u64 = 0;

    for n in 0..opt.matches {
        let team_a = TEAMS[n % TEAMS.len()];
        let team_b = TEAMS[(n + 1 + n / TEAMS.len()) % TEAMS.len()];
        if team_a == team_b {
            continue;
        }

        let outcome = match opt.seed {
            Some(seed) => {
                let mut rng = DeterministicRng::from_seed(seed.wrapping_add(n as u64));
                play_one(&mut manager, &mut storage, &roster, config, team_a, team_b, date, &mut rng)
            }
            None => play_one(&mut manager, &mut storage, &roster, config, team_a, team_b, date, &mut SystemRng),
        };

        match outcome {
            Ok(Some(stats)) => {
                finished += 1;
                total_runs += u64::from(stats.runs_a + stats.runs_b);
                max_score = max_score.max(stats.runs_a).max(stats.runs_b);
                match stats.winner {
                    Winner::Tie => ties += 1,
                    Winner::B => chases_won += 1,
                    Winner::A => {}
                }
            }
            Ok(None) => {
                failures += 1;
                eprintln!("[STRESS] матч #{n} {team_a} vs {team_b}: не завершился в лимит шагов");
            }
            Err(e) => {
                failures += 1;
                eprintln!("[STRESS] матч #{n} {team_a} vs {team_b}: ОШИБКА {e}");
            }
        }
    }

    // Инварианты таблицы: суммы "за" и "против" совпадают по всей лиге.
    let teams = storage.league().teams();
    let runs_for: u64 = teams.iter().map(|t| u64::from(t.runs_for)).sum();
    let runs_against: u64 = teams.iter().map(|t| u64::from(t.runs_against)).sum();
    let faced: u64 = teams.iter().map(|t| u64::from(t.overs_faced.balls())).sum();
    let bowled: u64 = teams.iter().map(|t| u64::from(t.overs_bowled.balls())).sum();
    let played: u64 = teams.iter().map(|t| u64::from(t.played)).sum();
    let results: u64 = teams
        .iter()
        .map(|t| u64::from(t.won + t.lost + t.tied))
        .sum();

    let mut violations = Vec::new();
    if runs_for != runs_against {
        violations.push(format!("runs_for {runs_for} != runs_against {runs_against}"));
    }
    if faced != bowled {
        violations.push(format!("overs_faced {faced} != overs_bowled {bowled} (мячей)"));
    }
    if played != finished * 2 || results != played {
        violations.push(format!("played {played}, results {results}, матчей {finished}"));
    }
    if storage.history().count() as u64 != finished {
        violations.push("история не совпадает с числом матчей".to_string());
    }

    println!();
    println!("=========== STRESS TEST SUMMARY ===========");
    println!("Сыграно матчей: {finished} (ошибок: {failures})");
    if finished > 0 {
        println!("Средний счёт иннингса: {}", total_runs / (finished * 2));
        println!("Максимальный счёт: {max_score}");
        println!("Ничьих: {ties}, успешных погонь: {chases_won}");
    }
    for (pos, t) in storage.league().standings().iter().enumerate() {
        println!(
            "{:>2}. {:<8} P{:<4} W{:<4} L{:<4} T{:<3} Pts {:<5} NRR {:+.3}",
            pos + 1,
            t.name,
            t.played,
            t.won,
            t.lost,
            t.tied,
            t.points,
            t.net_run_rate()
        );
    }
    if violations.is_empty() {
        println!("Инварианты таблицы: OK");
    } else {
        for v in &violations {
            eprintln!("[STRESS] НАРУШЕНИЕ: {v}");
        }
    }
    println!("===========================================");
    println!("cricket_stress_test: завершено.");

    if !violations.is_empty() || failures > 0 {
        std::process::exit(1);
    }
}

/// Итог одного матча для статистики.
struct MatchStats {
    runs_a: u32,
    runs_b: u32,
    winner: Winner,
}

/// Один матч: старт, автоигра, сохранение в хранилище.
#[allow(clippy::too_many_arguments)]
fn play_one<R: RandomSource>(
    manager: &mut MatchManager,
    storage: &mut InMemoryStorage,
    roster: &StaticRoster,
    config: MatchConfig,
    team_a: &str,
    team_b: &str,
    date: NaiveDate,
    rng: &mut R,
) -> Result<Option<MatchStats>, ManagerError> {
    let id = manager.create_match(config);
    let setup = MatchSetup {
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        striker: format!("{team_a} 1"),
        non_striker: format!("{team_a} 2"),
        bowler: format!("{team_b} {SQUAD}"),
    };
    manager.start_match(id, setup, roster)?;

    let result = match manager.autoplay(id, rng)? {
        Some(r) => r,
        None => {
            manager.abandon(id)?;
            return Ok(None);
        }
    };

    let phase = manager.engine(id).map(|e| e.phase);
    if phase != Some(MatchPhase::Finished) {
        manager.abandon(id)?;
        return Ok(None);
    }

    let points = storage.league().points();
    let bundle = manager.save_match(id, date, points, storage)?;
    let runs_a = bundle.record.first_innings.as_ref().map_or(0, |s| s.runs);

    Ok(Some(MatchStats {
        runs_a,
        runs_b: bundle.record.second_innings.runs,
        winner: result.winner,
    }))
}
