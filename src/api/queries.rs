use serde::{Deserialize, Serialize};

use crate::domain::overs::{Overs, BALLS_PER_OVER};
use crate::domain::player::PlayerCareerStat;
use crate::domain::{MatchId, PlayerId};
use crate::engine::{MatchEngine, MatchPhase};
use crate::tournament::League;

use super::dto::{round_to, CareerDto, ChaseDto, MatchHistoryItemDto, ScoreboardDto, StandingsRowDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Табло матча.
    GetScoreboard { match_id: MatchId },

    /// Id всех матчей в менеджере.
    ListMatches,

    /// Кого можно выбрать на текущий ожидаемый выбор.
    GetPendingCandidates { match_id: MatchId },

    /// Турнирная таблица.
    GetStandings,

    /// История матчей, новые первыми.
    GetHistory,

    /// Карьера одного игрока.
    GetCareer { player: PlayerId },

    /// Все карьеры.
    ListCareers,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    Scoreboard(ScoreboardDto),
    Matches(Vec<MatchId>),
    Candidates(Vec<PlayerId>),
    Standings(Vec<StandingsRowDto>),
    History(Vec<MatchHistoryItemDto>),
    Career(Option<CareerDto>),
    Careers(Vec<CareerDto>),
}

/// Пробежки за овер. Ноль легальных мячей – ноль.
pub fn run_rate(runs: u32, legal_balls: u32) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    f64::from(runs) * f64::from(BALLS_PER_OVER) / f64::from(legal_balls)
}

/// Сформировать DTO табло по движку.
///
/// До старта и в перерыве текущего иннингса нет: счёт нулевой,
/// бьющая команда – та, что будет бить следующей.
pub fn build_scoreboard_view(match_id: MatchId, engine: &MatchEngine) -> ScoreboardDto {
    let batting = engine.batting_side();
    let tracker = engine.innings.as_ref();

    let (runs, wickets, legal_balls) = tracker
        .map(|t| (t.state.runs, t.state.wickets, t.state.legal_balls))
        .unwrap_or((0, 0, 0));
    let balls_remaining = tracker
        .map(|t| t.balls_remaining())
        .unwrap_or_else(|| engine.config.max_balls());

    let crr = run_rate(runs, legal_balls);

    let (required_run_rate, projected_score, chase) = match engine.state.target {
        Some(target) => {
            let runs_needed = target.saturating_sub(runs);
            let rrr = if balls_remaining == 0 {
                0.0
            } else {
                run_rate(runs_needed, balls_remaining)
            };
            (
                Some(round_to(rrr, 2)),
                None,
                Some(ChaseDto {
                    runs_needed,
                    balls_remaining,
                }),
            )
        }
        None => {
            let projected = (crr * f64::from(engine.config.total_overs)).round() as u32;
            (None, Some(projected), None)
        }
    };

    let pending = if engine.phase == MatchPhase::Finished {
        None
    } else {
        engine.pending.first().copied()
    };

    ScoreboardDto {
        match_id,
        phase: engine.phase,
        innings_number: engine.state.innings_number,
        batting_team: engine.team_name(batting).to_string(),
        bowling_team: engine.team_name(batting.opponent()).to_string(),
        runs,
        wickets,
        overs: Overs::from_balls(legal_balls).to_string(),
        total_overs: engine.config.total_overs,
        current_over: tracker
            .map(|t| t.state.over_history.clone())
            .unwrap_or_default(),
        striker: tracker.map(|t| t.state.striker.clone()),
        non_striker: tracker.map(|t| t.state.non_striker.clone()),
        bowler: tracker.map(|t| t.state.bowler.clone()),
        current_run_rate: round_to(crr, 2),
        required_run_rate,
        projected_score,
        target: engine.state.target,
        chase,
        first_innings: engine.state.first_innings_summary.clone(),
        pending,
        result: engine.result.as_ref().map(|r| r.text.clone()),
    }
}

/// Турнирная таблица с позициями (с единицы).
pub fn build_standings(league: &League) -> Vec<StandingsRowDto> {
    league
        .standings()
        .into_iter()
        .enumerate()
        .map(|(idx, t)| StandingsRowDto {
            position: idx as u32 + 1,
            team: t.name.clone(),
            played: t.played,
            won: t.won,
            lost: t.lost,
            tied: t.tied,
            points: t.points,
            net_run_rate: round_to(t.net_run_rate(), 3),
        })
        .collect()
}

pub fn build_career(player: &str, stat: &PlayerCareerStat) -> CareerDto {
    let strike_rate = if stat.balls == 0 {
        None
    } else {
        Some(round_to(stat.runs as f64 * 100.0 / stat.balls as f64, 2))
    };
    CareerDto {
        player: player.to_string(),
        runs: stat.runs,
        balls: stat.balls,
        wickets: stat.wickets,
        innings: stat.innings,
        strike_rate,
    }
}
