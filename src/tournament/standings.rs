use crate::domain::config::PointsConfig;
use crate::domain::match_record::{InningsSummary, MatchRecord};
use crate::domain::overs::Overs;
use crate::domain::team::{TeamRecordDelta, TeamSide, Winner};

/// Агрегатор турнирной таблицы.
///
/// Своего состояния не держит: превращает завершённый матч в пару дельт
/// (команда A, команда B). Применять их – дело хранилища.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandingsAggregator {
    points: PointsConfig,
}

impl StandingsAggregator {
    pub fn new(points: PointsConfig) -> Self {
        Self { points }
    }

    pub fn points(&self) -> PointsConfig {
        self.points
    }

    /// Дельты для обеих команд.
    ///
    /// Оверы берутся фактические, в мячах (17.4 = 17 + 4/6).
    pub fn apply(&self, record: &MatchRecord) -> (TeamRecordDelta, TeamRecordDelta) {
        // Первый иннингс мог не состояться (DNB) – считаем его нулевым.
        let empty = InningsSummary {
            runs: 0,
            wickets: 0,
            overs: Overs::ZERO,
        };
        let innings_a = record.first_innings.as_ref().unwrap_or(&empty);
        let innings_b = &record.second_innings;

        let delta_a = self.delta_for(
            &record.team_a,
            TeamSide::A,
            record.winner,
            innings_a,
            innings_b,
        );
        let delta_b = self.delta_for(
            &record.team_b,
            TeamSide::B,
            record.winner,
            innings_b,
            innings_a,
        );
        (delta_a, delta_b)
    }

    fn delta_for(
        &self,
        team: &str,
        side: TeamSide,
        winner: Winner,
        own: &InningsSummary,
        opponent: &InningsSummary,
    ) -> TeamRecordDelta {
        let mut delta = TeamRecordDelta {
            team: team.to_string(),
            played: 1,
            runs_for: own.runs,
            runs_against: opponent.runs,
            overs_faced: own.overs,
            overs_bowled: opponent.overs,
            ..TeamRecordDelta::default()
        };

        match winner.side() {
            None => {
                delta.tied = 1;
                delta.points = self.points.tie_points;
            }
            Some(w) if w == side => {
                delta.won = 1;
                delta.points = self.points.win_points;
            }
            Some(_) => {
                delta.lost = 1;
            }
        }

        delta
    }
}
