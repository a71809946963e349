use crate::domain::ball::MAX_RUNS_PER_BALL;
use crate::domain::player::RosterPlayer;
use crate::domain::team::team_key;
use crate::domain::{BallKind, PlayerId};
use crate::engine::errors::{EngineError, ValidationError};
use crate::engine::innings::InningsState;

/// Состав одной команды на матч.
pub struct Lineup<'a> {
    pub team: &'a str,
    pub players: &'a [RosterPlayer],
}

impl Lineup<'_> {
    pub fn contains(&self, player: &str) -> bool {
        self.players.iter().any(|p| p.name == player)
    }

    fn require(&self, player: &str) -> Result<(), EngineError> {
        if self.players.is_empty() {
            return Err(EngineError::RosterEmpty {
                team: self.team.to_string(),
            });
        }
        if !self.contains(player) {
            return Err(ValidationError::NotInRoster {
                player: player.to_string(),
                team: self.team.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Названия команд: непустые и разные.
pub fn validate_team_names(team_a: &str, team_b: &str) -> Result<(), EngineError> {
    let (a, b) = (team_a.trim(), team_b.trim());
    if a.is_empty() || b.is_empty() {
        return Err(ValidationError::EmptyTeamName.into());
    }
    if team_key(a) == team_key(b) {
        return Err(ValidationError::SameTeams(a.to_string()).into());
    }
    Ok(())
}

/// Стартовая тройка: два бэтсмена из бьющей команды и боулер из подающей,
/// все выбраны и все разные.
pub fn validate_openers(
    striker: &str,
    non_striker: &str,
    bowler: &str,
    batting: &Lineup<'_>,
    bowling: &Lineup<'_>,
) -> Result<(), EngineError> {
    require_named(striker, "striker")?;
    require_named(non_striker, "non-striker")?;
    require_named(bowler, "bowler")?;

    if striker == non_striker || striker == bowler || non_striker == bowler {
        return Err(ValidationError::NonDistinctOpeners.into());
    }

    batting.require(striker)?;
    batting.require(non_striker)?;
    bowling.require(bowler)?;
    Ok(())
}

/// Новый бэтсмен: из состава, не выбывал и не стоит у калитки.
pub fn validate_new_batsman(
    player: &str,
    batting: &Lineup<'_>,
    innings: &InningsState,
) -> Result<(), EngineError> {
    require_named(player, "batsman")?;
    if eligible_batsmen(batting, innings)?.iter().any(|p| p == player) {
        return Ok(());
    }
    batting.require(player)?;
    Err(ValidationError::PlayerUnavailable(player.to_string()).into())
}

/// Новый боулер: любой игрок подающей команды.
pub fn validate_bowler(player: &str, bowling: &Lineup<'_>) -> Result<(), EngineError> {
    require_named(player, "bowler")?;
    bowling.require(player)
}

/// Кто ещё может выйти бить.
pub fn eligible_batsmen(
    batting: &Lineup<'_>,
    innings: &InningsState,
) -> Result<Vec<PlayerId>, EngineError> {
    let out: Vec<PlayerId> = batting
        .players
        .iter()
        .filter(|p| !innings.is_dismissed(&p.name) && !innings.at_crease(&p.name))
        .map(|p| p.name.clone())
        .collect();

    if out.is_empty() {
        return Err(EngineError::RosterEmpty {
            team: batting.team.to_string(),
        });
    }
    Ok(out)
}

/// Кого можно поставить на подачу.
pub fn eligible_bowlers(bowling: &Lineup<'_>) -> Result<Vec<PlayerId>, EngineError> {
    if bowling.players.is_empty() {
        return Err(EngineError::RosterEmpty {
            team: bowling.team.to_string(),
        });
    }
    Ok(bowling.players.iter().map(|p| p.name.clone()).collect())
}

pub fn validate_ball_kind(kind: BallKind) -> Result<(), EngineError> {
    match kind {
        BallKind::Run(n) if n > MAX_RUNS_PER_BALL => Err(ValidationError::InvalidRuns(n).into()),
        _ => Ok(()),
    }
}

fn require_named(player: &str, what: &'static str) -> Result<(), EngineError> {
    if player.trim().is_empty() {
        return Err(ValidationError::MissingSelection(what).into());
    }
    Ok(())
}
