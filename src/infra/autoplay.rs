use crate::domain::team::TeamSide;
use crate::domain::PlayerId;
use crate::engine::{EngineError, MatchEngine, MatchResult, MatchStatus, PendingSelection};
use crate::infra::rng::RandomSource;

/// Доиграть матч случайными мячами и случайными выборами.
///
/// Матч должен быть уже стартован. None – не уложились в лимит шагов
/// (экстры теоретически бесконечны).
pub fn play_to_completion<R: RandomSource>(
    engine: &mut MatchEngine,
    rng: &mut R,
) -> Result<Option<MatchResult>, EngineError> {
    let max_steps = engine.config.max_balls() as usize * 8 + 100;

    for _ in 0..max_steps {
        match engine.status() {
            MatchStatus::Finished(result) => return Ok(Some(result)),
            MatchStatus::Live => {
                engine.apply_ball(rng.next_ball())?;
            }
            MatchStatus::AwaitingSelection(PendingSelection::NewBatsman) => {
                let candidates = engine.pending_candidates()?;
                let pick = pick(rng, &candidates);
                engine.select_batsman(&pick)?;
            }
            MatchStatus::AwaitingSelection(PendingSelection::NextBowler) => {
                let candidates = engine.pending_candidates()?;
                let pick = pick(rng, &candidates);
                engine.select_bowler(&pick)?;
            }
            MatchStatus::InningsBreak { .. }
            | MatchStatus::AwaitingSelection(PendingSelection::OpeningPair) => {
                let (striker, non_striker, bowler) = pick_openers(engine, rng)?;
                engine.select_openers(&striker, &non_striker, &bowler)?;
            }
        }
    }

    Ok(match engine.status() {
        MatchStatus::Finished(result) => Some(result),
        _ => None,
    })
}

fn pick<R: RandomSource>(rng: &mut R, names: &[PlayerId]) -> PlayerId {
    names[rng.choose_index(names.len())].clone()
}

fn pick_openers<R: RandomSource>(
    engine: &MatchEngine,
    rng: &mut R,
) -> Result<(PlayerId, PlayerId, PlayerId), EngineError> {
    let mut batters = engine.pending_candidates()?;
    let striker = batters.remove(rng.choose_index(batters.len()));
    let non_striker = batters.remove(rng.choose_index(batters.len()));

    let bowling: Vec<PlayerId> = engine
        .lineup(TeamSide::A)
        .players
        .iter()
        .map(|p| p.name.clone())
        .collect();
    if bowling.is_empty() {
        return Err(EngineError::RosterEmpty {
            team: engine.team_a.clone(),
        });
    }
    let bowler = pick(rng, &bowling);

    Ok((striker, non_striker, bowler))
}
