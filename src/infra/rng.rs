use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{BallKind, ExtraKind};

/// Источник случайных мячей и выборов для стресс-тестов и автоигры.
///
/// Движок сам RNG не использует: он детерминирован.
pub trait RandomSource {
    /// Случайный исход мяча.
    fn next_ball(&mut self) -> BallKind;

    /// Случайный индекс в [0, len). len > 0.
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Распределение исходов, примерно как в T20.
fn weighted_ball<R: Rng + ?Sized>(rng: &mut R) -> BallKind {
    match rng.gen_range(0..100u32) {
        0..=29 => BallKind::Run(0),
        30..=64 => BallKind::Run(1),
        65..=74 => BallKind::Run(2),
        75..=76 => BallKind::Run(3),
        77..=86 => BallKind::Run(4),
        87 => BallKind::Run(5),
        88..=92 => BallKind::Run(6),
        93..=96 => BallKind::Wicket,
        97..=98 => BallKind::Extra(ExtraKind::Wide),
        _ => BallKind::Extra(ExtraKind::NoBall),
    }
}

#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn next_ball(&mut self) -> BallKind {
        weighted_ball(&mut rand::thread_rng())
    }

    fn choose_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed – одинаковый матч.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn next_ball(&mut self) -> BallKind {
        weighted_ball(&mut self.inner)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}
