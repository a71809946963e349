//! Инфраструктурный слой вокруг движка матча:
//! - составы команд (roster provider);
//! - приёмник сохранений и in-memory хранилище;
//! - RNG-источники мячей для стресс-тестов;
//! - автоигра до конца матча.

pub mod autoplay;
pub mod persistence;
pub mod rng;
pub mod roster;

pub use autoplay::play_to_completion;
pub use persistence::*;
pub use rng::*;
pub use roster::StaticRoster;
