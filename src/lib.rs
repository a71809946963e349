//! Движок крикетного счёта (ball-by-ball) и турнирная таблица.
//!
//! Слои:
//! - domain – типы предметной области (мяч, оверы, команды, записи матчей);
//! - engine – конечный автомат матча, undo, статистика игроков;
//! - tournament – таблица, очки, NRR;
//! - infra – хранилище, составы, RNG для автоигры;
//! - api – команды / запросы / DTO для внешнего кода;
//! - state – снапшот матча для хранения снаружи.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod state;
pub mod tournament;

pub use api::{handle_command, handle_query, ApiError, Command, CommandResponse, Query, QueryResponse};
pub use engine::{EngineError, MatchEngine, MatchManager};
pub use infra::InMemoryStorage;
pub use state::MatchSnapshot;
