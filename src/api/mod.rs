//! Внешний API движка матчей.
//!
//! Здесь описываются:
//! - команды (commands.rs) – всё, что меняет состояние (создать матч, мяч, выбор игрока, сохранение);
//! - запросы (queries.rs) – только чтение;
//! - DTO (dto.rs) – удобные структуры для фронта (табло, таблица, история);
//! - ошибки (errors.rs) – то, что видит клиент;
//! - диспетчер (handler.rs) – связывает команды с MatchManager и хранилищем.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod handler;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use handler::*;
pub use queries::*;
