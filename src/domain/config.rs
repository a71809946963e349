use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки конфигурации матча / очков.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("количество оверов должно быть положительным")]
    NonPositiveOvers,

    #[error("очки за ничью ({tie}) больше очков за победу ({win})")]
    TieWorthMoreThanWin { win: u32, tie: u32 },

    #[error("не удалось разобрать конфиг: {0}")]
    Json(#[from] serde_json::Error),
}

/// Сколько очков дают победа и ничья.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointsConfig {
    pub win_points: u32,
    pub tie_points: u32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            win_points: 2,
            tie_points: 1,
        }
    }
}

impl PointsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tie_points > self.win_points {
            return Err(ConfigError::TieWorthMoreThanWin {
                win: self.win_points,
                tie: self.tie_points,
            });
        }
        Ok(())
    }
}

/// Конфигурация одного матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchConfig {
    /// Оверов на иннингс.
    pub total_overs: u32,

    /// Очки в таблицу за результат.
    #[serde(default)]
    pub points: PointsConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            total_overs: 20,
            points: PointsConfig::default(),
        }
    }
}

impl MatchConfig {
    pub fn with_overs(total_overs: u32) -> Self {
        Self {
            total_overs,
            ..Self::default()
        }
    }

    /// Лимит легальных мячей на иннингс.
    pub fn max_balls(&self) -> u32 {
        self.total_overs.saturating_mul(crate::domain::overs::BALLS_PER_OVER)
    }

    /// Жёсткая валидация перед стартом матча.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_overs == 0 {
            return Err(ConfigError::NonPositiveOvers);
        }
        self.points.validate()
    }

    /// Загрузить конфиг из JSON и сразу проверить.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: MatchConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_twenty_overs_two_one_points() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.total_overs, 20);
        assert_eq!(cfg.points.win_points, 2);
        assert_eq!(cfg.points.tie_points, 1);
        assert_eq!(cfg.max_balls(), 120);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_overs_is_rejected() {
        let cfg = MatchConfig::with_overs(0);
        assert!(matches!(cfg.validate(), Err(ConfigError::NonPositiveOvers)));
    }

    #[test]
    fn json_without_points_uses_defaults() {
        let cfg = MatchConfig::from_json_str(r#"{ "total_overs": 5 }"#).unwrap();
        assert_eq!(cfg.total_overs, 5);
        assert_eq!(cfg.points, PointsConfig::default());
    }

    #[test]
    fn json_with_bad_values_fails() {
        assert!(matches!(
            MatchConfig::from_json_str(r#"{ "total_overs": 0 }"#),
            Err(ConfigError::NonPositiveOvers)
        ));
        assert!(matches!(
            MatchConfig::from_json_str("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
