use core::fmt;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Сколько легальных мячей в овере.
pub const BALLS_PER_OVER: u32 = 6;

/// Количество оверов. Храним легальные мячи, а не дробь,
/// чтобы `17.4` значило 17 оверов и 4 мяча, а не 17.4 овера.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Overs(pub u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OversParseError {
    #[error("пустая строка оверов")]
    Empty,

    #[error("некорректная запись оверов: {0}")]
    Malformed(String),

    #[error("мячей в овере не может быть {0} (максимум 5)")]
    BallsOutOfRange(u32),
}

impl Overs {
    pub const ZERO: Overs = Overs(0);

    pub fn from_balls(balls: u32) -> Self {
        Overs(balls)
    }

    pub fn from_overs(overs: u32) -> Self {
        Overs(overs.saturating_mul(BALLS_PER_OVER))
    }

    pub fn balls(self) -> u32 {
        self.0
    }

    /// Полных оверов.
    pub fn completed(self) -> u32 {
        self.0 / BALLS_PER_OVER
    }

    /// Мячей в незаконченном овере.
    pub fn remainder(self) -> u32 {
        self.0 % BALLS_PER_OVER
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Дробное значение для расчётов: 17.4 -> 17 + 4/6.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(BALLS_PER_OVER)
    }

    /// Знаменатель для run rate: ноль оверов считаем единицей.
    pub fn rate_denominator(self) -> f64 {
        if self.is_zero() {
            1.0
        } else {
            self.as_f64()
        }
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.completed(), self.remainder())
    }
}

impl FromStr for Overs {
    type Err = OversParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(OversParseError::Empty);
        }

        let (whole, part) = match s.split_once('.') {
            Some((w, p)) => (w, Some(p)),
            None => (s, None),
        };

        let overs: u32 = whole
            .parse()
            .map_err(|_| OversParseError::Malformed(s.to_string()))?;

        let balls: u32 = match part {
            None => 0,
            Some(p) if p.is_empty() => 0,
            Some(p) => p
                .parse()
                .map_err(|_| OversParseError::Malformed(s.to_string()))?,
        };

        if balls >= BALLS_PER_OVER {
            return Err(OversParseError::BallsOutOfRange(balls));
        }

        Ok(Overs(overs.saturating_mul(BALLS_PER_OVER) + balls))
    }
}

impl Add for Overs {
    type Output = Overs;

    fn add(self, rhs: Overs) -> Self::Output {
        Overs(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Overs {
    fn add_assign(&mut self, rhs: Overs) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Serialize for Overs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Overs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_is_overs_dot_balls() {
        assert_eq!(Overs(106).to_string(), "17.4");
        assert_eq!(Overs(12).to_string(), "2.0");
        assert_eq!(Overs::ZERO.to_string(), "0.0");
    }

    #[test]
    fn parse_uses_fractional_overs() {
        let o: Overs = "17.4".parse().unwrap();
        assert_eq!(o.balls(), 106);
        assert!((o.as_f64() - (17.0 + 4.0 / 6.0)).abs() < 1e-9);

        assert_eq!("20".parse::<Overs>().unwrap(), Overs::from_overs(20));
    }

    #[test]
    fn parse_rejects_six_balls_and_garbage() {
        assert_eq!(
            "3.6".parse::<Overs>(),
            Err(OversParseError::BallsOutOfRange(6))
        );
        assert!(matches!(
            "x.1".parse::<Overs>(),
            Err(OversParseError::Malformed(_))
        ));
        assert_eq!("  ".parse::<Overs>(), Err(OversParseError::Empty));
    }

    #[test]
    fn zero_overs_denominator_is_one() {
        assert_eq!(Overs::ZERO.rate_denominator(), 1.0);
        assert_eq!(Overs(9).rate_denominator(), 1.5);
    }

    #[test]
    fn serde_uses_string_notation() {
        let json = serde_json::to_string(&Overs(40)).unwrap();
        assert_eq!(json, "\"6.4\"");
        let back: Overs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Overs(40));
    }
}
