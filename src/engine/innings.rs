use serde::{Deserialize, Serialize};

use crate::domain::match_record::InningsSummary;
use crate::domain::overs::{Overs, BALLS_PER_OVER};
use crate::domain::{BallEvent, BallKind, PlayerId};
use crate::engine::ball_history::BallRecord;

/// Сколько калиток в иннингсе.
pub const MAX_WICKETS: u32 = 10;

/// Почему иннингс закрылся.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum InningsEnd {
    /// Десятая калитка.
    AllOut,
    /// Вышли все оверы.
    OversExhausted,
    /// Догоняющая команда набрала цель.
    TargetReached,
}

/// Результат применения одного мяча к иннингсу.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum InningsOutcome {
    Continuing,
    /// Овер закончился: сменили страйк, нужен новый боулер.
    OverComplete,
    InningsComplete(InningsEnd),
}

/// Счёт одного иннингса.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InningsState {
    pub runs: u32,
    pub wickets: u32,
    pub legal_balls: u32,
    /// Токены мячей текущего овера ("1", "W", "Wd", ...).
    pub over_history: Vec<String>,
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub bowler: PlayerId,
    /// Выбывшие бэтсмены этого иннингса.
    pub dismissed: Vec<PlayerId>,
}

impl InningsState {
    pub fn new(striker: PlayerId, non_striker: PlayerId, bowler: PlayerId) -> Self {
        Self {
            runs: 0,
            wickets: 0,
            legal_balls: 0,
            over_history: Vec::new(),
            striker,
            non_striker,
            bowler,
            dismissed: Vec::new(),
        }
    }

    pub fn overs(&self) -> Overs {
        Overs::from_balls(self.legal_balls)
    }

    pub fn summary(&self) -> InningsSummary {
        InningsSummary {
            runs: self.runs,
            wickets: self.wickets,
            overs: self.overs(),
        }
    }

    /// Стоит ли игрок сейчас у калитки.
    pub fn at_crease(&self, player: &str) -> bool {
        self.striker == player || self.non_striker == player
    }

    pub fn is_dismissed(&self, player: &str) -> bool {
        self.dismissed.iter().any(|p| p == player)
    }

    fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }
}

/// Трекер иннингса: счёт + лимиты (оверы, цель).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct InningsTracker {
    pub state: InningsState,
    max_balls: u32,
    target: Option<u32>,
}

impl InningsTracker {
    pub fn new(state: InningsState, max_balls: u32, target: Option<u32>) -> Self {
        Self {
            state,
            max_balls,
            target,
        }
    }

    pub fn max_balls(&self) -> u32 {
        self.max_balls
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn balls_remaining(&self) -> u32 {
        self.max_balls.saturating_sub(self.state.legal_balls)
    }

    /// Почему иннингс закрыт (None = ещё идёт).
    pub fn closed_reason(&self) -> Option<InningsEnd> {
        let s = &self.state;
        if matches!(self.target, Some(t) if s.runs >= t) {
            Some(InningsEnd::TargetReached)
        } else if s.wickets >= MAX_WICKETS {
            Some(InningsEnd::AllOut)
        } else if s.legal_balls >= self.max_balls {
            Some(InningsEnd::OversExhausted)
        } else {
            None
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed_reason().is_some()
    }

    /// Применить один мяч.
    ///
    /// Вызывающий гарантирует, что иннингс ещё открыт.
    pub fn apply(&mut self, event: &BallEvent) -> InningsOutcome {
        let s = &mut self.state;

        match event.kind {
            BallKind::Run(n) => {
                s.runs += u32::from(n);
                s.legal_balls += 1;
                if event.kind.rotates_strike() {
                    s.swap_strike();
                }
            }
            BallKind::Wicket => {
                s.wickets += 1;
                s.legal_balls += 1;
                s.dismissed.push(s.striker.clone());
            }
            BallKind::Extra(_) => {
                s.runs += 1;
            }
        }
        s.over_history.push(event.kind.token());

        if let Some(end) = self.closed_reason() {
            return InningsOutcome::InningsComplete(end);
        }

        if event.is_legal() && self.state.legal_balls % BALLS_PER_OVER == 0 {
            self.state.swap_strike();
            self.state.over_history.clear();
            return InningsOutcome::OverComplete;
        }

        InningsOutcome::Continuing
    }

    /// Откатить последний мяч текущего овера.
    pub fn revert(&mut self, record: &BallRecord) {
        let s = &mut self.state;

        match record.event.kind {
            BallKind::Run(n) => {
                s.runs = s.runs.saturating_sub(u32::from(n));
            }
            BallKind::Wicket => {
                s.wickets = s.wickets.saturating_sub(1);
                s.dismissed.pop();
            }
            BallKind::Extra(_) => {
                s.runs = s.runs.saturating_sub(1);
            }
        }
        if record.legal {
            s.legal_balls = s.legal_balls.saturating_sub(1);
        }
        s.over_history.pop();

        s.striker = record.striker_before.clone();
        s.non_striker = record.non_striker_before.clone();
        s.bowler = record.bowler_before.clone();
    }
}
