use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::config::MatchConfig;
use crate::domain::match_record::{InningsSummary, MatchRecord};
use crate::domain::player::RosterPlayer;
use crate::domain::team::{TeamSide, Winner};
use crate::domain::{BallEvent, BallKind, PlayerId, TeamName};
use crate::engine::ball_history::{BallHistory, BallRecord};
use crate::engine::errors::{EngineError, StateError, ValidationError};
use crate::engine::innings::{InningsEnd, InningsOutcome, InningsState, InningsTracker, MAX_WICKETS};
use crate::engine::player_stats::PlayerStatAccumulator;
use crate::engine::validation::{
    eligible_batsmen, eligible_bowlers, validate_ball_kind, validate_bowler, validate_new_batsman,
    validate_openers, validate_team_names, Lineup,
};
use crate::engine::RosterProvider;

/// Фаза матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchPhase {
    SettingUp,
    InningsOneLive,
    InningsBreak,
    InningsTwoLive,
    Finished,
}

impl MatchPhase {
    pub fn is_live(self) -> bool {
        matches!(self, MatchPhase::InningsOneLive | MatchPhase::InningsTwoLive)
    }
}

/// Какой выбор движок ждёт от вызывающего, прежде чем принимать мячи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PendingSelection {
    /// Упала калитка – нужен новый бэтсмен.
    NewBatsman,
    /// Закончился овер – нужен боулер.
    NextBowler,
    /// Перерыв между иннингсами – нужна стартовая тройка.
    OpeningPair,
}

/// Стартовые данные матча.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSetup {
    pub team_a: TeamName,
    pub team_b: TeamName,
    pub striker: PlayerId,
    pub non_striker: PlayerId,
    pub bowler: PlayerId,
}

/// Итог матча.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResultMargin {
    Runs(u32),
    Wickets(u32),
    Tie,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub winner: Winner,
    pub margin: ResultMargin,
    /// Текст для табло: "Team B Won by 7 wickets!".
    pub text: String,
}

/// Сводное состояние матча (то, что видит табло и история).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchState {
    pub innings_number: u8,
    /// Только во втором иннингсе: runs первого + 1.
    pub target: Option<u32>,
    pub first_innings_summary: Option<InningsSummary>,
    pub result: Option<String>,
    pub winner: Option<Winner>,
}

impl MatchState {
    fn new() -> Self {
        Self {
            innings_number: 1,
            target: None,
            first_innings_summary: None,
            result: None,
            winner: None,
        }
    }
}

/// Статус после команды (для внешнего кода).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchStatus {
    Live,
    AwaitingSelection(PendingSelection),
    InningsBreak { target: u32 },
    Finished(MatchResult),
}

/// Движок одного матча.
///
/// Владеет состоянием иннингса и матча целиком; меняется только
/// через методы ниже. I/O не делает.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchEngine {
    pub config: MatchConfig,
    pub phase: MatchPhase,
    pub team_a: TeamName,
    pub team_b: TeamName,
    pub roster_a: Vec<RosterPlayer>,
    pub roster_b: Vec<RosterPlayer>,
    pub state: MatchState,
    /// Текущий иннингс (None до старта и в перерыве).
    pub innings: Option<InningsTracker>,
    pub history: BallHistory,
    pub stats: PlayerStatAccumulator,
    /// Ожидаемые выборы в порядке разрешения.
    pub pending: Vec<PendingSelection>,
    pub result: Option<MatchResult>,
}

impl MatchEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            phase: MatchPhase::SettingUp,
            team_a: TeamName::new(),
            team_b: TeamName::new(),
            roster_a: Vec::new(),
            roster_b: Vec::new(),
            state: MatchState::new(),
            innings: None,
            history: BallHistory::new(),
            stats: PlayerStatAccumulator::new(),
            pending: Vec::new(),
            result: None,
        }
    }

    /// SettingUp -> InningsOneLive.
    ///
    /// Команда A бьёт первой. Всё проверяется до любых изменений.
    pub fn start<P: RosterProvider + ?Sized>(
        &mut self,
        setup: MatchSetup,
        roster: &P,
    ) -> Result<MatchStatus, EngineError> {
        self.expect_phase(MatchPhase::SettingUp, "SettingUp")?;
        self.config.validate()?;
        validate_team_names(&setup.team_a, &setup.team_b)?;

        let roster_a = roster.players(&setup.team_a);
        let roster_b = roster.players(&setup.team_b);

        validate_openers(
            &setup.striker,
            &setup.non_striker,
            &setup.bowler,
            &Lineup {
                team: &setup.team_a,
                players: &roster_a,
            },
            &Lineup {
                team: &setup.team_b,
                players: &roster_b,
            },
        )?;

        self.team_a = setup.team_a.trim().to_string();
        self.team_b = setup.team_b.trim().to_string();
        self.roster_a = roster_a;
        self.roster_b = roster_b;
        self.state = MatchState::new();
        self.stats.reset();
        self.history.clear();
        self.pending.clear();
        self.result = None;

        self.open_innings(setup.striker, setup.non_striker, setup.bowler, None);
        self.phase = MatchPhase::InningsOneLive;

        info!(
            team_a = %self.team_a,
            team_b = %self.team_b,
            overs = self.config.total_overs,
            "матч начат"
        );
        Ok(MatchStatus::Live)
    }

    /// Записать мяч на текущих бэтсмена и боулера.
    pub fn apply_ball(&mut self, kind: BallKind) -> Result<MatchStatus, EngineError> {
        let tracker = self.scoring_tracker()?;
        let event = BallEvent::new(kind, tracker.state.striker.clone(), tracker.state.bowler.clone());
        self.apply_event(event)
    }

    /// Применить готовое событие. Бэтсмен и боулер должны совпадать с табло.
    pub fn apply_event(&mut self, event: BallEvent) -> Result<MatchStatus, EngineError> {
        let tracker = self.scoring_tracker()?;
        validate_ball_kind(event.kind)?;
        if event.striker != tracker.state.striker || event.bowler != tracker.state.bowler {
            return Err(ValidationError::PlayerMismatch.into());
        }

        let record = BallRecord {
            event: event.clone(),
            striker_before: tracker.state.striker.clone(),
            non_striker_before: tracker.state.non_striker.clone(),
            bowler_before: tracker.state.bowler.clone(),
            legal: event.is_legal(),
            registered_player: None,
        };

        let tracker = self.tracker_mut()?;
        let outcome = tracker.apply(&event);
        let (runs, wickets, overs) = (
            tracker.state.runs,
            tracker.state.wickets,
            tracker.state.overs(),
        );

        self.stats.record_ball(&event, 1);
        self.history.push(record);

        debug!(
            innings = self.state.innings_number,
            ball = %event.kind.token(),
            striker = %event.striker,
            bowler = %event.bowler,
            score = %format_args!("{runs}/{wickets}"),
            overs = %overs,
            ?outcome,
            "мяч записан"
        );

        let is_wicket = matches!(event.kind, BallKind::Wicket);

        match outcome {
            InningsOutcome::Continuing => {
                if is_wicket {
                    self.pending.push(PendingSelection::NewBatsman);
                }
            }
            InningsOutcome::OverComplete => {
                // Через границу овера undo не работает.
                self.history.clear();
                if is_wicket {
                    self.pending.push(PendingSelection::NewBatsman);
                }
                self.pending.push(PendingSelection::NextBowler);
            }
            InningsOutcome::InningsComplete(end) => {
                return Ok(if self.state.innings_number == 1 {
                    self.close_first_innings(end)
                } else {
                    self.finish(end)
                });
            }
        }

        Ok(self.status())
    }

    /// Откатить последний мяч.
    ///
    /// Ok(false) – откатывать нечего (история пуста, например сразу после овера).
    pub fn undo(&mut self) -> Result<bool, EngineError> {
        if !self.phase.is_live() {
            return Err(StateError::WrongPhase {
                expected: "InningsOneLive | InningsTwoLive",
                actual: self.phase,
            }
            .into());
        }

        let record = match self.history.pop() {
            Some(r) => r,
            None => return Ok(false),
        };

        self.tracker_mut()?.revert(&record);
        self.stats.record_ball(&record.event, -1);
        if let Some(player) = &record.registered_player {
            self.stats.unregister(player);
        }
        // Внутри овера ожидать можно только бэтсмена после отменённой калитки.
        self.pending.clear();

        debug!(ball = %record.event.kind.token(), "мяч отменён");
        Ok(true)
    }

    /// Новый бэтсмен вместо выбывшего.
    pub fn select_batsman(&mut self, player: &str) -> Result<MatchStatus, EngineError> {
        self.expect_pending(PendingSelection::NewBatsman)?;
        let batting = self.batting_side();
        let tracker = self.tracker_ref()?;
        validate_new_batsman(player, &self.lineup(batting), &tracker.state)?;

        let tracker = self.tracker_mut()?;
        let out = tracker.state.dismissed.last().cloned();
        let s = &mut tracker.state;
        // Выбывший мог уже уйти на другой конец после смены овера.
        if out.as_deref() == Some(s.non_striker.as_str()) {
            s.non_striker = player.to_string();
        } else {
            s.striker = player.to_string();
        }

        if self.stats.register(player) {
            // Откат калитки должен убрать и пришедшего бэтсмена.
            if let Some(last) = self.history.last_mut() {
                last.registered_player = Some(player.to_string());
            }
        }
        self.resolve(PendingSelection::NewBatsman);
        debug!(batsman = player, "новый бэтсмен");
        Ok(self.status())
    }

    /// Боулер на следующий овер.
    pub fn select_bowler(&mut self, player: &str) -> Result<MatchStatus, EngineError> {
        self.expect_pending(PendingSelection::NextBowler)?;
        let bowling = self.batting_side().opponent();
        validate_bowler(player, &self.lineup(bowling))?;

        self.tracker_mut()?.state.bowler = player.to_string();
        self.stats.register(player);
        self.resolve(PendingSelection::NextBowler);
        debug!(bowler = player, "новый боулер");
        Ok(self.status())
    }

    /// InningsBreak -> InningsTwoLive: стартовая тройка второго иннингса.
    pub fn select_openers(
        &mut self,
        striker: &str,
        non_striker: &str,
        bowler: &str,
    ) -> Result<MatchStatus, EngineError> {
        self.expect_phase(MatchPhase::InningsBreak, "InningsBreak")?;
        validate_openers(
            striker,
            non_striker,
            bowler,
            &self.lineup(TeamSide::B),
            &self.lineup(TeamSide::A),
        )?;

        let target = self.state.target;
        self.open_innings(
            striker.to_string(),
            non_striker.to_string(),
            bowler.to_string(),
            target,
        );
        self.pending.clear();
        self.phase = MatchPhase::InningsTwoLive;

        info!(target = ?target, "второй иннингс начат");
        Ok(MatchStatus::Live)
    }

    /// Кого можно выбрать на первый ожидаемый выбор.
    pub fn pending_candidates(&self) -> Result<Vec<PlayerId>, EngineError> {
        let pending = match self.pending.first() {
            Some(p) => *p,
            None => return Ok(Vec::new()),
        };

        match pending {
            PendingSelection::NewBatsman => {
                let tracker = self.tracker_ref()?;
                eligible_batsmen(&self.lineup(self.batting_side()), &tracker.state)
            }
            PendingSelection::NextBowler => {
                eligible_bowlers(&self.lineup(self.batting_side().opponent()))
            }
            PendingSelection::OpeningPair => {
                let batting = self.lineup(TeamSide::B);
                if batting.players.len() < 2 {
                    return Err(EngineError::RosterEmpty {
                        team: self.team_b.clone(),
                    });
                }
                Ok(batting.players.iter().map(|p| p.name.clone()).collect())
            }
        }
    }

    /// Текущий статус для внешнего кода.
    pub fn status(&self) -> MatchStatus {
        match self.phase {
            MatchPhase::Finished => match &self.result {
                Some(r) => MatchStatus::Finished(r.clone()),
                None => MatchStatus::Live,
            },
            MatchPhase::InningsBreak => MatchStatus::InningsBreak {
                target: self.state.target.unwrap_or(0),
            },
            _ => match self.pending.first() {
                Some(p) => MatchStatus::AwaitingSelection(*p),
                None => MatchStatus::Live,
            },
        }
    }

    /// Бьющая сторона в текущем иннингсе.
    pub fn batting_side(&self) -> TeamSide {
        if self.state.innings_number == 1 {
            TeamSide::A
        } else {
            TeamSide::B
        }
    }

    pub fn team_name(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    pub fn lineup(&self, side: TeamSide) -> Lineup<'_> {
        match side {
            TeamSide::A => Lineup {
                team: &self.team_a,
                players: &self.roster_a,
            },
            TeamSide::B => Lineup {
                team: &self.team_b,
                players: &self.roster_b,
            },
        }
    }

    /// Запись для истории. Только для завершённого матча.
    pub fn match_record(&self, date: NaiveDate) -> Result<MatchRecord, EngineError> {
        let result = match (&self.result, self.phase) {
            (Some(r), MatchPhase::Finished) => r,
            _ => {
                return Err(StateError::WrongPhase {
                    expected: "Finished",
                    actual: self.phase,
                }
                .into())
            }
        };

        let second = self.tracker_ref()?.state.summary();
        Ok(MatchRecord {
            date,
            team_a: self.team_a.clone(),
            team_b: self.team_b.clone(),
            first_innings: self.state.first_innings_summary.clone(),
            second_innings: second,
            result: result.text.clone(),
            winner: result.winner,
        })
    }

    // ---------- внутренние переходы ----------

    fn open_innings(
        &mut self,
        striker: PlayerId,
        non_striker: PlayerId,
        bowler: PlayerId,
        target: Option<u32>,
    ) {
        self.stats.register(&striker);
        self.stats.register(&non_striker);
        self.stats.register(&bowler);
        self.history.clear();
        self.innings = Some(InningsTracker::new(
            InningsState::new(striker, non_striker, bowler),
            self.config.max_balls(),
            target,
        ));
    }

    /// InningsOneLive -> InningsBreak.
    fn close_first_innings(&mut self, end: InningsEnd) -> MatchStatus {
        let summary = match self.innings.take() {
            Some(t) => t.state.summary(),
            None => return self.status(),
        };
        let target = summary.runs + 1;

        info!(
            score = %summary.score_line(),
            overs = %summary.overs,
            target,
            ?end,
            "перерыв между иннингсами"
        );

        self.state.first_innings_summary = Some(summary);
        self.state.target = Some(target);
        self.state.innings_number = 2;
        self.history.clear();
        self.pending = vec![PendingSelection::OpeningPair];
        self.phase = MatchPhase::InningsBreak;

        MatchStatus::InningsBreak { target }
    }

    /// InningsTwoLive -> Finished.
    fn finish(&mut self, end: InningsEnd) -> MatchStatus {
        let (runs, wickets) = match &self.innings {
            Some(t) => (t.state.runs, t.state.wickets),
            None => return self.status(),
        };
        let target = self.state.target.unwrap_or(0);

        let (winner, margin) = if end == InningsEnd::TargetReached {
            (Winner::B, ResultMargin::Wickets(MAX_WICKETS - wickets))
        } else if runs + 1 == target {
            (Winner::Tie, ResultMargin::Tie)
        } else {
            (
                Winner::A,
                ResultMargin::Runs(target.saturating_sub(1).saturating_sub(runs)),
            )
        };

        let text = result_text(&self.team_a, &self.team_b, &margin);
        let result = MatchResult {
            winner,
            margin,
            text,
        };

        info!(result = %result.text, "матч завершён");

        self.state.result = Some(result.text.clone());
        self.state.winner = Some(winner);
        self.history.clear();
        self.pending.clear();
        self.phase = MatchPhase::Finished;
        self.result = Some(result.clone());

        MatchStatus::Finished(result)
    }

    fn resolve(&mut self, selection: PendingSelection) {
        if let Some(pos) = self.pending.iter().position(|p| *p == selection) {
            self.pending.remove(pos);
        }
    }

    fn expect_phase(&self, phase: MatchPhase, name: &'static str) -> Result<(), EngineError> {
        if self.phase == MatchPhase::Finished && phase != MatchPhase::Finished {
            return Err(StateError::MatchFinished.into());
        }
        if self.phase != phase {
            return Err(StateError::WrongPhase {
                expected: name,
                actual: self.phase,
            }
            .into());
        }
        Ok(())
    }

    fn expect_pending(&self, selection: PendingSelection) -> Result<(), EngineError> {
        if self.phase == MatchPhase::Finished {
            return Err(StateError::MatchFinished.into());
        }
        if !self.phase.is_live() || !self.pending.contains(&selection) {
            return Err(StateError::SelectionNotRequested(selection).into());
        }
        Ok(())
    }

    /// Трекер, если сейчас можно записывать мячи.
    fn scoring_tracker(&self) -> Result<&InningsTracker, EngineError> {
        if self.phase == MatchPhase::Finished {
            return Err(StateError::MatchFinished.into());
        }
        if !self.phase.is_live() {
            return Err(StateError::WrongPhase {
                expected: "InningsOneLive | InningsTwoLive",
                actual: self.phase,
            }
            .into());
        }
        if let Some(p) = self.pending.first() {
            return Err(StateError::SelectionPending(*p).into());
        }
        self.tracker_ref()
    }

    fn tracker_ref(&self) -> Result<&InningsTracker, EngineError> {
        self.innings.as_ref().ok_or_else(|| {
            StateError::WrongPhase {
                expected: "активный иннингс",
                actual: self.phase,
            }
            .into()
        })
    }

    fn tracker_mut(&mut self) -> Result<&mut InningsTracker, EngineError> {
        let phase = self.phase;
        self.innings.as_mut().ok_or_else(|| {
            StateError::WrongPhase {
                expected: "активный иннингс",
                actual: phase,
            }
            .into()
        })
    }
}

/// "Team B Won by 7 wickets!", "Team A Won by 1 run!", "Match Tied!".
fn result_text(team_a: &str, team_b: &str, margin: &ResultMargin) -> String {
    fn plural(n: u32, one: &str, many: &str) -> String {
        if n == 1 {
            format!("{n} {one}")
        } else {
            format!("{n} {many}")
        }
    }

    match margin {
        ResultMargin::Wickets(n) => format!("{team_b} Won by {}!", plural(*n, "wicket", "wickets")),
        ResultMargin::Runs(n) => format!("{team_a} Won by {}!", plural(*n, "run", "runs")),
        ResultMargin::Tie => "Match Tied!".to_string(),
    }
}
