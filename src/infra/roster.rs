use std::collections::HashMap;

use crate::domain::player::{PlayerRole, RosterPlayer};
use crate::domain::team::team_key;
use crate::engine::RosterProvider;

/// Составы в памяти, без хранилища. Для тестов и dev-CLI.
#[derive(Clone, Debug, Default)]
pub struct StaticRoster {
    teams: HashMap<String, Vec<RosterPlayer>>,
}

impl StaticRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team(mut self, team: &str, players: Vec<RosterPlayer>) -> Self {
        self.teams.insert(team_key(team), players);
        self
    }

    /// Состав из `size` игроков с именами "{team} {n}".
    /// Первые шесть – бэтсмены, остальные – боулеры.
    pub fn with_generated_team(self, team: &str, size: usize) -> Self {
        let players = (1..=size)
            .map(|n| {
                let role = if n <= 6 {
                    PlayerRole::Batsman
                } else {
                    PlayerRole::Bowler
                };
                RosterPlayer::new(format!("{team} {n}"), role)
            })
            .collect();
        self.with_team(team, players)
    }
}

impl RosterProvider for StaticRoster {
    fn players(&self, team: &str) -> Vec<RosterPlayer> {
        self.teams
            .get(&team_key(team))
            .cloned()
            .unwrap_or_default()
    }
}
