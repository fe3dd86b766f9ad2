use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Player, Request};

/// Who plays the second side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Computer,
    Human,
}

impl GameMode {
    /// Unknown mode strings fall back to playing the computer.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "computer" => Ok(GameMode::Computer),
            "human" => Ok(GameMode::Human),
            other => Err(format!("unknown game mode: {other}")),
        }
    }
}

/// Per-game settings carried alongside the board on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Side the human controls in computer mode.
    pub human: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Computer,
            human: Player::One,
        }
    }
}

impl GameConfig {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Missing or unknown fields keep their defaults.
    pub fn from_request(request: &Request) -> Self {
        Self {
            mode: request.mode.unwrap_or_default(),
            human: request
                .human
                .and_then(Player::from_tag)
                .unwrap_or(Player::One),
        }
    }

    pub fn computer_player(&self) -> Option<Player> {
        match self.mode {
            GameMode::Computer => Some(self.human.opponent()),
            GameMode::Human => None,
        }
    }

    pub fn is_computer(&self, player: Player) -> bool {
        self.computer_player() == Some(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_known_values_and_falls_back() {
        assert_eq!("human".parse::<GameMode>(), Ok(GameMode::Human));
        assert_eq!("computer".parse::<GameMode>(), Ok(GameMode::Computer));
        assert!("robot".parse::<GameMode>().is_err());
        assert_eq!(GameMode::parse_or_default("robot"), GameMode::Computer);
    }

    #[test]
    fn default_config_puts_computer_on_player_two() {
        let config = GameConfig::default();

        assert_eq!(config.computer_player(), Some(Player::Two));
        assert!(config.is_computer(Player::Two));
        assert!(!config.is_computer(Player::One));
    }

    #[test]
    fn human_mode_has_no_computer_side() {
        let config = GameConfig::new(GameMode::Human);

        assert_eq!(config.computer_player(), None);
        assert!(!config.is_computer(Player::One));
        assert!(!config.is_computer(Player::Two));
    }

    #[test]
    fn config_from_request_keeps_defaults_for_missing_or_bad_fields() {
        let request = Request {
            human: Some(2),
            ..Request::default()
        };
        let config = GameConfig::from_request(&request);

        assert_eq!(config.mode, GameMode::Computer);
        assert_eq!(config.computer_player(), Some(Player::One));

        let request = Request {
            mode: Some(GameMode::Human),
            human: Some(7),
            ..Request::default()
        };
        assert_eq!(
            GameConfig::from_request(&request),
            GameConfig::new(GameMode::Human)
        );
        assert_eq!(GameConfig::from_request(&Request::default()), GameConfig::default());
    }
}
