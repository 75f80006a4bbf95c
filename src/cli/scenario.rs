use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::players::PlayerState;
use crate::game::state::{GameConfig, GameState};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a scenario needs between 2 and 4 players, got {0}")]
    PlayerCount(usize),
}

/// A table position to score: seats with their pieces, cards and knights,
/// plus optional rule overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: GameConfig,
    pub players: Vec<PlayerState>,
}

impl Scenario {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        if !(2..=4).contains(&scenario.players.len()) {
            return Err(ScenarioError::PlayerCount(scenario.players.len()));
        }
        Ok(scenario)
    }

    pub fn into_state(self) -> GameState {
        GameState::from_players(self.config, self.players)
    }
}
