use serde::{Deserialize, Serialize};

use crate::coords::{Corner, Edge};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GameAction {
    pub player_index: usize,
    pub payload: ActionPayload,
}

impl GameAction {
    pub fn new(player_index: usize, payload: ActionPayload) -> Self {
        Self {
            player_index,
            payload,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionPayload {
    BuildSettlement(Corner),
    BuildCity(Corner),
    BuildRoad(Edge),
    PlayKnight,
    BuyDevelopmentCard,
    EndTurn,
}

impl ActionPayload {
    /// Immediate points the action is worth to the player taking it.
    pub fn immediate_points(&self) -> u32 {
        match self {
            ActionPayload::BuildSettlement(_) | ActionPayload::BuildCity(_) => 1,
            _ => 0,
        }
    }
}

