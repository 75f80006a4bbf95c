use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::coords::{Corner, adjacent_corners, canonical_corner};
use crate::game::players::PlayerState;
use crate::types::StructureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: StructureKind,
    pub player: usize,
}

/// Occupied vertices keyed by canonical corner.
#[derive(Debug, Clone, Default)]
pub struct PlacementIndex {
    occupied: HashMap<Corner, Placement>,
}

impl PlacementIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_index_from_players(players: &[PlayerState]) -> Self {
        let mut index = Self::new();
        for (player_idx, player) in players.iter().enumerate() {
            for corner in &player.settlements {
                index.mark_occupy(*corner, StructureKind::Settlement, player_idx);
            }
            for corner in &player.cities {
                index.mark_occupy(*corner, StructureKind::City, player_idx);
            }
        }
        index
    }

    /// Records a structure, returning whatever occupied the vertex before.
    pub fn mark_occupy(
        &mut self,
        corner: Corner,
        kind: StructureKind,
        player: usize,
    ) -> Option<Placement> {
        self.occupied
            .insert(corner.canonical(), Placement { kind, player })
    }

    pub fn unmark_occupy(&mut self, corner: Corner) -> Option<Placement> {
        self.occupied.remove(&corner.canonical())
    }

    pub fn occupant(&self, corner: Corner) -> Option<Placement> {
        self.occupied.get(&corner.canonical()).copied()
    }

    pub fn is_occupied(&self, corner: Corner) -> bool {
        self.occupied.contains_key(&corner.canonical())
    }

    /// Distance rule: the vertex and every vertex one edge away must be free.
    pub fn is_blocked(&self, q: i32, r: i32, corner: u8) -> bool {
        let target = canonical_corner(q, r, corner);
        if self.occupied.contains_key(&target) {
            return true;
        }
        adjacent_corners(q, r, corner)
            .iter()
            .any(|neighbor| self.occupied.contains_key(neighbor))
    }

    /// Vertices held by anyone other than `player`.
    pub fn opponent_corners(&self, player: usize) -> HashSet<Corner> {
        self.occupied
            .iter()
            .filter(|(_, placement)| placement.player != player)
            .map(|(corner, _)| *corner)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Corner, &Placement)> {
        self.occupied.iter()
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn clear(&mut self) {
        self.occupied.clear();
    }
}

pub fn is_blocked_by_distance(q: i32, r: i32, corner: u8, players: &[PlayerState]) -> bool {
    PlacementIndex::build_index_from_players(players).is_blocked(q, r, corner)
}
