use serde::{Deserialize, Serialize};

use crate::coords::{Corner, Edge};
use crate::types::{Achievement, Color, DevelopmentCard, StructureKind};

pub const MAX_ROADS: usize = 15;
pub const MAX_SETTLEMENTS: usize = 5;
pub const MAX_CITIES: usize = 4;

/// Cached point counters. The achievement fields carry the bonus while the
/// player holds the achievement and are zero otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VictoryPoints {
    pub settlements: u32,
    pub cities: u32,
    pub hidden: u32,
    pub longest_road: u32,
    pub largest_army: u32,
}

impl VictoryPoints {
    pub fn achievement(&self, achievement: Achievement) -> u32 {
        match achievement {
            Achievement::LongestRoad => self.longest_road,
            Achievement::LargestArmy => self.largest_army,
        }
    }

    pub fn set_achievement(&mut self, achievement: Achievement, points: u32) {
        match achievement {
            Achievement::LongestRoad => self.longest_road = points,
            Achievement::LargestArmy => self.largest_army = points,
        }
    }

    pub fn clear_achievements(&mut self) {
        self.longest_road = 0;
        self.largest_army = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub color: Color,
    #[serde(default)]
    pub settlements: Vec<Corner>,
    #[serde(default)]
    pub cities: Vec<Corner>,
    #[serde(default)]
    pub roads: Vec<Edge>,
    #[serde(default)]
    pub knights_played: u32,
    #[serde(default)]
    pub dev_cards: Vec<DevelopmentCard>,
    #[serde(default)]
    pub victory_points: VictoryPoints,
}

impl PlayerState {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            settlements: Vec::new(),
            cities: Vec::new(),
            roads: Vec::new(),
            knights_played: 0,
            dev_cards: Vec::new(),
            victory_points: VictoryPoints::default(),
        }
    }

    pub fn add_dev_card(&mut self, card: DevelopmentCard) {
        self.dev_cards.push(card);
    }

    /// Removes one copy of `card` from the hand.
    pub fn consume_dev_card(&mut self, card: DevelopmentCard) -> bool {
        if let Some(pos) = self.dev_cards.iter().position(|c| *c == card) {
            self.dev_cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn victory_point_cards(&self) -> usize {
        self.dev_cards
            .iter()
            .filter(|card| matches!(card, DevelopmentCard::VictoryPoint))
            .count()
    }

    pub fn holds(&self, achievement: Achievement) -> bool {
        self.victory_points.achievement(achievement) > 0
    }

    pub fn has_longest_road(&self) -> bool {
        self.holds(Achievement::LongestRoad)
    }

    pub fn has_largest_army(&self) -> bool {
        self.holds(Achievement::LargestArmy)
    }

    /// What this player has built at `corner`, in any of its spellings.
    pub fn structure_at(&self, corner: Corner) -> Option<StructureKind> {
        let target = corner.canonical();
        if self.cities.iter().any(|c| c.canonical() == target) {
            Some(StructureKind::City)
        } else if self.settlements.iter().any(|c| c.canonical() == target) {
            Some(StructureKind::Settlement)
        } else {
            None
        }
    }

    pub fn has_road(&self, edge: Edge) -> bool {
        self.road_position(edge).is_some()
    }

    pub(crate) fn road_position(&self, edge: Edge) -> Option<usize> {
        let target = edge.canonical();
        self.roads.iter().position(|r| r.canonical() == target)
    }

    pub(crate) fn settlement_position(&self, corner: Corner) -> Option<usize> {
        let target = corner.canonical();
        self.settlements
            .iter()
            .position(|c| c.canonical() == target)
    }

    /// Canonical corners this player's roads or buildings touch.
    pub fn network_corners(&self) -> impl Iterator<Item = Corner> + '_ {
        self.roads
            .iter()
            .flat_map(|road| road.endpoints())
            .chain(self.settlements.iter().map(|c| c.canonical()))
            .chain(self.cities.iter().map(|c| c.canonical()))
    }

    pub fn settlement_limit_reached(&self) -> bool {
        self.settlements.len() >= MAX_SETTLEMENTS
    }

    pub fn city_limit_reached(&self) -> bool {
        self.cities.len() >= MAX_CITIES
    }

    pub fn road_limit_reached(&self) -> bool {
        self.roads.len() >= MAX_ROADS
    }

    pub fn total_structures(&self) -> usize {
        self.settlements.len() + self.cities.len() + self.roads.len()
    }

    /// Clears everything a new game starts without.
    pub fn reset(&mut self) {
        *self = PlayerState::new(self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_lookup_accepts_any_spelling() {
        let mut player = PlayerState::new(Color::Red);
        player.settlements.push(Corner::new(0, 0, 0));
        player.cities.push(Corner::new(0, 0, 3));

        assert_eq!(
            player.structure_at(Corner::new(1, 0, 4)),
            Some(StructureKind::Settlement)
        );
        assert_eq!(
            player.structure_at(Corner::new(0, 0, 3)),
            Some(StructureKind::City)
        );
        assert_eq!(player.structure_at(Corner::new(0, 0, 1)), None);
    }

    #[test]
    fn road_lookup_accepts_counterpart() {
        let mut player = PlayerState::new(Color::Blue);
        player.roads.push(Edge::new(0, 0, 0));
        assert!(player.has_road(Edge::new(1, 0, 3)));
        assert!(!player.has_road(Edge::new(0, 0, 1)));
    }

    #[test]
    fn victory_point_cards_ignore_other_cards() {
        let mut player = PlayerState::new(Color::White);
        player.add_dev_card(DevelopmentCard::Knight);
        player.add_dev_card(DevelopmentCard::VictoryPoint);
        player.add_dev_card(DevelopmentCard::VictoryPoint);
        assert_eq!(player.victory_point_cards(), 2);
    }
}
