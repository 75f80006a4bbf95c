use serde::{Deserialize, Serialize};

use crate::game::players::PlayerState;
use crate::types::StructureKind;

/// Points a player can see on their own board versus what opponents see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpDisplay {
    pub display: u32,
    pub total: u32,
    pub public: u32,
    pub hidden: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpBreakdown {
    pub settlements: u32,
    pub cities: u32,
    pub longest_road: u32,
    pub largest_army: u32,
    pub hidden: u32,
    pub total: u32,
}

impl VpBreakdown {
    pub fn of(player: &PlayerState) -> Self {
        Self {
            settlements: settlement_points(player),
            cities: city_points(player),
            longest_road: player.victory_points.longest_road,
            largest_army: player.victory_points.largest_army,
            hidden: hidden_vp(player),
            total: calculate_victory_points(player, true),
        }
    }

    pub fn public(&self) -> u32 {
        self.total - self.hidden
    }
}

fn settlement_points(player: &PlayerState) -> u32 {
    player.settlements.len() as u32 * StructureKind::Settlement.points()
}

fn city_points(player: &PlayerState) -> u32 {
    player.cities.len() as u32 * StructureKind::City.points()
}

pub fn basic_vp(player: &PlayerState) -> u32 {
    settlement_points(player) + city_points(player)
}

pub fn special_vp(player: &PlayerState) -> u32 {
    player.victory_points.longest_road + player.victory_points.largest_army
}

pub fn hidden_vp(player: &PlayerState) -> u32 {
    player.victory_point_cards() as u32
}

pub fn calculate_victory_points(player: &PlayerState, include_hidden: bool) -> u32 {
    let visible = basic_vp(player) + special_vp(player);
    if include_hidden {
        visible + hidden_vp(player)
    } else {
        visible
    }
}

pub fn public_vp(player: &PlayerState) -> u32 {
    calculate_victory_points(player, false)
}

pub fn get_victory_points_for_display(player: &PlayerState, is_current_player: bool) -> VpDisplay {
    let total = calculate_victory_points(player, true);
    let public = public_vp(player);
    VpDisplay {
        display: if is_current_player { total } else { public },
        total,
        public,
        hidden: hidden_vp(player),
    }
}

/// Refreshes the cached structure and card counters. Achievement fields are
/// owned by the achievement calculators and left alone.
pub fn initialize_victory_points(player: &mut PlayerState) {
    player.victory_points.settlements = settlement_points(player);
    player.victory_points.cities = city_points(player);
    player.victory_points.hidden = hidden_vp(player);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Corner;
    use crate::types::{Color, DevelopmentCard};
    use pretty_assertions::assert_eq;

    fn builder() -> PlayerState {
        let mut player = PlayerState::new(Color::Red);
        player.settlements = vec![Corner::new(0, 0, 0), Corner::new(0, 0, 3)];
        player.cities = vec![Corner::new(2, -1, 1)];
        player.add_dev_card(DevelopmentCard::VictoryPoint);
        player.add_dev_card(DevelopmentCard::Monopoly);
        player
    }

    #[test]
    fn basic_points_weight_cities_double() {
        assert_eq!(basic_vp(&builder()), 4);
    }

    #[test]
    fn hidden_points_only_when_requested() {
        let mut player = builder();
        player.victory_points.largest_army = 2;
        assert_eq!(calculate_victory_points(&player, false), 6);
        assert_eq!(calculate_victory_points(&player, true), 7);
        assert_eq!(public_vp(&player), 6);
    }

    #[test]
    fn display_depends_on_viewer() {
        let player = builder();
        let own = get_victory_points_for_display(&player, true);
        let theirs = get_victory_points_for_display(&player, false);
        assert_eq!(
            own,
            VpDisplay {
                display: 5,
                total: 5,
                public: 4,
                hidden: 1
            }
        );
        assert_eq!(theirs.display, 4);
        assert_eq!(theirs.total, own.total);
    }

    #[test]
    fn initialize_fills_cached_counters() {
        let mut player = builder();
        player.victory_points.longest_road = 2;
        initialize_victory_points(&mut player);
        assert_eq!(player.victory_points.settlements, 2);
        assert_eq!(player.victory_points.cities, 2);
        assert_eq!(player.victory_points.hidden, 1);
        assert_eq!(player.victory_points.longest_road, 2);
    }

    #[test]
    fn breakdown_sums_to_total() {
        let mut player = builder();
        player.victory_points.longest_road = 2;
        let breakdown = VpBreakdown::of(&player);
        assert_eq!(breakdown.total, 7);
        assert_eq!(breakdown.public(), 6);
        assert_eq!(
            breakdown.settlements
                + breakdown.cities
                + breakdown.longest_road
                + breakdown.largest_army
                + breakdown.hidden,
            breakdown.total
        );
    }
}
