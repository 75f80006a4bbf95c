use serde::{Deserialize, Serialize};

use crate::game::players::PlayerState;
use crate::game::roads::calculate_longest_road;
use crate::types::Achievement;

pub const ACHIEVEMENT_BONUS: u32 = 2;
pub const LONGEST_ROAD_MIN: u32 = 5;
pub const LARGEST_ARMY_MIN: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRules {
    pub minimum: u32,
    pub bonus: u32,
}

impl AchievementRules {
    pub const LONGEST_ROAD: AchievementRules = AchievementRules {
        minimum: LONGEST_ROAD_MIN,
        bonus: ACHIEVEMENT_BONUS,
    };

    pub const LARGEST_ARMY: AchievementRules = AchievementRules {
        minimum: LARGEST_ARMY_MIN,
        bonus: ACHIEVEMENT_BONUS,
    };

    pub fn standard(achievement: Achievement) -> Self {
        match achievement {
            Achievement::LongestRoad => Self::LONGEST_ROAD,
            Achievement::LargestArmy => Self::LARGEST_ARMY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementChange {
    pub achievement: Achievement,
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

impl AchievementChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

pub fn current_holder(players: &[PlayerState], achievement: Achievement) -> Option<usize> {
    players.iter().position(|player| player.holds(achievement))
}

/// Picks the holder from per-player scores.
///
/// The strict leader among qualifying players wins. On a tie at the top the
/// current holder keeps the award if it is part of the tie, otherwise the
/// first tied player in seat order takes it.
pub fn resolve_holder(scores: &[u32], current: Option<usize>, minimum: u32) -> Option<usize> {
    let best = scores.iter().copied().filter(|&s| s >= minimum).max()?;
    if let Some(holder) = current {
        if scores.get(holder) == Some(&best) {
            return Some(holder);
        }
    }
    scores.iter().position(|&s| s == best)
}

/// Re-awards `achievement` across every player from `scores` (one per player).
pub fn award_achievement(
    players: &mut [PlayerState],
    achievement: Achievement,
    scores: &[u32],
    rules: AchievementRules,
) -> AchievementChange {
    let previous = current_holder(players, achievement);
    let current = resolve_holder(scores, previous, rules.minimum);
    for (idx, player) in players.iter_mut().enumerate() {
        let points = if Some(idx) == current { rules.bonus } else { 0 };
        player.victory_points.set_achievement(achievement, points);
    }
    let change = AchievementChange {
        achievement,
        previous,
        current,
    };
    if change.changed() {
        log::debug!("{achievement} moved from {previous:?} to {current:?} (scores {scores:?})");
    }
    change
}

pub fn road_lengths(players: &[PlayerState]) -> Vec<u32> {
    players
        .iter()
        .map(|player| calculate_longest_road(player) as u32)
        .collect()
}

pub fn army_sizes(players: &[PlayerState]) -> Vec<u32> {
    players.iter().map(|player| player.knights_played).collect()
}

pub fn update_longest_road(players: &mut [PlayerState]) -> AchievementChange {
    let lengths = road_lengths(players);
    award_achievement(
        players,
        Achievement::LongestRoad,
        &lengths,
        AchievementRules::LONGEST_ROAD,
    )
}

pub fn update_largest_army(players: &mut [PlayerState]) -> AchievementChange {
    let sizes = army_sizes(players);
    award_achievement(
        players,
        Achievement::LargestArmy,
        &sizes,
        AchievementRules::LARGEST_ARMY,
    )
}

/// Records a knight for `player` and re-evaluates the army race.
pub fn play_knight(player: usize, players: &mut [PlayerState]) -> AchievementChange {
    match players.get_mut(player) {
        Some(state) => state.knights_played += 1,
        None => log::warn!("knight played by unknown player {player}"),
    }
    update_largest_army(players)
}
