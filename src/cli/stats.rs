use std::collections::HashMap;
use std::time::Duration;

use crate::game::game::Game;
use crate::game::scoring::calculate_victory_points;
use crate::types::{Achievement, Color};

#[derive(Debug, Default, Clone)]
pub struct GameStats {
    pub wins: HashMap<Color, u32>,
    pub results_by_player: HashMap<Color, Vec<u32>>,
    pub longest_road_holders: HashMap<Color, u32>,
    pub largest_army_holders: HashMap<Color, u32>,
    pub games: u32,
    pub total_ticks: u64,
    pub total_turns: u64,
    pub total_duration: Duration,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, game: &Game, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        self.total_turns += game.turn as u64;
        self.total_ticks += game.actions().len() as u64;

        if let Some(winner) = game.winning_color() {
            *self.wins.entry(winner).or_insert(0) += 1;
        }

        for player in &game.state.players {
            self.results_by_player
                .entry(player.color)
                .or_default()
                .push(calculate_victory_points(player, true));
            if player.holds(Achievement::LongestRoad) {
                *self.longest_road_holders.entry(player.color).or_insert(0) += 1;
            }
            if player.holds(Achievement::LargestArmy) {
                *self.largest_army_holders.entry(player.color).or_insert(0) += 1;
            }
        }
    }

    /// Folds another worker's results into this one.
    pub fn merge(&mut self, other: GameStats) {
        for (color, wins) in other.wins {
            *self.wins.entry(color).or_insert(0) += wins;
        }
        for (color, vps) in other.results_by_player {
            self.results_by_player.entry(color).or_default().extend(vps);
        }
        for (color, count) in other.longest_road_holders {
            *self.longest_road_holders.entry(color).or_insert(0) += count;
        }
        for (color, count) in other.largest_army_holders {
            *self.largest_army_holders.entry(color).or_insert(0) += count;
        }
        self.games += other.games;
        self.total_ticks += other.total_ticks;
        self.total_turns += other.total_turns;
        self.total_duration += other.total_duration;
    }

    pub fn win_rate(&self, color: Color) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        let wins = self.wins.get(&color).copied().unwrap_or(0);
        wins as f64 / self.games as f64 * 100.0
    }

    pub fn avg_vps(&self, color: Color) -> f64 {
        match self.results_by_player.get(&color) {
            Some(vps) if !vps.is_empty() => vps.iter().sum::<u32>() as f64 / vps.len() as f64,
            _ => 0.0,
        }
    }

    pub fn get_avg_ticks(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_ticks as f64 / self.games as f64
    }

    pub fn get_avg_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games as f64
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }
}

#[derive(Debug, Default)]
pub struct StatisticsAccumulator {
    pub stats: GameStats,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after(&mut self, game: &Game, duration: Duration) {
        self.stats.record_game(game, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_adds_up_counters() {
        let mut a = GameStats::new();
        a.games = 2;
        a.wins.insert(Color::Red, 1);
        a.results_by_player.insert(Color::Red, vec![10, 4]);

        let mut b = GameStats::new();
        b.games = 1;
        b.wins.insert(Color::Red, 1);
        b.results_by_player.insert(Color::Red, vec![10]);
        b.longest_road_holders.insert(Color::Blue, 1);

        a.merge(b);
        assert_eq!(a.games, 3);
        assert_eq!(a.wins[&Color::Red], 2);
        assert_eq!(a.avg_vps(Color::Red), 8.0);
        assert_eq!(a.longest_road_holders[&Color::Blue], 1);
        assert!((a.win_rate(Color::Red) - 66.666).abs() < 0.01);
    }

    #[test]
    fn empty_stats_average_to_zero() {
        let stats = GameStats::new();
        assert_eq!(stats.get_avg_turns(), 0.0);
        assert_eq!(stats.avg_vps(Color::White), 0.0);
        assert_eq!(stats.get_avg_duration(), Duration::ZERO);
    }
}
