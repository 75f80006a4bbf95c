use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::players::PlayerState;
use crate::game::scoring::{VpBreakdown, calculate_victory_points};
use crate::types::Color;

pub const DEFAULT_VPS_TO_WIN: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinState {
    NotWon,
    Won { winner: usize, total_vp: u32 },
}

/// Published once, when the first player crosses the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameWon {
    pub winner: usize,
    pub color: Color,
    pub total_vp: u32,
    pub breakdown: VpBreakdown,
}

pub type WinListener = Box<dyn FnMut(&GameWon)>;
pub type CleanupHook = Box<dyn FnMut()>;

pub struct WinManager {
    threshold: u32,
    state: WinState,
    last_win: Option<GameWon>,
    listeners: Vec<WinListener>,
    cleanup_hooks: Vec<CleanupHook>,
}

impl fmt::Debug for WinManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WinManager")
            .field("threshold", &self.threshold)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("cleanup_hooks", &self.cleanup_hooks.len())
            .finish()
    }
}

impl Default for WinManager {
    fn default() -> Self {
        Self::new(DEFAULT_VPS_TO_WIN)
    }
}

impl WinManager {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            state: WinState::NotWon,
            last_win: None,
            listeners: Vec::new(),
            cleanup_hooks: Vec::new(),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn state(&self) -> WinState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, WinState::Won { .. })
    }

    pub fn winner(&self) -> Option<usize> {
        match self.state {
            WinState::Won { winner, .. } => Some(winner),
            WinState::NotWon => None,
        }
    }

    pub fn last_win(&self) -> Option<&GameWon> {
        self.last_win.as_ref()
    }

    pub fn on_win(&mut self, listener: impl FnMut(&GameWon) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn on_cleanup(&mut self, hook: impl FnMut() + 'static) {
        self.cleanup_hooks.push(Box::new(hook));
    }

    /// Declares `player` the winner if they have reached the threshold and
    /// nobody has won yet. Once a winner is recorded this only reports whether
    /// `player` is that winner.
    pub fn check_win_condition(&mut self, player: usize, players: &[PlayerState]) -> bool {
        if let WinState::Won { winner, .. } = self.state {
            return winner == player;
        }
        let Some(state) = players.get(player) else {
            log::warn!("win check for unknown player {player}");
            return false;
        };
        let total_vp = calculate_victory_points(state, true);
        if total_vp < self.threshold {
            return false;
        }

        self.state = WinState::Won {
            winner: player,
            total_vp,
        };
        let event = GameWon {
            winner: player,
            color: state.color,
            total_vp,
            breakdown: VpBreakdown::of(state),
        };
        log::info!("{} wins with {total_vp} points", state.color);
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
        self.last_win = Some(event);
        true
    }

    /// Returns to `NotWon` and runs the cleanup hooks. Listeners stay registered.
    pub fn reset(&mut self) {
        self.state = WinState::NotWon;
        self.last_win = None;
        for hook in self.cleanup_hooks.iter_mut() {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Corner;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn player_with_cities(color: Color, cities: usize) -> PlayerState {
        let mut player = PlayerState::new(color);
        player.cities = (0..cities).map(|i| Corner::new(i as i32 * 3, 0, 0)).collect();
        player
    }

    #[test]
    fn below_threshold_does_not_win() {
        let players = vec![player_with_cities(Color::Red, 4)];
        let mut manager = WinManager::default();
        assert!(!manager.check_win_condition(0, &players));
        assert_eq!(manager.state(), WinState::NotWon);
    }

    #[test]
    fn first_to_threshold_wins_and_notifies() {
        let players = vec![
            player_with_cities(Color::Red, 5),
            player_with_cities(Color::Blue, 5),
        ];
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut manager = WinManager::default();
        let sink = Rc::clone(&seen);
        manager.on_win(move |won| sink.borrow_mut().push(won.winner));

        assert!(manager.check_win_condition(0, &players));
        assert!(!manager.check_win_condition(1, &players));
        assert!(manager.check_win_condition(0, &players));
        assert_eq!(manager.winner(), Some(0));
        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(manager.last_win().map(|w| w.total_vp), Some(10));
    }

    #[test]
    fn hidden_points_count_toward_winning() {
        let mut player = player_with_cities(Color::White, 4);
        player.settlements.push(Corner::new(-3, 0, 0));
        player.add_dev_card(crate::types::DevelopmentCard::VictoryPoint);
        let players = vec![player];
        let mut manager = WinManager::default();
        assert!(manager.check_win_condition(0, &players));
    }

    #[test]
    fn reset_runs_cleanup_and_allows_new_winner() {
        let players = vec![
            player_with_cities(Color::Red, 5),
            player_with_cities(Color::Blue, 5),
        ];
        let cleaned = Rc::new(RefCell::new(0));
        let mut manager = WinManager::default();
        let counter = Rc::clone(&cleaned);
        manager.on_cleanup(move || *counter.borrow_mut() += 1);

        manager.check_win_condition(0, &players);
        manager.reset();
        assert_eq!(*cleaned.borrow(), 1);
        assert!(!manager.is_won());
        assert!(manager.check_win_condition(1, &players));
        assert_eq!(manager.winner(), Some(1));
    }

    #[test]
    fn unknown_player_is_ignored() {
        let mut manager = WinManager::new(3);
        assert!(!manager.check_win_condition(4, &[]));
        assert!(!manager.is_won());
    }
}
