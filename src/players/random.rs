use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::game::action::GameAction;
use crate::game::game::Game;
use crate::players::BasePlayer;

#[derive(Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl BasePlayer for RandomPlayer {
    fn decide(&mut self, _game: &Game, actions: &[GameAction]) -> Option<GameAction> {
        actions.choose(&mut self.rng).copied()
    }
}
