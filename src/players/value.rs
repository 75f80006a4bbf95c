use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::game::action::{ActionPayload, GameAction};
use crate::game::game::Game;
use crate::players::BasePlayer;
use crate::types::Achievement;

#[derive(Debug, Clone)]
pub struct ValueFunctionParams {
    pub public_vps: f64,
    pub longest_road: f64,
    pub army_size: f64,
    pub hand_devs: f64,
    pub port: f64,
    pub road: f64,
}

impl Default for ValueFunctionParams {
    fn default() -> Self {
        Self {
            public_vps: 1e4,
            longest_road: 50.0,
            army_size: 30.0,
            hand_devs: 20.0,
            port: 5.0,
            road: 1.0,
        }
    }
}

/// Greedy one-ply player: scores every legal action by the points it earns
/// now plus a few hand-tuned features, and picks the best.
#[derive(Clone)]
pub struct ValueFunctionPlayer {
    pub params: ValueFunctionParams,
    pub epsilon: Option<f64>,
    rng: StdRng,
}

impl ValueFunctionPlayer {
    pub fn new(seed: u64, params: Option<ValueFunctionParams>, epsilon: Option<f64>) -> Self {
        Self {
            params: params.unwrap_or_default(),
            epsilon,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl BasePlayer for ValueFunctionPlayer {
    fn decide(&mut self, game: &Game, actions: &[GameAction]) -> Option<GameAction> {
        if actions.len() == 1 {
            return actions.first().copied();
        }

        if let Some(epsilon) = self.epsilon {
            if self.rng.gen_bool(epsilon) {
                return actions.choose(&mut self.rng).copied();
            }
        }

        let scored: Vec<(f64, GameAction)> = actions
            .iter()
            .map(|action| (evaluate_action(game, action, &self.params), *action))
            .collect();
        let best = scored
            .iter()
            .map(|(value, _)| *value)
            .fold(f64::NEG_INFINITY, f64::max);
        let candidates: Vec<GameAction> = scored
            .into_iter()
            .filter(|(value, _)| (best - value).abs() < f64::EPSILON)
            .map(|(_, action)| action)
            .collect();
        candidates.choose(&mut self.rng).copied()
    }
}

fn evaluate_action(game: &Game, action: &GameAction, params: &ValueFunctionParams) -> f64 {
    let idx = action.player_index;
    let Some(player) = game.state.player(idx) else {
        return f64::NEG_INFINITY;
    };
    let immediate = action.payload.immediate_points() as f64 * params.public_vps;

    match action.payload {
        ActionPayload::BuildCity(_) => immediate,
        ActionPayload::BuildSettlement(corner) => {
            let port = if game.board.port_at(corner).is_some() {
                params.port
            } else {
                0.0
            };
            immediate + port
        }
        ActionPayload::BuildRoad(edge) => {
            let current = game.state.longest_road_length(idx);
            let mut roads = player.roads.clone();
            roads.push(edge);
            let extended = game.state.trail_length(idx, &roads);
            let gain = extended.saturating_sub(current) as f64;
            let lengths: Vec<u32> = (0..game.state.players.len())
                .map(|other| game.state.longest_road_length(other) as u32)
                .collect();
            params.road
                + params.longest_road * gain
                + takeover_bonus(game, idx, Achievement::LongestRoad, extended as u32, &lengths, params)
        }
        ActionPayload::PlayKnight => {
            let sizes: Vec<u32> = game.state.players.iter().map(|p| p.knights_played).collect();
            params.army_size
                + takeover_bonus(
                    game,
                    idx,
                    Achievement::LargestArmy,
                    player.knights_played + 1,
                    &sizes,
                    params,
                )
        }
        ActionPayload::BuyDevelopmentCard => params.hand_devs,
        ActionPayload::EndTurn => 0.0,
    }
}

/// Bonus points the action would win by taking the achievement away from
/// everyone else.
fn takeover_bonus(
    game: &Game,
    idx: usize,
    achievement: Achievement,
    score: u32,
    scores: &[u32],
    params: &ValueFunctionParams,
) -> f64 {
    let rules = game.state.config.rules(achievement);
    let holds = game
        .state
        .player(idx)
        .is_some_and(|player| player.holds(achievement));
    let beats_everyone = scores
        .iter()
        .enumerate()
        .all(|(other, s)| other == idx || *s < score);
    if !holds && score >= rules.minimum && beats_everyone {
        rules.bonus as f64 * params.public_vps
    } else {
        0.0
    }
}
