use crate::game::action::GameAction;
use crate::game::game::Game;
use crate::players::{BasePlayer, RandomPlayer, ValueFunctionParams, ValueFunctionPlayer};

pub struct CliPlayer {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CLI_PLAYERS: &[CliPlayer] = &[
    CliPlayer {
        code: "R",
        name: "RandomPlayer",
        description: "Chooses actions at random.",
    },
    CliPlayer {
        code: "F",
        name: "ValueFunctionPlayer",
        description: "Takes the action worth the most points right now. First param is EPSILON.",
    },
];

#[derive(Clone)]
pub enum PlayerInstance {
    Random(RandomPlayer),
    ValueFunction(ValueFunctionPlayer),
}

impl PlayerInstance {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerInstance::Random(_) => "Random",
            PlayerInstance::ValueFunction(_) => "ValueFunction",
        }
    }
}

impl BasePlayer for PlayerInstance {
    fn decide(&mut self, game: &Game, actions: &[GameAction]) -> Option<GameAction> {
        match self {
            PlayerInstance::Random(p) => p.decide(game, actions),
            PlayerInstance::ValueFunction(p) => p.decide(game, actions),
        }
    }
}

/// A player code from the command line, e.g. `F:0.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    pub code: String,
    pub params: Vec<String>,
}

impl PlayerSpec {
    pub fn parse(key: &str) -> Self {
        let mut parts = key.trim().split(':');
        let code = parts.next().unwrap_or_default().to_uppercase();
        Self {
            code,
            params: parts.map(str::to_string).collect(),
        }
    }

    pub fn build(&self, seed: u64) -> Option<PlayerInstance> {
        let params: Vec<&str> = self.params.iter().map(String::as_str).collect();
        create_player(&self.code, seed, params)
    }
}

pub fn create_player(code: &str, seed: u64, params: Vec<&str>) -> Option<PlayerInstance> {
    match code {
        "R" => Some(PlayerInstance::Random(RandomPlayer::new(seed))),
        "F" => {
            let epsilon = params
                .first()
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|e| (0.0..=1.0).contains(e));
            Some(PlayerInstance::ValueFunction(ValueFunctionPlayer::new(
                seed,
                Some(ValueFunctionParams::default()),
                epsilon,
            )))
        }
        _ => None,
    }
}

pub fn print_player_help() {
    println!("Player Legend:");
    println!("{:<5} {:<25} {}", "CODE", "PLAYER", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for player in CLI_PLAYERS {
        println!("{:<5} {:<25} {}", player.code, player.name, player.description);
    }
}
