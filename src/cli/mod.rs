pub mod players;
pub mod report;
pub mod scenario;
pub mod stats;

pub use players::{CLI_PLAYERS, CliPlayer, PlayerInstance, PlayerSpec, create_player, print_player_help};
pub use report::{ScoreReport, print_report};
pub use scenario::{Scenario, ScenarioError};
pub use stats::{GameStats, StatisticsAccumulator};
