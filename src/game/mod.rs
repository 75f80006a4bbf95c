pub mod achievements;
pub mod action;
pub mod deck;
pub mod game;
pub mod placement;
pub mod players;
pub mod roads;
pub mod scoring;
pub mod state;
pub mod win;

pub use achievements::{
    AchievementChange, AchievementRules, award_achievement, play_knight, update_largest_army,
    update_longest_road,
};
pub use action::{ActionPayload, GameAction};
pub use deck::DevelopmentDeck;
pub use game::Game;
pub use placement::{PlacementIndex, is_blocked_by_distance};
pub use players::{PlayerState, VictoryPoints};
pub use roads::{RoadGraph, TrailOptions, calculate_longest_road};
pub use scoring::{
    VpBreakdown, VpDisplay, calculate_victory_points, get_victory_points_for_display,
    initialize_victory_points,
};
pub use state::{GameConfig, GameError, GameEvent, GameState};
pub use win::{GameWon, WinManager, WinState};
