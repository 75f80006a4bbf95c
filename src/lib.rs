#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod cli;
pub mod coords;
pub mod game;
pub mod players;
pub mod types;

pub use board::{Board, Harbor, PortKind};
pub use coords::{Corner, Edge, HexCoord, canonical_corner, equivalent_corners};
pub use game::{Game, GameConfig, GameError, GameState};
pub use types::Color;
