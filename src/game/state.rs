use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coords::{Corner, Edge};
use crate::game::achievements::{
    AchievementChange, AchievementRules, LARGEST_ARMY_MIN, LONGEST_ROAD_MIN, ACHIEVEMENT_BONUS,
    army_sizes, award_achievement,
};
use crate::game::placement::PlacementIndex;
use crate::game::players::PlayerState;
use crate::game::roads::{RoadGraph, TrailOptions};
use crate::game::scoring::{VpDisplay, get_victory_points_for_display, initialize_victory_points};
use crate::game::win::{DEFAULT_VPS_TO_WIN, WinManager, WinState};
use crate::types::{Achievement, Color, DevelopmentCard, StructureKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub num_players: usize,
    pub vps_to_win: u32,
    pub longest_road_min: u32,
    pub largest_army_min: u32,
    pub achievement_bonus: u32,
    pub max_trail_depth: Option<usize>,
    pub opponents_break_roads: bool,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 4,
            vps_to_win: DEFAULT_VPS_TO_WIN,
            longest_road_min: LONGEST_ROAD_MIN,
            largest_army_min: LARGEST_ARMY_MIN,
            achievement_bonus: ACHIEVEMENT_BONUS,
            max_trail_depth: None,
            opponents_break_roads: false,
            seed: 42,
        }
    }
}

impl GameConfig {
    pub fn rules(&self, achievement: Achievement) -> AchievementRules {
        let minimum = match achievement {
            Achievement::LongestRoad => self.longest_road_min,
            Achievement::LargestArmy => self.largest_army_min,
        };
        AchievementRules {
            minimum,
            bonus: self.achievement_bonus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BuiltSettlement {
        player: usize,
        corner: Corner,
    },
    BuiltCity {
        player: usize,
        corner: Corner,
    },
    BuiltRoad {
        player: usize,
        edge: Edge,
    },
    SettlementRemoved {
        player: usize,
        corner: Corner,
    },
    RoadRemoved {
        player: usize,
        edge: Edge,
    },
    KnightPlayed {
        player: usize,
        knights: u32,
    },
    DevelopmentCardAdded {
        player: usize,
        card: DevelopmentCard,
    },
    AchievementChanged {
        achievement: Achievement,
        previous: Option<usize>,
        current: Option<usize>,
    },
    GameWon {
        winner: usize,
        total_vp: u32,
    },
}

impl From<AchievementChange> for GameEvent {
    fn from(change: AchievementChange) -> Self {
        GameEvent::AchievementChanged {
            achievement: change.achievement,
            previous: change.previous,
            current: change.current,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game already completed")]
    GameFinished,
    #[error("invalid player index {0}")]
    InvalidPlayer(usize),
    #[error("corner {0} already occupied")]
    CornerOccupied(Corner),
    #[error("cannot build adjacent to another settlement")]
    DistanceRuleViolation,
    #[error("player {player} has no settlement at {corner}")]
    NoSettlement { player: usize, corner: Corner },
    #[error("edge {0} already occupied")]
    EdgeOccupied(Edge),
    #[error("player {player} has no road at {edge}")]
    NoRoad { player: usize, edge: Edge },
    #[error("no {0} pieces left")]
    PieceLimit(&'static str),
    #[error("player {player} holds no {card} card")]
    MissingCard {
        player: usize,
        card: DevelopmentCard,
    },
    #[error("development deck is empty")]
    DeckEmpty,
    #[error("action by player {actual} but expected {expected}")]
    ActionOutOfTurn { expected: usize, actual: usize },
    #[error("action not allowed at this stage")]
    IllegalAction,
}

/// Everything the scoring engine knows about one game. Mutations commit to
/// the player list first, then re-derive points, achievements and the win
/// state, in that order.
#[derive(Debug)]
pub struct GameState {
    pub id: Uuid,
    pub config: GameConfig,
    pub players: Vec<PlayerState>,
    placement: PlacementIndex,
    win: WinManager,
    history: Vec<GameEvent>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        assert!(
            (2..=4).contains(&config.num_players),
            "Resource Realms supports between 2 and 4 players"
        );
        let players = Color::ORDERED
            .iter()
            .take(config.num_players)
            .map(|color| PlayerState::new(*color))
            .collect();
        let win = WinManager::new(config.vps_to_win);
        Self {
            id: Uuid::new_v4(),
            config,
            players,
            placement: PlacementIndex::new(),
            win,
            history: Vec::new(),
        }
    }

    /// Adopts an existing player list, re-deriving every cached value and
    /// checking for a winner in seat order.
    pub fn from_players(mut config: GameConfig, players: Vec<PlayerState>) -> Self {
        config.num_players = players.len();
        let mut state = Self {
            id: Uuid::new_v4(),
            win: WinManager::new(config.vps_to_win),
            config,
            placement: PlacementIndex::build_index_from_players(&players),
            players,
            history: Vec::new(),
        };
        for player in state.players.iter_mut() {
            initialize_victory_points(player);
        }
        let mut events = Vec::new();
        events.extend(state.recompute_longest_road());
        events.extend(state.recompute_largest_army());
        if let Some(event) = state.check_winner(0) {
            events.push(event);
        }
        state.history = events;
        state
    }

    /// Starts a fresh game with the same seats and configuration.
    pub fn reset(&mut self) {
        for player in self.players.iter_mut() {
            player.reset();
        }
        self.placement.clear();
        self.history.clear();
        self.win.reset();
        self.id = Uuid::new_v4();
    }

    pub fn player(&self, idx: usize) -> Option<&PlayerState> {
        self.players.get(idx)
    }

    pub fn placement(&self) -> &PlacementIndex {
        &self.placement
    }

    pub fn win_manager(&self) -> &WinManager {
        &self.win
    }

    /// For registering win listeners and cleanup hooks.
    pub fn win_manager_mut(&mut self) -> &mut WinManager {
        &mut self.win
    }

    pub fn win_state(&self) -> WinState {
        self.win.state()
    }

    pub fn winner(&self) -> Option<usize> {
        self.win.winner()
    }

    pub fn is_finished(&self) -> bool {
        self.win.is_won()
    }

    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    pub fn victory_points_for_display(&self, player: usize, viewer: usize) -> Option<VpDisplay> {
        self.players
            .get(player)
            .map(|state| get_victory_points_for_display(state, player == viewer))
    }

    pub fn longest_road_length(&self, player: usize) -> usize {
        match self.players.get(player) {
            Some(state) => self.trail_length(player, &state.roads),
            None => 0,
        }
    }

    /// Longest trail `roads` would give `player` under this game's road
    /// rules (depth cap and, when enabled, opponent blocking).
    pub fn trail_length(&self, player: usize, roads: &[Edge]) -> usize {
        let blocked: Option<HashSet<Corner>> = self
            .config
            .opponents_break_roads
            .then(|| self.placement.opponent_corners(player));
        let options = TrailOptions {
            max_depth: self.config.max_trail_depth,
            blocked: blocked.as_ref(),
        };
        RoadGraph::build(roads).longest_trail_with(&options)
    }

    /// Whether `corner` touches the player's roads or buildings.
    pub fn is_connected_to_network(&self, player: usize, corner: Corner) -> bool {
        let target = corner.canonical();
        self.players
            .get(player)
            .is_some_and(|state| state.network_corners().any(|c| c == target))
    }

    pub fn edge_owner(&self, edge: Edge) -> Option<usize> {
        self.players.iter().position(|player| player.has_road(edge))
    }

    pub fn build_settlement(
        &mut self,
        player: usize,
        corner: Corner,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_active(player)?;
        let corner = corner.canonical();
        if self.placement.is_occupied(corner) {
            return Err(GameError::CornerOccupied(corner));
        }
        if self.placement.is_blocked(corner.q, corner.r, corner.corner) {
            return Err(GameError::DistanceRuleViolation);
        }
        if self.players[player].settlement_limit_reached() {
            return Err(GameError::PieceLimit("settlement"));
        }

        let state = &mut self.players[player];
        state.settlements.push(corner);
        initialize_victory_points(state);
        self.placement
            .mark_occupy(corner, StructureKind::Settlement, player);

        let mut events = vec![GameEvent::BuiltSettlement { player, corner }];
        if self.config.opponents_break_roads {
            events.extend(self.recompute_longest_road());
        }
        Ok(self.commit(player, events))
    }

    pub fn build_city(&mut self, player: usize, corner: Corner) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_active(player)?;
        let corner = corner.canonical();
        let Some(position) = self.players[player].settlement_position(corner) else {
            return Err(GameError::NoSettlement { player, corner });
        };
        if self.players[player].city_limit_reached() {
            return Err(GameError::PieceLimit("city"));
        }

        let state = &mut self.players[player];
        state.settlements.remove(position);
        state.cities.push(corner);
        initialize_victory_points(state);
        self.placement.mark_occupy(corner, StructureKind::City, player);

        let events = vec![GameEvent::BuiltCity { player, corner }];
        Ok(self.commit(player, events))
    }

    pub fn build_road(&mut self, player: usize, edge: Edge) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_active(player)?;
        let edge = edge.canonical();
        if self.edge_owner(edge).is_some() {
            return Err(GameError::EdgeOccupied(edge));
        }
        if self.players[player].road_limit_reached() {
            return Err(GameError::PieceLimit("road"));
        }

        self.players[player].roads.push(edge);
        let mut events = vec![GameEvent::BuiltRoad { player, edge }];
        events.extend(self.recompute_longest_road());
        Ok(self.commit(player, events))
    }

    /// Takes back a road placed during setup.
    pub fn undo_road(&mut self, player: usize, edge: Edge) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_active(player)?;
        let Some(position) = self.players[player].road_position(edge) else {
            return Err(GameError::NoRoad { player, edge });
        };
        let removed = self.players[player].roads.remove(position);
        let mut events = vec![GameEvent::RoadRemoved {
            player,
            edge: removed,
        }];
        events.extend(self.recompute_longest_road());
        Ok(self.commit(player, events))
    }

    /// Takes back a settlement placed during setup.
    pub fn undo_settlement(
        &mut self,
        player: usize,
        corner: Corner,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_active(player)?;
        let Some(position) = self.players[player].settlement_position(corner) else {
            return Err(GameError::NoSettlement {
                player,
                corner: corner.canonical(),
            });
        };
        let state = &mut self.players[player];
        let removed = state.settlements.remove(position);
        initialize_victory_points(state);
        self.placement.unmark_occupy(removed);

        let mut events = vec![GameEvent::SettlementRemoved {
            player,
            corner: removed,
        }];
        if self.config.opponents_break_roads {
            events.extend(self.recompute_longest_road());
        }
        Ok(self.commit(player, events))
    }

    pub fn play_knight(&mut self, player: usize) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_active(player)?;
        self.players[player].knights_played += 1;
        let mut events = vec![GameEvent::KnightPlayed {
            player,
            knights: self.players[player].knights_played,
        }];
        events.extend(self.recompute_largest_army());
        Ok(self.commit(player, events))
    }

    pub fn add_development_card(
        &mut self,
        player: usize,
        card: DevelopmentCard,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_active(player)?;
        let state = &mut self.players[player];
        state.add_dev_card(card);
        initialize_victory_points(state);
        let events = vec![GameEvent::DevelopmentCardAdded { player, card }];
        Ok(self.commit(player, events))
    }

    pub fn add_victory_point_card(&mut self, player: usize) -> Result<Vec<GameEvent>, GameError> {
        self.add_development_card(player, DevelopmentCard::VictoryPoint)
    }

    fn ensure_active(&self, player: usize) -> Result<(), GameError> {
        if self.win.is_won() {
            return Err(GameError::GameFinished);
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        Ok(())
    }

    fn recompute_longest_road(&mut self) -> Option<GameEvent> {
        let lengths: Vec<u32> = (0..self.players.len())
            .map(|idx| self.longest_road_length(idx) as u32)
            .collect();
        let rules = self.config.rules(Achievement::LongestRoad);
        let change = award_achievement(&mut self.players, Achievement::LongestRoad, &lengths, rules);
        change.changed().then(|| change.into())
    }

    fn recompute_largest_army(&mut self) -> Option<GameEvent> {
        let sizes = army_sizes(&self.players);
        let rules = self.config.rules(Achievement::LargestArmy);
        let change = award_achievement(&mut self.players, Achievement::LargestArmy, &sizes, rules);
        change.changed().then(|| change.into())
    }

    /// Checks `actor` first, then everyone else in seat order: an award that
    /// moved away from the actor can push another player over the line.
    fn check_winner(&mut self, actor: usize) -> Option<GameEvent> {
        let seats = self.players.len();
        for offset in 0..seats {
            let idx = (actor + offset) % seats;
            if self.win.check_win_condition(idx, &self.players) {
                let WinState::Won { winner, total_vp } = self.win.state() else {
                    continue;
                };
                return Some(GameEvent::GameWon { winner, total_vp });
            }
        }
        None
    }

    fn commit(&mut self, actor: usize, mut events: Vec<GameEvent>) -> Vec<GameEvent> {
        if let Some(won) = self.check_winner(actor) {
            events.push(won);
        }
        self.history.extend(events.iter().cloned());
        events
    }
}
