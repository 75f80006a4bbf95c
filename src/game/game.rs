use std::collections::{HashSet, VecDeque};

use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::board::Board;
use crate::coords::{Corner, Edge};
use crate::game::action::{ActionPayload, GameAction};
use crate::game::deck::DevelopmentDeck;
use crate::game::state::{GameConfig, GameError, GameEvent, GameState};
use crate::players::BasePlayer;
use crate::types::{Color, DevelopmentCard};

pub const TURNS_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupPrompt {
    Settlement,
    Road,
}

#[derive(Debug, Clone, Copy)]
struct SetupStep {
    player_index: usize,
    prompt: SetupPrompt,
}

/// Snake order: every seat places a settlement and a road, then again in
/// reverse.
fn setup_order(num_players: usize) -> VecDeque<SetupStep> {
    (0..num_players)
        .chain((0..num_players).rev())
        .flat_map(|player_index| {
            [SetupPrompt::Settlement, SetupPrompt::Road]
                .into_iter()
                .map(move |prompt| SetupStep {
                    player_index,
                    prompt,
                })
        })
        .collect()
}

/// Drives a `GameState` on the standard board. Each regular turn allows a
/// single action; the resource economy is not modelled, so the turn limit
/// bounds games where nobody reaches the threshold.
pub struct Game {
    pub seed: u64,
    pub state: GameState,
    pub board: &'static Board,
    pub turn: u32,
    current_player: usize,
    deck: DevelopmentDeck,
    setup: VecDeque<SetupStep>,
    last_setup_settlement: Option<Corner>,
    actions: Vec<GameAction>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let deck = DevelopmentDeck::standard(&mut rng);
        let setup = setup_order(config.num_players);
        Self {
            seed: config.seed,
            state: GameState::new(config),
            board: Board::standard(),
            turn: 0,
            current_player: 0,
            deck,
            setup,
            last_setup_settlement: None,
            actions: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.state.id
    }

    pub fn in_setup(&self) -> bool {
        !self.setup.is_empty()
    }

    pub fn current_player(&self) -> usize {
        self.setup
            .front()
            .map_or(self.current_player, |step| step.player_index)
    }

    pub fn actions(&self) -> &[GameAction] {
        &self.actions
    }

    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    pub fn legal_actions(&self) -> Vec<GameAction> {
        if self.state.is_finished() {
            return Vec::new();
        }
        let player = self.current_player();
        match self.setup.front().map(|step| step.prompt) {
            Some(SetupPrompt::Settlement) => self
                .open_corners()
                .map(|corner| GameAction::new(player, ActionPayload::BuildSettlement(corner)))
                .collect(),
            Some(SetupPrompt::Road) => {
                let Some(anchor) = self.last_setup_settlement else {
                    return Vec::new();
                };
                self.free_edges_touching(move |corner| corner == anchor)
                    .map(|edge| GameAction::new(player, ActionPayload::BuildRoad(edge)))
                    .collect()
            }
            None => self.turn_actions(player),
        }
    }

    fn turn_actions(&self, player: usize) -> Vec<GameAction> {
        let state = &self.state.players[player];
        let mut actions = Vec::new();

        if !state.city_limit_reached() {
            actions.extend(
                state
                    .settlements
                    .iter()
                    .map(|corner| GameAction::new(player, ActionPayload::BuildCity(*corner))),
            );
        }

        if !state.settlement_limit_reached() {
            let road_ends: HashSet<Corner> =
                state.roads.iter().flat_map(|road| road.endpoints()).collect();
            actions.extend(
                self.open_corners()
                    .filter(|corner| road_ends.contains(corner))
                    .map(|corner| GameAction::new(player, ActionPayload::BuildSettlement(corner))),
            );
        }

        if !state.road_limit_reached() {
            let network: HashSet<Corner> = state.network_corners().collect();
            actions.extend(
                self.free_edges_touching(|corner| network.contains(&corner))
                    .map(|edge| GameAction::new(player, ActionPayload::BuildRoad(edge))),
            );
        }

        if state.dev_cards.contains(&DevelopmentCard::Knight) {
            actions.push(GameAction::new(player, ActionPayload::PlayKnight));
        }
        if !self.deck.is_empty() {
            actions.push(GameAction::new(player, ActionPayload::BuyDevelopmentCard));
        }
        actions.push(GameAction::new(player, ActionPayload::EndTurn));
        actions
    }

    fn open_corners(&self) -> impl Iterator<Item = Corner> + '_ {
        let placement = self.state.placement();
        self.board
            .land_corners()
            .iter()
            .copied()
            .filter(move |c| !placement.is_blocked(c.q, c.r, c.corner))
    }

    fn free_edges_touching<'a>(
        &'a self,
        touches: impl Fn(Corner) -> bool + 'a,
    ) -> impl Iterator<Item = Edge> + 'a {
        self.board.land_edges().iter().copied().filter(move |edge| {
            self.state.edge_owner(*edge).is_none() && edge.endpoints().into_iter().any(&touches)
        })
    }

    pub fn execute(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        if self.state.is_finished() {
            return Err(GameError::GameFinished);
        }
        let expected = self.current_player();
        if action.player_index != expected {
            return Err(GameError::ActionOutOfTurn {
                expected,
                actual: action.player_index,
            });
        }
        let player = action.player_index;

        let events = match (self.setup.front().map(|step| step.prompt), action.payload) {
            (Some(SetupPrompt::Settlement), ActionPayload::BuildSettlement(corner)) => {
                let events = self.state.build_settlement(player, corner)?;
                self.last_setup_settlement = Some(corner.canonical());
                events
            }
            (Some(SetupPrompt::Road), ActionPayload::BuildRoad(edge)) => {
                self.state.build_road(player, edge)?
            }
            (Some(_), _) => return Err(GameError::IllegalAction),
            (None, ActionPayload::BuildSettlement(corner)) => {
                self.state.build_settlement(player, corner)?
            }
            (None, ActionPayload::BuildCity(corner)) => self.state.build_city(player, corner)?,
            (None, ActionPayload::BuildRoad(edge)) => self.state.build_road(player, edge)?,
            (None, ActionPayload::PlayKnight) => {
                if !self.state.players[player].consume_dev_card(DevelopmentCard::Knight) {
                    return Err(GameError::MissingCard {
                        player,
                        card: DevelopmentCard::Knight,
                    });
                }
                self.state.play_knight(player)?
            }
            (None, ActionPayload::BuyDevelopmentCard) => {
                let card = self.deck.draw().ok_or(GameError::DeckEmpty)?;
                self.state.add_development_card(player, card)?
            }
            (None, ActionPayload::EndTurn) => Vec::new(),
        };

        self.actions.push(action);
        self.advance();
        Ok(events)
    }

    fn advance(&mut self) {
        if let Some(step) = self.setup.pop_front() {
            if step.prompt == SetupPrompt::Road {
                self.last_setup_settlement = None;
            }
            if self.setup.is_empty() {
                log::debug!("setup finished after {} placements", self.actions.len());
                self.current_player = 0;
            }
            return;
        }
        self.current_player = (self.current_player + 1) % self.state.players.len();
        if self.current_player == 0 {
            self.turn += 1;
        }
    }

    pub fn play<P: BasePlayer>(&mut self, players: &mut [P]) -> Option<Color> {
        while !self.state.is_finished() && self.turn < TURNS_LIMIT {
            if self.play_tick(players).is_none() {
                break;
            }
        }
        if self.turn >= TURNS_LIMIT {
            log::info!("game {} hit the turn limit", self.id());
        }
        self.winning_color()
    }

    pub fn play_tick<P: BasePlayer>(&mut self, players: &mut [P]) -> Option<GameAction> {
        let current_idx = self.current_player();
        if current_idx >= players.len() {
            return None;
        }

        let legal_actions = self.legal_actions();
        if legal_actions.is_empty() {
            if self.in_setup() {
                log::debug!("player {current_idx} has nowhere to place, skipping");
                self.advance();
                return self.play_tick(players);
            }
            return None;
        }

        let action = players[current_idx].decide(self, &legal_actions)?;
        match self.execute(action) {
            Ok(events) => {
                for event in &events {
                    log::trace!("{event:?}");
                }
            }
            Err(err) => {
                log::warn!("player {current_idx} chose a rejected action {action:?}: {err}");
                if self.in_setup() {
                    return None;
                }
                self.actions.push(action);
                self.advance();
            }
        }
        Some(action)
    }

    pub fn winning_color(&self) -> Option<Color> {
        self.state
            .winner()
            .and_then(|idx| self.state.players.get(idx).map(|p| p.color))
    }
}
