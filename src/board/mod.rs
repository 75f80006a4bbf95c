use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::coords::{Corner, Edge, HexCoord, hexes_within};
use crate::game::players::PlayerState;
use crate::types::Resource;

/// Land radius of the standard island: 19 tiles.
pub const STANDARD_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortKind {
    Generic,
    Specific(Resource),
}

impl PortKind {
    pub const fn trade_ratio(self) -> u8 {
        match self {
            PortKind::Generic => 3,
            PortKind::Specific(_) => 2,
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKind::Generic => write!(f, "3:1"),
            PortKind::Specific(resource) => write!(f, "2:1 {resource}"),
        }
    }
}

/// A harbor on a coastal edge; both endpoints of the edge trade through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Harbor {
    pub edge: Edge,
    pub kind: PortKind,
}

#[derive(Debug, Clone)]
pub struct Board {
    land: HashSet<HexCoord>,
    harbors: Vec<Harbor>,
    port_corners: HashMap<Corner, PortKind>,
    corners: Vec<Corner>,
    edges: Vec<Edge>,
}

static STANDARD_BOARD: Lazy<Board> = Lazy::new(|| {
    let harbors = STANDARD_HARBORS
        .iter()
        .map(|&((q, r, edge), kind)| Harbor {
            edge: Edge::new(q, r, edge),
            kind,
        })
        .collect();
    Board::new(hexes_within(STANDARD_RADIUS), harbors)
});

const STANDARD_HARBORS: [((i32, i32, u8), PortKind); 9] = [
    ((2, -2, 5), PortKind::Generic),
    ((2, -1, 0), PortKind::Specific(Resource::Sheep)),
    ((2, 0, 1), PortKind::Generic),
    ((1, 1, 1), PortKind::Specific(Resource::Ore)),
    ((0, 2, 2), PortKind::Specific(Resource::Wheat)),
    ((-2, 2, 2), PortKind::Generic),
    ((-2, 1, 3), PortKind::Specific(Resource::Wood)),
    ((-1, -1, 4), PortKind::Specific(Resource::Brick)),
    ((1, -2, 4), PortKind::Generic),
];

impl Board {
    pub fn standard() -> &'static Board {
        &STANDARD_BOARD
    }

    pub fn new(land: impl IntoIterator<Item = HexCoord>, harbors: Vec<Harbor>) -> Self {
        let land: HashSet<HexCoord> = land.into_iter().collect();

        let corners = land
            .iter()
            .flat_map(|hex| hex.corners())
            .map(Corner::canonical)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let edges = land
            .iter()
            .flat_map(|hex| hex.edges())
            .map(Edge::canonical)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut port_corners = HashMap::new();
        for harbor in &harbors {
            for end in harbor.edge.endpoints() {
                if let Some(existing) = port_corners.insert(end, harbor.kind) {
                    log::warn!("harbors {existing} and {} share corner {end}", harbor.kind);
                }
            }
        }

        Self {
            land,
            harbors,
            port_corners,
            corners,
            edges,
        }
    }

    pub fn is_land(&self, hex: HexCoord) -> bool {
        self.land.contains(&hex)
    }

    pub fn land_tiles(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.land.iter().copied().sorted()
    }

    /// Canonical corners touching at least one land tile, sorted.
    pub fn land_corners(&self) -> &[Corner] {
        &self.corners
    }

    /// Canonical edges bordering at least one land tile, sorted.
    pub fn land_edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_land_corner(&self, corner: Corner) -> bool {
        corner.equivalents().iter().any(|rep| self.is_land(rep.hex()))
    }

    pub fn is_land_edge(&self, edge: Edge) -> bool {
        self.is_land(edge.hex()) || self.is_land(edge.counterpart().hex())
    }

    pub fn harbors(&self) -> &[Harbor] {
        &self.harbors
    }

    pub fn port_at(&self, corner: Corner) -> Option<PortKind> {
        self.port_corners.get(&corner.canonical()).copied()
    }

    /// Harbors the player can trade through from a settlement or city.
    pub fn ports_for_player(&self, player: &PlayerState) -> Vec<PortKind> {
        player
            .settlements
            .iter()
            .chain(player.cities.iter())
            .filter_map(|corner| self.port_at(*corner))
            .unique()
            .collect()
    }

    /// Best bank rate for `resource` given the player's harbors.
    pub fn trade_ratio(&self, player: &PlayerState, resource: Resource) -> u8 {
        self.ports_for_player(player)
            .into_iter()
            .filter(|kind| match kind {
                PortKind::Generic => true,
                PortKind::Specific(r) => *r == resource,
            })
            .map(PortKind::trade_ratio)
            .min()
            .unwrap_or(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn standard_board_has_classic_counts() {
        let board = Board::standard();
        assert_eq!(board.land_tiles().count(), 19);
        assert_eq!(board.land_corners().len(), 54);
        assert_eq!(board.land_edges().len(), 72);
        assert_eq!(board.harbors().len(), 9);
    }

    #[test]
    fn harbors_sit_on_the_coast() {
        let board = Board::standard();
        for harbor in board.harbors() {
            assert!(board.is_land(harbor.edge.hex()));
            assert!(!board.is_land(harbor.edge.counterpart().hex()));
        }
    }

    #[test]
    fn harbors_do_not_share_corners() {
        assert_eq!(Board::standard().port_corners.len(), 18);
    }

    #[test]
    fn port_lookup_accepts_any_spelling() {
        let board = Board::standard();
        let harbor = board.harbors()[0];
        for end in harbor.edge.corners() {
            for rep in end.equivalents() {
                assert_eq!(board.port_at(rep), Some(PortKind::Generic));
            }
        }
        assert_eq!(board.port_at(Corner::new(0, 0, 0)), None);
    }

    #[test]
    fn ports_improve_trade_ratio() {
        let board = Board::standard();
        let mut player = PlayerState::new(Color::Red);
        assert_eq!(board.trade_ratio(&player, Resource::Sheep), 4);

        let sheep = board.harbors()[1];
        player.settlements.push(sheep.edge.corners()[0]);
        assert_eq!(board.ports_for_player(&player), vec![PortKind::Specific(Resource::Sheep)]);
        assert_eq!(board.trade_ratio(&player, Resource::Sheep), 2);
        assert_eq!(board.trade_ratio(&player, Resource::Ore), 4);
    }

    #[test]
    fn land_membership() {
        let board = Board::standard();
        assert!(board.is_land_corner(Corner::new(2, -2, 5)));
        assert!(!board.is_land_corner(Corner::new(4, 0, 0)));
        assert!(board.is_land_edge(Edge::new(3, -3, 2)));
        assert!(!board.is_land_edge(Edge::new(3, -3, 5)));
    }
}
