//! Axial hex coordinates and the corner/edge algebra built on top of them.
//!
//! A physical vertex of the grid touches three tiles, so it has three
//! `(q, r, corner)` spellings; a physical edge touches two tiles and has two
//! `(q, r, edge)` spellings. Anything that hashes or compares vertices or
//! edges must go through [`canonical_corner`] / [`canonical_edge`].

use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use strum::{Display, EnumIter, EnumString};

/// Up to three corners; the equivalence class of one vertex or its neighbors.
pub type CornerSet = SmallVec<[Corner; 3]>;

/// Axial steps indexed by direction, corner and edge number.
pub const AXIAL_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// Corner pair bounding each edge of a tile.
pub const EDGE_CORNERS: [(u8, u8); 6] = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
    NorthEast,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn opposite(self) -> Self {
        Self::ALL[(self as usize + 3) % 6]
    }

    pub const fn vector(self) -> (i32, i32) {
        AXIAL_DIRECTIONS[self as usize]
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn neighbor(self, direction: Direction) -> Self {
        let (dq, dr) = direction.vector();
        Self::new(self.q + dq, self.r + dr)
    }

    pub fn neighbors(self) -> impl Iterator<Item = HexCoord> {
        Direction::ALL.into_iter().map(move |dir| self.neighbor(dir))
    }

    pub fn distance(self, other: HexCoord) -> u32 {
        hex_distance(self, other)
    }

    pub fn corner(self, corner: u8) -> Corner {
        Corner::new(self.q, self.r, corner)
    }

    pub fn edge(self, edge: u8) -> Edge {
        Edge::new(self.q, self.r, edge)
    }

    pub fn corners(self) -> [Corner; 6] {
        [0, 1, 2, 3, 4, 5].map(|c| self.corner(c))
    }

    pub fn edges(self) -> [Edge; 6] {
        [0, 1, 2, 3, 4, 5].map(|e| self.edge(e))
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// A vertex of tile `(q, r)`. Field order gives the lexicographic ordering
/// used to pick the canonical spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Corner {
    pub q: i32,
    pub r: i32,
    pub corner: u8,
}

impl Corner {
    pub const fn new(q: i32, r: i32, corner: u8) -> Self {
        Self {
            q,
            r,
            corner: corner % 6,
        }
    }

    pub const fn hex(self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }

    pub fn canonical(self) -> Self {
        canonical_corner(self.q, self.r, self.corner)
    }

    pub fn is_canonical(self) -> bool {
        self.canonical() == self
    }

    pub fn equivalents(self) -> CornerSet {
        equivalent_corners(self.q, self.r, self.corner)
    }

    pub fn adjacent(self) -> CornerSet {
        adjacent_corners(self.q, self.r, self.corner)
    }

    pub fn same_physical(self, other: Corner) -> bool {
        same_physical_corner(self, other)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, c{})", self.q, self.r, self.corner)
    }
}

/// An edge of tile `(q, r)`; edge `e` faces the neighbor in direction `e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub q: i32,
    pub r: i32,
    pub edge: u8,
}

impl Edge {
    pub const fn new(q: i32, r: i32, edge: u8) -> Self {
        Self {
            q,
            r,
            edge: edge % 6,
        }
    }

    pub const fn hex(self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }

    pub fn canonical(self) -> Self {
        canonical_edge(self.q, self.r, self.edge)
    }

    pub fn counterpart(self) -> Self {
        neighbor_edge(self.q, self.r, self.edge)
    }

    /// Raw endpoints as seen from this edge's own tile.
    pub fn corners(self) -> [Corner; 2] {
        edge_corners(self.q, self.r, self.edge)
    }

    /// Canonical endpoints, suitable as graph vertex keys.
    pub fn endpoints(self) -> [Corner; 2] {
        self.corners().map(Corner::canonical)
    }

    pub fn same_physical(self, other: Edge) -> bool {
        same_physical_edge(self, other)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, e{})", self.q, self.r, self.edge)
    }
}

/// Steps one hex in direction `dir`. An out-of-range direction leaves the
/// coordinate where it is.
pub fn neighbor_axial(q: i32, r: i32, dir: usize) -> (i32, i32) {
    match AXIAL_DIRECTIONS.get(dir) {
        Some((dq, dr)) => (q + dq, r + dr),
        None => {
            log::warn!("direction {dir} out of range at ({q}, {r}); staying in place");
            (q, r)
        }
    }
}

/// The same vertex as seen from the tile across `corner`'s leading edge.
pub fn neighbor_corner(q: i32, r: i32, corner: u8) -> Corner {
    let corner = corner % 6;
    let (nq, nr) = neighbor_axial(q, r, corner as usize);
    Corner::new(nq, nr, (corner + 4) % 6)
}

/// All spellings of one physical vertex, sorted so the canonical one is first.
pub fn equivalent_corners(q: i32, r: i32, corner: u8) -> CornerSet {
    let first = Corner::new(q, r, corner);
    let second = neighbor_corner(first.q, first.r, first.corner);
    let third = neighbor_corner(second.q, second.r, second.corner);
    let mut set: CornerSet = smallvec![first, second, third];
    set.sort_unstable();
    set.dedup();
    set
}

pub fn canonical_corner(q: i32, r: i32, corner: u8) -> Corner {
    equivalent_corners(q, r, corner)
        .into_iter()
        .min()
        .unwrap_or_else(|| Corner::new(q, r, corner))
}

pub fn same_physical_corner(a: Corner, b: Corner) -> bool {
    a.canonical() == b.canonical()
}

/// Canonical vertices exactly one edge away from `(q, r, corner)`.
///
/// Walks the two same-tile neighbors `corner ± 1` of every spelling of the
/// vertex. Canonicalizing each result folds in the spellings that live on the
/// adjacent tiles, so cross-tile adjacency is covered without a separate pass.
pub fn adjacent_corners(q: i32, r: i32, corner: u8) -> CornerSet {
    let mut adjacent = CornerSet::new();
    for rep in equivalent_corners(q, r, corner) {
        for step in [1, 5] {
            let side = canonical_corner(rep.q, rep.r, (rep.corner + step) % 6);
            if !adjacent.contains(&side) {
                adjacent.push(side);
            }
        }
    }
    adjacent.sort_unstable();
    adjacent
}

/// The same edge as seen from the tile it faces.
pub fn neighbor_edge(q: i32, r: i32, edge: u8) -> Edge {
    let edge = edge % 6;
    let (nq, nr) = neighbor_axial(q, r, edge as usize);
    Edge::new(nq, nr, (edge + 3) % 6)
}

pub fn canonical_edge(q: i32, r: i32, edge: u8) -> Edge {
    Edge::new(q, r, edge).min(neighbor_edge(q, r, edge))
}

pub fn same_physical_edge(a: Edge, b: Edge) -> bool {
    a.canonical() == b.canonical()
}

pub fn edge_corners(q: i32, r: i32, edge: u8) -> [Corner; 2] {
    let (a, b) = EDGE_CORNERS[(edge % 6) as usize];
    [Corner::new(q, r, a), Corner::new(q, r, b)]
}

pub fn hex_distance(a: HexCoord, b: HexCoord) -> u32 {
    let dq = a.q - b.q;
    let dr = a.r - b.r;
    let ds = -dq - dr;
    dq.unsigned_abs().max(dr.unsigned_abs()).max(ds.unsigned_abs())
}

fn num_tiles_for(radius: u32) -> usize {
    if radius == 0 {
        return 1;
    }
    6 * radius as usize + num_tiles_for(radius - 1)
}

/// Every hex within `radius` steps of the origin, in breadth-first order.
pub fn hexes_within(radius: u32) -> Vec<HexCoord> {
    let target = num_tiles_for(radius);
    let mut visited = HashSet::with_capacity(target);
    let mut ordered = Vec::with_capacity(target);
    let mut queue = VecDeque::from([HexCoord::ORIGIN]);

    while let Some(hex) = queue.pop_front() {
        if hex.distance(HexCoord::ORIGIN) > radius || !visited.insert(hex) {
            continue;
        }
        ordered.push(hex);
        queue.extend(hex.neighbors().filter(|n| !visited.contains(n)));
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn neighbor_axial_follows_direction_table() {
        assert_eq!(neighbor_axial(0, 0, 0), (1, 0));
        assert_eq!(neighbor_axial(0, 0, 2), (-1, 1));
        assert_eq!(neighbor_axial(3, -1, 5), (4, -2));
    }

    #[test]
    fn neighbor_axial_out_of_range_is_identity() {
        assert_eq!(neighbor_axial(2, -3, 6), (2, -3));
        assert_eq!(neighbor_axial(2, -3, usize::MAX), (2, -3));
    }

    #[test]
    fn direction_opposites_cancel() {
        for dir in Direction::ALL {
            let hex = HexCoord::new(1, -2);
            assert_eq!(hex.neighbor(dir).neighbor(dir.opposite()), hex);
        }
    }

    #[test]
    fn origin_corner_zero_has_known_spellings() {
        let reps = equivalent_corners(0, 0, 0);
        assert_eq!(
            reps.as_slice(),
            &[Corner::new(0, 0, 0), Corner::new(1, -1, 2), Corner::new(1, 0, 4)]
        );
        assert_eq!(canonical_corner(1, 0, 4), Corner::new(0, 0, 0));
        assert_eq!(canonical_corner(1, -1, 2), Corner::new(0, 0, 0));
    }

    #[test]
    fn out_of_range_corner_is_normalized() {
        assert_eq!(canonical_corner(0, 0, 6), canonical_corner(0, 0, 0));
        assert_eq!(equivalent_corners(2, 1, 11), equivalent_corners(2, 1, 5));
    }

    #[test]
    fn adjacent_corners_of_a_vertex_are_three() {
        let adjacent = adjacent_corners(0, 0, 0);
        assert_eq!(adjacent.len(), 3);
        assert!(adjacent.contains(&canonical_corner(0, 0, 1)));
        assert!(adjacent.contains(&canonical_corner(0, 0, 5)));
        assert!(!adjacent.contains(&canonical_corner(0, 0, 0)));
    }

    #[test]
    fn edge_counterpart_faces_back() {
        let edge = Edge::new(0, 0, 0);
        assert_eq!(edge.counterpart(), Edge::new(1, 0, 3));
        assert_eq!(edge.counterpart().counterpart(), edge);
        assert!(same_physical_edge(edge, Edge::new(1, 0, 3)));
    }

    #[test]
    fn edge_endpoints_agree_across_tiles() {
        let mut a = Edge::new(0, 0, 2).endpoints();
        let mut b = Edge::new(-1, 1, 5).endpoints();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn hexes_within_counts_rings() {
        assert_eq!(hexes_within(0), vec![HexCoord::ORIGIN]);
        assert_eq!(hexes_within(1).len(), 7);
        assert_eq!(hexes_within(2).len(), 19);
        assert!(hexes_within(2).iter().all(|h| h.distance(HexCoord::ORIGIN) <= 2));
    }

    proptest! {
        #[test]
        fn corner_classes_are_closed(q in -6i32..6, r in -6i32..6, c in 0u8..6) {
            let reps = equivalent_corners(q, r, c);
            prop_assert_eq!(reps.len(), 3);
            for rep in &reps {
                prop_assert_eq!(equivalent_corners(rep.q, rep.r, rep.corner), reps.clone());
            }
        }

        #[test]
        fn same_physical_corner_matches_spellings_only(q in -6i32..6, r in -6i32..6, c in 0u8..6) {
            let corner = Corner::new(q, r, c);
            for rep in equivalent_corners(q, r, c) {
                prop_assert!(same_physical_corner(corner, rep));
                prop_assert!(same_physical_corner(rep, corner));
            }
            for side in adjacent_corners(q, r, c) {
                prop_assert!(!same_physical_corner(corner, side));
            }
        }

        #[test]
        fn canonical_corner_is_idempotent(q in -6i32..6, r in -6i32..6, c in 0u8..12) {
            let canon = canonical_corner(q, r, c);
            prop_assert_eq!(canon.canonical(), canon);
            prop_assert!(canon.is_canonical());
        }

        #[test]
        fn edge_spellings_recognize_each_other(q in -6i32..6, r in -6i32..6, e in 0u8..6) {
            let edge = Edge::new(q, r, e);
            let other = Edge::new(
                q + AXIAL_DIRECTIONS[e as usize].0,
                r + AXIAL_DIRECTIONS[e as usize].1,
                (e + 3) % 6,
            );
            prop_assert!(same_physical_edge(edge, other));
            prop_assert!(same_physical_edge(other, edge));
            let mut ends_a = edge.endpoints();
            let mut ends_b = other.endpoints();
            ends_a.sort_unstable();
            ends_b.sort_unstable();
            prop_assert_eq!(ends_a, ends_b);
        }

        #[test]
        fn adjacency_is_symmetric(q in -4i32..4, r in -4i32..4, c in 0u8..6) {
            let vertex = canonical_corner(q, r, c);
            for neighbor in adjacent_corners(q, r, c) {
                prop_assert!(neighbor.adjacent().contains(&vertex));
            }
        }
    }
}
