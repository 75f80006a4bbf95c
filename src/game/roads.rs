//! Road networks as graphs over canonical corners, and the longest-trail
//! search that scores them.

use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;

use crate::coords::{Corner, Edge};
use crate::game::players::PlayerState;

/// Limits applied while searching for the longest trail.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailOptions<'a> {
    /// Stop extending a trail after this many roads.
    pub max_depth: Option<usize>,
    /// Vertices a trail may end at but not pass through.
    pub blocked: Option<&'a HashSet<Corner>>,
}

impl TrailOptions<'_> {
    fn is_blocked(&self, corner: Corner) -> bool {
        self.blocked.is_some_and(|set| set.contains(&corner))
    }

    fn depth_exhausted(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|cap| depth >= cap)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    roads: Vec<Edge>,
    endpoints: Vec<[Corner; 2]>,
    incidence: HashMap<Corner, SmallVec<[usize; 3]>>,
}

impl RoadGraph {
    /// Builds the graph for one player's roads. Both spellings of a physical
    /// edge collapse into a single road.
    pub fn build(roads: &[Edge]) -> Self {
        let mut graph = RoadGraph::default();
        let mut seen = HashSet::with_capacity(roads.len());
        for road in roads {
            let canonical = road.canonical();
            if !seen.insert(canonical) {
                continue;
            }
            let road_idx = graph.roads.len();
            let ends = canonical.endpoints();
            graph.roads.push(canonical);
            graph.endpoints.push(ends);
            for end in ends {
                graph.incidence.entry(end).or_default().push(road_idx);
            }
        }
        graph
    }

    pub fn for_player(player: &PlayerState) -> Self {
        Self::build(&player.roads)
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn roads(&self) -> &[Edge] {
        &self.roads
    }

    pub fn vertices(&self) -> impl Iterator<Item = Corner> + '_ {
        self.incidence.keys().copied()
    }

    pub fn degree(&self, corner: Corner) -> usize {
        self.incidence
            .get(&corner.canonical())
            .map_or(0, |roads| roads.len())
    }

    /// Roads that touch each other at a shared vertex.
    ///
    /// Covers same-tile neighbors, the counterpart spelling on the adjacent
    /// tile and roads meeting at a vertex from a third tile.
    pub fn roads_connected(a: Edge, b: Edge) -> bool {
        if a.same_physical(b) {
            return false;
        }
        let ends_a = a.endpoints();
        b.endpoints().iter().any(|end| ends_a.contains(end))
    }

    /// Number of connected components among the roads.
    pub fn components(&self) -> usize {
        let mut seen = vec![false; self.roads.len()];
        let mut components = 0;
        for start in 0..self.roads.len() {
            if seen[start] {
                continue;
            }
            components += 1;
            let mut stack = vec![start];
            seen[start] = true;
            while let Some(road_idx) = stack.pop() {
                for end in self.endpoints[road_idx] {
                    for &next in self.incident(end) {
                        if !seen[next] {
                            seen[next] = true;
                            stack.push(next);
                        }
                    }
                }
            }
        }
        components
    }

    pub fn longest_trail(&self) -> usize {
        self.longest_trail_with(&TrailOptions::default())
    }

    /// Longest walk that never reuses a road. Vertices may repeat.
    pub fn longest_trail_with(&self, options: &TrailOptions<'_>) -> usize {
        if self.roads.is_empty() {
            return 0;
        }
        let mut visited = vec![false; self.roads.len()];
        let best = self
            .incidence
            .keys()
            .map(|&start| self.trail_from(start, &mut visited, 0, options))
            .max()
            .unwrap_or(0);
        best.max(1)
    }

    fn incident(&self, corner: Corner) -> &[usize] {
        self.incidence
            .get(&corner)
            .map(|roads| roads.as_slice())
            .unwrap_or(&[])
    }

    fn far_end(&self, road_idx: usize, from: Corner) -> Corner {
        let [a, b] = self.endpoints[road_idx];
        if a == from { b } else { a }
    }

    fn trail_from(
        &self,
        vertex: Corner,
        visited: &mut [bool],
        depth: usize,
        options: &TrailOptions<'_>,
    ) -> usize {
        if options.depth_exhausted(depth) {
            return 0;
        }
        let mut best = 0;
        for &road_idx in self.incident(vertex) {
            if visited[road_idx] {
                continue;
            }
            let next = self.far_end(road_idx, vertex);
            visited[road_idx] = true;
            let length = if options.is_blocked(next) {
                1
            } else {
                1 + self.trail_from(next, visited, depth + 1, options)
            };
            visited[road_idx] = false;
            best = best.max(length);
        }
        best
    }
}

pub fn calculate_longest_road(player: &PlayerState) -> usize {
    RoadGraph::for_player(player).longest_trail()
}
