//! Theta* any-angle search.
//!
//! The search runs backward, from the goal toward the start, so parent
//! links on the settled vertices already point from the start to the goal
//! and the path reads off without reversal.
//!
//! Theta* differs from Dijkstra in one step: when a neighbour of the
//! expanded vertex can see the expanded vertex's parent, it takes that
//! parent as its own and the path cuts straight across open space.

use log::{debug, trace, warn};
use thetagrid_core::{Graph, Position, VertexId};

use crate::config::SearchConfig;
use crate::distance::euclidean;
use crate::error::{SearchError, SearchResult};
use crate::path::Path;
use crate::queue::PriorityQueue;
use crate::sight::LineOfSight;

/// Per-vertex search state, valid only when `generation` matches the
/// finder's current generation.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) cost: f32,
    pub(crate) parent: Option<VertexId>,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            cost: f32::INFINITY,
            parent: None,
            generation: 0,
            closed: false,
        }
    }
}

/// Counters for the last search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Vertices dequeued from the open list.
    pub expanded: usize,
    /// Entries pushed onto the open list.
    pub enqueued: usize,
    /// Line-of-sight oracle calls.
    pub sight_queries: usize,
}

/// Reusable Theta* search over a [`Graph`].
///
/// The finder owns the cost/parent table and the open list so that
/// repeated searches reuse their allocations. Each search bumps a
/// generation counter, which lazily resets every vertex to cost = +∞,
/// parent = none. A finder serves one search at a time; run concurrent
/// searches over a shared graph with one finder each.
pub struct PathFinder {
    config: SearchConfig,
    nodes: Vec<Node>,
    generation: u32,
    open: PriorityQueue<VertexId>,
    stats: SearchStats,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFinder {
    /// Create a finder with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Create a finder with the given configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            generation: 0,
            open: PriorityQueue::new(),
            stats: SearchStats::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Counters for the last search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Cost of `id` in the last search, if the search reached it.
    pub fn cost(&self, id: VertexId) -> Option<f32> {
        self.node(id).map(|n| n.cost)
    }

    /// Parent of `id` in the last search. The goal is its own parent.
    pub fn parent(&self, id: VertexId) -> Option<VertexId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Whether `id` was settled by the last search.
    pub fn is_closed(&self, id: VertexId) -> bool {
        self.node(id).is_some_and(|n| n.closed)
    }

    fn node(&self, id: VertexId) -> Option<&Node> {
        self.nodes
            .get(id.index())
            .filter(|n| n.generation == self.generation && n.cost.is_finite())
    }

    /// Find a path from `start` to `end`.
    ///
    /// `start` and `end` must coincide with vertex coordinates; if either
    /// does not, or if the two are not connected, the returned path is
    /// empty. `sight` is consulted once per neighbour update.
    pub fn find_path<S>(
        &mut self,
        graph: &Graph,
        start: Position,
        end: Position,
        sight: &S,
    ) -> SearchResult<Path>
    where
        S: LineOfSight + ?Sized,
    {
        self.begin(graph);

        let goal = graph.find(end);
        let origin = graph.find(start);
        if goal.is_none() {
            warn!("end {end} is not an open cell");
        }
        if origin.is_none() {
            warn!("start {start} is not an open cell");
        }

        // Searching backward: seed the goal as its own parent so the first
        // expansion's line-of-sight check is well defined.
        if let Some(g) = goal {
            let node = self.touch(g);
            node.cost = 0.0;
            node.parent = Some(g);
            self.push(g, 0.0);
        }

        debug!(
            "theta*: searching {start} -> {end} over {} vertices",
            graph.len()
        );

        while !self.open.is_empty() {
            if let Some(max) = self.config.max_expansions {
                if self.stats.expanded >= max {
                    debug!("theta*: budget of {max} expansions exhausted");
                    self.open.clear();
                    return Err(SearchError::BudgetExhausted {
                        expanded: self.stats.expanded,
                    });
                }
            }

            let current = self.open.dequeue()?;
            self.nodes[current.index()].closed = true;
            self.stats.expanded += 1;
            trace!(
                "theta*: expand {} cost {}",
                graph.vertex(current).point(),
                self.nodes[current.index()].cost
            );

            if Some(current) == origin {
                self.open.clear();
                let path = self.reconstruct(graph, current);
                debug!(
                    "theta*: found {} waypoints, cost {:.3} ({:?})",
                    path.len(),
                    path.cost(),
                    self.stats
                );
                return Ok(path);
            }

            for &nbr in graph.neighbours(current) {
                if self.is_settled(nbr) {
                    continue;
                }
                if !self.open.contains(nbr) {
                    let node = self.touch(nbr);
                    node.cost = f32::INFINITY;
                    node.parent = None;
                }
                self.update_vertex(graph, current, nbr, sight);
            }
        }

        debug!("theta*: no path ({:?})", self.stats);
        Ok(Path::none())
    }

    /// Relax `nbr` from `current`, re-queueing it if its cost dropped.
    fn update_vertex<S>(&mut self, graph: &Graph, current: VertexId, nbr: VertexId, sight: &S)
    where
        S: LineOfSight + ?Sized,
    {
        let old_cost = self.nodes[nbr.index()].cost;
        self.compute_cost(graph, current, nbr, sight);
        let new_cost = self.nodes[nbr.index()].cost;
        if new_cost < old_cost {
            self.open.remove(nbr);
            self.push(nbr, new_cost);
        }
    }

    /// Offer `nbr` either `current`'s parent (when visible) or `current`.
    fn compute_cost<S>(&mut self, graph: &Graph, current: VertexId, nbr: VertexId, sight: &S)
    where
        S: LineOfSight + ?Sized,
    {
        let nbr_pos = graph.position(nbr);
        let parent = self.nodes[current.index()].parent.unwrap_or(current);

        let parent_pos = graph.position(parent);
        let visible = if self.config.any_angle {
            self.stats.sight_queries += 1;
            sight.is_clear(parent_pos, nbr_pos)
        } else {
            false
        };

        let (via, candidate) = if visible {
            (
                parent,
                self.nodes[parent.index()].cost + euclidean(parent_pos, nbr_pos),
            )
        } else {
            let current_pos = graph.position(current);
            (
                current,
                self.nodes[current.index()].cost + euclidean(current_pos, nbr_pos),
            )
        };

        let node = &mut self.nodes[nbr.index()];
        if candidate < node.cost {
            node.cost = candidate;
            node.parent = Some(via);
        }
    }

    /// Walk parent links from `from` to the goal.
    fn reconstruct(&self, graph: &Graph, from: VertexId) -> Path {
        let cost = self.nodes[from.index()].cost;
        let mut waypoints = vec![graph.position(from)];
        let mut id = from;
        while let Some(parent) = self.nodes[id.index()].parent {
            if parent == id {
                break;
            }
            id = parent;
            waypoints.push(graph.position(id));
        }
        Path::new(waypoints, cost)
    }

    fn begin(&mut self, graph: &Graph) {
        if self.nodes.len() < graph.len() {
            self.nodes.resize(graph.len(), Node::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale stamps could collide with the new generation.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.open.clear();
        self.stats = SearchStats::default();
    }

    /// The node for `id`, reset first if it is stale.
    fn touch(&mut self, id: VertexId) -> &mut Node {
        let generation = self.generation;
        let node = &mut self.nodes[id.index()];
        if node.generation != generation {
            *node = Node {
                generation,
                ..Node::default()
            };
        }
        node
    }

    fn is_settled(&self, id: VertexId) -> bool {
        let n = &self.nodes[id.index()];
        n.generation == self.generation && n.closed
    }

    fn push(&mut self, id: VertexId, cost: f32) {
        self.open.enqueue(id, cost);
        self.stats.enqueued += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sight::ClearSight;
    use thetagrid_core::Point;

    /// 4-connected graph of the `.` cells; row index is Z, column is X.
    fn graph(rows: &[&str]) -> Graph {
        let mut g = Graph::new();
        for (z, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '.' {
                    g.add_vertex(Point::new(x as i32, z as i32));
                }
            }
        }
        let ids: Vec<_> = g.iter().map(|(id, v)| (id, v.point())).collect();
        for (id, p) in ids {
            for n in p.neighbors_4() {
                if let Some(nid) = g.id_at(n) {
                    g.link(id, nid);
                }
            }
        }
        g
    }

    fn open_grid(n: usize) -> Graph {
        let row = ".".repeat(n);
        let rows: Vec<&str> = (0..n).map(|_| row.as_str()).collect();
        graph(&rows)
    }

    fn at(x: i32, z: i32) -> Position {
        Point::new(x, z).to_position()
    }

    /// Distance from `p` to the segment `a`-`b`.
    fn segment_distance(a: Position, b: Position, p: Position) -> f32 {
        let len2 = a.distance_squared(b);
        if len2 == 0.0 {
            return a.distance(p);
        }
        let t = ((p.x - a.x) * (b.x - a.x) + (p.z - a.z) * (b.z - a.z)) / len2;
        a.lerp(b, t.clamp(0.0, 1.0)).distance(p)
    }

    /// Blocks every segment passing within half a cell of (2, 2).
    fn center_blocked(a: Position, b: Position) -> bool {
        segment_distance(a, b, at(2, 2)) < 0.5
    }

    fn assert_valid(path: &Path, start: Position, end: Position, sight: &impl LineOfSight) {
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.end(), Some(end));
        for (a, b) in path.segments() {
            let adjacent = a.to_point().unwrap().is_adjacent_4(b.to_point().unwrap());
            assert!(
                adjacent || sight.is_clear(a, b),
                "segment {a} -> {b} is neither a grid step nor visible"
            );
        }
    }

    #[test]
    fn clear_sight_takes_single_diagonal() {
        let g = open_grid(5);
        let mut finder = PathFinder::new();
        let path = finder.find_path(&g, at(0, 0), at(4, 4), &ClearSight).unwrap();
        assert_eq!(path.waypoints(), &[at(0, 0), at(4, 4)]);
        assert!((path.length() - 32f32.sqrt()).abs() < 1e-5);
        assert!((path.cost() - 32f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn blocked_center_forces_detour() {
        let g = open_grid(5);
        let mut finder = PathFinder::new();
        let path = finder
            .find_path(&g, at(0, 0), at(4, 4), &center_blocked)
            .unwrap();
        assert!(!path.is_empty());
        assert_valid(&path, at(0, 0), at(4, 4), &center_blocked);
        assert!(path.length() > 32f32.sqrt() + 1e-4);
        assert!(path.length() <= 8.0 + 1e-4);
        // Settled costs are the geometric length of the parent chain.
        assert!((path.length() - path.cost()).abs() < 1e-4);
    }

    #[test]
    fn grid_only_search_steps_cell_by_cell() {
        let g = open_grid(5);
        let mut finder = PathFinder::with_config(SearchConfig::new().with_any_angle(false));
        let path = finder.find_path(&g, at(0, 0), at(4, 4), &ClearSight).unwrap();
        assert_eq!(path.len(), 9);
        assert!((path.length() - 8.0).abs() < 1e-5);
        assert_eq!(finder.stats().sight_queries, 0);
        for (a, b) in path.segments() {
            assert!(a.to_point().unwrap().is_adjacent_4(b.to_point().unwrap()));
        }
    }

    #[test]
    fn wall_separates_start_and_end() {
        let g = graph(&["..#..", "..#..", "..#..", "..#..", "..#.."]);
        let mut finder = PathFinder::new();
        let path = finder.find_path(&g, at(0, 0), at(4, 4), &ClearSight).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.length(), 0.0);
        // Only the goal's side of the wall was explored.
        assert_eq!(finder.stats().expanded, 10);
    }

    #[test]
    fn missing_endpoints_yield_empty_path() {
        let g = graph(&["...", ".#.", "..."]);
        let mut finder = PathFinder::new();
        // End on a closed cell: the open list starts empty.
        let path = finder.find_path(&g, at(0, 0), at(1, 1), &ClearSight).unwrap();
        assert!(path.is_empty());
        assert_eq!(finder.stats().expanded, 0);
        // Start off the grid.
        let path = finder.find_path(&g, at(9, 9), at(2, 2), &ClearSight).unwrap();
        assert!(path.is_empty());
        // Start between cells.
        let path = finder
            .find_path(&g, Position::flat(0.5, 0.0), at(2, 2), &ClearSight)
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn start_equals_end() {
        let g = open_grid(3);
        let mut finder = PathFinder::new();
        let path = finder.find_path(&g, at(1, 1), at(1, 1), &ClearSight).unwrap();
        assert_eq!(path.waypoints(), &[at(1, 1)]);
        assert_eq!(path.cost(), 0.0);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let g = graph(&[".....", ".##..", "...#.", ".#...", "....."]);
        let blocked = |p: Point| matches!((p.x, p.z), (1, 1) | (2, 1) | (3, 2) | (1, 3));
        let sight = |a: Position, b: Position| {
            (0..5)
                .flat_map(|z| (0..5).map(move |x| Point::new(x, z)))
                .filter(|&p| blocked(p))
                .any(|p| segment_distance(a, b, p.to_position()) < 0.5)
        };
        let mut finder = PathFinder::new();
        let first = finder.find_path(&g, at(0, 4), at(4, 0), &sight).unwrap();
        let stats = finder.stats();
        let second = finder.find_path(&g, at(0, 4), at(4, 0), &sight).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(stats, finder.stats());
        assert_valid(&first, at(0, 4), at(4, 0), &sight);
    }

    #[test]
    fn goal_is_its_own_parent() {
        let g = open_grid(3);
        let mut finder = PathFinder::new();
        finder.find_path(&g, at(0, 0), at(2, 2), &ClearSight).unwrap();
        let goal = g.id_at(Point::new(2, 2)).unwrap();
        let start = g.id_at(Point::new(0, 0)).unwrap();
        assert_eq!(finder.cost(goal), Some(0.0));
        assert_eq!(finder.parent(goal), Some(goal));
        assert!(finder.is_closed(goal));
        assert_eq!(finder.parent(start), Some(goal));
    }

    #[test]
    fn stale_state_is_invisible_to_next_search() {
        let g = open_grid(4);
        let mut finder = PathFinder::new();
        finder.find_path(&g, at(0, 0), at(3, 3), &ClearSight).unwrap();
        let far = g.id_at(Point::new(0, 0)).unwrap();
        assert!(finder.cost(far).is_some());
        // Start next to the goal: the far corner is never reached.
        finder.find_path(&g, at(3, 2), at(3, 3), &ClearSight).unwrap();
        assert!(!finder.is_closed(far));
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let g = open_grid(5);
        let mut finder = PathFinder::with_config(SearchConfig::new().with_max_expansions(1));
        let err = finder
            .find_path(&g, at(0, 0), at(4, 4), &ClearSight)
            .unwrap_err();
        assert_eq!(err, SearchError::BudgetExhausted { expanded: 1 });
    }
}
