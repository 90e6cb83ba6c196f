//! Dijkstra's and A* shortest-path search on top of [`DHeap`]
//!
//! Both searches seed a min-ordered d-ary heap with every node of the graph at
//! [`Cost::infinity`] using a single bulk construction, lower the start node
//! with [`DHeap::update`], and then repeatedly extract the closest frontier
//! node and relax its outgoing edges with further `update` calls.
//!
//! Dijkstra is A* with a zero heuristic. Edge weights must be non-negative.
//!
//! # Example
//!
//! ```rust
//! use rust_dary_heap::pathfinding::{dijkstra, Graph};
//!
//! let mut graph: Graph<&str, u32> = Graph::new();
//! let a = graph.add_node("a");
//! let b = graph.add_node("b");
//! let c = graph.add_node("c");
//! graph.add_edge(a, b, 4).unwrap();
//! graph.add_edge(a, c, 1).unwrap();
//! graph.add_edge(c, b, 2).unwrap();
//!
//! let result = dijkstra(&graph, a, |id, _| id == b).unwrap();
//! assert_eq!(result.goal, Some(b));
//! assert_eq!(result.distance(b), Some(3));
//! assert_eq!(result.path_to(b), Some(vec![a, c, b]));
//! ```

use crate::dheap::DHeap;
use crate::error::{HeapError, HeapResult};
use crate::order::HeapOrder;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Add;
use tracing::{debug, trace};

/// Index of a node inside a [`Graph`].
///
/// Only these lightweight indices are stored in the heap, never node values.
pub type NodeId = usize;

/// Trait for types that can be used as path costs.
///
/// `Default` must be the zero cost. [`infinity`](Cost::infinity) is the
/// frontier priority of a node that has not been reached yet; it must compare
/// greater than or equal to every representable cost. A node whose path cost
/// is exactly `infinity()` still counts as reached.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {
    /// Cost of an unreached node.
    fn infinity() -> Self;

    /// Sum of two costs, or `None` if it is not representable.
    fn checked_add(self, other: Self) -> Option<Self>;

    /// Sum of two costs, clamped to [`infinity`](Cost::infinity).
    fn saturating_add(self, other: Self) -> Self;
}

macro_rules! impl_cost_for_int {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                #[inline]
                fn infinity() -> Self {
                    <$t>::MAX
                }

                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    <$t>::checked_add(self, other)
                }

                #[inline]
                fn saturating_add(self, other: Self) -> Self {
                    <$t>::saturating_add(self, other)
                }
            }
        )*
    };
}

impl_cost_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Cost for OrderedFloat<f32> {
    #[inline]
    fn infinity() -> Self {
        OrderedFloat(f32::INFINITY)
    }

    #[inline]
    fn checked_add(self, other: Self) -> Option<Self> {
        Some(self + other)
    }

    #[inline]
    fn saturating_add(self, other: Self) -> Self {
        self + other
    }
}

impl Cost for OrderedFloat<f64> {
    #[inline]
    fn infinity() -> Self {
        OrderedFloat(f64::INFINITY)
    }

    #[inline]
    fn checked_add(self, other: Self) -> Option<Self> {
        Some(self + other)
    }

    #[inline]
    fn saturating_add(self, other: Self) -> Self {
        self + other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge<C> {
    to: NodeId,
    weight: C,
}

/// A directed graph with weighted edges.
///
/// Node values are deduplicated: adding a value that is already present
/// returns the existing [`NodeId`].
#[derive(Debug, Clone)]
pub struct Graph<N, C> {
    nodes: Vec<N>,
    index: FxHashMap<N, NodeId>,
    edges: Vec<Vec<Edge<C>>>,
}

impl<N, C> Graph<N, C>
where
    N: Clone + Eq + Hash,
    C: Cost,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            index: FxHashMap::default(),
            edges: Vec::new(),
        }
    }

    /// Adds a node, or returns the id of an equal node already in the graph.
    pub fn add_node(&mut self, value: N) -> NodeId {
        if let Some(&id) = self.index.get(&value) {
            return id;
        }
        let id = self.nodes.len();
        self.index.insert(value.clone(), id);
        self.nodes.push(value);
        self.edges.push(Vec::new());
        id
    }

    /// Adds a directed edge.
    ///
    /// # Errors
    /// [`HeapError::ElementNotFound`] if either endpoint is not a node of this graph.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: C) -> HeapResult<()> {
        if to >= self.nodes.len() {
            return Err(HeapError::ElementNotFound);
        }
        self.edges
            .get_mut(from)
            .ok_or(HeapError::ElementNotFound)?
            .push(Edge { to, weight });
        Ok(())
    }

    /// Adds edges in both directions.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, weight: C) -> HeapResult<()> {
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    pub fn node_id(&self, value: &N) -> Option<NodeId> {
        self.index.get(value).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id)
    }

    /// Outgoing edges of `id` as `(target, weight)` pairs.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, C)> + '_ {
        self.edges
            .get(id)
            .into_iter()
            .flatten()
            .map(|edge| (edge.to, edge.weight))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }
}

impl<N, C> Default for Graph<N, C>
where
    N: Clone + Eq + Hash,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<C> {
    /// The node the search started from.
    pub start: NodeId,
    /// The first node accepted by the goal predicate, if any was reached.
    pub goal: Option<NodeId>,
    /// Best known cost per node; [`Cost::infinity`] for nodes never reached.
    pub distances: Vec<C>,
    /// Predecessor of each node on its best known path. Every reached node
    /// other than the start has one.
    pub parents: Vec<Option<NodeId>>,
}

impl<C: Cost> SearchResult<C> {
    /// Returns true if the search found any path to `node`.
    pub fn is_reached(&self, node: NodeId) -> bool {
        node == self.start || matches!(self.parents.get(node), Some(Some(_)))
    }

    /// Best known cost to `node`, or `None` if it was never reached.
    pub fn distance(&self, node: NodeId) -> Option<C> {
        if !self.is_reached(node) {
            return None;
        }
        self.distances.get(node).copied()
    }

    /// Reconstructs the path from the start node to `node`, inclusive.
    pub fn path_to(&self, node: NodeId) -> Option<Vec<NodeId>> {
        self.distance(node)?;

        let mut path = vec![node];
        let mut current = node;
        while let Some(prev) = self.parents[current] {
            path.push(prev);
            current = prev;
        }

        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra's algorithm from `start` until `is_goal` accepts an extracted node.
///
/// With a predicate that never matches, this computes shortest paths to every
/// reachable node.
///
/// # Errors
/// [`HeapError::ElementNotFound`] if `start` is not a node of the graph.
pub fn dijkstra<N, C>(
    graph: &Graph<N, C>,
    start: NodeId,
    is_goal: impl Fn(NodeId, &N) -> bool,
) -> HeapResult<SearchResult<C>>
where
    N: Clone + Eq + Hash,
    C: Cost,
{
    PathFinderBuilder::new(graph, start).dijkstra(is_goal)
}

/// Runs A* search from `start`, ordering the frontier by cost plus `heuristic`.
///
/// The heuristic must never overestimate the remaining cost for the returned
/// path to be optimal.
pub fn a_star<N, C>(
    graph: &Graph<N, C>,
    start: NodeId,
    is_goal: impl Fn(NodeId, &N) -> bool,
    heuristic: impl Fn(NodeId, &N) -> C,
) -> HeapResult<SearchResult<C>>
where
    N: Clone + Eq + Hash,
    C: Cost,
{
    PathFinderBuilder::new(graph, start).a_star(is_goal, heuristic)
}

/// Shortest paths from `start` to every reachable node.
pub fn shortest_paths<N, C>(graph: &Graph<N, C>, start: NodeId) -> HeapResult<SearchResult<C>>
where
    N: Clone + Eq + Hash,
    C: Cost,
{
    dijkstra(graph, start, |_, _| false)
}

/// Builder for searches with more configuration options.
pub struct PathFinderBuilder<'g, N, C> {
    graph: &'g Graph<N, C>,
    start: NodeId,
    branching_factor: usize,
    max_cost: Option<C>,
}

impl<'g, N, C> PathFinderBuilder<'g, N, C>
where
    N: Clone + Eq + Hash,
    C: Cost,
{
    /// Creates a builder searching `graph` from `start` with a binary heap.
    pub fn new(graph: &'g Graph<N, C>, start: NodeId) -> Self {
        PathFinderBuilder {
            graph,
            start,
            branching_factor: crate::config::MIN_BRANCHING_FACTOR,
            max_cost: None,
        }
    }

    /// Sets the branching factor of the frontier heap.
    pub fn branching_factor(mut self, d: usize) -> Self {
        self.branching_factor = d;
        self
    }

    /// Nodes whose cost exceeds `cost` are not expanded.
    pub fn max_cost(mut self, cost: C) -> Self {
        self.max_cost = Some(cost);
        self
    }

    pub fn dijkstra(self, is_goal: impl Fn(NodeId, &N) -> bool) -> HeapResult<SearchResult<C>> {
        self.search(is_goal, |_, _| C::default())
    }

    pub fn a_star(
        self,
        is_goal: impl Fn(NodeId, &N) -> bool,
        heuristic: impl Fn(NodeId, &N) -> C,
    ) -> HeapResult<SearchResult<C>> {
        self.search(is_goal, heuristic)
    }

    fn search(
        self,
        is_goal: impl Fn(NodeId, &N) -> bool,
        heuristic: impl Fn(NodeId, &N) -> C,
    ) -> HeapResult<SearchResult<C>> {
        let graph = self.graph;
        let start = self.start;
        let n = graph.len();
        if start >= n {
            return Err(HeapError::ElementNotFound);
        }

        let mut distances = vec![C::infinity(); n];
        let mut parents = vec![None; n];
        let mut frontier = DHeap::from_parts(
            self.branching_factor,
            HeapOrder::Min,
            (0..n).collect(),
            vec![C::infinity(); n],
        )?;

        distances[start] = C::default();
        frontier.update(&start, heuristic(start, &graph.nodes[start]))?;

        let mut expanded = 0usize;
        let mut goal = None;

        let reached =
            |parents: &[Option<NodeId>], id: NodeId| id == start || parents[id].is_some();

        while let Ok(u) = frontier.extract_top() {
            // Unreached nodes share the infinite priority with any reached
            // node whose priority saturated, so skip rather than stop.
            if !reached(&parents, u) {
                continue;
            }
            if let Some(max) = self.max_cost {
                if distances[u] > max {
                    continue;
                }
            }
            expanded += 1;

            if is_goal(u, &graph.nodes[u]) {
                goal = Some(u);
                break;
            }

            for edge in &graph.edges[u] {
                let v = edge.to;
                // A cost that overflows is not a usable path.
                let Some(tentative) = distances[u].checked_add(edge.weight) else {
                    continue;
                };
                if reached(&parents, v) && tentative >= distances[v] {
                    continue;
                }

                distances[v] = tentative;
                parents[v] = Some(u);
                let priority = tentative.saturating_add(heuristic(v, &graph.nodes[v]));
                trace!(from = u, to = v, "relaxed edge");

                // An inconsistent heuristic can improve a node after it was
                // extracted; reopen it.
                if let Err(HeapError::ElementNotFound) = frontier.update(&v, priority) {
                    frontier.insert(v, priority);
                }
            }
        }

        debug!(
            start,
            expanded,
            goal = ?goal,
            branching_factor = self.branching_factor,
            "search finished"
        );

        Ok(SearchResult {
            start,
            goal,
            distances,
            parents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Graph<usize, u32> {
        let mut graph = Graph::new();
        for i in 0..n {
            graph.add_node(i);
        }
        for i in 1..n {
            graph.add_edge(i - 1, i, 1).unwrap();
        }
        graph
    }

    #[test]
    fn test_add_node_dedups() {
        let mut graph: Graph<&str, u32> = Graph::new();
        let a = graph.add_node("a");
        assert_eq!(graph.add_node("a"), a);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.node_id(&"a"), Some(a));
        assert_eq!(graph.node(a), Some(&"a"));
    }

    #[test]
    fn test_add_edge_unknown_node() {
        let mut graph: Graph<&str, u32> = Graph::new();
        let a = graph.add_node("a");
        assert_eq!(graph.add_edge(a, 7, 1), Err(HeapError::ElementNotFound));
        assert_eq!(graph.add_edge(7, a, 1), Err(HeapError::ElementNotFound));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_line_graph() {
        let graph = line(10);
        let result = dijkstra(&graph, 0, |id, _| id == 9).unwrap();
        assert_eq!(result.goal, Some(9));
        assert_eq!(result.distance(9), Some(9));
        assert_eq!(result.path_to(9), Some((0..10).collect()));
    }

    #[test]
    fn test_unreachable() {
        let mut graph = line(3);
        let island = graph.add_node(99);
        let result = dijkstra(&graph, 0, |id, _| id == island).unwrap();
        assert_eq!(result.goal, None);
        assert_eq!(result.distance(island), None);
        assert_eq!(result.path_to(island), None);
        assert_eq!(result.distance(2), Some(2));
    }

    #[test]
    fn test_unknown_start() {
        let graph = line(2);
        assert_eq!(
            dijkstra(&graph, 5, |_, _| false),
            Err(HeapError::ElementNotFound)
        );
    }

    #[test]
    fn test_max_cost_stops_expansion() {
        let graph = line(10);
        let result = PathFinderBuilder::new(&graph, 0)
            .max_cost(3)
            .dijkstra(|_, _| false)
            .unwrap();
        assert_eq!(result.distance(4), Some(4));
        assert_eq!(result.distance(5), None);
    }

    #[test]
    fn test_start_is_reached_without_parent() {
        let graph = line(3);
        let result = shortest_paths(&graph, 1).unwrap();
        assert!(result.is_reached(1));
        assert_eq!(result.parents[1], None);
        assert_eq!(result.distance(1), Some(0));
        assert!(!result.is_reached(0));
        assert!(!result.is_reached(42));
    }

    #[test]
    fn test_cost_checked_and_saturating_add() {
        assert_eq!(Cost::checked_add(250u8, 5), Some(255));
        assert_eq!(Cost::checked_add(250u8, 6), None);
        assert_eq!(Cost::saturating_add(250u8, 6), u8::MAX);
        assert_eq!(
            Cost::saturating_add(OrderedFloat(1.5f64), OrderedFloat(f64::INFINITY)),
            OrderedFloat(f64::INFINITY)
        );
    }

    #[test]
    fn test_float_costs() {
        let mut graph: Graph<char, OrderedFloat<f64>> = Graph::new();
        let a = graph.add_node('a');
        let b = graph.add_node('b');
        let c = graph.add_node('c');
        graph.add_edge(a, b, OrderedFloat(2.5)).unwrap();
        graph.add_edge(a, c, OrderedFloat(0.5)).unwrap();
        graph.add_edge(c, b, OrderedFloat(0.75)).unwrap();

        let result = shortest_paths(&graph, a).unwrap();
        assert_eq!(result.distance(b), Some(OrderedFloat(1.25)));
        assert_eq!(result.parents[b], Some(c));
    }
}
