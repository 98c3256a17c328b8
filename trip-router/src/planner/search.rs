//! Best-first (A*-style) route search.
//!
//! Finds the fastest sequence of walks and rides from a start coordinate to
//! an end coordinate over the implicit graph described in [`super::graph`].

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::domain::{Coordinate, DomainError, Itinerary, Network, Route};

use super::config::RouterConfig;
use super::graph::{Action, Edge, Graph, NodeId};
use super::network_index::NetworkIndex;
use super::reconstruct::{Predecessor, build_route, trace_path};

/// Error from route search.
///
/// Not finding a route is not an error; see [`Termination`]. This only
/// reports a found path that could not be turned into a route.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// The found path violated a route invariant
    #[error("failed to reconstruct route: {0}")]
    Reconstruction(#[from] DomainError),
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A goal node was dequeued; a route was found.
    Reached,
    /// The frontier emptied without reaching a goal.
    Exhausted,
    /// The expansion cap was hit before reaching a goal.
    ExpansionCapReached,
}

impl Termination {
    /// Stable lowercase name, for logs and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::Reached => "reached",
            Termination::Exhausted => "exhausted",
            Termination::ExpansionCapReached => "expansion_cap_reached",
        }
    }
}

/// Result of a route search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The best route found, if any.
    pub route: Option<Route>,

    /// Why the search stopped.
    pub termination: Termination,

    /// Number of frontier dequeues performed.
    pub nodes_expanded: usize,
}

impl SearchOutcome {
    /// Anchor the found route, if any, at `depart_at`.
    pub fn itineraries(&self, depart_at: NaiveDateTime) -> Vec<Itinerary> {
        self.route
            .iter()
            .map(|route| route.clone().depart_at(depart_at))
            .collect()
    }

    fn not_found(termination: Termination, nodes_expanded: usize) -> Self {
        Self {
            route: None,
            termination,
            nodes_expanded,
        }
    }
}

/// A frontier entry ordered by estimated total cost, then insertion order.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    /// `g + h`.
    priority: f64,
    /// Insertion sequence number; earlier wins ties.
    seq: u64,
    /// The `g` this entry was pushed with, to detect stale entries.
    g: f64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // total_cmp sorts NaN after every number, so NaN costs lose
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier with deterministic tie-breaking.
#[derive(Default)]
struct Frontier {
    heap: BinaryHeap<Reverse<QueueEntry>>,
    next_seq: u64,
}

impl Frontier {
    fn push(&mut self, node: NodeId, g: f64, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(QueueEntry {
            priority,
            seq,
            g,
            node,
        }));
    }

    fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }
}

/// Trip router.
///
/// Stateless across calls: every search owns its frontier and score maps,
/// so one `Router` can serve concurrent calls on a shared `Network`.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    /// Create a new router.
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Returns the router's configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Plan a trip departing at `depart_at`.
    ///
    /// Returns zero itineraries when no route exists within the expansion
    /// budget, otherwise exactly one.
    pub fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
        network: &Network,
        depart_at: NaiveDateTime,
    ) -> Result<Vec<Itinerary>, SearchError> {
        let outcome = self.search(start, end, network)?;
        Ok(outcome.itineraries(depart_at))
    }

    /// Search for the fastest route, indexing `network` first.
    pub fn search(
        &self,
        start: Coordinate,
        end: Coordinate,
        network: &Network,
    ) -> Result<SearchOutcome, SearchError> {
        let index = NetworkIndex::build(network);
        self.search_indexed(start, end, network, &index)
    }

    /// Search for the fastest route using a prebuilt index of `network`.
    ///
    /// `index` must have been built from `network`.
    pub fn search_indexed(
        &self,
        start: Coordinate,
        end: Coordinate,
        network: &Network,
        index: &NetworkIndex,
    ) -> Result<SearchOutcome, SearchError> {
        let graph = Graph::new(index, &self.config, start, end);

        let mut frontier = Frontier::default();
        let mut g_score: HashMap<NodeId, f64> = HashMap::new();
        let mut predecessors: HashMap<NodeId, Predecessor> = HashMap::new();
        let mut edges: Vec<Edge> = Vec::new();
        let mut nodes_expanded = 0;

        g_score.insert(NodeId::Start, 0.0);
        frontier.push(NodeId::Start, 0.0, graph.heuristic(NodeId::Start));

        loop {
            if nodes_expanded >= self.config.max_expansions {
                debug!(
                    nodes_expanded,
                    discovered = g_score.len(),
                    "Search hit expansion cap"
                );
                return Ok(SearchOutcome::not_found(
                    Termination::ExpansionCapReached,
                    nodes_expanded,
                ));
            }

            let Some(entry) = frontier.pop() else {
                debug!(
                    nodes_expanded,
                    discovered = g_score.len(),
                    "Search exhausted frontier"
                );
                return Ok(SearchOutcome::not_found(
                    Termination::Exhausted,
                    nodes_expanded,
                ));
            };
            nodes_expanded += 1;

            let current = entry.node;
            let current_g = g_score.get(&current).copied().unwrap_or(f64::INFINITY);

            // Superseded by a cheaper push of the same node
            if entry.g > current_g {
                continue;
            }

            trace!(node = ?current, g = current_g, f = entry.priority, "Expanding");

            if graph.is_goal(current) {
                let path = trace_path(&predecessors, current);
                let route = build_route(&path, &graph, network, &self.config)?;

                debug!(
                    nodes_expanded,
                    discovered = g_score.len(),
                    segments = route.segments().len(),
                    total_mins = route.total_mins(),
                    "Route found"
                );

                return Ok(SearchOutcome {
                    route: Some(route),
                    termination: Termination::Reached,
                    nodes_expanded,
                });
            }

            edges.clear();
            graph.neighbors(current, &mut edges);

            for edge in &edges {
                let tentative = current_g + edge.cost;
                let known = g_score.get(&edge.to).copied().unwrap_or(f64::INFINITY);

                if tentative < known {
                    let line = match (edge.action, current) {
                        (Action::Ride, NodeId::Stop { line, .. }) => Some(line),
                        _ => None,
                    };
                    predecessors.insert(
                        edge.to,
                        Predecessor {
                            from: current,
                            action: edge.action,
                            line,
                            cost: edge.cost,
                        },
                    );
                    g_score.insert(edge.to, tentative);
                    frontier.push(edge.to, tentative, tentative + graph.heuristic(edge.to));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
