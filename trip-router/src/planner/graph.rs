//! Implicit search graph.
//!
//! Nodes are the virtual start, the virtual end, and `(line, stop index)`
//! pairs. Edges are never stored; they are generated from a node on demand
//! by matching on its kind.

use crate::domain::{Coordinate, LineRef, StopIndex, distance_km};

use super::config::RouterConfig;
use super::network_index::{IndexedStop, NetworkIndex};

/// A node of the search graph.
///
/// The same physical stop served by two lines is two distinct `Stop` nodes:
/// boarding each line is a separate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    /// The rider's start coordinate.
    Start,
    /// The rider's destination coordinate.
    End,
    /// A stop on a specific line.
    Stop { line: LineRef, index: StopIndex },
}

impl NodeId {
    fn stop(stop: &IndexedStop) -> Self {
        NodeId::Stop {
            line: stop.line,
            index: stop.index,
        }
    }
}

/// How an edge is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Walk,
    /// One hop forward along a line.
    Ride,
}

/// An edge generated from a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    /// Cost in minutes.
    pub cost: f64,
    pub action: Action,
}

/// The graph for one routing call: a network index plus the two virtual
/// endpoints.
pub struct Graph<'a> {
    index: &'a NetworkIndex,
    config: &'a RouterConfig,
    start: Coordinate,
    end: Coordinate,
}

impl<'a> Graph<'a> {
    /// Create the graph between `start` and `end`.
    pub fn new(
        index: &'a NetworkIndex,
        config: &'a RouterConfig,
        start: Coordinate,
        end: Coordinate,
    ) -> Self {
        Self {
            index,
            config,
            start,
            end,
        }
    }

    /// Returns the start coordinate.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Returns the destination coordinate.
    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// Returns the coordinate of `node`, or `None` for a stop the index
    /// does not contain.
    pub fn coord(&self, node: NodeId) -> Option<Coordinate> {
        match node {
            NodeId::Start => Some(self.start),
            NodeId::End => Some(self.end),
            NodeId::Stop { line, index } => self.index.get(line, index).map(|s| s.coord),
        }
    }

    /// Estimated minutes from `node` to the destination.
    ///
    /// Assumes the whole remaining distance is ridden at line speed. That
    /// underestimates whenever the remainder has to be walked, so the search
    /// is best-first rather than strictly optimal.
    pub fn heuristic(&self, node: NodeId) -> f64 {
        match self.coord(node) {
            Some(at) => self.config.ride_mins(distance_km(at, self.end)),
            None => f64::INFINITY,
        }
    }

    /// Returns true if the search may stop at `node`.
    pub fn is_goal(&self, node: NodeId) -> bool {
        match node {
            NodeId::End => true,
            _ => self
                .coord(node)
                .is_some_and(|at| distance_km(at, self.end) < self.config.arrival_epsilon_km),
        }
    }

    /// Appends the edges leaving `node` to `out`.
    ///
    /// Order is deterministic: walks to stops in index order, then the walk
    /// to the destination, then the ride to the next stop.
    pub fn neighbors(&self, node: NodeId, out: &mut Vec<Edge>) {
        match node {
            NodeId::End => {}
            NodeId::Start => self.walk_edges(self.start, out),
            NodeId::Stop { line, index } => {
                let Some(here) = self.index.get(line, index) else {
                    return;
                };
                self.walk_edges(here.coord, out);

                if let Some(next) = self.index.next_on_line(line, index) {
                    out.push(Edge {
                        to: NodeId::stop(next),
                        cost: self.ride_cost(here, next),
                        action: Action::Ride,
                    });
                }
            }
        }
    }

    fn walk_edges(&self, from: Coordinate, out: &mut Vec<Edge>) {
        let max_walk = self.config.max_walk_km;

        for (stop, d) in self.index.within(from, max_walk) {
            out.push(Edge {
                to: NodeId::stop(stop),
                cost: self.config.walk_mins(d),
                action: Action::Walk,
            });
        }

        let to_end = distance_km(from, self.end);
        if to_end <= max_walk {
            out.push(Edge {
                to: NodeId::End,
                cost: self.config.walk_mins(to_end),
                action: Action::Walk,
            });
        }
    }

    /// Minutes to ride from `from` to the next stop `to`.
    ///
    /// Prefers the timetable offsets when both stops carry one and they
    /// increase; otherwise distance at line speed plus the dwell penalty.
    fn ride_cost(&self, from: &IndexedStop, to: &IndexedStop) -> f64 {
        if let (Some(a), Some(b)) = (from.time_from_start, to.time_from_start) {
            let scheduled = b - a;
            if scheduled.is_finite() && scheduled > 0.0 {
                return scheduled;
            }
        }
        self.config.ride_mins(distance_km(from.coord, to.coord)) + self.config.dwell_mins
    }
}
