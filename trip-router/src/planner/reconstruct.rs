//! Path reconstruction and segment merging.
//!
//! Turns the predecessor tree left by the search into a `Route`: raw edges
//! are recovered goal-to-start, reversed, and consecutive rides on one line
//! are merged into a single bus segment.

use std::collections::HashMap;

use crate::domain::{
    BusSegment, DomainError, LineRef, Network, Route, Segment, WalkSegment, distance_km,
};

use super::config::RouterConfig;
use super::graph::{Action, Graph, NodeId};

/// How the search reached a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predecessor {
    pub from: NodeId,
    pub action: Action,
    /// Line ridden, for `Action::Ride`.
    pub line: Option<LineRef>,
    /// Edge cost in minutes.
    pub cost: f64,
}

/// One edge of a found path, in travel order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub action: Action,
    pub line: Option<LineRef>,
    pub cost: f64,
}

/// Follow back-pointers from `goal` to the start, returning edges in travel
/// order. A node with no predecessor is treated as the root.
pub fn trace_path(predecessors: &HashMap<NodeId, Predecessor>, goal: NodeId) -> Vec<PathEdge> {
    let mut edges = Vec::new();
    let mut current = goal;

    // Strict improvement during relaxation keeps the tree acyclic; the bound
    // only guards against a corrupted map.
    while let Some(pred) = predecessors.get(&current) {
        if edges.len() > predecessors.len() {
            break;
        }
        edges.push(PathEdge {
            from: pred.from,
            to: current,
            action: pred.action,
            line: pred.line,
            cost: pred.cost,
        });
        current = pred.from;
    }

    edges.reverse();
    edges
}

/// Build a route from path edges.
///
/// Consecutive rides on the same line become one bus segment; every walk
/// edge becomes its own walk segment and closes any open ride. An empty
/// path (start already at the goal) becomes a single direct walk.
pub fn build_route(
    edges: &[PathEdge],
    graph: &Graph<'_>,
    network: &Network,
    config: &RouterConfig,
) -> Result<Route, DomainError> {
    if edges.is_empty() {
        let (start, end) = (graph.start(), graph.end());
        let walk = WalkSegment::new(start, end, config.walk_mins(distance_km(start, end)));
        return Route::new(vec![Segment::Walk(walk)]);
    }

    let mut segments = Vec::new();
    let mut open: Option<BusSegment> = None;

    for edge in edges {
        match (edge.action, edge.from, edge.line) {
            (Action::Ride, NodeId::Stop { line, index }, Some(edge_line)) if line == edge_line => {
                if let Some(bus) = open.as_mut() {
                    if bus.line_ref() == line && bus.alight_idx() == index {
                        bus.extend(edge.cost)?;
                        continue;
                    }
                }
                if let Some(bus) = open.take() {
                    segments.push(Segment::Bus(bus));
                }
                let line_arc = network
                    .line(line)
                    .ok_or(DomainError::InvalidLineRef)?
                    .clone();
                open = Some(BusSegment::new(line_arc, line, index, index.next(), edge.cost)?);
            }
            (Action::Ride, _, _) => {
                return Err(DomainError::InvalidSegment("ride must leave a stop on its line"));
            }
            (Action::Walk, from, _) => {
                if let Some(bus) = open.take() {
                    segments.push(Segment::Bus(bus));
                }
                let from = graph.coord(from).ok_or(DomainError::InvalidLineRef)?;
                let to = graph.coord(edge.to).ok_or(DomainError::InvalidLineRef)?;
                segments.push(Segment::Walk(WalkSegment::new(from, to, edge.cost)));
            }
        }
    }

    if let Some(bus) = open.take() {
        segments.push(Segment::Bus(bus));
    }

    Route::new(segments)
}
