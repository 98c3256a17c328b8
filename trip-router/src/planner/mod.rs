//! Trip planner using best-first search over an implicit graph.
//!
//! This module answers: "I'm standing here - how do I get over there
//! using the lines of this network and my own feet?"
//!
//! The graph is never materialised. Its nodes are the rider's start, the
//! destination, and every `(line, stop)` pair; edges are walks to nearby
//! stops and one-hop rides forward along a line, generated on demand.

mod config;
mod graph;
mod network_index;
mod reconstruct;
mod search;

pub use config::{
    ConfigError, ENV_LINE_SPEED, ENV_MAX_EXPANSIONS, ENV_MAX_WALK, ENV_WALK_SPEED, RouterConfig,
};
pub use graph::{Action, NodeId};
pub use network_index::{IndexedStop, NetworkIndex};
pub use search::{Router, SearchError, SearchOutcome, Termination};
