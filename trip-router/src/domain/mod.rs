//! Domain types for the trip router.
//!
//! This module contains the network model (lines, stops, coordinates) and
//! the itinerary types produced by the planner. Types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod coord;
mod error;
mod itinerary;
mod line;
mod network;

pub use coord::{Coordinate, EARTH_RADIUS_KM, distance_km};
pub use error::DomainError;
pub use itinerary::{BusSegment, Itinerary, MainLine, Route, Segment, WALKING_LABEL, WalkSegment};
pub use line::{Line, LineId, LineKind, Stop, StopIndex};
pub use network::{LineRef, Network};
