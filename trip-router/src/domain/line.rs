//! Transit lines and their stops.
//!
//! A `Line` is an ordered, directional sequence of `Stop`s. A `StopIndex`
//! gives an unambiguous position within a line, so a line that visits the
//! same place twice (loops, turnbacks) still has distinct stops.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Coordinate, DomainError};

/// Stable identifier of a line within a network (e.g. `"metro-1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Parse a line identifier. Surrounding whitespace is trimmed and empty
    /// identifiers are rejected.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyLineId);
        }
        Ok(LineId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index of a stop within its line's stop sequence.
///
/// # Examples
///
/// ```
/// use trip_router::domain::StopIndex;
///
/// let idx = StopIndex(2);
/// assert_eq!(idx.next(), StopIndex(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// Returns the next index along the line.
    pub fn next(self) -> Self {
        StopIndex(self.0 + 1)
    }
}

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vehicle type serving a line. Informational only; the router treats
/// every kind with the same speed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Metro,
    Tram,
    #[default]
    Bus,
    #[serde(other)]
    Other,
}

/// A boardable point on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coord: Coordinate,
    /// Scheduled minutes from the line's first stop, when the dataset has it.
    pub time_from_start: Option<f64>,
}

impl Stop {
    /// Creates a stop with no timetable information.
    pub fn new(name: impl Into<String>, coord: Coordinate) -> Self {
        Self {
            name: name.into(),
            coord,
            time_from_start: None,
        }
    }

    /// Attaches a scheduled offset from the start of the line, in minutes.
    pub fn with_time_from_start(mut self, minutes: f64) -> Self {
        self.time_from_start = Some(minutes);
        self
    }
}

/// A directional transit line.
///
/// # Invariants
///
/// - Stops are stored in traversal order; a stop's index is its position,
///   so indices are unique and strictly increasing by construction.
/// - The reverse direction is never implied. A line served both ways must
///   be supplied as two `Line`s.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub long_name: String,
    /// Display color, usually `#RRGGBB`.
    pub color: String,
    pub kind: LineKind,
    stops: Vec<Stop>,
}

impl Line {
    /// Creates a line from stops in traversal order.
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        long_name: impl Into<String>,
        color: impl Into<String>,
        kind: LineKind,
        stops: Vec<Stop>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            long_name: long_name.into(),
            color: color.into(),
            kind,
            stops,
        }
    }

    /// Returns all stops in traversal order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns the stop at `idx`, if any.
    pub fn stop(&self, idx: StopIndex) -> Option<&Stop> {
        self.stops.get(idx.0)
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the line has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns true if `idx` is the final stop (no onward ride).
    pub fn is_last(&self, idx: StopIndex) -> bool {
        idx.0 + 1 >= self.stops.len()
    }

    /// Iterates stops together with their indices.
    pub fn indexed_stops(&self) -> impl Iterator<Item = (StopIndex, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .map(|(i, stop)| (StopIndex(i), stop))
    }
}
