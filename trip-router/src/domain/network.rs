//! The transit network supplied to a routing call.

use std::collections::HashSet;
use std::sync::Arc;

use super::{DomainError, Line, LineId};

/// Position of a line within its `Network`.
///
/// Search nodes refer to lines by position rather than by `LineId` so that
/// node keys stay `Copy` and cheap to hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineRef(pub usize);

/// An immutable collection of lines.
///
/// Lines are held behind `Arc` so itineraries can reference them without
/// copying, and so one network can be shared by concurrent routing calls.
#[derive(Debug, Clone, Default)]
pub struct Network {
    lines: Vec<Arc<Line>>,
}

impl Network {
    /// Builds a network, rejecting duplicate line identifiers.
    pub fn new(lines: Vec<Line>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if !seen.insert(line.id.clone()) {
                return Err(DomainError::DuplicateLineId(line.id.clone()));
            }
        }

        Ok(Self {
            lines: lines.into_iter().map(Arc::new).collect(),
        })
    }

    /// A network with no lines.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns all lines in network order.
    pub fn lines(&self) -> &[Arc<Line>] {
        &self.lines
    }

    /// Returns the line at `line_ref`, if any.
    pub fn line(&self, line_ref: LineRef) -> Option<&Arc<Line>> {
        self.lines.get(line_ref.0)
    }

    /// Looks up a line by identifier.
    pub fn find(&self, id: &LineId) -> Option<(LineRef, &Arc<Line>)> {
        self.lines
            .iter()
            .enumerate()
            .find(|(_, line)| &line.id == id)
            .map(|(i, line)| (LineRef(i), line))
    }

    /// Iterates lines together with their positions.
    pub fn indexed_lines(&self) -> impl Iterator<Item = (LineRef, &Arc<Line>)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (LineRef(i), line))
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the network has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the total number of stops across all lines.
    pub fn stop_count(&self) -> usize {
        self.lines.iter().map(|line| line.len()).sum()
    }
}
