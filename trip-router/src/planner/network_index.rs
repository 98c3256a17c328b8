//! Flat stop index over a network.
//!
//! The search repeatedly asks "which stops are within walking distance of
//! this point?". Flattening every line's stops into one vector once per
//! routing call answers that with a single linear scan instead of walking
//! the line structure on every expansion.

use crate::domain::{Coordinate, LineRef, Network, StopIndex, distance_km};

/// A stop tagged with its owning line and position along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedStop {
    pub line: LineRef,
    pub index: StopIndex,
    pub coord: Coordinate,
    pub time_from_start: Option<f64>,
}

/// Every stop of a network in network order (line order, then stop order).
#[derive(Debug, Clone, Default)]
pub struct NetworkIndex {
    stops: Vec<IndexedStop>,

    /// Position in `stops` of each line's first stop, by `LineRef`.
    line_offsets: Vec<usize>,

    /// Number of stops on each line, by `LineRef`.
    line_lens: Vec<usize>,
}

impl NetworkIndex {
    /// Build the index in O(total stop count).
    pub fn build(network: &Network) -> Self {
        let mut stops = Vec::with_capacity(network.stop_count());
        let mut line_offsets = Vec::with_capacity(network.len());
        let mut line_lens = Vec::with_capacity(network.len());

        for (line_ref, line) in network.indexed_lines() {
            line_offsets.push(stops.len());
            line_lens.push(line.len());

            for (index, stop) in line.indexed_stops() {
                stops.push(IndexedStop {
                    line: line_ref,
                    index,
                    coord: stop.coord,
                    time_from_start: stop.time_from_start,
                });
            }
        }

        Self {
            stops,
            line_offsets,
            line_lens,
        }
    }

    /// Get the stop at `(line, index)`.
    pub fn get(&self, line: LineRef, index: StopIndex) -> Option<&IndexedStop> {
        let len = *self.line_lens.get(line.0)?;
        if index.0 >= len {
            return None;
        }
        self.stops.get(self.line_offsets[line.0] + index.0)
    }

    /// Get the stop following `(line, index)` on the same line, if any.
    pub fn next_on_line(&self, line: LineRef, index: StopIndex) -> Option<&IndexedStop> {
        self.get(line, index.next())
    }

    /// Stops within `radius_km` of `point` (inclusive), with their distances.
    ///
    /// Yields in index order so callers see a deterministic sequence.
    pub fn within(
        &self,
        point: Coordinate,
        radius_km: f64,
    ) -> impl Iterator<Item = (&IndexedStop, f64)> + '_ {
        self.stops.iter().filter_map(move |stop| {
            let d = distance_km(point, stop.coord);
            (d <= radius_km).then_some((stop, d))
        })
    }

    /// All indexed stops.
    pub fn stops(&self) -> &[IndexedStop] {
        &self.stops
    }

    /// Get the total number of indexed stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the network has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
