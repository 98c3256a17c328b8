//! Itinerary types.
//!
//! A `Route` is the time-independent result of a search: an ordered list
//! of walking and riding segments with a total duration. An `Itinerary` is
//! a route anchored at a departure time.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};

use super::{Coordinate, DomainError, Line, LineRef, Stop, StopIndex};

/// Label shown when an itinerary uses no line at all.
pub const WALKING_LABEL: &str = "Walking";

/// A walk between two points (start, stops, or destination).
#[derive(Debug, Clone, PartialEq)]
pub struct WalkSegment {
    pub from: Coordinate,
    pub to: Coordinate,
    /// Walking time in minutes (not rounded).
    pub duration_mins: f64,
}

impl WalkSegment {
    /// Creates a walk segment.
    pub fn new(from: Coordinate, to: Coordinate, duration_mins: f64) -> Self {
        Self {
            from,
            to,
            duration_mins,
        }
    }
}

/// A ride on one line across one or more consecutive hops.
///
/// Uses `Arc<Line>` so segments can be cloned freely without copying stops.
///
/// # Invariants
///
/// - `alight > board` (lines are only ridden forward)
/// - Both indices are valid for the line's stops
#[derive(Debug, Clone)]
pub struct BusSegment {
    line: Arc<Line>,
    line_ref: LineRef,
    board: StopIndex,
    alight: StopIndex,
    duration_mins: f64,
}

impl BusSegment {
    /// Construct a bus segment, validating the stop indices.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `alight <= board` or `alight` is past the last stop.
    pub fn new(
        line: Arc<Line>,
        line_ref: LineRef,
        board: StopIndex,
        alight: StopIndex,
        duration_mins: f64,
    ) -> Result<Self, DomainError> {
        if alight <= board {
            return Err(DomainError::InvalidSegment(
                "alight index must be after board index",
            ));
        }
        if alight.0 >= line.len() {
            return Err(DomainError::InvalidSegment("alight index out of bounds"));
        }

        Ok(Self {
            line,
            line_ref,
            board,
            alight,
            duration_mins,
        })
    }

    /// Returns the line ridden.
    pub fn line(&self) -> &Arc<Line> {
        &self.line
    }

    /// Returns the line's position in the network it was routed on.
    pub fn line_ref(&self) -> LineRef {
        self.line_ref
    }

    /// Returns the boarding stop index.
    pub fn board_idx(&self) -> StopIndex {
        self.board
    }

    /// Returns the alighting stop index.
    pub fn alight_idx(&self) -> StopIndex {
        self.alight
    }

    /// Returns the boarding stop.
    pub fn board_stop(&self) -> &Stop {
        // Safe: validated at construction
        &self.line.stops()[self.board.0]
    }

    /// Returns the alighting stop.
    pub fn alight_stop(&self) -> &Stop {
        // Safe: validated at construction
        &self.line.stops()[self.alight.0]
    }

    /// Returns all stops ridden through, board and alight inclusive.
    pub fn stops(&self) -> &[Stop] {
        &self.line.stops()[self.board.0..=self.alight.0]
    }

    /// Returns the number of stop-to-stop hops merged into this segment.
    pub fn hop_count(&self) -> usize {
        self.alight.0 - self.board.0
    }

    /// Returns the riding time in minutes (not rounded).
    pub fn duration_mins(&self) -> f64 {
        self.duration_mins
    }

    /// Returns the line's display color.
    pub fn color(&self) -> &str {
        &self.line.color
    }

    /// Extends the ride by one hop, adding `hop_mins` to the duration.
    pub(crate) fn extend(&mut self, hop_mins: f64) -> Result<(), DomainError> {
        let next = self.alight.next();
        if next.0 >= self.line.len() {
            return Err(DomainError::InvalidSegment("alight index out of bounds"));
        }
        self.alight = next;
        self.duration_mins += hop_mins;
        Ok(())
    }
}

impl PartialEq for BusSegment {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.line, &other.line)
            && self.board == other.board
            && self.alight == other.alight
            && self.duration_mins == other.duration_mins
    }
}

/// A segment of a route: either walking or riding.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Walk(WalkSegment),
    Bus(BusSegment),
}

impl Segment {
    /// Returns the duration of this segment in minutes (not rounded).
    pub fn duration_mins(&self) -> f64 {
        match self {
            Segment::Walk(walk) => walk.duration_mins,
            Segment::Bus(bus) => bus.duration_mins,
        }
    }

    /// Returns true if this is a walk segment.
    pub fn is_walk(&self) -> bool {
        matches!(self, Segment::Walk(_))
    }

    /// Returns true if this is a bus segment.
    pub fn is_bus(&self) -> bool {
        matches!(self, Segment::Bus(_))
    }

    /// Returns the bus segment, if this is one.
    pub fn as_bus(&self) -> Option<&BusSegment> {
        match self {
            Segment::Walk(_) => None,
            Segment::Bus(bus) => Some(bus),
        }
    }

    /// Returns the walk segment, if this is one.
    pub fn as_walk(&self) -> Option<&WalkSegment> {
        match self {
            Segment::Walk(walk) => Some(walk),
            Segment::Bus(_) => None,
        }
    }
}

/// The line used to label an itinerary.
#[derive(Debug, Clone)]
pub enum MainLine {
    /// The line of the first bus segment.
    Line(Arc<Line>),
    /// Placeholder for itineraries that never board a line.
    Walking,
}

impl MainLine {
    /// Short display label.
    pub fn label(&self) -> &str {
        match self {
            MainLine::Line(line) => &line.name,
            MainLine::Walking => WALKING_LABEL,
        }
    }

    /// Display color, if any.
    pub fn color(&self) -> Option<&str> {
        match self {
            MainLine::Line(line) => Some(&line.color),
            MainLine::Walking => None,
        }
    }

    /// Returns the line, unless this is the walking placeholder.
    pub fn line(&self) -> Option<&Arc<Line>> {
        match self {
            MainLine::Line(line) => Some(line),
            MainLine::Walking => None,
        }
    }
}

/// An ordered sequence of segments from start to end.
///
/// # Invariants
///
/// - At least one segment
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    segments: Vec<Segment>,
}

impl Route {
    /// Constructs a route from segments in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `segments` is empty.
    pub fn new(segments: Vec<Segment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyRoute);
        }
        Ok(Self { segments })
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns all bus segments in order.
    pub fn bus_segments(&self) -> impl Iterator<Item = &BusSegment> {
        self.segments.iter().filter_map(|s| s.as_bus())
    }

    /// Returns all walk segments in order.
    pub fn walk_segments(&self) -> impl Iterator<Item = &WalkSegment> {
        self.segments.iter().filter_map(|s| s.as_walk())
    }

    /// Returns the exact sum of segment durations in minutes.
    pub fn exact_duration_mins(&self) -> f64 {
        self.segments.iter().map(Segment::duration_mins).sum()
    }

    /// Returns the total duration in whole minutes, rounded up.
    pub fn total_mins(&self) -> i64 {
        self.exact_duration_mins().ceil() as i64
    }

    /// Returns the total duration, rounded up to whole minutes.
    pub fn total_duration(&self) -> Duration {
        Duration::minutes(self.total_mins())
    }

    /// Returns the total walking time in minutes (not rounded).
    pub fn walk_mins(&self) -> f64 {
        self.walk_segments().map(|w| w.duration_mins).sum()
    }

    /// Returns the number of line changes (bus segments - 1, or 0).
    pub fn change_count(&self) -> usize {
        self.bus_segments().count().saturating_sub(1)
    }

    /// Returns the line of the first bus segment, or the walking placeholder.
    pub fn main_line(&self) -> MainLine {
        self.bus_segments()
            .next()
            .map(|bus| MainLine::Line(bus.line.clone()))
            .unwrap_or(MainLine::Walking)
    }

    /// Anchors this route at a departure time.
    pub fn depart_at(self, departure: NaiveDateTime) -> Itinerary {
        let arrival = departure + self.total_duration();
        Itinerary {
            route: self,
            departure,
            arrival,
        }
    }
}

/// A route with departure and arrival times.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    route: Route,
    departure: NaiveDateTime,
    arrival: NaiveDateTime,
}

impl Itinerary {
    /// Returns the underlying route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[Segment] {
        self.route.segments()
    }

    /// Returns the departure time.
    pub fn departure(&self) -> NaiveDateTime {
        self.departure
    }

    /// Returns the arrival time (departure plus rounded total duration).
    pub fn arrival(&self) -> NaiveDateTime {
        self.arrival
    }

    /// Returns the total duration in whole minutes, rounded up.
    pub fn total_mins(&self) -> i64 {
        self.route.total_mins()
    }

    /// Returns the line used to label this itinerary.
    pub fn main_line(&self) -> MainLine {
        self.route.main_line()
    }
}
