//! Data transfer objects for the HTTP API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{BusSegment, Coordinate, Itinerary, Line, LineKind, Segment, Stop, WalkSegment};
use crate::planner::SearchOutcome;

/// Timestamp format used in responses.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Where the rider is
    pub start: Coordinate,

    /// Where the rider wants to go
    pub end: Coordinate,

    /// Departure time; now when omitted
    #[serde(default)]
    pub depart_at: Option<NaiveDateTime>,
}

/// Response for trip planning.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Zero or one itineraries
    pub itineraries: Vec<ItineraryResult>,

    /// Why the search stopped
    pub outcome: String,

    /// Number of search nodes expanded
    pub nodes_expanded: usize,
}

/// An itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// Itinerary segments
    pub segments: Vec<SegmentResult>,

    /// Departure time
    pub departure_time: String,

    /// Arrival time
    pub arrival_time: String,

    /// Total duration in whole minutes (rounded up)
    pub duration_mins: i64,

    /// Number of changes between lines
    pub changes: usize,

    /// Line used to label the itinerary
    pub main_line: MainLineResult,
}

/// A segment of an itinerary.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum SegmentResult {
    Walk(WalkResult),
    Bus(BusResult),
}

/// A walking segment.
#[derive(Debug, Serialize)]
pub struct WalkResult {
    pub from: Coordinate,
    pub to: Coordinate,

    /// Duration in minutes (not rounded)
    pub duration_mins: f64,
}

/// A ride along one line.
#[derive(Debug, Serialize)]
pub struct BusResult {
    pub line_id: String,
    pub line: String,
    pub long_name: String,
    pub color: String,
    pub kind: LineKind,

    /// Boarding stop
    pub board: StopInfo,

    /// Alighting stop
    pub alight: StopInfo,

    /// Stops passed through without alighting
    pub intermediate_stops: Vec<StopInfo>,

    /// Duration in minutes (not rounded)
    pub duration_mins: f64,
}

/// Stop information for display.
#[derive(Debug, Serialize)]
pub struct StopInfo {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// The line an itinerary is labelled with.
#[derive(Debug, Serialize)]
pub struct MainLineResult {
    pub name: String,
    pub color: Option<String>,
}

/// Response listing the network's lines.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineSummary>,
}

/// Summary of one line.
#[derive(Debug, Serialize)]
pub struct LineSummary {
    pub id: String,
    pub name: String,
    pub long_name: String,
    pub color: String,
    pub kind: LineKind,
    pub stop_count: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RouteResponse {
    /// Create from a search outcome, anchoring any route at `depart_at`.
    pub fn from_outcome(outcome: &SearchOutcome, depart_at: NaiveDateTime) -> Self {
        Self {
            itineraries: outcome
                .itineraries(depart_at)
                .iter()
                .map(ItineraryResult::from_itinerary)
                .collect(),
            outcome: outcome.termination.as_str().to_string(),
            nodes_expanded: outcome.nodes_expanded,
        }
    }
}

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let segments = itinerary
            .segments()
            .iter()
            .map(|s| match s {
                Segment::Walk(walk) => SegmentResult::Walk(WalkResult::from_walk(walk)),
                Segment::Bus(bus) => SegmentResult::Bus(BusResult::from_bus(bus)),
            })
            .collect();

        let main_line = itinerary.main_line();

        Self {
            segments,
            departure_time: format_time(itinerary.departure()),
            arrival_time: format_time(itinerary.arrival()),
            duration_mins: itinerary.total_mins(),
            changes: itinerary.route().change_count(),
            main_line: MainLineResult {
                name: main_line.label().to_string(),
                color: main_line.color().map(str::to_string),
            },
        }
    }
}

impl WalkResult {
    /// Create from a domain WalkSegment.
    pub fn from_walk(walk: &WalkSegment) -> Self {
        Self {
            from: walk.from,
            to: walk.to,
            duration_mins: walk.duration_mins,
        }
    }
}

impl BusResult {
    /// Create from a domain BusSegment.
    pub fn from_bus(bus: &BusSegment) -> Self {
        let line = bus.line();
        let stops = bus.stops();

        // Exclude board and alight
        let intermediate_stops = stops[1..stops.len() - 1]
            .iter()
            .map(StopInfo::from_stop)
            .collect();

        Self {
            line_id: line.id.to_string(),
            line: line.name.clone(),
            long_name: line.long_name.clone(),
            color: bus.color().to_string(),
            kind: line.kind,
            board: StopInfo::from_stop(bus.board_stop()),
            alight: StopInfo::from_stop(bus.alight_stop()),
            intermediate_stops,
            duration_mins: bus.duration_mins(),
        }
    }
}

impl StopInfo {
    fn from_stop(stop: &Stop) -> Self {
        Self {
            name: stop.name.clone(),
            lat: stop.coord.lat,
            lng: stop.coord.lng,
        }
    }
}

impl LineSummary {
    /// Create from a domain Line.
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            long_name: line.long_name.clone(),
            color: line.color.clone(),
            kind: line.kind,
            stop_count: line.len(),
        }
    }
}

fn format_time(time: NaiveDateTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
