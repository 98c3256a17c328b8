//! Scenario tests for the route search.

use super::*;
use crate::domain::{Line, LineId, LineKind, LineRef, Segment, Stop, StopIndex, distance_km};
use chrono::{Duration, NaiveDate};

fn depart() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng)
}

fn make_line(id: &str, coords: &[(f64, f64)]) -> Line {
    let stops = coords
        .iter()
        .enumerate()
        .map(|(i, (lat, lng))| Stop::new(format!("{id}-{i}"), coord(*lat, *lng)))
        .collect();
    Line::new(
        LineId::parse(id).unwrap(),
        id,
        format!("{id} first <-> {id} last"),
        "#007aff",
        LineKind::Bus,
        stops,
    )
}

fn network(lines: Vec<Line>) -> Network {
    Network::new(lines).unwrap()
}

/// One line along the equator: S0(0,0), S1(0,0.01), S2(0,0.02), ...
fn straight_line(stops: usize) -> Network {
    let coords: Vec<_> = (0..stops).map(|i| (0.0, i as f64 * 0.01)).collect();
    network(vec![make_line("L", &coords)])
}

fn router() -> Router {
    Router::new(RouterConfig::default())
}

#[test]
fn rides_three_stop_line() {
    let net = straight_line(3);
    let itineraries = router()
        .route(coord(0.0, 0.0), coord(0.0, 0.02), &net, depart())
        .unwrap();

    assert_eq!(itineraries.len(), 1);
    let itinerary = &itineraries[0];

    let buses: Vec<_> = itinerary.route().bus_segments().collect();
    assert_eq!(buses.len(), 1);
    let bus = buses[0];
    assert_eq!(bus.board_idx(), StopIndex(0));
    assert_eq!(bus.alight_idx(), StopIndex(2));
    assert_eq!(bus.hop_count(), 2);
    assert_eq!(bus.board_stop().name, "L-0");
    assert_eq!(bus.alight_stop().name, "L-2");
    assert_eq!(bus.color(), "#007aff");

    // 2 × (1.112 km at 25 km/h + 1 min dwell) ≈ 7.34
    let hop = distance_km(coord(0.0, 0.0), coord(0.0, 0.01));
    let expected = 2.0 * (hop / 25.0 * 60.0 + 1.0);
    assert!((bus.duration_mins() - expected).abs() < 1e-9);
    assert!((bus.duration_mins() - 7.34).abs() < 0.05);

    // Start coincides with S0, so any walk is zero-length
    assert!(itinerary.route().walk_mins() < 1e-9);

    assert_eq!(itinerary.total_mins(), 8);
    assert_eq!(itinerary.arrival(), depart() + Duration::minutes(8));
    assert_eq!(itinerary.main_line().label(), "L");
}

#[test]
fn consecutive_hops_merge_into_one_segment() {
    let net = straight_line(4);
    let outcome = router()
        .search(coord(0.0, 0.0), coord(0.0, 0.03), &net)
        .unwrap();

    assert_eq!(outcome.termination, Termination::Reached);
    let route = outcome.route.unwrap();

    let buses: Vec<_> = route.bus_segments().collect();
    assert_eq!(buses.len(), 1);
    assert_eq!(buses[0].hop_count(), 3);
    assert_eq!(buses[0].alight_idx(), StopIndex(3));
}

#[test]
fn identical_start_and_end_is_single_walk() {
    let net = straight_line(3);
    let here = coord(36.7525, 3.0420);
    let itineraries = router().route(here, here, &net, depart()).unwrap();

    assert_eq!(itineraries.len(), 1);
    let segments = itineraries[0].segments();
    assert_eq!(segments.len(), 1);
    assert!(segments[0].is_walk());
    assert_eq!(itineraries[0].total_mins(), 0);
    assert_eq!(itineraries[0].arrival(), depart());
    assert_eq!(itineraries[0].main_line().label(), "Walking");
    assert_eq!(itineraries[0].main_line().color(), None);
}

#[test]
fn walkable_distance_is_single_walk() {
    let start = coord(0.0, 0.0);
    let end = coord(0.0, 0.0045);
    let d = distance_km(start, end);
    assert!(d > 0.1 && d < 0.8);

    let itineraries = router()
        .route(start, end, &Network::empty(), depart())
        .unwrap();

    assert_eq!(itineraries.len(), 1);
    let segments = itineraries[0].segments();
    assert_eq!(segments.len(), 1);

    let walk = segments[0].as_walk().unwrap();
    assert_eq!(walk.from, start);
    assert_eq!(walk.to, end);
    assert_eq!(itineraries[0].total_mins(), (d / 5.0 * 60.0).ceil() as i64);
}

#[test]
fn unreachable_line_gives_empty_result() {
    // Stops ~11 km north of both endpoints; endpoints ~5.6 km apart
    let net = network(vec![make_line(
        "FAR",
        &[(0.1, 0.0), (0.1, 0.01), (0.1, 0.02)],
    )]);

    let outcome = router()
        .search(coord(0.0, 0.0), coord(0.0, 0.05), &net)
        .unwrap();
    assert!(outcome.route.is_none());
    assert_eq!(outcome.termination, Termination::Exhausted);

    let itineraries = router()
        .route(coord(0.0, 0.0), coord(0.0, 0.05), &net, depart())
        .unwrap();
    assert!(itineraries.is_empty());
}

#[test]
fn empty_network_far_apart_gives_empty_result() {
    let outcome = router()
        .search(coord(0.0, 0.0), coord(0.0, 0.05), &Network::empty())
        .unwrap();

    assert!(outcome.route.is_none());
    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(outcome.nodes_expanded, 1);
}

#[test]
fn destination_off_network_gives_empty_result() {
    // Start is on the line, but the end is nowhere near any stop
    let net = straight_line(3);
    let outcome = router()
        .search(coord(0.0, 0.0), coord(0.5, 0.5), &net)
        .unwrap();

    assert!(outcome.route.is_none());
    assert_eq!(outcome.termination, Termination::Exhausted);
}

#[test]
fn lines_are_not_ridden_backwards() {
    // Start at the last stop, end at the first: only the reverse direction
    // would connect them, and it was not supplied
    let net = straight_line(3);
    let outcome = router()
        .search(coord(0.0, 0.02), coord(0.0, 0.0), &net)
        .unwrap();

    assert!(outcome.route.is_none());
}

#[test]
fn reverse_line_supplied_separately_is_used() {
    let net = network(vec![
        make_line("OUT", &[(0.0, 0.0), (0.0, 0.01), (0.0, 0.02)]),
        make_line("BACK", &[(0.0, 0.02), (0.0, 0.01), (0.0, 0.0)]),
    ]);
    let route = router()
        .search(coord(0.0, 0.02), coord(0.0, 0.0), &net)
        .unwrap()
        .route
        .unwrap();

    let bus = route.bus_segments().next().unwrap();
    assert_eq!(bus.line().id.as_str(), "BACK");
    assert_eq!(bus.line_ref(), LineRef(1));
}

#[test]
fn transfer_between_lines() {
    // A runs east along the equator, B runs north from A's last stop
    let net = network(vec![
        make_line("A", &[(0.0, 0.0), (0.0, 0.01), (0.0, 0.02)]),
        make_line("B", &[(0.0, 0.02), (0.01, 0.02), (0.02, 0.02)]),
    ]);
    let route = router()
        .search(coord(0.0, 0.0), coord(0.02, 0.02), &net)
        .unwrap()
        .route
        .unwrap();

    let lines: Vec<_> = route.bus_segments().map(|b| b.line().id.as_str()).collect();
    assert_eq!(lines, vec!["A", "B"]);
    assert_eq!(route.change_count(), 1);
    assert_eq!(route.main_line().label(), "A");

    // Walk (to A), bus A, walk (transfer), bus B
    let kinds: Vec<_> = route.segments().iter().map(Segment::is_bus).collect();
    assert_eq!(kinds, vec![false, true, false, true]);

    for bus in route.bus_segments() {
        assert!(bus.alight_idx() > bus.board_idx());
    }
}

#[test]
fn walks_to_board_and_from_alight() {
    // Endpoints ~0.33 km off the line at each end
    let net = straight_line(4);
    let start = coord(0.003, 0.0);
    let end = coord(-0.003, 0.03);

    let route = router().search(start, end, &net).unwrap().route.unwrap();
    let segments = route.segments();

    assert!(segments.first().unwrap().is_walk());
    assert!(segments.last().unwrap().is_walk());
    assert_eq!(route.bus_segments().count(), 1);

    let walk_in = segments[0].as_walk().unwrap();
    assert_eq!(walk_in.from, start);
    assert_eq!(walk_in.to, coord(0.0, 0.0));

    let walk_out = segments.last().unwrap().as_walk().unwrap();
    assert_eq!(walk_out.to, end);
}

#[test]
fn timetable_offsets_drive_ride_time() {
    let stops = (0..3)
        .map(|i| {
            Stop::new(format!("T{i}"), coord(0.0, i as f64 * 0.01))
                .with_time_from_start(i as f64 * 3.0)
        })
        .collect();
    let line = Line::new(
        LineId::parse("T").unwrap(),
        "T",
        "T0 <-> T2",
        "#ff0000",
        LineKind::Tram,
        stops,
    );
    let net = network(vec![line]);

    let route = router()
        .search(coord(0.0, 0.0), coord(0.0, 0.02), &net)
        .unwrap()
        .route
        .unwrap();

    let bus = route.bus_segments().next().unwrap();
    assert_eq!(bus.duration_mins(), 6.0);
    assert_eq!(route.total_mins(), 6);
}

#[test]
fn expansion_cap_zero_finds_nothing() {
    let config = RouterConfig {
        max_expansions: 0,
        ..RouterConfig::default()
    };
    let here = coord(0.0, 0.0);
    let outcome = Router::new(config)
        .search(here, here, &Network::empty())
        .unwrap();

    assert!(outcome.route.is_none());
    assert_eq!(outcome.termination, Termination::ExpansionCapReached);
    assert_eq!(outcome.nodes_expanded, 0);
}

#[test]
fn expansion_cap_stops_long_search() {
    // The three-stop ride needs four dequeues (start, S0, S1, S2)
    let net = straight_line(3);
    let capped = Router::new(RouterConfig {
        max_expansions: 3,
        ..RouterConfig::default()
    });

    let outcome = capped
        .search(coord(0.0, 0.0), coord(0.0, 0.02), &net)
        .unwrap();
    assert!(outcome.route.is_none());
    assert_eq!(outcome.termination, Termination::ExpansionCapReached);
    assert_eq!(outcome.nodes_expanded, 3);

    let roomy = Router::new(RouterConfig {
        max_expansions: 4,
        ..RouterConfig::default()
    });
    let outcome = roomy
        .search(coord(0.0, 0.0), coord(0.0, 0.02), &net)
        .unwrap();
    assert_eq!(outcome.termination, Termination::Reached);
    assert_eq!(outcome.nodes_expanded, 4);
}

#[test]
fn nan_coordinates_do_not_panic() {
    let net = straight_line(3);
    let outcome = router()
        .search(coord(f64::NAN, 0.0), coord(0.0, 0.02), &net)
        .unwrap();

    assert!(outcome.route.is_none());
}

#[test]
fn repeated_calls_are_identical() {
    let net = network(vec![
        make_line("A", &[(0.0, 0.0), (0.0, 0.01), (0.0, 0.02)]),
        // Parallel line with identical geometry: ties must break the same way
        make_line("A2", &[(0.0, 0.0), (0.0, 0.01), (0.0, 0.02)]),
        make_line("B", &[(0.0, 0.02), (0.01, 0.02), (0.02, 0.02)]),
    ]);
    let r = router();

    let first = r.route(coord(0.0, 0.0), coord(0.02, 0.02), &net, depart()).unwrap();
    let second = r.route(coord(0.0, 0.0), coord(0.02, 0.02), &net, depart()).unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);

    let lines: Vec<_> = first[0]
        .route()
        .bus_segments()
        .map(|b| b.line().id.as_str())
        .collect();
    assert_eq!(lines, vec!["A", "B"]);
}

#[test]
fn prebuilt_index_matches_fresh_search() {
    let net = straight_line(4);
    let index = NetworkIndex::build(&net);
    let r = router();

    let fresh = r.search(coord(0.0, 0.0), coord(0.0, 0.03), &net).unwrap();
    let indexed = r
        .search_indexed(coord(0.0, 0.0), coord(0.0, 0.03), &net, &index)
        .unwrap();

    assert_eq!(fresh.route, indexed.route);
    assert_eq!(fresh.nodes_expanded, indexed.nodes_expanded);
}

#[test]
fn termination_names() {
    assert_eq!(Termination::Reached.as_str(), "reached");
    assert_eq!(Termination::Exhausted.as_str(), "exhausted");
    assert_eq!(
        Termination::ExpansionCapReached.as_str(),
        "expansion_cap_reached"
    );
}
