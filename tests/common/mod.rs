#![allow(dead_code)]

use ridegraph::prelude::*;

pub fn visit(trip_id: &str, stop_id: &str, arrival: &str, sequence: u32) -> ScheduledStopVisit {
    ScheduledStopVisit::new(trip_id, stop_id, arrival, sequence)
}

/// Builds a searchable finder straight from rows, no stops needed.
pub fn prepared(visits: Vec<ScheduledStopVisit>, transfers: Vec<TransferEdge>) -> RouteFinder {
    RouteFinder::new(Snapshot::new(Vec::new(), visits, transfers))
        .prepare()
        .unwrap()
}

pub fn prepared_with(
    visits: Vec<ScheduledStopVisit>,
    transfers: Vec<TransferEdge>,
    config: Config,
) -> RouteFinder {
    RouteFinder::new(Snapshot::new(Vec::new(), visits, transfers))
        .with_config(config)
        .prepare()
        .unwrap()
}

pub fn ids(path: &PathResult) -> Vec<&str> {
    path.path.iter().map(|id| &**id).collect()
}

/// A small city network:
///
/// Red runs Main St -> Union Station track 1 -> Harbor View, Blue runs
/// Main St West -> Union Station track 2, and a one-minute walk links the
/// two tracks.
pub fn city() -> MemorySource {
    MemorySource::new()
        .with_stops(city_stops())
        .with_visits(vec![
            visit("Red", "1", "08:00:00", 1),
            visit("Red", "31", "08:06:00", 2),
            visit("Red", "4", "08:15:00", 3),
            visit("Blue", "2", "08:00:00", 1),
            visit("Blue", "32", "08:03:00", 2),
        ])
        .with_transfers(vec![
            TransferEdge::new("32", "31").with_min_transfer_time(60),
        ])
}

pub fn city_stops() -> Vec<Stop> {
    vec![
        Stop::new("1", "Main St"),
        Stop::new("2", "Main St—West"),
        Stop::station("3", "Union Station"),
        Stop::new("31", "Track 1").with_parent("3"),
        Stop::new("32", "Track 2").with_parent("3"),
        Stop::new("4", "Harbor View"),
    ]
}
