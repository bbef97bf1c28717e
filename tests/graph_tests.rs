mod common;

use common::{prepared, prepared_with, visit};
use ridegraph::{prelude::*, router};

#[test]
fn single_trip_builds_ordered_line() {
    let finder = prepared(
        vec![
            visit("T", "S3", "08:12:00", 3),
            visit("T", "S1", "08:00:00", 1),
            visit("T", "S2", "08:05:00", 2),
        ],
        Vec::new(),
    );
    let graph = finder.graph().unwrap();
    assert_eq!(graph.line_stop_ids("T").unwrap(), vec!["S1", "S2", "S3"]);
    assert_eq!(graph.travel_time("T", "S1", "S2"), Some(5));
    assert_eq!(graph.travel_time("T", "S2", "S3"), Some(7));
    assert_eq!(graph.neighbours_of("S1").unwrap(), vec!["S2"]);
    // Trip edges are directed
    assert!(graph.neighbours_of("S3").unwrap().is_empty());
    assert_eq!(graph.travel_time("T", "S2", "S1"), None);
}

#[test]
fn travel_time_wraps_past_midnight() {
    let finder = prepared(
        vec![
            visit("Night", "A", "23:58:00", 1),
            visit("Night", "B", "00:02:00", 2),
        ],
        Vec::new(),
    );
    let graph = finder.graph().unwrap();
    assert_eq!(graph.travel_time("Night", "A", "B"), Some(4));
}

#[test]
fn adjacency_is_deduplicated_in_insertion_order() {
    let finder = prepared(
        vec![
            visit("T1", "A", "08:00:00", 1),
            visit("T1", "B", "08:05:00", 2),
            visit("T2", "A", "09:00:00", 1),
            visit("T2", "C", "09:04:00", 2),
            visit("T3", "A", "10:00:00", 1),
            visit("T3", "B", "10:05:00", 2),
        ],
        Vec::new(),
    );
    let graph = finder.graph().unwrap();
    assert_eq!(graph.neighbours_of("A").unwrap(), vec!["B", "C"]);
    assert_eq!(graph.lines().len(), 3);
}

#[test]
fn variants_get_two_minute_edges_without_transfer_rows() {
    let finder = prepared(
        vec![
            visit("Up", "101N", "08:00:00", 1),
            visit("Up", "102N", "08:03:00", 2),
            visit("Down", "102S", "08:10:00", 1),
            visit("Down", "101S", "08:13:00", 2),
        ],
        Vec::new(),
    );
    let graph = finder.graph().unwrap();
    assert_eq!(graph.transfer_time("101N", "101S"), Some(2));
    assert_eq!(graph.transfer_time("101S", "101N"), Some(2));
    assert_eq!(graph.transfer_time("102N", "102S"), Some(2));
    assert!(graph.neighbours_of("101S").unwrap().contains(&"101N"));
    assert_eq!(graph.transfer_time("101N", "102N"), None);
}

#[test]
fn variant_edges_override_recorded_transfer() {
    let finder = prepared(
        vec![
            visit("Up", "101N", "08:00:00", 1),
            visit("Down", "101S", "08:10:00", 1),
        ],
        vec![TransferEdge::new("101N", "101S").with_min_transfer_time(600)],
    );
    let graph = finder.graph().unwrap();
    assert_eq!(graph.transfer_time("101N", "101S"), Some(2));
}

#[test]
fn variant_suffixes_are_configurable() {
    let config = Config::default()
        .with_variant_suffixes(&['A', 'B'])
        .with_variant_transfer_minutes(4);
    let finder = prepared_with(
        vec![
            visit("T", "7A", "08:00:00", 1),
            visit("T", "7B", "08:05:00", 2),
            visit("U", "8N", "08:00:00", 1),
            visit("U", "8S", "08:05:00", 2),
        ],
        Vec::new(),
        config,
    );
    let graph = finder.graph().unwrap();
    assert_eq!(graph.transfer_time("7B", "7A"), Some(4));
    assert_eq!(graph.transfer_time("8S", "8N"), None);
}

#[test]
fn transfer_minutes_round_and_default() {
    let finder = prepared(
        vec![visit("T", "A", "08:00:00", 1), visit("T", "B", "08:05:00", 2)],
        vec![
            TransferEdge::new("B", "C").with_min_transfer_time(90),
            TransferEdge::new("C", "D"),
        ],
    );
    let graph = finder.graph().unwrap();
    assert_eq!(graph.transfer_time("B", "C"), Some(2));
    assert_eq!(graph.transfer_time("C", "D"), Some(5));
    assert_eq!(graph.neighbours_of("C").unwrap(), vec!["D"]);
}

#[test]
fn default_transfer_minutes_is_configurable() {
    let finder = prepared_with(
        vec![visit("T", "A", "08:00:00", 1), visit("T", "B", "08:05:00", 2)],
        vec![TransferEdge::new("B", "C")],
        Config::default().with_default_transfer_minutes(8),
    );
    assert_eq!(finder.graph().unwrap().transfer_time("B", "C"), Some(8));
}

#[test]
fn malformed_arrival_aborts_ingestion() {
    let mut finder = RouteFinder::new(Snapshot::new(
        Vec::new(),
        vec![
            visit("T", "A", "08:00:00", 1),
            visit("T", "B", "8:xx", 2),
        ],
        Vec::new(),
    ));
    finder.ingest_stops().unwrap();
    let err = finder.ingest_stop_times().unwrap_err();
    match err {
        router::Error::MalformedSchedule {
            trip_id,
            stop_id,
            value,
        } => {
            assert_eq!(trip_id, "T");
            assert_eq!(stop_id, "B");
            assert_eq!(value, "8:xx");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(finder.stage(), Stage::StopsLoaded);
}

#[test]
fn ingestion_steps_must_run_in_order() {
    let mut finder = RouteFinder::new(Snapshot::default());
    assert!(matches!(
        finder.ingest_stop_times(),
        Err(router::Error::OutOfOrder {
            expected: Stage::StopsLoaded,
            found: Stage::Empty,
        })
    ));
    finder.ingest_stops().unwrap();
    assert!(matches!(
        finder.ingest_transfers(),
        Err(router::Error::OutOfOrder {
            expected: Stage::StopTimesLoaded,
            found: Stage::StopsLoaded,
        })
    ));
    assert!(matches!(
        finder.ingest_stops(),
        Err(router::Error::OutOfOrder { .. })
    ));
    finder.ingest_stop_times().unwrap();
    finder.ingest_transfers().unwrap();
    assert_eq!(finder.stage(), Stage::TransfersLoaded);
}

#[test]
fn graph_is_unavailable_until_transfers_are_in() {
    let mut finder = RouteFinder::new(Snapshot::default());
    assert!(matches!(
        finder.graph(),
        Err(router::Error::NotReady(Stage::Empty))
    ));
    finder.ingest_stops().unwrap();
    finder.ingest_stop_times().unwrap();
    assert!(matches!(
        finder.find_paths(&["A"], &["B"], 1),
        Err(router::Error::NotReady(Stage::StopTimesLoaded))
    ));
}

#[test]
fn builder_can_be_driven_directly() {
    let mut builder = GraphBuilder::new(Snapshot::new(
        vec![Stop::new("A", "Alpha")],
        vec![visit("T", "A", "08:00", 1), visit("T", "B", "08:07", 2)],
        Vec::new(),
    ));
    assert_eq!(builder.ingest_stops().unwrap().len(), 1);
    builder.ingest_stop_times().unwrap();
    builder.ingest_transfers().unwrap();
    assert_eq!(builder.stop_name("A"), Some("Alpha"));
    let graph = builder.into_graph().unwrap();
    assert_eq!(graph.stop_count(), 2);
    assert_eq!(graph.travel_time("T", "A", "B"), Some(7));
}

#[test]
fn visits_sort_by_sequence_keeping_ties_in_input_order() {
    let finder = prepared(
        vec![
            visit("T", "C", "08:10:00", 2),
            visit("T", "A", "08:00:00", 1),
            visit("T", "B", "08:05:00", 1),
        ],
        Vec::new(),
    );
    let graph = finder.graph().unwrap();
    assert_eq!(graph.line_stop_ids("T").unwrap(), vec!["A", "B", "C"]);
    assert_eq!(graph.travel_time("T", "B", "C"), Some(5));
}

#[test]
fn first_malformed_row_in_input_order_is_reported() {
    for _ in 0..20 {
        let mut finder = RouteFinder::new(Snapshot::new(
            Vec::new(),
            vec![
                visit("U", "X", "08:00:00", 1),
                visit("U", "Y", "bad-1", 2),
                visit("T", "A", "08:00:00", 1),
                visit("T", "B", "bad-2", 2),
                visit("T", "C", "bad-3", 3),
            ],
            Vec::new(),
        ));
        finder.ingest_stops().unwrap();
        match finder.ingest_stop_times() {
            Err(router::Error::MalformedSchedule { trip_id, value, .. }) => {
                assert_eq!(trip_id, "U");
                assert_eq!(value, "bad-1");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}

#[test]
fn extreme_times_do_not_overflow() {
    let finder = prepared(
        vec![
            visit("T", "A", "0:00", 1),
            visit("T", "B", "1193046:28:15", 2),
        ],
        vec![TransferEdge::new("B", "C").with_min_transfer_time(u32::MAX)],
    );
    let graph = finder.graph().unwrap();
    assert_eq!(graph.travel_time("T", "A", "B"), Some(u32::MAX / 60));
    assert_eq!(graph.transfer_time("B", "C"), Some(u32::MAX / 60));
}
