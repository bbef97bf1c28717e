mod common;

use common::{city, city_stops, ids};
use ridegraph::{
    prelude::*,
    repository::source,
    router::{self, Stage},
};

#[test]
fn routes_between_station_names() {
    let finder = RouteFinder::from_source(&city()).unwrap().prepare().unwrap();
    let paths = finder.find_routes("Main St", "Harbor View", 3).unwrap();
    assert_eq!(paths.len(), 2);

    assert_eq!(ids(&paths[0]), vec!["2", "32", "31", "4"]);
    assert_eq!(paths[0].total_time, 13);
    assert_eq!(paths[0].transfers, 1);
    assert_eq!(&*paths[0].transfer_points[0], "32");

    assert_eq!(ids(&paths[1]), vec!["1", "31", "4"]);
    assert_eq!(paths[1].total_time, 15);
    assert_eq!(paths[1].transfers, 0);
}

#[test]
fn unknown_station_name_is_reported() {
    let finder = RouteFinder::from_source(&city()).unwrap().prepare().unwrap();
    match finder.find_routes("Nowhere", "Harbor View", 3) {
        Err(router::Error::StationNotFound(name)) => assert_eq!(name, "Nowhere"),
        other => panic!("unexpected result {other:?}"),
    }
    assert!(matches!(
        finder.find_routes("Main St", "Nowhere", 3),
        Err(router::Error::StationNotFound(_))
    ));
}

#[test]
fn station_name_echoes_unknown_ids() {
    let finder = RouteFinder::from_source(&city()).unwrap().prepare().unwrap();
    assert_eq!(finder.station_name("31"), "Track 1");
    assert_eq!(finder.station_name("zzz"), "zzz");
}

#[test]
fn ingest_stops_returns_loaded_stops() {
    let mut finder = RouteFinder::from_source(&city()).unwrap();
    assert_eq!(finder.stage(), Stage::Empty);
    assert!(matches!(
        finder.resolve("Main St"),
        Err(router::Error::NotReady(Stage::Empty))
    ));
    assert_eq!(finder.ingest_stops().unwrap().len(), 6);
    assert_eq!(finder.resolve("Main St").unwrap().len(), 2);
    let suggestions = finder.suggest("harbr view", 1).unwrap();
    assert_eq!(&*suggestions[0].id, "4");
}

#[test]
fn resolve_station_names_reads_only_stops() {
    let resolution =
        RouteFinder::resolve_station_names(&city(), "Union Station", "harbor view").unwrap();
    assert_eq!(resolution.origin_stop_ids.len(), 3);
    assert_eq!(&*resolution.destination_stop_ids[0], "4");
    assert_eq!(resolution.stops.len(), city_stops().len());
}

struct BrokenSource;

impl Source for BrokenSource {
    fn stops(&self) -> Result<Vec<Stop>, source::Error> {
        Ok(city_stops())
    }

    fn stop_visits(&self) -> Result<Vec<ScheduledStopVisit>, source::Error> {
        Err(source::Error::Unavailable("stop_times".into()))
    }

    fn transfers(&self) -> Result<Vec<TransferEdge>, source::Error> {
        Ok(Vec::new())
    }
}

#[test]
fn failed_read_fails_the_query() {
    assert!(matches!(
        RouteFinder::from_source(&BrokenSource),
        Err(router::Error::DataSource(source::Error::Unavailable(_)))
    ));
    // Stops alone still resolve
    let resolution = RouteFinder::resolve_station_names(&BrokenSource, "main st", "track 2").unwrap();
    assert_eq!(resolution.destination_stop_ids.len(), 1);
}

#[test]
fn snapshot_fetch_collects_all_rows() {
    let snapshot = Snapshot::fetch(&city()).unwrap();
    assert_eq!(snapshot.stops.len(), 6);
    assert_eq!(snapshot.visits.len(), 5);
    assert_eq!(snapshot.transfers.len(), 1);
}
