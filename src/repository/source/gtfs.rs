use std::{collections::HashSet, time::Instant};

use tracing::{debug, warn};

use crate::{
    gtfs::Gtfs,
    repository::{
        ScheduledStopVisit, Stop, TransferEdge,
        source::{self, Source},
    },
};

impl Source for Gtfs {
    fn stops(&self) -> Result<Vec<Stop>, source::Error> {
        debug!("Reading stops...");
        let now = Instant::now();
        let mut stops: Vec<Stop> = Vec::new();
        self.stream_stops(|(_, stop)| stops.push(stop.into()))?;
        debug!("Reading {} stops took {:?}", stops.len(), now.elapsed());
        Ok(stops)
    }

    fn stop_visits(&self) -> Result<Vec<ScheduledStopVisit>, source::Error> {
        debug!("Reading stop times...");
        let now = Instant::now();
        let mut trips: HashSet<String> = HashSet::new();
        self.stream_trips(|(_, trip)| {
            trips.insert(trip.trip_id);
        })?;

        let mut visits: Vec<ScheduledStopVisit> = Vec::new();
        let mut orphaned = 0usize;
        let mut untimed = 0usize;
        self.stream_stop_times(|(_, stop_time)| {
            if !trips.contains(stop_time.trip_id.as_str()) {
                orphaned += 1;
                return;
            }
            match stop_time.into_visit() {
                Some(visit) => visits.push(visit),
                None => untimed += 1,
            }
        })?;

        if orphaned > 0 {
            warn!("Dropped {orphaned} stop times referencing unknown trips");
        }
        if untimed > 0 {
            debug!("Dropped {untimed} stop times without an arrival time");
        }
        debug!("Reading {} stop times took {:?}", visits.len(), now.elapsed());
        Ok(visits)
    }

    fn transfers(&self) -> Result<Vec<TransferEdge>, source::Error> {
        debug!("Reading transfers...");
        let now = Instant::now();
        let mut transfers: Vec<TransferEdge> = Vec::new();
        self.stream_transfers(|(_, transfer)| transfers.push(transfer.into()))?;
        debug!("Reading {} transfers took {:?}", transfers.len(), now.elapsed());
        Ok(transfers)
    }
}
