mod models;
pub mod source;

pub use models::*;

use std::time::Instant;
use tracing::debug;

use crate::repository::source::Source;

/// Read-only schedule data for one query.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub stops: Box<[Stop]>,
    pub visits: Box<[ScheduledStopVisit]>,
    pub transfers: Box<[TransferEdge]>,
}

impl Snapshot {
    pub fn new(
        stops: Vec<Stop>,
        visits: Vec<ScheduledStopVisit>,
        transfers: Vec<TransferEdge>,
    ) -> Self {
        Self {
            stops: stops.into(),
            visits: visits.into(),
            transfers: transfers.into(),
        }
    }

    /// Issues the three bulk reads concurrently and waits for all of them.
    /// Any failed read fails the whole snapshot.
    pub fn fetch<S: Source>(source: &S) -> Result<Self, source::Error> {
        debug!("Fetching snapshot...");
        let now = Instant::now();
        let (stops, (visits, transfers)) = rayon::join(
            || source.stops(),
            || rayon::join(|| source.stop_visits(), || source.transfers()),
        );
        let snapshot = Self::new(stops?, visits?, transfers?);
        debug!(
            "Fetching snapshot took {:?} ({} stops, {} visits, {} transfers)",
            now.elapsed(),
            snapshot.stops.len(),
            snapshot.visits.len(),
            snapshot.transfers.len()
        );
        Ok(snapshot)
    }

    /// Reads only the stops, for callers that resolve names without routing.
    pub fn fetch_stops<S: Source>(source: &S) -> Result<Self, source::Error> {
        Ok(Self::new(source.stops()?, Vec::new(), Vec::new()))
    }
}
