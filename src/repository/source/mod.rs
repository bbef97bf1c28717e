mod gtfs;

use thiserror::Error;

use crate::repository::{ScheduledStopVisit, Stop, TransferEdge};

#[derive(Error, Debug)]
pub enum Error {
    #[error("GTFS error: {0}")]
    Gtfs(#[from] crate::gtfs::Error),
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the typed rows a query is built from.
///
/// The three reads have no ordering dependency on each other and may run
/// concurrently, hence the `Sync` bound.
pub trait Source: Sync {
    fn stops(&self) -> Result<Vec<Stop>, self::Error>;
    /// Scheduled visits joined with their trips.
    fn stop_visits(&self) -> Result<Vec<ScheduledStopVisit>, self::Error>;
    fn transfers(&self) -> Result<Vec<TransferEdge>, self::Error>;
}

/// Rows held in memory, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub stops: Vec<Stop>,
    pub visits: Vec<ScheduledStopVisit>,
    pub transfers: Vec<TransferEdge>,
}

impl MemorySource {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_stops(mut self, stops: Vec<Stop>) -> Self {
        self.stops = stops;
        self
    }

    pub fn with_visits(mut self, visits: Vec<ScheduledStopVisit>) -> Self {
        self.visits = visits;
        self
    }

    pub fn with_transfers(mut self, transfers: Vec<TransferEdge>) -> Self {
        self.transfers = transfers;
        self
    }
}

impl Source for MemorySource {
    fn stops(&self) -> Result<Vec<Stop>, self::Error> {
        Ok(self.stops.clone())
    }

    fn stop_visits(&self) -> Result<Vec<ScheduledStopVisit>, self::Error> {
        Ok(self.visits.clone())
    }

    fn transfers(&self) -> Result<Vec<TransferEdge>, self::Error> {
        Ok(self.transfers.clone())
    }
}
