use std::{fmt::Display, sync::Arc};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Riding the named trip.
    Transit { trip_id: Arc<str> },
    /// A transfer or variant edge between two stops.
    Transfer,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Transit { trip_id } => write!(f, "Transit({trip_id})"),
            Mode::Transfer => f.write_str("Transfer"),
        }
    }
}

/// One traversed edge of a [`PathResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub minutes: u32,
    pub mode: Mode,
}

/// One computed route between a specific origin and destination stop.
///
/// `total_time` is the sum of the segment minutes and `transfers` never exceeds
/// `path.len() - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// Stop ids from origin to destination.
    pub path: Vec<Arc<str>>,
    /// Estimated travel time in minutes.
    pub total_time: u32,
    pub transfers: u32,
    /// Stops at which the active trip changed, in travel order.
    pub transfer_points: Vec<Arc<str>>,
    pub segments: Vec<Segment>,
}

impl PathResult {
    pub fn origin(&self) -> Option<&str> {
        self.path.first().map(|id| &**id)
    }

    pub fn destination(&self) -> Option<&str> {
        self.path.last().map(|id| &**id)
    }

    /// Trip ids ridden, in order, without consecutive repeats.
    pub fn trips(&self) -> Vec<&str> {
        let mut trips: Vec<&str> = Vec::new();
        for segment in self.segments.iter() {
            if let Mode::Transit { trip_id } = &segment.mode {
                let trip_id: &str = trip_id;
                if trips.last() != Some(&trip_id) {
                    trips.push(trip_id);
                }
            }
        }
        trips
    }
}
