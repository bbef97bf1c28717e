use std::sync::Arc;

use serde::Serialize;

use crate::{
    gtfs::{GtfsStop, GtfsStopTime, GtfsTransfer},
    shared::{self, Identifiable, time::round_minutes},
};

/// Categorizes the specific nature of a transit stop location.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocationType {
    /// A standard stop or platform.
    #[default]
    Stop,
    /// A parent station grouping child stops through their `parent_id`.
    Station,
    /// A physical entrance to a station.
    Entrance,
    /// A generic node inside a station.
    Node,
    /// A designated boarding area on a platform.
    Boarding,
}

impl From<Option<u8>> for LocationType {
    fn from(value: Option<u8>) -> Self {
        match value {
            Some(1) => LocationType::Station,
            Some(2) => LocationType::Entrance,
            Some(3) => LocationType::Node,
            Some(4) => LocationType::Boarding,
            _ => LocationType::Stop,
        }
    }
}

/// A physical point where passengers can board or alight from a vehicle.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Stop {
    /// Unique external identifier for the stop.
    pub id: Arc<str>,
    /// Human-readable name (e.g., "Main St").
    pub name: Arc<str>,
    /// Lowercased, whitespace-collapsed name used for matching.
    pub normalized_name: Arc<str>,
    pub latitude: f64,
    pub longitude: f64,
    pub location_type: LocationType,
    /// Back-reference to the parent station, if any.
    pub parent_id: Option<Arc<str>>,
}

impl Stop {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            normalized_name: shared::normalize(name).into(),
            ..Default::default()
        }
    }

    /// A parent station.
    pub fn station(id: &str, name: &str) -> Self {
        Self::new(id, name).with_location_type(LocationType::Station)
    }

    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_location_type(mut self, location_type: LocationType) -> Self {
        self.location_type = location_type;
        self
    }

    pub fn with_coordinate(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn is_station(&self) -> bool {
        self.location_type == LocationType::Station
    }
}

impl Identifiable for Stop {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

impl From<GtfsStop> for Stop {
    fn from(value: GtfsStop) -> Self {
        let mut stop = Stop::new(&value.stop_id, &value.stop_name)
            .with_location_type(value.location_type.into())
            .with_coordinate(
                value.stop_lat.unwrap_or_default(),
                value.stop_lon.unwrap_or_default(),
            );
        stop.parent_id = value.parent_station.map(Into::into);
        stop
    }
}

/// One call of a trip at a stop. The arrival time is kept as scheduled text
/// and validated when the graph ingests it.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledStopVisit {
    pub trip_id: Arc<str>,
    pub stop_id: Arc<str>,
    /// `H:M[:S]`, hours may run past 23.
    pub arrival_time: Arc<str>,
    pub stop_sequence: u32,
}

impl ScheduledStopVisit {
    pub fn new(trip_id: &str, stop_id: &str, arrival_time: &str, stop_sequence: u32) -> Self {
        Self {
            trip_id: trip_id.into(),
            stop_id: stop_id.into(),
            arrival_time: arrival_time.into(),
            stop_sequence,
        }
    }
}

impl GtfsStopTime {
    /// Untimed rows carry no arrival and have no visit.
    pub fn into_visit(self) -> Option<ScheduledStopVisit> {
        let arrival_time = self.arrival_time?;
        Some(ScheduledStopVisit {
            trip_id: self.trip_id.into(),
            stop_id: self.stop_id.into(),
            arrival_time: arrival_time.into(),
            stop_sequence: self.stop_sequence,
        })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferType {
    #[default]
    Recommended,
    Timed,
    MinimumTime,
    NotPossible,
    InSeat,
    ReBoard,
}

impl From<Option<u8>> for TransferType {
    fn from(value: Option<u8>) -> Self {
        match value {
            Some(1) => TransferType::Timed,
            Some(2) => TransferType::MinimumTime,
            Some(3) => TransferType::NotPossible,
            Some(4) => TransferType::InSeat,
            Some(5) => TransferType::ReBoard,
            _ => TransferType::Recommended,
        }
    }
}

/// A directed, time-costed connection between two stops.
#[derive(Debug, Clone, Serialize)]
pub struct TransferEdge {
    pub from_stop_id: Arc<str>,
    pub to_stop_id: Arc<str>,
    pub transfer_type: TransferType,
    /// The minimum time (in seconds) required to complete this transfer.
    pub min_transfer_time: Option<u32>,
}

impl TransferEdge {
    pub fn new(from_stop_id: &str, to_stop_id: &str) -> Self {
        Self {
            from_stop_id: from_stop_id.into(),
            to_stop_id: to_stop_id.into(),
            transfer_type: TransferType::default(),
            min_transfer_time: None,
        }
    }

    pub fn with_min_transfer_time(mut self, seconds: u32) -> Self {
        self.min_transfer_time = Some(seconds);
        self
    }

    pub fn with_transfer_type(mut self, transfer_type: TransferType) -> Self {
        self.transfer_type = transfer_type;
        self
    }

    /// Transfer cost in whole minutes, `default` when no minimum time is given.
    pub fn minutes(&self, default: u32) -> u32 {
        self.min_transfer_time.map(round_minutes).unwrap_or(default)
    }
}

impl From<GtfsTransfer> for TransferEdge {
    fn from(value: GtfsTransfer) -> Self {
        Self {
            from_stop_id: value.from_stop_id.into(),
            to_stop_id: value.to_stop_id.into(),
            transfer_type: value.transfer_type.into(),
            min_transfer_time: value.min_transfer_time,
        }
    }
}
