use ridegraph::router::{PathResult, RouteFinder, Segment};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
}

impl StopDto {
    fn new(finder: &RouteFinder, stop_id: &str) -> Self {
        Self {
            id: stop_id.to_string(),
            name: finder.station_name(stop_id).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RouteDto {
    pub total_time: u32,
    pub transfers: u32,
    pub stops: Vec<StopDto>,
    pub transfer_points: Vec<StopDto>,
    pub segments: Vec<Segment>,
}

impl RouteDto {
    pub fn from_path(finder: &RouteFinder, path: &PathResult) -> Self {
        Self {
            total_time: path.total_time,
            transfers: path.transfers,
            stops: path
                .path
                .iter()
                .map(|id| StopDto::new(finder, id))
                .collect(),
            transfer_points: path
                .transfer_points
                .iter()
                .map(|id| StopDto::new(finder, id))
                .collect(),
            segments: path.segments.clone(),
        }
    }
}
