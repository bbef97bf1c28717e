pub mod gtfs;
pub mod repository;
pub mod router;
pub mod shared;

pub mod prelude {
    pub use crate::{
        gtfs::Gtfs,
        repository::{
            LocationType, ScheduledStopVisit, Snapshot, Stop, TransferEdge, TransferType,
            source::{MemorySource, Source},
        },
        router::{
            Config, Graph, GraphBuilder, PathResult, PathSearch, RouteFinder, Stage,
            StationResolution, StationResolver, Strategy,
        },
        shared::time::Time,
    };
}
