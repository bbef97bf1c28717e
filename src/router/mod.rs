mod config;
pub mod graph;
mod path;
pub mod resolver;
pub mod search;

pub use config::*;
pub use graph::{DirectLine, Graph, GraphBuilder, Stage};
pub use path::*;
pub use resolver::StationResolver;
pub use search::{PathSearch, SearchStats};

use std::{sync::Arc, time::Instant};

use thiserror::Error;
use tracing::{debug, info};

use crate::repository::{
    Snapshot, Stop,
    source::{self, Source},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ingestion step expected stage {expected} but the builder is at {found}")]
    OutOfOrder { expected: Stage, found: Stage },
    #[error("Graph is not searchable yet, builder is at {0}")]
    NotReady(Stage),
    #[error("Malformed arrival time {value:?} for stop {stop_id} on trip {trip_id}")]
    MalformedSchedule {
        trip_id: String,
        stop_id: String,
        value: String,
    },
    #[error("Data source failure: {0}")]
    DataSource(#[from] source::Error),
    #[error("No station matches {0:?}")]
    StationNotFound(String),
}

/// Stop ids for both ends of a query, plus the stops they were resolved from.
#[derive(Debug, Clone, Default)]
pub struct StationResolution {
    pub origin_stop_ids: Vec<Arc<str>>,
    pub destination_stop_ids: Vec<Arc<str>>,
    pub stops: Box<[Stop]>,
}

/// Runs one query: ingestion in order, name resolution and path search.
///
/// Nothing is cached between queries. Build a new finder per snapshot.
#[derive(Debug, Default)]
pub struct RouteFinder {
    builder: GraphBuilder,
    resolver: Option<StationResolver>,
}

impl RouteFinder {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            builder: GraphBuilder::new(snapshot),
            resolver: None,
        }
    }

    /// Reads a snapshot from the source. A failed read fails the query.
    pub fn from_source<S: Source>(source: &S) -> Result<Self, self::Error> {
        Ok(Self::new(Snapshot::fetch(source)?))
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.builder = self.builder.with_config(config);
        self
    }

    pub fn config(&self) -> &Config {
        self.builder.config()
    }

    pub fn stage(&self) -> Stage {
        self.builder.stage()
    }

    pub fn ingest_stops(&mut self) -> Result<&[Stop], self::Error> {
        let stops = self.builder.ingest_stops()?;
        self.resolver = Some(StationResolver::new(stops));
        Ok(self.builder.stops())
    }

    pub fn ingest_stop_times(&mut self) -> Result<(), self::Error> {
        self.builder.ingest_stop_times()
    }

    pub fn ingest_transfers(&mut self) -> Result<(), self::Error> {
        self.builder.ingest_transfers()
    }

    /// Runs all three ingestion steps in their required order.
    pub fn prepare(mut self) -> Result<Self, self::Error> {
        let now = Instant::now();
        self.ingest_stops()?;
        self.ingest_stop_times()?;
        self.ingest_transfers()?;
        info!("Graph ready in {:?}", now.elapsed());
        Ok(self)
    }

    pub fn graph(&self) -> Result<&Graph, self::Error> {
        self.builder.graph()
    }

    /// Freezes the built graph for read-only sharing.
    pub fn into_graph(self) -> Result<Graph, self::Error> {
        self.builder.into_graph()
    }

    pub fn find_paths<O, D>(
        &self,
        origins: &[O],
        destinations: &[D],
        max_paths: usize,
    ) -> Result<Vec<PathResult>, self::Error>
    where
        O: AsRef<str>,
        D: AsRef<str>,
    {
        let graph = self.builder.graph()?;
        Ok(graph
            .search(self.builder.config())
            .find_paths(origins, destinations, max_paths))
    }

    pub fn find_shortest_path(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Option<PathResult>, self::Error> {
        let graph = self.builder.graph()?;
        Ok(graph
            .search(self.builder.config())
            .find_shortest_path(start, end))
    }

    /// Resolves both names and searches between them. An unresolvable name
    /// is reported as [`Error::StationNotFound`].
    pub fn find_routes(
        &self,
        origin_name: &str,
        destination_name: &str,
        max_paths: usize,
    ) -> Result<Vec<PathResult>, self::Error> {
        let origins = self.resolve(origin_name)?;
        if origins.is_empty() {
            return Err(self::Error::StationNotFound(origin_name.to_string()));
        }
        let destinations = self.resolve(destination_name)?;
        if destinations.is_empty() {
            return Err(self::Error::StationNotFound(destination_name.to_string()));
        }
        debug!(
            "Routing {origin_name:?} ({} stops) to {destination_name:?} ({} stops)",
            origins.len(),
            destinations.len()
        );
        self.find_paths(&origins, &destinations, max_paths)
    }

    pub fn resolve(&self, name_or_id: &str) -> Result<Vec<Arc<str>>, self::Error> {
        Ok(self.resolver()?.resolve(name_or_id))
    }

    pub fn suggest(&self, query: &str, limit: usize) -> Result<Vec<&Stop>, self::Error> {
        Ok(self.resolver()?.suggest(query, limit))
    }

    /// Display name for a stop id, echoing the id back when it is unknown.
    pub fn station_name<'a>(&'a self, stop_id: &'a str) -> &'a str {
        self.builder.stop_name(stop_id).unwrap_or(stop_id)
    }

    /// Loads only the stops from the source and resolves both names.
    pub fn resolve_station_names<S: Source>(
        source: &S,
        origin_name: &str,
        destination_name: &str,
    ) -> Result<StationResolution, self::Error> {
        let snapshot = Snapshot::fetch_stops(source)?;
        let resolver = StationResolver::new(&snapshot.stops);
        Ok(StationResolution {
            origin_stop_ids: resolver.resolve(origin_name),
            destination_stop_ids: resolver.resolve(destination_name),
            stops: snapshot.stops,
        })
    }

    fn resolver(&self) -> Result<&StationResolver, self::Error> {
        self.resolver
            .as_ref()
            .ok_or(self::Error::NotReady(self.builder.stage()))
    }
}
