use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::Arc,
    time::Instant,
};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    repository::{ScheduledStopVisit, Snapshot, Stop},
    router::{self, Config, PathSearch},
    shared::time::Time,
};

/// Ingestion progress of a [`GraphBuilder`]. Steps only move forward.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    #[default]
    Empty,
    StopsLoaded,
    StopTimesLoaded,
    /// Transfers are in and the graph is searchable.
    TransfersLoaded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Empty => f.write_str("Empty"),
            Stage::StopsLoaded => f.write_str("StopsLoaded"),
            Stage::StopTimesLoaded => f.write_str("StopTimesLoaded"),
            Stage::TransfersLoaded => f.write_str("TransfersLoaded"),
        }
    }
}

/// The ordered stops one trip calls at, with minutes for each hop.
#[derive(Debug, Clone, Default)]
pub struct DirectLine {
    /// Position of this line in [`Graph::lines`].
    pub index: u32,
    pub trip_id: Arc<str>,
    /// Graph indices of the stops in call order.
    pub stops: Vec<u32>,
    segments: HashMap<(u32, u32), u32>,
}

impl DirectLine {
    /// First position of a stop in the line.
    pub fn position(&self, stop_idx: u32) -> Option<usize> {
        self.stops.iter().position(|idx| *idx == stop_idx)
    }

    /// True when both stops sit exactly one call apart, in either direction.
    pub fn is_adjacent(&self, a: u32, b: u32) -> bool {
        match (self.position(a), self.position(b)) {
            (Some(a), Some(b)) => a.abs_diff(b) == 1,
            _ => false,
        }
    }

    pub fn segment_minutes(&self, from_idx: u32, to_idx: u32) -> Option<u32> {
        self.segments.get(&(from_idx, to_idx)).copied()
    }
}

/// Directed stop graph for one query.
///
/// Stops are interned to `u32` indices in first-seen order. Neighbour lists keep
/// insertion order, which the first-found search depends on.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    stops: Vec<Arc<str>>,
    stop_lookup: HashMap<Arc<str>, u32>,
    adjacency: Vec<Vec<u32>>,
    lines: Vec<DirectLine>,
    line_lookup: HashMap<Arc<str>, u32>,
    stop_to_lines: Vec<Vec<u32>>,
    transfers: HashMap<(u32, u32), u32>,
}

impl Graph {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn stop_idx(&self, stop_id: &str) -> Option<u32> {
        self.stop_lookup.get(stop_id).copied()
    }

    pub fn stop_id(&self, stop_idx: u32) -> &Arc<str> {
        &self.stops[stop_idx as usize]
    }

    /// Stop ids in the order the graph first saw them.
    pub fn stop_ids(&self) -> impl Iterator<Item = &Arc<str>> {
        self.stops.iter()
    }

    pub fn neighbours(&self, stop_idx: u32) -> &[u32] {
        &self.adjacency[stop_idx as usize]
    }

    /// Directly reachable stop ids, in insertion order.
    /// Returns `None` when the stop has no recorded adjacency.
    pub fn neighbours_of(&self, stop_id: &str) -> Option<Vec<&str>> {
        let idx = self.stop_idx(stop_id)?;
        Some(
            self.neighbours(idx)
                .iter()
                .map(|next| &**self.stop_id(*next))
                .collect(),
        )
    }

    pub fn lines(&self) -> &[DirectLine] {
        &self.lines
    }

    pub fn line(&self, trip_id: &str) -> Option<&DirectLine> {
        let idx = self.line_lookup.get(trip_id)?;
        Some(&self.lines[*idx as usize])
    }

    pub fn line_stop_ids(&self, trip_id: &str) -> Option<Vec<&str>> {
        let line = self.line(trip_id)?;
        Some(
            line.stops
                .iter()
                .map(|idx| &**self.stop_id(*idx))
                .collect(),
        )
    }

    /// Recorded minutes for a hop of a trip.
    pub fn travel_time(&self, trip_id: &str, from: &str, to: &str) -> Option<u32> {
        let line = self.line(trip_id)?;
        line.segment_minutes(self.stop_idx(from)?, self.stop_idx(to)?)
    }

    /// Minutes of the transfer or variant edge between two stops.
    pub fn transfer_time(&self, from: &str, to: &str) -> Option<u32> {
        self.transfer_minutes(self.stop_idx(from)?, self.stop_idx(to)?)
    }

    pub fn transfer_minutes(&self, from_idx: u32, to_idx: u32) -> Option<u32> {
        self.transfers.get(&(from_idx, to_idx)).copied()
    }

    /// The first line, in line order, on which `from` and `to` are adjacent.
    pub fn line_between(&self, from_idx: u32, to_idx: u32) -> Option<&DirectLine> {
        self.stop_to_lines[from_idx as usize]
            .iter()
            .map(|line_idx| &self.lines[*line_idx as usize])
            .find(|line| line.is_adjacent(from_idx, to_idx))
    }

    /// Search handle over this graph. The graph is only read, so one built
    /// graph can serve many searches, including from several threads.
    pub fn search<'a>(&'a self, config: &'a Config) -> PathSearch<'a> {
        PathSearch::new(self, config)
    }

    fn intern(&mut self, stop_id: &Arc<str>) -> u32 {
        match self.stop_lookup.entry(stop_id.clone()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let idx = self.stops.len() as u32;
                entry.insert(idx);
                self.stops.push(stop_id.clone());
                self.adjacency.push(Vec::new());
                self.stop_to_lines.push(Vec::new());
                idx
            }
        }
    }

    fn add_edge(&mut self, from_idx: u32, to_idx: u32) {
        let neighbours = &mut self.adjacency[from_idx as usize];
        if !neighbours.contains(&to_idx) {
            neighbours.push(to_idx);
        }
    }

    fn push_line(&mut self, trip_id: Arc<str>, visits: &[(&ScheduledStopVisit, Time)]) {
        let line_idx = self.lines.len() as u32;
        let mut line = DirectLine {
            index: line_idx,
            trip_id: trip_id.clone(),
            stops: Vec::with_capacity(visits.len()),
            segments: HashMap::new(),
        };

        let mut previous: Option<(u32, Time)> = None;
        for (visit, arrival) in visits {
            let stop_idx = self.intern(&visit.stop_id);
            line.stops.push(stop_idx);
            let memberships = &mut self.stop_to_lines[stop_idx as usize];
            if memberships.last() != Some(&line_idx) {
                memberships.push(line_idx);
            }

            if let Some((previous_idx, previous_arrival)) = previous {
                if previous_idx != stop_idx {
                    self.add_edge(previous_idx, stop_idx);
                    line.segments.insert(
                        (previous_idx, stop_idx),
                        previous_arrival.minutes_until(*arrival),
                    );
                } else {
                    trace!("Trip {trip_id} calls at {} twice in a row", visit.stop_id);
                }
            }
            previous = Some((stop_idx, *arrival));
        }

        self.line_lookup.insert(trip_id, line_idx);
        self.lines.push(line);
    }
}

/// Strips one trailing directional suffix, `101N` -> `101`.
pub fn base_id<'a>(stop_id: &'a str, suffixes: &[char]) -> &'a str {
    match stop_id.char_indices().last() {
        Some((idx, suffix)) if idx > 0 && suffixes.contains(&suffix) => &stop_id[..idx],
        _ => stop_id,
    }
}

/// Turns a [`Snapshot`] into a [`Graph`], one ingestion step at a time.
///
/// Steps must run as stops, stop times, transfers. Variant derivation reads the
/// adjacency that stop times populate, so the order is enforced.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    snapshot: Snapshot,
    config: Config,
    stage: Stage,
    graph: Graph,
    names: HashMap<Arc<str>, Arc<str>>,
}

impl GraphBuilder {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn stops(&self) -> &[Stop] {
        &self.snapshot.stops
    }

    pub fn stop_name(&self, stop_id: &str) -> Option<&str> {
        self.names.get(stop_id).map(|name| &**name)
    }

    /// The built graph, available once transfers are ingested.
    pub fn graph(&self) -> Result<&Graph, router::Error> {
        self.ensure_ready()?;
        Ok(&self.graph)
    }

    pub fn into_graph(self) -> Result<Graph, router::Error> {
        self.ensure_ready()?;
        Ok(self.graph)
    }

    pub fn ingest_stops(&mut self) -> Result<&[Stop], router::Error> {
        self.expect_stage(Stage::Empty)?;
        debug!("Ingesting stops...");
        let now = Instant::now();
        self.names = self
            .snapshot
            .stops
            .iter()
            .map(|stop| (stop.id.clone(), stop.name.clone()))
            .collect();
        self.stage = Stage::StopsLoaded;
        debug!("Ingesting stops took {:?}", now.elapsed());
        Ok(&self.snapshot.stops)
    }

    pub fn ingest_stop_times(&mut self) -> Result<(), router::Error> {
        self.expect_stage(Stage::StopsLoaded)?;
        debug!("Ingesting stop times...");
        let now = Instant::now();

        // Validate every arrival before touching the graph, reporting the
        // first bad row in input order
        let parsed: Vec<Result<(&ScheduledStopVisit, Time), router::Error>> = self
            .snapshot
            .visits
            .par_iter()
            .map(|visit| {
                Time::from_hms(&visit.arrival_time)
                    .map(|arrival| (visit, arrival))
                    .ok_or_else(|| router::Error::MalformedSchedule {
                        trip_id: visit.trip_id.to_string(),
                        stop_id: visit.stop_id.to_string(),
                        value: visit.arrival_time.to_string(),
                    })
            })
            .collect();
        let mut visits: Vec<(&ScheduledStopVisit, Time)> =
            parsed.into_iter().collect::<Result<_, _>>()?;

        // Stable, so equal sequences keep input order
        visits.par_sort_by(|(a, _), (b, _)| {
            a.trip_id
                .cmp(&b.trip_id)
                .then(a.stop_sequence.cmp(&b.stop_sequence))
        });

        for trip in visits.chunk_by(|(a, _), (b, _)| a.trip_id == b.trip_id) {
            self.graph.push_line(trip[0].0.trip_id.clone(), trip);
        }

        self.stage = Stage::StopTimesLoaded;
        debug!(
            "Ingesting stop times took {:?} ({} lines, {} stops)",
            now.elapsed(),
            self.graph.lines.len(),
            self.graph.stops.len()
        );
        Ok(())
    }

    pub fn ingest_transfers(&mut self) -> Result<(), router::Error> {
        self.expect_stage(Stage::StopTimesLoaded)?;
        debug!("Ingesting transfers...");
        let now = Instant::now();

        for transfer in self.snapshot.transfers.iter() {
            let from_idx = self.graph.intern(&transfer.from_stop_id);
            let to_idx = self.graph.intern(&transfer.to_stop_id);
            self.graph.add_edge(from_idx, to_idx);
            self.graph.transfers.insert(
                (from_idx, to_idx),
                transfer.minutes(self.config.default_transfer_minutes),
            );
        }

        let variant_edges = self.derive_variant_transfers();
        self.stage = Stage::TransfersLoaded;
        debug!(
            "Ingesting transfers took {:?} ({} transfers, {} variant edges)",
            now.elapsed(),
            self.snapshot.transfers.len(),
            variant_edges
        );
        Ok(())
    }

    /// Links every ordered pair of stops sharing a base id. Variant times
    /// replace whatever transfer time the pair had.
    fn derive_variant_transfers(&mut self) -> usize {
        let mut group_lookup: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<Vec<u32>> = Vec::new();
        for (idx, stop_id) in self.graph.stops.iter().enumerate() {
            let base = base_id(stop_id, &self.config.variant_suffixes);
            let group = *group_lookup.entry(base).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(idx as u32);
        }

        let minutes = self.config.variant_transfer_minutes;
        let mut count = 0;
        for group in groups.into_iter().filter(|group| group.len() >= 2) {
            for &from_idx in group.iter() {
                for &to_idx in group.iter().filter(|to_idx| **to_idx != from_idx) {
                    self.graph.add_edge(from_idx, to_idx);
                    self.graph.transfers.insert((from_idx, to_idx), minutes);
                    count += 1;
                }
            }
        }
        count
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), router::Error> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(router::Error::OutOfOrder {
                expected,
                found: self.stage,
            })
        }
    }

    fn ensure_ready(&self) -> Result<(), router::Error> {
        if self.stage == Stage::TransfersLoaded {
            Ok(())
        } else {
            Err(router::Error::NotReady(self.stage))
        }
    }
}

#[test]
fn base_id_strips_direction() {
    let suffixes = ['N', 'S', 'E', 'W'];
    assert_eq!(base_id("101N", &suffixes), "101");
    assert_eq!(base_id("101S", &suffixes), "101");
    assert_eq!(base_id("101", &suffixes), "101");
}

#[test]
fn base_id_keeps_single_char() {
    assert_eq!(base_id("N", &['N', 'S']), "N");
}

#[test]
fn line_adjacency_uses_first_position() {
    let line = DirectLine {
        index: 0,
        trip_id: "T".into(),
        stops: vec![0, 1, 0, 2],
        segments: HashMap::new(),
    };
    assert!(line.is_adjacent(0, 1));
    assert!(line.is_adjacent(1, 0));
    // Stop 0 is first seen at position 0, two calls before stop 2
    assert!(!line.is_adjacent(0, 2));
}
