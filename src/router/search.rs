use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
    rc::Rc,
    sync::Arc,
};

use tracing::{debug, trace};

use crate::router::{Config, Graph, Mode, PathResult, Segment, Strategy};

/// How a candidate reached its stop.
#[derive(Debug, Clone, Copy)]
struct Hop {
    /// Line index of the ridden trip, `None` for a transfer edge.
    line: Option<u32>,
    minutes: u32,
    /// The hop changed the active trip at the previous stop.
    is_transfer: bool,
}

type CandidateRef = Rc<Candidate>;

/// A partial path. The path itself is the chain of parents.
#[derive(Debug)]
struct Candidate {
    stop_idx: u32,
    time: u32,
    transfers: u32,
    last_line: Option<u32>,
    hop: Option<Hop>,
    parent: Option<CandidateRef>,
}

impl Candidate {
    fn origin(stop_idx: u32) -> Self {
        Self {
            stop_idx,
            time: 0,
            transfers: 0,
            last_line: None,
            hop: None,
            parent: None,
        }
    }

    fn extend(self: &Rc<Self>, stop_idx: u32, line: Option<u32>, minutes: u32) -> Self {
        let is_transfer = self.last_line.is_some() && line != self.last_line;
        Self {
            stop_idx,
            time: self.time.saturating_add(minutes),
            transfers: self.transfers + u32::from(is_transfer),
            last_line: line,
            hop: Some(Hop {
                line,
                minutes,
                is_transfer,
            }),
            parent: Some(self.clone()),
        }
    }

    /// True if the stop is already on this candidate's path.
    fn visits(&self, stop_idx: u32) -> bool {
        let mut current = Some(self);
        while let Some(candidate) = current {
            if candidate.stop_idx == stop_idx {
                return true;
            }
            current = candidate.parent.as_deref();
        }
        false
    }

    fn to_path(&self, graph: &Graph) -> PathResult {
        let mut chain: Vec<&Candidate> = Vec::new();
        let mut current = Some(self);
        while let Some(candidate) = current {
            chain.push(candidate);
            current = candidate.parent.as_deref();
        }
        chain.reverse();

        let path: Vec<Arc<str>> = chain
            .iter()
            .map(|candidate| graph.stop_id(candidate.stop_idx).clone())
            .collect();
        let mut transfer_points: Vec<Arc<str>> = Vec::new();
        let mut segments: Vec<Segment> = Vec::new();
        for pair in chain.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let Some(hop) = to.hop else { continue };
            if hop.is_transfer {
                transfer_points.push(graph.stop_id(from.stop_idx).clone());
            }
            let mode = match hop.line {
                Some(line_idx) => Mode::Transit {
                    trip_id: graph.lines()[line_idx as usize].trip_id.clone(),
                },
                None => Mode::Transfer,
            };
            segments.push(Segment {
                from: graph.stop_id(from.stop_idx).clone(),
                to: graph.stop_id(to.stop_idx).clone(),
                minutes: hop.minutes,
                mode,
            });
        }

        PathResult {
            path,
            total_time: self.time,
            transfers: self.transfers,
            transfer_points,
            segments,
        }
    }
}

/// Heap entry, earliest time first and insertion order on ties.
struct Queued {
    time: u32,
    sequence: u64,
    candidate: CandidateRef,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max heap
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

enum Frontier {
    Fifo(VecDeque<CandidateRef>),
    Earliest {
        heap: BinaryHeap<Queued>,
        sequence: u64,
    },
}

impl Frontier {
    fn new(strategy: Strategy) -> Self {
        match strategy {
            Strategy::FirstFound => Frontier::Fifo(VecDeque::new()),
            Strategy::Earliest => Frontier::Earliest {
                heap: BinaryHeap::new(),
                sequence: 0,
            },
        }
    }

    fn push(&mut self, candidate: CandidateRef) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(candidate),
            Frontier::Earliest { heap, sequence } => {
                heap.push(Queued {
                    time: candidate.time,
                    sequence: *sequence,
                    candidate,
                });
                *sequence += 1;
            }
        }
    }

    fn pop(&mut self) -> Option<CandidateRef> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Earliest { heap, .. } => heap.pop().map(|queued| queued.candidate),
        }
    }
}

/// Counters from one single-pair search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidates whose stop was expanded.
    pub expanded: usize,
    /// Candidates dropped by the relative bound.
    pub pruned: usize,
    /// Candidates that reached the destination.
    pub arrivals: usize,
}

/// Runs path searches over a built [`Graph`].
pub struct PathSearch<'a> {
    graph: &'a Graph,
    config: &'a Config,
}

impl<'a> PathSearch<'a> {
    pub fn new(graph: &'a Graph, config: &'a Config) -> Self {
        Self { graph, config }
    }

    /// Searches every origin/destination pair, origins in the outer loop.
    ///
    /// No new pair is started once `max_paths` results are in, so which pairs
    /// get explored follows the input order rather than path quality. Results
    /// are sorted by total time and truncated to `max_paths`.
    pub fn find_paths<O, D>(
        &self,
        origins: &[O],
        destinations: &[D],
        max_paths: usize,
    ) -> Vec<PathResult>
    where
        O: AsRef<str>,
        D: AsRef<str>,
    {
        let mut results: Vec<PathResult> = Vec::new();
        'origins: for origin in origins.iter().map(AsRef::as_ref) {
            for destination in destinations.iter().map(AsRef::as_ref) {
                if results.len() >= max_paths {
                    break 'origins;
                }
                if origin == destination {
                    continue;
                }
                if let Some(path) = self.find_shortest_path(origin, destination) {
                    results.push(path);
                }
            }
        }

        results.sort_by_key(|path| path.total_time);
        results.truncate(max_paths);
        results
    }

    /// At most one path between two stops. `None` when the destination is not
    /// reached or the start has no recorded adjacency.
    pub fn find_shortest_path(&self, start: &str, end: &str) -> Option<PathResult> {
        self.find_shortest_path_with_stats(start, end).0
    }

    pub fn find_shortest_path_with_stats(
        &self,
        start: &str,
        end: &str,
    ) -> (Option<PathResult>, SearchStats) {
        let (Some(start_idx), Some(end_idx)) =
            (self.graph.stop_idx(start), self.graph.stop_idx(end))
        else {
            debug!("No adjacency recorded for {start} or {end}");
            return (None, SearchStats::default());
        };

        let (best, stats) = self.explore(start_idx, end_idx);
        trace!(
            "Search {start} -> {end} expanded {}, pruned {}, arrivals {}",
            stats.expanded, stats.pruned, stats.arrivals
        );
        match best {
            Some(best) => {
                let path = best.to_path(self.graph);
                debug!(
                    "Found path {start} -> {end} in {} minutes with {} transfers",
                    path.total_time, path.transfers
                );
                (Some(path), stats)
            }
            None => {
                debug!("No path {start} -> {end}");
                (None, stats)
            }
        }
    }

    fn explore(&self, start_idx: u32, end_idx: u32) -> (Option<CandidateRef>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut visited = vec![false; self.graph.stop_count()];
        let mut best: Option<CandidateRef> = None;
        let mut frontier = Frontier::new(self.config.strategy);
        frontier.push(Rc::new(Candidate::origin(start_idx)));

        while let Some(candidate) = frontier.pop() {
            if let Some(best) = &best
                && f64::from(candidate.time) > f64::from(best.time) * self.config.prune_factor
            {
                stats.pruned += 1;
                continue;
            }

            if candidate.stop_idx == end_idx {
                stats.arrivals += 1;
                if best.as_ref().is_none_or(|best| candidate.time < best.time) {
                    best = Some(candidate);
                }
                if self.config.strategy == Strategy::Earliest {
                    break;
                }
                continue;
            }

            // The first arrival claims the stop, whatever its time
            if visited[candidate.stop_idx as usize] {
                continue;
            }
            visited[candidate.stop_idx as usize] = true;
            stats.expanded += 1;

            for &next_idx in self.graph.neighbours(candidate.stop_idx) {
                if visited[next_idx as usize] || candidate.visits(next_idx) {
                    continue;
                }
                let Some((line, minutes)) = self.classify(candidate.stop_idx, next_idx) else {
                    continue;
                };
                frontier.push(Rc::new(candidate.extend(next_idx, line, minutes)));
            }
        }

        (best, stats)
    }

    /// Same-line hop if the stops are adjacent on some line, otherwise a
    /// transfer. `None` when neither applies.
    fn classify(&self, from_idx: u32, to_idx: u32) -> Option<(Option<u32>, u32)> {
        if let Some(line) = self.graph.line_between(from_idx, to_idx) {
            let minutes = line
                .segment_minutes(from_idx, to_idx)
                .unwrap_or(self.config.unknown_segment_minutes);
            return Some((Some(line.index), minutes));
        }
        self.graph
            .transfer_minutes(from_idx, to_idx)
            .map(|minutes| (None, minutes))
    }
}

#[cfg(test)]
fn built_graph(visits: Vec<crate::repository::ScheduledStopVisit>) -> Graph {
    let mut builder = crate::router::GraphBuilder::new(crate::repository::Snapshot::new(
        Vec::new(),
        visits,
        Vec::new(),
    ));
    builder.ingest_stops().unwrap();
    builder.ingest_stop_times().unwrap();
    builder.ingest_transfers().unwrap();
    builder.into_graph().unwrap()
}

#[test]
fn slow_candidates_are_pruned_after_first_result() {
    use crate::repository::ScheduledStopVisit as Visit;
    // S reaches E in 10 minutes on A, X is 20 minutes away on B
    let graph = built_graph(vec![
        Visit::new("A", "S", "08:00:00", 1),
        Visit::new("A", "E", "08:10:00", 2),
        Visit::new("B", "S", "08:00:00", 1),
        Visit::new("B", "X", "08:20:00", 2),
    ]);
    let config = Config::default();
    let (path, stats) = graph
        .search(&config)
        .find_shortest_path_with_stats("S", "E");
    assert_eq!(path.unwrap().total_time, 10);
    assert_eq!(stats.pruned, 1);
    assert_eq!(stats.expanded, 1);
    assert_eq!(stats.arrivals, 1);
}

#[test]
fn wider_prune_factor_keeps_slower_candidates() {
    use crate::repository::ScheduledStopVisit as Visit;
    let graph = built_graph(vec![
        Visit::new("A", "S", "08:00:00", 1),
        Visit::new("A", "E", "08:10:00", 2),
        Visit::new("B", "S", "08:00:00", 1),
        Visit::new("B", "X", "08:20:00", 2),
    ]);
    let config = Config::default().with_prune_factor(3.0);
    let (path, stats) = graph
        .search(&config)
        .find_shortest_path_with_stats("S", "E");
    assert_eq!(path.unwrap().total_time, 10);
    assert_eq!(stats.pruned, 0);
    assert_eq!(stats.expanded, 2);
}

#[test]
fn earliest_strategy_stops_at_first_settled_arrival() {
    use crate::repository::ScheduledStopVisit as Visit;
    let graph = built_graph(vec![
        Visit::new("A", "S", "08:00:00", 1),
        Visit::new("A", "E", "08:10:00", 2),
        Visit::new("B", "S", "08:00:00", 1),
        Visit::new("B", "M", "08:01:00", 2),
        Visit::new("B", "E", "08:02:00", 3),
    ]);
    let config = Config::default().with_strategy(Strategy::Earliest);
    let (path, stats) = graph
        .search(&config)
        .find_shortest_path_with_stats("S", "E");
    let path = path.unwrap();
    assert_eq!(path.total_time, 2);
    assert_eq!(stats.arrivals, 1);
}

#[test]
fn queued_orders_by_time_then_insertion() {
    let mut frontier = Frontier::new(Strategy::Earliest);
    for (stop_idx, time) in [(0, 5), (1, 1), (2, 5)] {
        let mut candidate = Candidate::origin(stop_idx);
        candidate.time = time;
        frontier.push(Rc::new(candidate));
    }
    let order: Vec<u32> = std::iter::from_fn(|| frontier.pop())
        .map(|candidate| candidate.stop_idx)
        .collect();
    assert_eq!(order, vec![1, 0, 2]);
}
