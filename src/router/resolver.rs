use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tracing::debug;

use crate::{
    repository::Stop,
    shared::{self, Identifiable},
};

/// Maps free-text station names, or stop ids, to the stop ids a query should
/// consider.
#[derive(Debug, Clone, Default)]
pub struct StationResolver {
    stops: Box<[Stop]>,
    stop_lookup: HashMap<Arc<str>, usize>,
    /// Parent station index to child stop indices, in stop order.
    children: HashMap<usize, Vec<usize>>,
}

/// Unique stop ids in the order they were matched.
#[derive(Default)]
struct Matches<'a> {
    ids: Vec<Arc<str>>,
    seen: HashSet<&'a str>,
}

impl<'a> Matches<'a> {
    fn push(&mut self, stop: &'a Stop) {
        if self.seen.insert(&stop.id) {
            self.ids.push(stop.id.clone());
        }
    }
}

impl StationResolver {
    pub fn new(stops: &[Stop]) -> Self {
        let stops: Box<[Stop]> = stops.into();
        let stop_lookup: HashMap<Arc<str>, usize> = stops
            .iter()
            .enumerate()
            .map(|(i, stop)| (stop.id.clone(), i))
            .collect();
        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, stop) in stops.iter().enumerate() {
            if let Some(parent_idx) = stop
                .parent_id
                .as_ref()
                .and_then(|parent_id| stop_lookup.get(parent_id))
            {
                children.entry(*parent_idx).or_default().push(i);
            }
        }
        Self {
            stops,
            stop_lookup,
            children,
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop_by_id(&self, stop_id: &str) -> Option<&Stop> {
        let idx = self.stop_lookup.get(stop_id)?;
        Some(&self.stops[*idx])
    }

    /// Child stops of a parent station, empty for anything else.
    pub fn children_of(&self, stop_id: &str) -> Vec<&Stop> {
        self.stop_lookup
            .get(stop_id)
            .map(|idx| self.children_of_idx(*idx).collect())
            .unwrap_or_default()
    }

    /// Resolves a stop id or station name to unique stop ids.
    ///
    /// An exact id returns that stop. Otherwise an exact normalized name match
    /// returns every stop with that name, widened by every stop whose name
    /// contains the query. Without an exact name, any name that contains or is
    /// contained by the query matches. Parent stations bring their children.
    /// Nothing matching yields an empty vec.
    pub fn resolve(&self, name_or_id: &str) -> Vec<Arc<str>> {
        let mut matches = Matches::default();
        if let Some(idx) = self.stop_lookup.get(name_or_id) {
            self.push_with_children(&mut matches, *idx);
            return matches.ids;
        }

        let query = shared::normalize(name_or_id);
        if query.is_empty() {
            return matches.ids;
        }

        let exact: Vec<usize> = self
            .stops
            .iter()
            .enumerate()
            .filter(|(_, stop)| *stop.normalized_name == *query)
            .map(|(i, _)| i)
            .collect();

        if exact.is_empty() {
            for (i, stop) in self.stops.iter().enumerate() {
                let name = stop.normalized_name();
                if name.is_empty() {
                    continue;
                }
                if name.contains(query.as_str()) || query.contains(name) {
                    self.push_with_children(&mut matches, i);
                }
            }
            debug!(
                "Resolved {name_or_id:?} loosely to {} stops",
                matches.ids.len()
            );
        } else {
            for idx in exact {
                self.push_with_children(&mut matches, idx);
            }
            for (i, stop) in self.stops.iter().enumerate() {
                if stop.normalized_name().contains(query.as_str()) {
                    self.push_with_children(&mut matches, i);
                }
            }
            debug!("Resolved {name_or_id:?} to {} stops", matches.ids.len());
        }
        matches.ids
    }

    /// Distinct station names closest to the query, best first.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&Stop> {
        let mut names: HashSet<&str> = HashSet::new();
        shared::search(query, &self.stops)
            .into_iter()
            .filter(|stop| names.insert(stop.normalized_name()))
            .take(limit)
            .collect()
    }

    fn children_of_idx(&self, idx: usize) -> impl Iterator<Item = &Stop> {
        let children = if self.stops[idx].is_station() {
            self.children.get(&idx).map(Vec::as_slice).unwrap_or_default()
        } else {
            &[]
        };
        children.iter().map(|child| &self.stops[*child])
    }

    fn push_with_children<'a>(&'a self, matches: &mut Matches<'a>, idx: usize) {
        matches.push(&self.stops[idx]);
        for child in self.children_of_idx(idx) {
            matches.push(child);
        }
    }
}
