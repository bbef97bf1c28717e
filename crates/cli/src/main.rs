mod dto;

use std::{path::Path, process, time::Instant};

use ridegraph::{
    gtfs::Gtfs,
    router::{self, PathResult, RouteFinder},
};
use tracing::{error, info};

use crate::dto::RouteDto;

const DEFAULT_MAX_PATHS: usize = 3;
const SUGGESTIONS: usize = 3;

struct Args {
    feed: String,
    origin: String,
    destination: String,
    max_paths: usize,
    json: bool,
}

fn parse_args() -> Option<Args> {
    let mut json = false;
    let mut positional: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            positional.push(arg);
        }
    }
    if positional.len() < 3 {
        return None;
    }
    let max_paths = match positional.get(3) {
        Some(value) => value.parse().ok()?,
        None => DEFAULT_MAX_PATHS,
    };
    let mut positional = positional.into_iter();
    Some(Args {
        feed: positional.next()?,
        origin: positional.next()?,
        destination: positional.next()?,
        max_paths,
        json,
    })
}

fn load(path: &Path) -> Result<Gtfs, ridegraph::gtfs::Error> {
    if path.extension().is_some_and(|ext| ext == "zip") {
        Gtfs::new().from_zip(path)
    } else {
        Gtfs::new().from_directory(path)
    }
}

fn print_path(finder: &RouteFinder, index: usize, path: &PathResult) {
    println!(
        "{}. {} min, {} transfer(s)",
        index + 1,
        path.total_time,
        path.transfers
    );
    for segment in path.segments.iter() {
        println!(
            "   {} -> {} ({} min, {})",
            finder.station_name(&segment.from),
            finder.station_name(&segment.to),
            segment.minutes,
            segment.mode
        );
    }
}

fn main() {
    tracing_subscriber::fmt().init();

    let Some(args) = parse_args() else {
        error!("Usage: ridegraph <gtfs zip or dir> <origin> <destination> [max paths] [--json]");
        process::exit(1);
    };

    info!("Loading data...");
    let now = Instant::now();
    let feed = match load(Path::new(&args.feed)) {
        Ok(feed) => feed,
        Err(err) => {
            error!("Could not open {}: {err}", args.feed);
            process::exit(1);
        }
    };
    let finder = match RouteFinder::from_source(&feed).and_then(RouteFinder::prepare) {
        Ok(finder) => finder,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };
    info!("Loading data took {:?}", now.elapsed());

    let paths = match finder.find_routes(&args.origin, &args.destination, args.max_paths) {
        Ok(paths) => paths,
        Err(router::Error::StationNotFound(name)) => {
            error!("No station named {name:?}");
            if let Ok(suggestions) = finder.suggest(&name, SUGGESTIONS)
                && !suggestions.is_empty()
            {
                let names: Vec<&str> = suggestions.iter().map(|stop| &*stop.name).collect();
                info!("Did you mean: {}", names.join(", "));
            }
            process::exit(1);
        }
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };

    if args.json {
        let routes: Vec<RouteDto> = paths
            .iter()
            .map(|path| RouteDto::from_path(&finder, path))
            .collect();
        match serde_json::to_string_pretty(&routes) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!("{err}");
                process::exit(1);
            }
        }
        return;
    }

    if paths.is_empty() {
        info!("No route found");
        return;
    }
    for (index, path) in paths.iter().enumerate() {
        print_path(&finder, index, path);
    }
}
