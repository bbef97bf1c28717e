/// File names looked up inside a GTFS archive or directory.
pub struct Config {
    pub stops_file_name: String,
    pub stop_times_file_name: String,
    pub trips_file_name: String,
    pub transfers_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stops_file_name: "stops.txt".into(),
            stop_times_file_name: "stop_times.txt".into(),
            trips_file_name: "trips.txt".into(),
            transfers_file_name: "transfers.txt".into(),
        }
    }
}
