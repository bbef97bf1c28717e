/// Order in which the search frontier hands out candidates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// FIFO with visited-once expansion. Whichever candidate reaches a stop
    /// first claims it, so the result depends on expansion order and is not
    /// guaranteed to be the fastest.
    #[default]
    FirstFound,
    /// Frontier ordered by accumulated minutes (Dijkstra). Returns the
    /// fastest path under the same edge costs. Results differ from
    /// [`Strategy::FirstFound`], so this must be opted into.
    Earliest,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Cost of a transfer without a minimum transfer time.
    pub default_transfer_minutes: u32,
    /// Cost of the synthetic edges between directional variants of a stop.
    pub variant_transfer_minutes: u32,
    /// Cost of a same-line hop whose segment time was never recorded.
    pub unknown_segment_minutes: u32,
    /// Candidates slower than `prune_factor` times the best result are dropped.
    pub prune_factor: f64,
    pub strategy: Strategy,
    /// Trailing characters that mark a directional variant, e.g. `101N`.
    pub variant_suffixes: Box<[char]>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_transfer_minutes: 5,
            variant_transfer_minutes: 2,
            unknown_segment_minutes: 3,
            prune_factor: 1.5,
            strategy: Strategy::FirstFound,
            variant_suffixes: Box::new(['N', 'S', 'E', 'W']),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_prune_factor(mut self, prune_factor: f64) -> Self {
        self.prune_factor = prune_factor;
        self
    }

    pub fn with_default_transfer_minutes(mut self, minutes: u32) -> Self {
        self.default_transfer_minutes = minutes;
        self
    }

    pub fn with_variant_transfer_minutes(mut self, minutes: u32) -> Self {
        self.variant_transfer_minutes = minutes;
        self
    }

    pub fn with_variant_suffixes(mut self, suffixes: &[char]) -> Self {
        self.variant_suffixes = suffixes.into();
        self
    }
}
