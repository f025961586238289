use shakmaty::Move;

pub type Score = i32;

/// Terminal sentinel: forced win/loss, white-positive.
pub const MATE_SCORE: Score = 99_999;
/// Search window bound, strictly outside every reachable score.
pub const SCORE_INFINITY: Score = 100_000;

pub const DEFAULT_DEPTH: u8 = 4;
pub const DEFAULT_HASH_MB: usize = 64;

/// Engine-session knobs. Evaluation weights stay compile-time
/// constants; only cache size and reporting are runtime-configurable.
pub struct EngineConfig {
    pub hash_mb: usize,
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hash_mb: DEFAULT_HASH_MB,
            verbose: false,
        }
    }
}

/// Outcome of one iterative-deepening run.
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: Score,
    /// Deepest fully-completed iteration.
    pub depth: u8,
    pub nodes: u64,
}
