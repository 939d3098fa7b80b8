/// Base points per lock, indexed by the number of rows it cleared.
///
/// The awarded score is the base multiplied by the level in effect when the
/// piece locked.
pub const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Rows that must be cleared to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

/// Score, level and line counters of a game.
///
/// - **Score**: sum of `SCORE_TABLE[lines] × level` over all locks
/// - **Level**: `total_cleared_lines / 10 + 1`, starting at 1
/// - **Completed pieces**: number of pieces locked
/// - **Line clear distribution**: number of locks per cleared-row count
///
/// Every counter only grows.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// assert_eq!(stats.record_lock(4), 800);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a tracker at level 1 with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of cleared rows.
    ///
    /// Index 0 counts locks that cleared nothing, index 4 counts four-row
    /// clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates the counters after a piece locked and `cleared_lines` rows
    /// were removed. Returns the points awarded.
    ///
    /// Points use the level before the new rows are counted. Clears larger
    /// than four rows, which a single piece cannot produce, score as four.
    pub fn record_lock(&mut self, cleared_lines: usize) -> usize {
        let bucket = cleared_lines.min(SCORE_TABLE.len() - 1);
        let gained = SCORE_TABLE[bucket] * self.level;

        self.score += gained;
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[bucket] += 1;
        self.level = self.total_cleared_lines / LINES_PER_LEVEL + 1;
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.completed_pieces(), 0);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
    }

    #[test]
    fn test_score_table_at_level_one() {
        for (lines, points) in SCORE_TABLE.iter().enumerate() {
            let mut stats = GameStats::new();
            assert_eq!(stats.record_lock(lines), *points);
            assert_eq!(stats.score(), *points);
        }
    }

    #[test]
    fn test_level_follows_cleared_lines() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.record_lock(1);
        }
        assert_eq!(stats.level(), 1);
        stats.record_lock(1);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.total_cleared_lines(), 10);

        stats.record_lock(4);
        stats.record_lock(4);
        stats.record_lock(4);
        assert_eq!(stats.total_cleared_lines(), 22);
        assert_eq!(stats.level(), 3);
    }

    #[test]
    fn test_points_use_level_before_lock() {
        let mut stats = GameStats::new();
        for _ in 0..3 {
            stats.record_lock(3);
        }
        // 9 lines, still level 1; this quad moves to level 2 but scores at level 1.
        assert_eq!(stats.record_lock(4), 800);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.record_lock(1), 200);
    }

    #[test]
    fn test_line_cleared_counter() {
        let mut stats = GameStats::new();
        stats.record_lock(0);
        stats.record_lock(0);
        stats.record_lock(2);
        stats.record_lock(4);

        assert_eq!(stats.line_cleared_counter(), &[2, 0, 1, 0, 1]);
        assert_eq!(stats.completed_pieces(), 4);
    }
}
