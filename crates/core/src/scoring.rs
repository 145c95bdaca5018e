//! Scoring module - line clear points, leveling and gravity
//!
//! Classic rules: the points table is multiplied by the current level, the
//! level is derived from total lines, and gravity speeds up linearly per level
//! down to a floor.

use std::time::Duration;

use crate::types::{
    GRAVITY_DECREMENT_MS, INITIAL_GRAVITY_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_GRAVITY_MS,
};

/// Points for clearing `lines` rows at once at `level` (1-based).
///
/// Counts outside the table score 0.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .map_or(0, |&base| base.saturating_mul(level))
}

/// Level reached after `total_lines` cleared lines.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Time between automatic one-row drops at `level`.
pub fn gravity_interval(level: u32) -> Duration {
    let speedup = GRAVITY_DECREMENT_MS.saturating_mul(u64::from(level.saturating_sub(1)));
    let ms = INITIAL_GRAVITY_MS.saturating_sub(speedup).max(MIN_GRAVITY_MS);
    Duration::from_millis(ms)
}
