//! Team traversal cursors.
//!
//! The skill and role strategies walk the team list in a fixed pattern. The
//! walk state lives here so each strategy is a loop over `(cursor, teams)`
//! instead of a tangle of index variables.

/// Zig-zag walk over `team_count` teams: `0..n`, then `n-1..0`, then `0..n`…
///
/// Each team index at a turning point is yielded twice in a row (once at the
/// end of a round, once at the start of the next), which is what makes the
/// draft a snake draft.
#[derive(Debug, Clone)]
pub struct SnakeCursor {
    index: usize,
    forward: bool,
    team_count: usize,
}

impl SnakeCursor {
    pub fn new(team_count: usize) -> Self {
        Self {
            index: 0,
            forward: true,
            team_count,
        }
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Direction of the walk the next yielded index belongs to.
    pub fn is_forward(&self) -> bool {
        self.forward
    }
}

impl Iterator for SnakeCursor {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.team_count == 0 {
            return None;
        }
        let current = self.index;
        if self.forward {
            if self.index + 1 == self.team_count {
                self.forward = false;
            } else {
                self.index += 1;
            }
        } else if self.index == 0 {
            self.forward = true;
        } else {
            self.index -= 1;
        }
        Some(current)
    }
}

/// Wrapping round-robin pointer over `team_count` teams.
#[derive(Debug, Clone)]
pub struct RoundRobinCursor {
    index: usize,
    team_count: usize,
}

impl RoundRobinCursor {
    pub fn new(team_count: usize) -> Self {
        Self {
            index: 0,
            team_count,
        }
    }

    pub fn current(&self) -> usize {
        self.index
    }

    /// Move one team forward, wrapping from the last team to the first.
    pub fn advance(&mut self) {
        if self.team_count > 0 {
            self.index = (self.index + 1) % self.team_count;
        }
    }

    /// Move forward past every team for which `is_open` is false.
    ///
    /// Probes each team at most once. Returns the index the cursor settled on,
    /// or `None` (cursor unchanged) when no team is open.
    pub fn seek(&mut self, mut is_open: impl FnMut(usize) -> bool) -> Option<usize> {
        let start = self.index;
        for step in 0..self.team_count {
            let candidate = (start + step) % self.team_count;
            if is_open(candidate) {
                self.index = candidate;
                return Some(candidate);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_walks_back_and_forth() {
        let walk: Vec<usize> = SnakeCursor::new(3).take(9).collect();
        assert_eq!(walk, vec![0, 1, 2, 2, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn snake_direction_flips_per_round() {
        let mut cursor = SnakeCursor::new(2);
        assert!(cursor.is_forward());
        cursor.by_ref().take(2).for_each(drop);
        assert!(!cursor.is_forward());
        cursor.by_ref().take(2).for_each(drop);
        assert!(cursor.is_forward());
    }

    #[test]
    fn snake_with_single_team_and_no_teams() {
        assert_eq!(SnakeCursor::new(1).take(3).collect::<Vec<_>>(), vec![0, 0, 0]);
        assert_eq!(SnakeCursor::new(0).next(), None);
    }

    #[test]
    fn round_robin_wraps() {
        let mut cursor = RoundRobinCursor::new(3);
        let mut seen = vec![];
        for _ in 0..5 {
            seen.push(cursor.current());
            cursor.advance();
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn seek_skips_closed_teams_with_wrap() {
        let mut cursor = RoundRobinCursor::new(4);
        cursor.advance();
        cursor.advance(); // at 2
        let open = [true, false, false, false];
        assert_eq!(cursor.seek(|i| open[i]), Some(0));
        assert_eq!(cursor.current(), 0);
    }

    #[test]
    fn seek_returns_none_when_everything_closed() {
        let mut cursor = RoundRobinCursor::new(3);
        cursor.advance();
        assert_eq!(cursor.seek(|_| false), None);
        assert_eq!(cursor.current(), 1);
        assert_eq!(RoundRobinCursor::new(0).seek(|_| true), None);
    }
}
