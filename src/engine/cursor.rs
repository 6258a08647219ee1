//! Cursor algebra.
//!
//! The cursor is always scoped to the children of the current parent and
//! always satisfies `0 <= start <= end <= child_count`. Every move clamps
//! against the child count it is given.
//!
//! # Span inversion
//!
//! [`Cursor::moved_start`] and [`Cursor::moved_end`] move one edge, clamp it
//! to the tree bounds and then re-sort the pair. Moving the end backward
//! past the start therefore swaps the edges: the old start becomes the new
//! end, and the next `moved_end` moves what used to be the start.
//!
//! ```text
//! Span { 2, 4 }  --moved_end(-4)-->  Span { 0, 2 }  --moved_end(+1)-->  Span { 0, 3 }
//! ```
//!
//! Spans can be inverted and re-grown from either side this way.

/// Focus among the current parent's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// A position between children. `Single(i)` focuses the child at `i`
    /// (or the end of the list when `i == child_count`).
    Single(usize),
    /// An inclusive range of children.
    Span { start: usize, end: usize },
}

impl Default for Cursor {
    fn default() -> Self {
        Self::Single(0)
    }
}

impl Cursor {
    /// Start edge. For a single cursor this is its index.
    pub fn start(self) -> usize {
        match self {
            Self::Single(index) => index,
            Self::Span { start, .. } => start,
        }
    }

    /// End edge. For a single cursor this is its index.
    pub fn end(self) -> usize {
        match self {
            Self::Single(index) => index,
            Self::Span { end, .. } => end,
        }
    }

    pub fn is_span(self) -> bool {
        matches!(self, Self::Span { .. })
    }

    /// Index of a single cursor, `None` in span mode.
    pub fn single(self) -> Option<usize> {
        match self {
            Self::Single(index) => Some(index),
            Self::Span { .. } => None,
        }
    }

    /// `MoveCursor`: collapse to the start edge, then move by `delta`.
    pub fn moved(self, delta: isize, len: usize) -> Self {
        Self::Single(move_position(self.start(), delta, len))
    }

    /// `MoveCursorStart`: move the start edge, clamp, re-sort.
    pub fn moved_start(self, delta: isize, len: usize) -> Self {
        let moved = move_position(self.start(), delta, len);
        Self::sorted(moved, self.end())
    }

    /// `MoveCursorEnd`: move the end edge, clamp, re-sort.
    pub fn moved_end(self, delta: isize, len: usize) -> Self {
        let moved = move_position(self.end(), delta, len);
        Self::sorted(self.start(), moved)
    }

    /// Re-establish the bounds invariant after the child list was spliced
    /// underneath the cursor. Keeps the mode.
    pub fn clamped(self, len: usize) -> Self {
        match self {
            Self::Single(index) => Self::Single(index.min(len)),
            Self::Span { start, end } => Self::Span {
                start: start.min(len),
                end: end.min(len),
            },
        }
    }

    fn sorted(a: usize, b: usize) -> Self {
        Self::Span {
            start: a.min(b),
            end: a.max(b),
        }
    }
}

/// Move `position` by `delta`, clamped to `[0, len]`.
pub fn move_position(position: usize, delta: isize, len: usize) -> usize {
    position.saturating_add_signed(delta).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_position_clamps_both_ends() {
        assert_eq!(move_position(2, 1, 5), 3);
        assert_eq!(move_position(2, -5, 5), 0);
        assert_eq!(move_position(2, 10, 5), 5);
        assert_eq!(move_position(0, 0, 0), 0);
    }

    #[test]
    fn test_moved_collapses_span_at_start() {
        let cursor = Cursor::Span { start: 1, end: 3 };
        assert_eq!(cursor.moved(0, 5), Cursor::Single(1));
        assert_eq!(cursor.moved(2, 5), Cursor::Single(3));
    }

    #[test]
    fn test_moved_end_promotes_single_to_span() {
        assert_eq!(
            Cursor::Single(0).moved_end(3, 5),
            Cursor::Span { start: 0, end: 3 }
        );
        assert_eq!(
            Cursor::Single(2).moved_end(0, 5),
            Cursor::Span { start: 2, end: 2 }
        );
    }

    #[test]
    fn test_moved_start_promotes_single_to_span() {
        assert_eq!(
            Cursor::Single(4).moved_start(-2, 5),
            Cursor::Span { start: 2, end: 4 }
        );
    }

    #[test]
    fn test_moved_end_past_start_inverts_span() {
        let cursor = Cursor::Span { start: 2, end: 4 };

        let inverted = cursor.moved_end(-4, 5);
        assert_eq!(inverted, Cursor::Span { start: 0, end: 2 });

        // The old start is now the end edge that keeps moving
        assert_eq!(inverted.moved_end(1, 5), Cursor::Span { start: 0, end: 3 });
    }

    #[test]
    fn test_moved_start_past_end_inverts_span() {
        let cursor = Cursor::Span { start: 1, end: 2 };

        let inverted = cursor.moved_start(3, 5);
        assert_eq!(inverted, Cursor::Span { start: 2, end: 4 });

        assert_eq!(inverted.moved_start(-1, 5), Cursor::Span { start: 1, end: 4 });
    }

    #[test]
    fn test_span_edges_clamp_to_len() {
        assert_eq!(
            Cursor::Single(1).moved_end(100, 3),
            Cursor::Span { start: 1, end: 3 }
        );
        assert_eq!(
            Cursor::Single(1).moved_start(-100, 3),
            Cursor::Span { start: 0, end: 1 }
        );
    }

    #[test]
    fn test_clamped_keeps_mode() {
        assert_eq!(Cursor::Single(7).clamped(2), Cursor::Single(2));
        assert_eq!(
            Cursor::Span { start: 1, end: 6 }.clamped(3),
            Cursor::Span { start: 1, end: 3 }
        );
    }
}
