//! The character grid everything renders onto.

use std::ops;

use super::{
    fmt::{Cell, FormattedExt, Text},
    xy::XY,
};

/// A text framebuffer.
///
/// Everything renders onto one of these, then the whole thing is handed to an IO system at once. That avoids
/// flickering and partial renders.
pub struct Screen {
    cells: Vec<Cell>,
    size: XY,
}

impl Screen {
    /// Create a new `Screen` in the given size.
    pub fn new(size: XY) -> Self {
        let mut res = Self {
            cells: vec![],
            size: XY(0, 0),
        };
        res.resize(size);
        res
    }

    /// How big this Screen is, in characters.
    pub fn size(&self) -> XY {
        self.size
    }

    /// Returns an iterator over the rows in a screen.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Cell]> + ExactSizeIterator {
        self.cells.chunks(self.size.x().max(1)).take(self.size.y())
    }

    /// One row's characters as a `String`, ignoring formatting.
    pub fn row_text(&self, row: usize) -> String {
        self[row].iter().map(|c| c.ch).collect()
    }

    /// Clear this screen's contents, filling it with blank cells.
    pub fn clear(&mut self) {
        self.resize(self.size())
    }

    /// Resize the screen, clearing its contents at the same time. Does not reallocate unless the screen is growing.
    pub fn resize(&mut self, size: XY) {
        self.cells.truncate(0);
        self.cells.resize(size.area(), Cell::BLANK);
        self.size = size;
    }

    /// Mutable access to one cell, if it's on the screen.
    pub fn cell_mut(&mut self, pos: XY) -> Option<&mut Cell> {
        if pos.x() < self.size.x() && pos.y() < self.size.y() {
            Some(&mut self.cells[pos.y() * self.size.x() + pos.x()])
        } else {
            None
        }
    }

    /// Write some formatted text at a position, stopping at `limit` columns or the edge of the screen.
    ///
    /// This **does not** handle newlines or wrapping. Returns how many cells were written.
    pub fn write(&mut self, pos: XY, limit: usize, text: Vec<Text>) -> usize {
        if pos.y() >= self.size.y() {
            return 0;
        }
        let end = self.size.x().min(pos.x().saturating_add(limit));
        let mut x = pos.x();
        for chunk in text {
            for ch in chunk.text.chars() {
                if x >= end {
                    return x - pos.x();
                }
                self[pos.y()][x] = Cell::of(ch).fmt_of(&chunk);
                x += 1;
            }
        }
        x.saturating_sub(pos.x())
    }
}

impl ops::Index<usize> for Screen {
    type Output = [Cell];
    fn index(&self, row: usize) -> &Self::Output {
        let start = row * self.size.x();
        let end = start + self.size.x();
        &self.cells[start..end]
    }
}

impl ops::IndexMut<usize> for Screen {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        let start = row * self.size.x();
        let end = start + self.size.x();
        &mut self.cells[start..end]
    }
}
