use crate::io::{Action, XY};

/// A rectangle on the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Bounds {
    pub pos: XY,
    pub size: XY,
}

impl Bounds {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            pos: XY(x, y),
            size: XY(width, height),
        }
    }

    /// Cut off the leftmost `amt` columns (or as many as there are). Returns `(left, rest)`.
    pub fn split_left(self, amt: usize) -> (Bounds, Bounds) {
        let amt = amt.min(self.size.x());
        let left = Bounds {
            pos: self.pos,
            size: XY(amt, self.size.y()),
        };
        let rest = Bounds {
            pos: self.pos + XY(amt, 0),
            size: self.size - XY(amt, 0),
        };
        (left, rest)
    }

    /// Cut off the rightmost `amt` columns. Returns `(right, rest)`.
    pub fn split_right(self, amt: usize) -> (Bounds, Bounds) {
        let (rest, right) = self.split_left(self.size.x().saturating_sub(amt));
        (right, rest)
    }

    /// Cut off the topmost `amt` rows. Returns `(top, rest)`.
    pub fn split_top(self, amt: usize) -> (Bounds, Bounds) {
        let amt = amt.min(self.size.y());
        let top = Bounds {
            pos: self.pos,
            size: XY(self.size.x(), amt),
        };
        let rest = Bounds {
            pos: self.pos + XY(0, amt),
            size: self.size - XY(0, amt),
        };
        (top, rest)
    }

    /// Cut off the bottommost `amt` rows. Returns `(bottom, rest)`.
    pub fn split_bottom(self, amt: usize) -> (Bounds, Bounds) {
        let (rest, bottom) = self.split_top(self.size.y().saturating_sub(amt));
        (bottom, rest)
    }

    /// A `width`-column slice out of the horizontal middle.
    pub fn center_x(self, width: usize) -> Bounds {
        let width = width.min(self.size.x());
        let (_, rest) = self.split_left((self.size.x() - width) / 2);
        let (mid, _) = rest.split_left(width);
        mid
    }

    pub fn contains(&self, pos: XY) -> bool {
        let xs = self.pos.x()..(self.pos.x() + self.size.x());
        let ys = self.pos.y()..(self.pos.y() + self.size.y());
        xs.contains(&pos.x()) && ys.contains(&pos.y())
    }

    /// Filters out [`Action`]s which didn't occur in this `Bounds`.
    pub fn filter(&self, action: &Option<Action>) -> Option<Action> {
        let action = action.as_ref()?;
        match action.position() {
            Some(pos) if !self.contains(pos) => None,
            _ => Some(action.clone()),
        }
    }
}
