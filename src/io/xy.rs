//! Just the `XY` type.

use std::{
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign},
};

/// A position or size, with an X and a Y component.
///
/// Arithmetic works elementwise with other `XY`s (`XY(2, 3) * XY(4, 5) == XY(8, 15)`) and with scalars
/// (`XY(2, 3) * 4 == XY(8, 12)`).
///
/// When used as a position, `XY(0, 0)` is the top left of the screen and `XY(0, 1)` is just below it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct XY(pub usize, pub usize);

impl XY {
    /// The X component
    pub const fn x(&self) -> usize {
        self.0
    }

    /// The Y component
    pub const fn y(&self) -> usize {
        self.1
    }

    /// Number of cells (or pixels) in an area this size.
    pub const fn area(&self) -> usize {
        self.0 * self.1
    }

    /// Whether this size is at least as big as `other` in both directions.
    pub const fn fits(&self, other: XY) -> bool {
        self.0 >= other.0 && self.1 >= other.1
    }

    /// Contain this XY within the given bounds, elementwise.
    pub fn clamp(self, top_left: Self, bottom_right: Self) -> XY {
        let x = self.x().clamp(top_left.x(), bottom_right.x());
        let y = self.y().clamp(top_left.y(), bottom_right.y());
        XY(x, y)
    }

    /// Subtract without going below zero in either component.
    pub fn saturating_sub(self, rhs: XY) -> XY {
        XY(self.0.saturating_sub(rhs.0), self.1.saturating_sub(rhs.1))
    }
}

macro_rules! xy_op {
    ( $( $trait:ident($fn:ident) => $op:tt $assn_op:tt );* $(;)? ) => {
        $(
            impl $trait for XY {
                type Output = XY;
                fn $fn(self, rhs: XY) -> XY {
                    XY(self.0 $op rhs.0, self.1 $op rhs.1)
                }
            }

            impl $trait<usize> for XY {
                type Output = XY;
                fn $fn(self, rhs: usize) -> XY {
                    XY(self.0 $op rhs, self.1 $op rhs)
                }
            }

            paste::paste! {
                impl [< $trait Assign >] for XY {
                    fn [< $fn _assign >] (&mut self, rhs: XY) {
                        self.0 $assn_op rhs.0;
                        self.1 $assn_op rhs.1;
                    }
                }
            }
        )*
    };
}

xy_op! {
    Add(add) => + +=;
    Sub(sub) => - -=;
    Mul(mul) => * *=;
    Div(div) => / /=;
    Rem(rem) => % %=;
}

impl fmt::Display for XY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.1)
    }
}

impl fmt::Debug for XY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XY({}, {})", self.0, self.1)
    }
}

impl From<(usize, usize)> for XY {
    fn from(f: (usize, usize)) -> XY {
        XY(f.0, f.1)
    }
}
