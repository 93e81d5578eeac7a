use crate::io::{
    fmt::{Cell, Text},
    Action, Screen, XY,
};

use super::Bounds;

macro_rules! split_fn {
    ( $( $name:ident ),* $(,)? ) => { paste::paste! { $(
        /// Split off a chunk of this region. Returns `(chunk, rest)`. Mouse input only goes to the side it's on.
        #[must_use]
        pub fn [<split_ $name>](self, amt: usize) -> (Region, Region) {
            let (chunk, rest) = self.bounds.[<split_ $name>](amt);
            (self.sub(chunk), self.sub(rest))
        }
    )* } }
}

/// Something you can put an [`Attachment`] in.
///
/// You start with a `Region` that covers the whole screen and holds one input. Then you split it into smaller regions
/// until you've got your whole layout. Mouse actions only get passed down to the regions they happen in; key presses
/// go everywhere.
///
/// The region also knows where the mouse is hovering, even when the current input isn't a mouse movement, so that
/// highlights survive redraws.
#[derive(Clone, Debug)]
pub struct Region {
    bounds: Bounds,
    input: Option<Action>,
    hover: Option<XY>,
}

impl Region {
    /// A region covering a whole screen of the given size.
    pub fn new(size: XY, input: Action, hover: Option<XY>) -> Self {
        let bounds = Bounds { pos: XY(0, 0), size };
        Self {
            input: bounds.filter(&Some(input)),
            hover: hover.filter(|&h| bounds.contains(h)),
            bounds,
        }
    }

    fn sub(&self, bounds: Bounds) -> Region {
        Region {
            input: bounds.filter(&self.input),
            hover: self.hover.filter(|&h| bounds.contains(h)),
            bounds,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn size(&self) -> XY {
        self.bounds.size
    }

    /// The input this region should react to, if any.
    pub fn input(&self) -> Option<&Action> {
        self.input.as_ref()
    }

    /// Whether the mouse is over this region.
    pub fn hovered(&self) -> bool {
        self.hover.is_some()
    }

    split_fn!(left, right, top, bottom);

    /// A `width`-column slice out of the middle.
    pub fn center_x(self, width: usize) -> Region {
        let b = self.bounds.center_x(width);
        self.sub(b)
    }

    /// Attach something to this region, returning whatever it wants based on the input.
    pub fn attach<A: Attachment>(self, screen: &mut Screen, attachment: A) -> A::Output {
        attachment.attach(self, screen)
    }

    /// Fill the whole region with copies of a cell.
    pub fn fill(&self, screen: &mut Screen, cell: Cell) {
        let Bounds { pos, size } = self.bounds;
        for y in pos.y()..pos.y() + size.y() {
            for x in pos.x()..pos.x() + size.x() {
                if let Some(c) = screen.cell_mut(XY(x, y)) {
                    *c = cell.clone();
                }
            }
        }
    }

    /// Write text on the region's first row, cut off at its right edge.
    pub fn text(&self, screen: &mut Screen, text: Vec<Text>) {
        if self.size().y() > 0 {
            screen.write(self.bounds.pos, self.size().x(), text);
        }
    }

    /// Write text in the middle of the region.
    pub fn centered(&self, screen: &mut Screen, text: Vec<Text>) {
        let width: usize = text.iter().map(Text::width).sum();
        let (_, rest) = self.bounds.split_top(self.size().y() / 2);
        let line = rest.center_x(width);
        screen.write(line.pos, line.size.x(), text);
    }
}

/// A UI element: draws itself into a [`Region`] and reacts to its input.
pub trait Attachment {
    type Output;
    fn attach(self, region: Region, screen: &mut Screen) -> Self::Output;
}

#[cfg(test)]
mod test {
    use crate::io::{Key, MouseButton};

    use super::*;

    #[test]
    fn mouse_input_follows_position() {
        let click = Action::MousePress { pos: XY(1, 3), button: MouseButton::Left };
        let root = Region::new(XY(10, 5), click.clone(), Some(XY(8, 0)));
        let (top, bottom) = root.split_top(2);
        assert_eq!(top.input(), None);
        assert!(top.hovered());
        assert_eq!(bottom.input(), Some(&click));
        assert!(!bottom.hovered());
    }

    #[test]
    fn keys_go_everywhere() {
        let key = Action::KeyPress { key: Key::Char('p') };
        let root = Region::new(XY(10, 5), key.clone(), None);
        let (left, right) = root.split_left(5);
        assert_eq!(left.input(), Some(&key));
        assert_eq!(right.input(), Some(&key));
    }

    #[test]
    fn centered_text_lands_in_the_middle() {
        let mut screen = Screen::new(XY(9, 3));
        let root = Region::new(screen.size(), Action::Redraw, None);
        root.centered(&mut screen, crate::text!("abc"));
        assert_eq!(screen.row_text(1), "   abc   ");
    }

    #[test]
    fn fill_stays_inside() {
        let mut screen = Screen::new(XY(4, 2));
        let root = Region::new(screen.size(), Action::Redraw, None);
        let (_, right) = root.split_left(3);
        right.fill(&mut screen, Cell::of('#'));
        assert_eq!(screen.row_text(0), "   #");
        assert_eq!(screen.row_text(1), "   #");
    }
}
