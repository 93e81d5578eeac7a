use std::fmt::Display;

use crate::io::{Action, Key, MouseButton, Screen, XY};

use super::{Attachment, Region};

/// How far a [`List`] has been scrolled back from its newest entry.
///
/// The default follows the newest entry as entries are added.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scroll {
    back: usize,
}

impl Scroll {
    /// Jump back to following the newest entry.
    pub fn follow(&mut self) {
        self.back = 0;
    }

    pub fn is_following(&self) -> bool {
        self.back == 0
    }

    /// Handle the scroll wheel (3 lines a notch), arrow keys and page keys. Returns whether the view moved.
    fn handle(&mut self, input: Option<&Action>, page: usize, max: usize) -> bool {
        let before = self.back;
        match input {
            Some(Action::MousePress {
                button: MouseButton::ScrollUp,
                ..
            }) => self.back += 3,
            Some(Action::MousePress {
                button: MouseButton::ScrollDown,
                ..
            }) => self.back = self.back.saturating_sub(3),
            Some(Action::KeyPress { key: Key::Up }) => self.back += 1,
            Some(Action::KeyPress { key: Key::Down }) => self.back = self.back.saturating_sub(1),
            Some(Action::KeyPress { key: Key::PageUp }) => self.back += page,
            Some(Action::KeyPress { key: Key::PageDown }) => self.back = self.back.saturating_sub(page),
            Some(Action::KeyPress { key: Key::End }) => self.back = 0,
            _ => (),
        }
        self.back = self.back.min(max);
        self.back != before
    }
}

/// A bottom-anchored list of lines, one per entry, that can be scrolled back through.
pub struct List<'a, T: Display> {
    entries: &'a [T],
    scroll: &'a mut Scroll,
}

impl<'a, T: Display> List<'a, T> {
    pub fn new(entries: &'a [T], scroll: &'a mut Scroll) -> Self {
        Self { entries, scroll }
    }
}

impl<'a, T: Display> Attachment for List<'a, T> {
    /// Whether the list scrolled.
    type Output = bool;

    fn attach(self, region: Region, screen: &mut Screen) -> bool {
        let XY(width, height) = region.size();
        let max = self.entries.len().saturating_sub(height);
        let moved = self.scroll.handle(region.input(), height.max(1), max);

        let end = self.entries.len() - self.scroll.back;
        let start = end.saturating_sub(height);
        let pos = region.bounds().pos;
        for (row, entry) in self.entries[start..end].iter().enumerate() {
            screen.write(pos + XY(0, row), width, crate::text!("{}"(entry)));
        }
        if !self.scroll.is_following() && width > 0 && height > 0 {
            // mark that there's more below
            let corner = pos + XY(width - 1, height - 1);
            screen.write(corner, 1, crate::text!(bright_black "↓"));
        }
        moved
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn render(entries: &[usize], scroll: &mut Scroll, input: Action) -> (bool, Screen) {
        let mut screen = Screen::new(XY(6, 3));
        let region = Region::new(screen.size(), input, None);
        let moved = region.attach(&mut screen, List::new(entries, scroll));
        (moved, screen)
    }

    fn rows(screen: &Screen) -> Vec<String> {
        (0..screen.size().y()).map(|y| screen.row_text(y).trim_end().to_owned()).collect()
    }

    #[test]
    fn short_lists_start_at_the_top() {
        let mut scroll = Scroll::default();
        let (_, screen) = render(&[1, 2], &mut scroll, Action::Redraw);
        assert_eq!(rows(&screen), ["1", "2", ""]);
    }

    #[test]
    fn long_lists_show_the_newest() {
        let mut scroll = Scroll::default();
        let (_, screen) = render(&[1, 2, 3, 4, 5], &mut scroll, Action::Redraw);
        assert_eq!(rows(&screen), ["3", "4", "5"]);
    }

    #[test]
    fn scrolling_back_is_clamped() {
        let entries = [1, 2, 3, 4, 5];
        let mut scroll = Scroll::default();
        let (moved, screen) = render(&entries, &mut scroll, Action::KeyPress { key: Key::Up });
        assert!(moved);
        assert_eq!(rows(&screen), ["2", "3", "4    ↓"]);
        let wheel = Action::MousePress { pos: XY(0, 0), button: MouseButton::ScrollUp };
        let (_, screen) = render(&entries, &mut scroll, wheel);
        assert_eq!(rows(&screen)[0], "1");
        assert!(!render(&entries, &mut scroll, Action::KeyPress { key: Key::PageUp }).0);
        let (moved, screen) = render(&entries, &mut scroll, Action::KeyPress { key: Key::End });
        assert!(moved && scroll.is_following());
        assert_eq!(rows(&screen), ["3", "4", "5"]);
    }
}
