use crate::io::{
    fmt::{Cell, Color, FormattedExt},
    Action, MouseButton, Screen, XY,
};

use super::{Attachment, Region};

/// A clickable button.
///
/// Renders as a filled box with its label in the middle. It lights up while the mouse is over it and flashes when
/// it's clicked or its hotkey is pressed. The hotkey's letter in the label is underlined.
pub struct Button<'l> {
    label: &'l str,
    hotkey: Option<char>,
    fg: Color,
    bg: Color,
}

impl<'l> Button<'l> {
    pub fn new(label: &'l str) -> Self {
        Self {
            label,
            hotkey: None,
            fg: Color::BrightWhite,
            bg: Color::BrightBlack,
        }
    }

    /// Also click the button when this key is pressed, regardless of where the mouse is.
    pub fn hotkey(mut self, ch: char) -> Self {
        self.hotkey = Some(ch);
        self
    }

    pub fn colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    fn is_hotkey(&self, input: &Action) -> bool {
        match (self.hotkey, input) {
            (Some(h), Action::KeyPress { key }) => key.is_char(h),
            _ => false,
        }
    }
}

impl<'l> Attachment for Button<'l> {
    /// Whether the button was clicked.
    type Output = bool;

    fn attach(self, region: Region, screen: &mut Screen) -> bool {
        let click = match region.input() {
            Some(Action::MousePress {
                button: MouseButton::Left,
                ..
            }) => true,
            Some(other) => self.is_hotkey(other),
            None => false,
        };
        let (fg, bg) = match (region.hovered(), click) {
            (_, true) => (Color::Black, Color::White),
            (true, false) => (Color::Black, Color::BrightWhite),
            (false, false) => (self.fg, self.bg),
        };
        let blank = Cell::of(' ').fg(fg).bg(bg).bold();
        region.fill(screen, blank.clone());

        let bounds = region.bounds();
        let width = self.label.chars().count().min(bounds.size.x());
        let row = bounds.pos.y() + bounds.size.y() / 2;
        let left = bounds.pos.x() + (bounds.size.x() - width) / 2;
        let mut underlined = false;
        for (i, ch) in self.label.chars().take(width).enumerate() {
            let mut cell = Cell::of(ch).fmt_of(&blank);
            if !underlined && self.hotkey.map_or(false, |h| ch.eq_ignore_ascii_case(&h)) {
                cell = cell.underline();
                underlined = true;
            }
            if let Some(dest) = screen.cell_mut(XY(left + i, row)) {
                *dest = cell;
            }
        }
        click
    }
}

#[cfg(test)]
mod test {
    use crate::io::{fmt::Formatted, Key};

    use super::*;

    fn attach(input: Action, hover: Option<XY>) -> (bool, Screen) {
        let mut screen = Screen::new(XY(8, 3));
        let region = Region::new(screen.size(), input, hover);
        let clicked = region.attach(&mut screen, Button::new("Rock").hotkey('r'));
        (clicked, screen)
    }

    #[test]
    fn renders_label_centered_with_hotkey_underlined() {
        let (clicked, screen) = attach(Action::Redraw, None);
        assert!(!clicked);
        assert_eq!(screen.row_text(1), "  Rock  ");
        assert!(screen[1][2].get_fmt().underline);
        assert!(!screen[1][3].get_fmt().underline);
        assert_eq!(screen[0][0].get_fmt().bg, Color::BrightBlack);
    }

    #[test]
    fn left_click_clicks() {
        let (clicked, _) = attach(Action::MousePress { pos: XY(1, 1), button: MouseButton::Left }, None);
        assert!(clicked);
        let (clicked, _) = attach(Action::MousePress { pos: XY(1, 1), button: MouseButton::Right }, None);
        assert!(!clicked);
    }

    #[test]
    fn hotkey_clicks_in_either_case() {
        assert!(attach(Action::KeyPress { key: Key::Char('r') }, None).0);
        assert!(attach(Action::KeyPress { key: Key::Char('R') }, None).0);
        assert!(!attach(Action::KeyPress { key: Key::Char('p') }, None).0);
        assert!(!attach(Action::KeyRelease { key: Key::Char('r') }, None).0);
    }

    #[test]
    fn hover_highlights() {
        let (_, screen) = attach(Action::Redraw, Some(XY(0, 0)));
        assert_eq!(screen[0][0].get_fmt().bg, Color::BrightWhite);
        let (_, screen) = attach(Action::KeyPress { key: Key::Char('r') }, None);
        assert_eq!(screen[0][0].get_fmt().bg, Color::White);
    }
}
