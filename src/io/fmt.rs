//! Text formatting for the character grid.
//!
//! The 16 basic ANSI [`Color`]s work everywhere. [`Color::Rgb`] is for the avatars' pixels; terminals without true
//! color support will approximate it however they like.

/// The color of a piece of formatted text. Meant to be used through `Text` / `text!`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// An exact 24-bit color.
    Rgb(u8, u8, u8),
}

/// The format of a single formatted item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Format {
    /// The foreground color of the item
    pub fg: Color,
    /// The background color of the item
    pub bg: Color,
    /// Whether it's bolded or not
    pub bold: bool,
    /// Whether it's underlined or not
    pub underline: bool,
}

impl Format {
    /// Plain white on black.
    pub const NONE: Self = Format {
        fg: Color::White,
        bg: Color::Black,
        bold: false,
        underline: false,
    };
}

impl Default for Format {
    fn default() -> Self {
        Self::NONE
    }
}

macro_rules! fmt_fn {
    ( $(
        $name:ident
        $(( $( $arg:ident: $type:ty ),* $(,)? ))?
        =>
        $field:ident
        = $val:expr
    ),* $(,)? ) => { $(
        #[must_use]
        fn $name(mut self $($(, $arg: $type )*)? ) -> Self {
            self.get_fmt_mut().$field = $val;
            self
        }
    )* };
}

/// Trait implemented by all formattable items (`Text` and `Cell`).
pub trait Formatted {
    fn get_fmt(&self) -> &Format;
    fn get_fmt_mut(&mut self) -> &mut Format;
}

/// Provides common formatting operations on anything implementing [`Formatted`].
pub trait FormattedExt: Formatted + Sized {
    /// Directly set the formatting of this item to some [`Format`]
    #[must_use]
    fn fmt(mut self, fmt: Format) -> Self {
        *self.get_fmt_mut() = fmt;
        self
    }

    /// Copy another item's formatting into this one.
    #[must_use]
    fn fmt_of(mut self, rhs: &dyn Formatted) -> Self {
        *self.get_fmt_mut() = rhs.get_fmt().clone();
        self
    }

    fmt_fn! {
        fg(c: Color) => fg = c,                         bg(c: Color) => bg = c,
        black => fg = Color::Black,                     on_black => bg = Color::Black,
        bright_black => fg = Color::BrightBlack,        on_bright_black => bg = Color::BrightBlack,
        red => fg = Color::Red,                         on_red => bg = Color::Red,
        bright_red => fg = Color::BrightRed,            on_bright_red => bg = Color::BrightRed,
        green => fg = Color::Green,                     on_green => bg = Color::Green,
        bright_green => fg = Color::BrightGreen,        on_bright_green => bg = Color::BrightGreen,
        yellow => fg = Color::Yellow,                   on_yellow => bg = Color::Yellow,
        bright_yellow => fg = Color::BrightYellow,      on_bright_yellow => bg = Color::BrightYellow,
        blue => fg = Color::Blue,                       on_blue => bg = Color::Blue,
        bright_blue => fg = Color::BrightBlue,          on_bright_blue => bg = Color::BrightBlue,
        magenta => fg = Color::Magenta,                 on_magenta => bg = Color::Magenta,
        bright_magenta => fg = Color::BrightMagenta,    on_bright_magenta => bg = Color::BrightMagenta,
        cyan => fg = Color::Cyan,                       on_cyan => bg = Color::Cyan,
        bright_cyan => fg = Color::BrightCyan,          on_bright_cyan => bg = Color::BrightCyan,
        white => fg = Color::White,                     on_white => bg = Color::White,
        bright_white => fg = Color::BrightWhite,        on_bright_white => bg = Color::BrightWhite,
        underline => underline = true,
        bold => bold = true,
    }
}

impl<F: Formatted> FormattedExt for F {}

macro_rules! fmt_type {
    (
        $( #[$($attr:meta),* $(,)?] )*
        $svis:vis struct $name:ident { $( $fvis:vis $field:ident: $type:ty ),* $(,)? }
    ) => {
        $( #[$($attr),*] )*
        $svis struct $name {
            $( $fvis $field: $type, )*
            _fmt: Format,
        }
        impl Formatted for $name {
            fn get_fmt(&self) -> &Format {
                &self._fmt
            }
            fn get_fmt_mut(&mut self) -> &mut Format {
                &mut self._fmt
            }
        }
        impl $name {
            pub const fn of( $($field: $type),* ) -> Self {
                Self {
                    $( $field, )*
                    _fmt: Format::NONE,
                }
            }
        }
    };
}

fmt_type!(
    /// A single bit of formatted text. Meant to be used through `text!`, i.e. as a `Vec<Text>`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Text {
        pub text: String,
    }
);

impl Text {
    pub fn plain(s: &str) -> Text {
        Text::of(s.into())
    }

    /// How many cells this text takes up.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Create a single [`Text`].
#[macro_export]
macro_rules! text1 {
    [
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ] => {
        {
            #[allow(unused_imports)]
            use $crate::io::fmt::{FormattedExt as _};
            $crate::io::fmt::Text::of(
                ::std::format!( $text $(, $( $arg ),* )? )
            ) $( . $name () )*
        }
    };
}

/// Create a series of formatted [`Text`]s.
///
/// ```
/// # use rochambeau::text;
/// let line = text!(bold bright_magenta "Round {}"(3), " of the game");
/// assert_eq!(line.len(), 2);
/// ```
#[macro_export]
macro_rules! text {
    [ $(
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ),* $(,)? ] => {
        {
            #[allow(unused_imports)]
            use $crate::io::fmt::{FormattedExt as _};
            ::std::vec![
                $(
                    $crate::io::fmt::Text::of(
                        ::std::format!( $text $(, $( $arg ),* )? )
                    ) $( . $name () )*
                ),*
            ]
        }
    };
}

fmt_type! {
    /// A single character that's been formatted. This is really only meant to be used in `Screen`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Cell { pub ch: char }
}

/// Create a formatted [`Cell`].
#[macro_export]
macro_rules! cell {
    [ $( $name:ident )* $( $char:literal )? ] => {
        {
            #[allow(unused_imports)]
            use $crate::io::fmt::{FormattedExt as _};
            $crate::io::fmt::Cell::of($($char)?) $( .$name() )*
        }
    };
}

impl Cell {
    /// A blank cell with default formatting.
    pub const BLANK: Cell = Cell::of(' ');
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn text_macro_applies_formats_in_order() {
        let line = text!(bold red "a{}"(1), on_blue "b", "c");
        assert_eq!(line.len(), 3);
        assert_eq!(line[0].text, "a1");
        assert!(line[0].get_fmt().bold);
        assert_eq!(line[0].get_fmt().fg, Color::Red);
        assert_eq!(line[1].get_fmt().bg, Color::Blue);
        assert_eq!(line[2].get_fmt(), &Format::NONE);
    }

    #[test]
    fn cell_macro_and_rgb() {
        let c = cell!(underline '▀').fg(Color::Rgb(1, 2, 3));
        assert_eq!(c.ch, '▀');
        assert!(c.get_fmt().underline);
        assert_eq!(c.get_fmt().fg, Color::Rgb(1, 2, 3));
        assert_eq!(Cell::BLANK.ch, ' ');
    }

    #[test]
    fn text_width_counts_chars() {
        assert_eq!(Text::plain("Pâpër").width(), 5);
        assert_eq!(text1!("{}"("ab")).width(), 2);
    }
}
