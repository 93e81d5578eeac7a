use std::{borrow::Cow, fmt};

#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// An `io::Error` occurred, e.g. an asset file couldn't be read.
    Io(std::io::Error),
    /// An animation couldn't be decoded.
    Decode(gif::DecodingError),
    /// A sound couldn't be played. Holds the audio library's description of why.
    Audio(String),
    /// While a GUI backend was initializing, `winit` couldn't make a window.
    #[cfg(feature = "__sys_gui")]
    Winit(winit::error::OsError),
    /// Just directly contains an error message.
    Bare(Cow<'static, str>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {}", e),
            Self::Decode(e) => write!(f, "decoding: {}", e),
            Self::Audio(e) => write!(f, "audio: {}", e),
            #[cfg(feature = "__sys_gui")]
            Self::Winit(e) => write!(f, "windowing: {}", e),
            Self::Bare(e) => f.write_str(e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Decode(e) => Some(e),
            #[cfg(feature = "__sys_gui")]
            Self::Winit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<gif::DecodingError> for Error {
    fn from(value: gif::DecodingError) -> Self {
        Self::Decode(value)
    }
}

#[cfg(feature = "__sys_gui")]
impl From<winit::error::OsError> for Error {
    fn from(value: winit::error::OsError) -> Self {
        Self::Winit(value)
    }
}

impl From<&'static str> for Error {
    fn from(value: &'static str) -> Self {
        Self::Bare(Cow::Borrowed(value))
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::Bare(Cow::Owned(value))
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use std::io;

    use super::*;

    #[test]
    fn display_names_the_failing_layer() {
        let e: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(e.to_string(), "io: gone");
        assert_eq!(Error::Audio("no device".into()).to_string(), "audio: no device");
        assert_eq!(Error::from("plain").to_string(), "plain");
    }
}
