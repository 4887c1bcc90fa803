use core::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// A character that is neither whitespace nor a hex digit.
    InvalidHexCharacter { position: usize, found: char },
    /// Decoded pixel count does not fill the atlas grid.
    InvalidAtlasLength { expected: usize, found: usize },
    /// Color table entry 0 is not black.
    InvalidPalette,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHexCharacter { position, found } => {
                write!(f, "invalid hex character {:?} at position {}", found, position)
            }
            Self::InvalidAtlasLength { expected, found } => {
                write!(f, "atlas needs {} pixels, got {}", expected, found)
            }
            Self::InvalidPalette => write!(f, "color table entry 0 must be black"),
        }
    }
}

pub type Result<T = ()> = core::result::Result<T, Error>;
