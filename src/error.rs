//! Error taxonomy for the engine core
//!
//! Only two operations can fail: creating the framebuffer and classifying an
//! archive. Pixel-level operations clip silently instead of reporting.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The memory region could not supply the requested framebuffer.
    Allocation { requested: usize, available: usize },
    /// Width or height was zero, or width*height overflowed.
    InvalidDimensions { width: u32, height: u32 },
    /// Archive magic was not "IWAD" or "PWAD".
    InvalidFormat { found: Vec<u8> },
    /// Configuration file could not be read or parsed.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation {
                requested,
                available,
            } => write!(
                f,
                "framebuffer allocation failed: requested {} bytes, {} available",
                requested, available
            ),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid framebuffer dimensions {}x{}", width, height)
            },
            Self::InvalidFormat { found } => {
                write!(f, "invalid WAD format: magic {:?}", String::from_utf8_lossy(found))
            },
            Self::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
