//! WAD archive identification
//!
//! Only the 4-byte magic is inspected. Lump directory parsing belongs to the
//! asset loader.

use crate::error::{Error, Result};
use std::fmt;

pub const IWAD_MAGIC: &[u8; 4] = b"IWAD";
pub const PWAD_MAGIC: &[u8; 4] = b"PWAD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Complete game data ("IWAD")
    Primary,
    /// Supplemental patch data ("PWAD")
    Patch,
}

impl ArchiveKind {
    pub const fn magic(self) -> &'static [u8; 4] {
        match self {
            Self::Primary => IWAD_MAGIC,
            Self::Patch => PWAD_MAGIC,
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("IWAD"),
            Self::Patch => f.write_str("PWAD"),
        }
    }
}

/// Identify an archive by its magic. Case-sensitive; anything shorter than
/// four bytes is rejected.
pub fn classify(bytes: &[u8]) -> Result<ArchiveKind> {
    let magic = bytes.get(..4);
    [ArchiveKind::Primary, ArchiveKind::Patch]
        .into_iter()
        .find(|kind| magic == Some(&kind.magic()[..]))
        .ok_or_else(|| Error::InvalidFormat {
            found: bytes.iter().take(4).copied().collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(b"IWAD\x00\x00\x00\x00"), Ok(ArchiveKind::Primary));
        assert_eq!(classify(b"PWAD"), Ok(ArchiveKind::Patch));
    }

    #[test]
    fn test_classify_rejects() {
        for bad in [&b"XWAD"[..], b"iwad", b"IWA", b"", b" IWAD"] {
            assert!(
                matches!(classify(bad), Err(Error::InvalidFormat { .. })),
                "{:?} should be rejected",
                bad
            );
        }
        assert_eq!(
            classify(b"XWADxyz"),
            Err(Error::InvalidFormat {
                found: b"XWAD".to_vec()
            })
        );
    }
}
