//! Memory regions the framebuffer draws its storage from
//!
//! On the device the pixel buffer lives in PSRAM, a large slow pool separate
//! from working memory. The host models that pool with a byte budget so the
//! startup failure path behaves the same way.

use crate::error::{Error, Result};

/// External provider of framebuffer storage
pub trait MemoryRegion {
    /// Claim `bytes` from the region. Fails with `Error::Allocation` if the
    /// region cannot satisfy the request.
    fn reserve(&mut self, bytes: usize) -> Result<()>;

    /// Return previously reserved bytes
    fn release(&mut self, bytes: usize);

    /// Bytes still available
    fn available(&self) -> usize;

    /// Name for log output
    fn name(&self) -> &str;
}

/// Fixed-capacity pool (models PSRAM)
#[derive(Debug, Clone)]
pub struct PsramRegion {
    capacity: usize,
    used: usize,
}

impl PsramRegion {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, used: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn used(&self) -> usize {
        self.used
    }
}

impl MemoryRegion for PsramRegion {
    fn reserve(&mut self, bytes: usize) -> Result<()> {
        let available = self.available();
        if bytes > available {
            return Err(Error::Allocation {
                requested: bytes,
                available,
            });
        }
        self.used += bytes;
        Ok(())
    }

    fn release(&mut self, bytes: usize) {
        self.used = self.used.saturating_sub(bytes);
    }

    fn available(&self) -> usize {
        self.capacity - self.used
    }

    fn name(&self) -> &str {
        "psram"
    }
}

/// Unbounded region backed by the global allocator
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapRegion;

impl MemoryRegion for HeapRegion {
    fn reserve(&mut self, _bytes: usize) -> Result<()> {
        Ok(())
    }

    fn release(&mut self, _bytes: usize) {}

    fn available(&self) -> usize {
        usize::MAX
    }

    fn name(&self) -> &str {
        "heap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psram_budget() {
        let mut region = PsramRegion::new(100);
        assert!(region.reserve(60).is_ok());
        assert_eq!(region.capacity(), 100);
        assert_eq!(region.available(), 40);

        let err = region.reserve(41).unwrap_err();
        assert_eq!(
            err,
            Error::Allocation {
                requested: 41,
                available: 40
            }
        );
        // Failed reservation claims nothing
        assert_eq!(region.used(), 60);

        region.release(60);
        assert_eq!(region.available(), 100);
    }

    #[test]
    fn test_release_saturates() {
        let mut region = PsramRegion::new(10);
        region.release(5);
        assert_eq!(region.used(), 0);
    }
}
