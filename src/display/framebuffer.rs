use super::color::Rgb565;
use super::memory::MemoryRegion;
use crate::error::{Error, Result};

// ============================================================================
// Outcodes
// ============================================================================

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

// ============================================================================
// Framebuffer
// ============================================================================

/// RGB565 framebuffer for the display panel
///
/// Storage length is always `width * height`; every public accessor bounds
/// checks so callers never index the raw storage. Drawing clips silently:
/// out-of-range coordinates are dropped, never reported.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pixels: Vec<Rgb565>,
    width: u32,
    height: u32,
}

impl Framebuffer {
    /// Bytes needed for a `width x height` buffer
    pub fn required_bytes(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(std::mem::size_of::<Rgb565>()))
            .ok_or(Error::InvalidDimensions { width, height })
    }

    /// Allocate a buffer from `region` and clear it to black
    pub fn initialize(width: u32, height: u32, region: &mut dyn MemoryRegion) -> Result<Self> {
        let bytes = Self::required_bytes(width, height)?;
        region.reserve(bytes)?;

        let count = width as usize * height as usize;
        let mut pixels = Vec::new();
        if pixels.try_reserve_exact(count).is_err() {
            region.release(bytes);
            return Err(Error::Allocation {
                requested: bytes,
                available: region.available(),
            });
        }
        pixels.resize(count, Rgb565::BLACK);

        tracing::info!(
            "Frame buffer allocated in {}: {} x {} ({} bytes)",
            region.name(),
            width,
            height,
            bytes
        );

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Replace this buffer with a freshly allocated one of a new size.
    /// On failure the current buffer is kept and its reservation restored.
    pub fn reinitialize(
        &mut self,
        width: u32,
        height: u32,
        region: &mut dyn MemoryRegion,
    ) -> Result<()> {
        let old_bytes = self.byte_len();
        region.release(old_bytes);
        match Self::initialize(width, height, region) {
            Ok(fb) => {
                *self = fb;
                Ok(())
            },
            Err(e) => {
                tracing::warn!("Frame buffer resize to {}x{} failed: {}", width, height, e);
                // We just released these bytes, so the region can take them back
                let _ = region.reserve(old_bytes);
                Err(e)
            },
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Size of the pixel storage in bytes
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Rgb565>()
    }

    /// Read-only view for the display transport
    #[inline]
    pub fn as_slice(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb565]> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn outcode(&self, x: i32, y: i32) -> u8 {
        let mut code = INSIDE;
        if x < 0 {
            code |= LEFT;
        } else if x >= self.width as i32 {
            code |= RIGHT;
        }
        if y < 0 {
            code |= TOP;
        } else if y >= self.height as i32 {
            code |= BOTTOM;
        }
        code
    }

    /// Set every pixel to `color`
    pub fn clear(&mut self, color: Rgb565) {
        self.pixels.fill(color);
    }

    /// Set a single pixel (bounds checked, out of range is ignored)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if self.in_bounds(x, y) {
            let idx = self.index(x as u32, y as u32);
            self.pixels[idx] = color;
        }
    }

    /// Read a single pixel. Returns None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.index(x as u32, y as u32)])
        } else {
            None
        }
    }

    /// Horizontal span from x1 to x2 inclusive, clipped
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Rgb565) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }
        let row = self.index(0, y as u32);
        self.pixels[row + start as usize..=row + end as usize].fill(color);
    }

    /// Vertical span from y1 to y2 inclusive, clipped
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, color: Rgb565) {
        if x < 0 || x >= self.width as i32 {
            return;
        }
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let start = y1.max(0);
        let end = y2.min(self.height as i32 - 1);
        if start > end {
            return;
        }

        let stride = self.width as usize;
        let mut idx = self.index(x as u32, start as u32);
        for _ in start..=end {
            self.pixels[idx] = color;
            idx += stride;
        }
    }

    /// Draw a line using Bresenham's algorithm
    ///
    /// Integer only. Every pixel on the line, both endpoints included, is
    /// visited exactly once. The walk runs along the major axis; after `k`
    /// steps the minor offset is `floor((2*k*minor + major) / (2*major))`,
    /// carried incrementally as an error term. Only the steps whose major
    /// coordinate lands inside the buffer are walked, entered at the exact
    /// error value the unclipped walk would have there, so the visible pixels
    /// match the unclipped line and the cost is bounded by the buffer size.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        // Both endpoints beyond the same edge: nothing can be visible
        if self.outcode(x0, y0) & self.outcode(x1, y1) != 0 {
            return;
        }

        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let (dx, dy) = (x1 - x0, y1 - y0);
        let x_major = dx.abs() >= dy.abs();
        let (major0, minor0, d_major, d_minor, limit) = if x_major {
            (x0, y0, dx, dy, i64::from(self.width))
        } else {
            (y0, x0, dy, dx, i64::from(self.height))
        };
        let steps = d_major.abs();
        if steps == 0 {
            self.set_pixel(x0 as i32, y0 as i32, color);
            return;
        }
        let (s_major, s_minor) = (d_major.signum(), d_minor.signum());
        let minor_len = d_minor.abs();

        // Steps whose major coordinate lies in 0..limit
        let (first, last) = if s_major > 0 {
            (-major0, limit - 1 - major0)
        } else {
            (major0 - (limit - 1), major0)
        };
        let first = first.max(0);
        let last = last.min(steps);
        if first > last {
            return;
        }

        // Error state at step `first`; the product needs more than 64 bits
        let seed = 2 * i128::from(first) * i128::from(minor_len) + i128::from(steps);
        let mut offset = (seed / (2 * i128::from(steps))) as i64;
        let mut err = (seed % (2 * i128::from(steps))) as i64;
        let (span, rise) = (2 * steps, 2 * minor_len);

        for k in first..=last {
            let major = major0 + s_major * k;
            let minor = minor0 + s_minor * offset;
            // Both stay within the endpoints' range, so they fit in i32
            if x_major {
                self.set_pixel(major as i32, minor as i32, color);
            } else {
                self.set_pixel(minor as i32, major as i32, color);
            }
            err += rise;
            if err >= span {
                err -= span;
                offset += 1;
            }
        }
    }

    /// Fill a rectangle, clipped. Non-positive width or height draws nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if w <= 0 || h <= 0 {
            return;
        }
        let top = y.max(0);
        let bottom = y.saturating_add(h).min(self.height as i32);
        let right = x.saturating_add(w - 1);
        for row in top..bottom {
            self.hline(x, right, row, color);
        }
    }

    /// Rectangle outline as four lines. Corners are drawn twice.
    pub fn draw_rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        let x2 = x.saturating_add(w.saturating_sub(1));
        let y2 = y.saturating_add(h.saturating_sub(1));
        self.draw_line(x, y, x2, y, color);
        self.draw_line(x2, y, x2, y2, color);
        self.draw_line(x2, y2, x, y2, color);
        self.draw_line(x, y2, x, y, color);
    }
}
