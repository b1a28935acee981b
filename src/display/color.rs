//! RGB565 color packing
//!
//! The panel consumes 16-bit pixels: 5 bits red (MSB), 6 bits green,
//! 5 bits blue (LSB). Quantization truncates, so it is lossy but exact to
//! reproduce.

/// Packed 16-bit RGB565 color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// 5-bit red field
    #[inline]
    pub const fn red5(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// 6-bit green field
    #[inline]
    pub const fn green6(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// 5-bit blue field
    #[inline]
    pub const fn blue5(self) -> u8 {
        (self.0 & 0x1F) as u8
    }
}

impl From<Rgb565> for u16 {
    fn from(c: Rgb565) -> Self {
        c.raw()
    }
}

/// Quantize 8-bit channels to RGB565
#[inline]
pub const fn quantize_color(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565((((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16))
}
