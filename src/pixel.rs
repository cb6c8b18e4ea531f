use alloc::vec::Vec;
use rgb::alt::{BGR, BGRA};

/// 24-bit pixel, stored on disk as B, G, R.
pub type Bgr24 = rgb::alt::BGR8;

/// 32-bit pixel, stored on disk as B, G, R, A.
pub type Bgr32 = rgb::alt::BGRA8;

/// Pixel memory layout.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 channels, 8-bit BGR.
    Bgr8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub const fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr8 => 3,
            Self::Bgra8 => 4,
        }
    }

    /// Number of channels.
    pub const fn channels(&self) -> usize {
        match self {
            Self::Bgr8 => 3,
            Self::Bgra8 => 4,
        }
    }
}

/// A fixed-size pixel value that can be stored in an uncompressed BMP.
///
/// The DIB header's bits-per-pixel field must equal [`BmpPixel::BITS`] for a
/// file to load into a container of this pixel type.
pub trait BmpPixel: Copy + Default + PartialEq + core::fmt::Debug {
    /// In-memory and on-disk channel order.
    const LAYOUT: PixelLayout;

    /// Serialized size of one pixel.
    const BYTES: usize = Self::LAYOUT.bytes_per_pixel();

    /// Bit depth written to and validated against the DIB header.
    const BITS: u16 = (Self::BYTES * 8) as u16;

    /// Read one pixel from the first [`Self::BYTES`] bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than [`Self::BYTES`].
    fn from_bytes(bytes: &[u8]) -> Self;

    /// Append the [`Self::BYTES`] serialized bytes of this pixel.
    fn extend_bytes(&self, out: &mut Vec<u8>);
}

impl BmpPixel for BGR<u8> {
    const LAYOUT: PixelLayout = PixelLayout::Bgr8;

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
        }
    }

    #[inline]
    fn extend_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.b, self.g, self.r]);
    }
}

impl BmpPixel for BGRA<u8> {
    const LAYOUT: PixelLayout = PixelLayout::Bgra8;

    #[inline]
    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            a: bytes[3],
        }
    }

    #[inline]
    fn extend_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.b, self.g, self.r, self.a]);
    }
}
