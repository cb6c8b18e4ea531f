//! Flat, owned pixel storage addressed by `(row, col)`.

use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::pixel::BmpPixel;

/// `width * height` pixels in one allocation, never resized after creation.
///
/// Coordinates map to `row + col * width`. Note the first coordinate is
/// the fast-moving one, the reverse of the usual `row * width + col`.
#[derive(Clone, Debug)]
pub(crate) struct PixelBuffer<P> {
    pixels: Vec<P>,
    width: u32,
}

impl<P: BmpPixel> PixelBuffer<P> {
    /// Empty vector with room for exactly `width * height` pixels.
    fn reserve(width: u32, height: u32) -> Result<Vec<P>, BitmapError> {
        let len = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| BitmapError::OutOfMemory)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| BitmapError::OutOfMemory)?;
        Ok(pixels)
    }

    /// Zero-initialized buffer.
    pub(crate) fn zeroed(width: u32, height: u32) -> Result<Self, BitmapError> {
        let mut pixels = Self::reserve(width, height)?;
        pixels.resize(pixel_count(width, height), P::default());
        Ok(Self { pixels, width })
    }

    /// Buffer filled from serialized pixel bytes.
    ///
    /// Pixels past the last complete one in `bytes` are zero-filled.
    pub(crate) fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, BitmapError> {
        let mut pixels = Self::reserve(width, height)?;
        pixels.extend(
            bytes
                .chunks_exact(P::BYTES)
                .take(pixel_count(width, height))
                .map(P::from_bytes),
        );
        pixels.resize(pixel_count(width, height), P::default());
        Ok(Self { pixels, width })
    }

    /// Linear index for `(row, col)`; cannot overflow for `u32` inputs.
    #[inline]
    pub(crate) fn index(&self, row: u32, col: u32) -> u64 {
        u64::from(row) + u64::from(col) * u64::from(self.width)
    }

    fn checked_index(&self, row: u32, col: u32) -> Result<usize, BitmapError> {
        let index = self.index(row, col);
        let len = self.pixels.len() as u64;
        if index >= len {
            return Err(BitmapError::OutOfBounds {
                row,
                col,
                index,
                len,
            });
        }
        Ok(index as usize)
    }

    pub(crate) fn get(&self, row: u32, col: u32) -> Result<P, BitmapError> {
        let index = self.checked_index(row, col)?;
        Ok(self.pixels[index])
    }

    pub(crate) fn set(&mut self, row: u32, col: u32, pixel: P) -> Result<(), BitmapError> {
        let index = self.checked_index(row, col)?;
        self.pixels[index] = pixel;
        Ok(())
    }

    pub(crate) fn as_slice(&self) -> &[P] {
        &self.pixels
    }

    /// Append every pixel in buffer order.
    pub(crate) fn extend_bytes(&self, out: &mut Vec<u8>) {
        for pixel in &self.pixels {
            pixel.extend_bytes(out);
        }
    }
}

#[inline]
fn pixel_count(width: u32, height: u32) -> usize {
    (u64::from(width) * u64::from(height)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Bgr24;

    fn px(v: u8) -> Bgr24 {
        Bgr24 { b: v, g: v, r: v }
    }

    #[test]
    fn index_is_row_plus_col_times_width() {
        let buf = PixelBuffer::<Bgr24>::zeroed(4, 3).unwrap();
        assert_eq!(buf.index(0, 0), 0);
        assert_eq!(buf.index(1, 0), 1);
        assert_eq!(buf.index(0, 1), 4);
        assert_eq!(buf.index(3, 2), 11);
        // Not row-major: (2, 1) would be 9 under row * width + col.
        assert_eq!(buf.index(2, 1), 6);
    }

    #[test]
    fn zeroed_has_default_pixels() {
        let buf = PixelBuffer::<Bgr24>::zeroed(3, 2).unwrap();
        assert_eq!(buf.as_slice().len(), 6);
        assert!(buf.as_slice().iter().all(|p| *p == Bgr24::default()));
    }

    #[test]
    fn bounds_use_linear_index() {
        let mut buf = PixelBuffer::<Bgr24>::zeroed(4, 3).unwrap();
        // row beyond width still lands inside the buffer
        buf.set(5, 1, px(7)).unwrap();
        assert_eq!(buf.get(1, 2).unwrap(), px(7));

        assert!(matches!(
            buf.get(0, 3),
            Err(BitmapError::OutOfBounds {
                index: 12,
                len: 12,
                ..
            })
        ));
        assert!(buf.set(u32::MAX, u32::MAX, px(1)).is_err());
    }

    #[test]
    fn from_bytes_reads_in_buffer_order() {
        let bytes = [1, 2, 3, 4, 5, 6, 0xFF];
        let buf = PixelBuffer::<Bgr24>::from_bytes(2, 1, &bytes).unwrap();
        assert_eq!(buf.get(0, 0).unwrap(), Bgr24 { b: 1, g: 2, r: 3 });
        assert_eq!(buf.get(1, 0).unwrap(), Bgr24 { b: 4, g: 5, r: 6 });

        let mut out = Vec::new();
        buf.extend_bytes(&mut out);
        assert_eq!(out, &bytes[..6]);
    }

    #[test]
    fn short_input_is_zero_filled() {
        let buf = PixelBuffer::<Bgr24>::from_bytes(2, 2, &[1, 2, 3, 4]).unwrap();
        assert_eq!(buf.as_slice().len(), 4);
        assert_eq!(buf.get(0, 0).unwrap(), Bgr24 { b: 1, g: 2, r: 3 });
        assert_eq!(buf.get(1, 0).unwrap(), Bgr24::default());
        assert_eq!(buf.get(1, 1).unwrap(), Bgr24::default());
    }

    #[test]
    fn empty_buffer_rejects_every_access() {
        let buf = PixelBuffer::<Bgr24>::zeroed(0, 5).unwrap();
        assert!(buf.get(0, 0).is_err());
    }
}
