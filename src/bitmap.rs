//! The BMP container: load or create once, edit pixels, write any number of times.

use alloc::vec::Vec;

use crate::bmp::buffer::PixelBuffer;
use crate::bmp::file_header::FileHeader;
use crate::bmp::info_header::{InfoHeader, Permissiveness, ppm_to_dpi};
use crate::bmp::{FILE_HEADER_SIZE, INFO_HEADER_SIZE, PIXEL_DATA_OFFSET};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{Bgr24, Bgr32, BmpPixel, PixelLayout};

/// DPI used for the resolution fields unless configured otherwise.
pub const DEFAULT_DPI: u32 = 72;

/// Container for 24-bit images.
pub type Bitmap24 = Bitmap<Bgr24>;

/// Container for 32-bit images.
pub type Bitmap32 = Bitmap<Bgr32>;

/// Headers and pixels of a loaded or created image.
#[derive(Clone, Debug)]
struct Image<P> {
    file_header: FileHeader,
    info_header: InfoHeader,
    pixels: PixelBuffer<P>,
}

/// An uncompressed BITMAPINFOHEADER image of pixel type `P`.
///
/// A new container is empty. [`load`](Self::load), [`decode`](Self::decode)
/// or [`create`](Self::create) make it ready exactly once; every other
/// operation returns [`BitmapError::NotInitialized`] until then.
///
/// Pixels are addressed by `(row, col)` and stored at `row + col * width`.
/// This is the opposite of the common row-major convention and is kept for
/// compatibility with existing callers: `row` walks along the width.
///
/// ```
/// use zenbmp::{Bgr24, Bitmap24};
///
/// let mut bmp = Bitmap24::new();
/// bmp.create(2, 2)?;
/// bmp.set(1, 0, Bgr24 { b: 0, g: 0, r: 255 })?;
/// let bytes = bmp.encode()?;
/// assert_eq!(bytes.len(), 68);
///
/// let mut copy = Bitmap24::new();
/// copy.decode(&bytes)?;
/// assert_eq!(copy.get(1, 0)?.r, 255);
/// # Ok::<(), zenbmp::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Bitmap<P> {
    image: Option<Image<P>>,
    dpi: u32,
    limits: Limits,
    permissiveness: Permissiveness,
}

impl<P: BmpPixel> Default for Bitmap<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: BmpPixel> Bitmap<P> {
    /// Empty container at [`DEFAULT_DPI`].
    pub fn new() -> Self {
        Self {
            image: None,
            dpi: DEFAULT_DPI,
            limits: Limits::default(),
            permissiveness: Permissiveness::default(),
        }
    }

    /// Set the DPI written into the resolution fields.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set resource limits applied before the pixel buffer is allocated.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set how strictly loaded files are validated.
    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Whether the container holds an image.
    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    /// Current DPI. After a load this is derived from the horizontal resolution.
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Change the DPI used by the next write.
    pub fn set_dpi(&mut self, dpi: u32) {
        self.dpi = dpi;
    }

    /// Memory layout of `P`.
    pub fn layout(&self) -> PixelLayout {
        P::LAYOUT
    }

    fn ready(&self) -> Result<&Image<P>, BitmapError> {
        self.image.as_ref().ok_or(BitmapError::NotInitialized)
    }

    fn ready_mut(&mut self) -> Result<&mut Image<P>, BitmapError> {
        self.image.as_mut().ok_or(BitmapError::NotInitialized)
    }

    fn ensure_empty(&self) -> Result<(), BitmapError> {
        if self.is_ready() {
            return Err(BitmapError::AlreadyInitialized);
        }
        Ok(())
    }

    // ── Load ────────────────────────────────────────────────────────

    /// Parse a complete BMP file held in memory.
    ///
    /// The pixel payload is the `width * height` pixels directly after the
    /// 54 header bytes. A payload shorter than that fails with
    /// [`BitmapError::UnexpectedEof`] unless the container is
    /// [`Permissiveness::Permissive`], which zero-fills the missing pixels.
    /// On any error the container stays empty.
    pub fn decode(&mut self, data: &[u8]) -> Result<(), BitmapError> {
        self.ensure_empty()?;

        let file_header = FileHeader::decode(data)?;
        let info_header = InfoHeader::decode(data, P::BITS, self.permissiveness)?;

        if self.permissiveness == Permissiveness::Strict {
            if file_header.offset as usize != PIXEL_DATA_OFFSET {
                return Err(BitmapError::InvalidFileHeader(alloc::format!(
                    "pixel data offset {} (expected {PIXEL_DATA_OFFSET})",
                    file_header.offset
                )));
            }
            if file_header.size as usize > data.len() {
                return Err(BitmapError::InvalidFileHeader(alloc::format!(
                    "declared file size {} exceeds actual size {}",
                    file_header.size,
                    data.len()
                )));
            }
        }

        let (width, height) = info_header.dimensions();
        self.limits.check(width, height, P::BYTES)?;

        let payload_len = u64::from(width) * u64::from(height) * P::BYTES as u64;
        let payload = &data[PIXEL_DATA_OFFSET..];
        if (payload.len() as u64) < payload_len
            && self.permissiveness != Permissiveness::Permissive
        {
            return Err(BitmapError::UnexpectedEof {
                needed: PIXEL_DATA_OFFSET as u64 + payload_len,
                actual: data.len() as u64,
            });
        }

        let pixels = PixelBuffer::from_bytes(width, height, payload)?;

        // Vertical resolution is assumed equal; only Strict cross-checks it.
        self.dpi = ppm_to_dpi(info_header.hres);
        self.image = Some(Image {
            file_header,
            info_header,
            pixels,
        });
        Ok(())
    }

    /// Read a BMP file from disk.
    #[cfg(feature = "std")]
    pub fn load(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), BitmapError> {
        self.ensure_empty()?;
        let data = std::fs::read(path)?;
        self.decode(&data)
    }

    /// Read a BMP file from any reader until EOF.
    #[cfg(feature = "std")]
    pub fn load_from_reader<R: std::io::Read>(&mut self, mut reader: R) -> Result<(), BitmapError> {
        self.ensure_empty()?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.decode(&data)
    }

    // ── Create ──────────────────────────────────────────────────────

    /// Start a blank (all-zero) image of `width` x `height` pixels.
    pub fn create(&mut self, width: u32, height: u32) -> Result<(), BitmapError> {
        self.ensure_empty()?;

        let (raw_size, file_size) = sizes::<P>(width, height)?;
        self.limits.check(width, height, P::BYTES)?;

        let info_header =
            InfoHeader::new(width as i32, height as i32, P::BITS, raw_size, self.dpi)?;
        let file_header = FileHeader {
            size: file_size,
            offset: PIXEL_DATA_OFFSET as u32,
            ..FileHeader::default()
        };
        let pixels = PixelBuffer::zeroed(width, height)?;

        self.image = Some(Image {
            file_header,
            info_header,
            pixels,
        });
        Ok(())
    }

    // ── Write ───────────────────────────────────────────────────────

    /// Serialize the image: file header, DIB header, pixels, then zero
    /// padding up to a multiple of 4 bytes.
    ///
    /// Size, offset, raw size and resolution are derived afresh from the
    /// dimensions and current DPI. Reserved bytes and palette counts are
    /// written as stored.
    pub fn encode(&self) -> Result<Vec<u8>, BitmapError> {
        let image = self.ready()?;
        let (width, height) = image.info_header.dimensions();
        let (raw_size, file_size) = sizes::<P>(width, height)?;

        let file_header = FileHeader {
            size: file_size,
            offset: PIXEL_DATA_OFFSET as u32,
            ..image.file_header
        };
        let info_header = InfoHeader {
            palette_colors: image.info_header.palette_colors,
            important_colors: image.info_header.important_colors,
            ..InfoHeader::new(
                image.info_header.width,
                image.info_header.height,
                P::BITS,
                raw_size,
                self.dpi,
            )?
        };
        let padding = file_header.tail_padding();

        let mut out = Vec::new();
        out.try_reserve_exact(file_size as usize + padding)
            .map_err(|_| BitmapError::OutOfMemory)?;
        out.extend_from_slice(&file_header.encode());
        out.extend_from_slice(&info_header.encode());
        image.pixels.extend_bytes(&mut out);
        out.resize(out.len() + padding, 0);
        debug_assert_eq!(out.len(), file_size as usize + padding);
        Ok(out)
    }

    /// Write the image to `writer`.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> Result<(), BitmapError> {
        let bytes = self.encode()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Create or truncate `path` and write the image to it.
    ///
    /// Not atomic: a failure partway through can leave a partial file.
    #[cfg(feature = "std")]
    pub fn write(&self, path: impl AsRef<std::path::Path>) -> Result<(), BitmapError> {
        let bytes = self.encode()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    // ── Access ──────────────────────────────────────────────────────

    /// Image width in pixels.
    pub fn width(&self) -> Result<u32, BitmapError> {
        Ok(self.ready()?.info_header.dimensions().0)
    }

    /// Image height in pixels.
    pub fn height(&self) -> Result<u32, BitmapError> {
        Ok(self.ready()?.info_header.dimensions().1)
    }

    /// Copy of the pixel at `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> Result<P, BitmapError> {
        self.ready()?.pixels.get(row, col)
    }

    /// Overwrite the pixel at `(row, col)`.
    pub fn set(&mut self, row: u32, col: u32, pixel: P) -> Result<(), BitmapError> {
        self.ready_mut()?.pixels.set(row, col, pixel)
    }

    /// All pixels in storage order.
    pub fn pixels(&self) -> Result<&[P], BitmapError> {
        Ok(self.ready()?.pixels.as_slice())
    }

    /// View the pixels as a 2D image whose x axis is the `row` coordinate.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Result<imgref::ImgRef<'_, P>, BitmapError> {
        let image = self.ready()?;
        let (width, height) = image.info_header.dimensions();
        // imgref rejects a zero stride, which a zero-width image would have
        Ok(imgref::ImgRef::new_stride(
            image.pixels.as_slice(),
            width as usize,
            height as usize,
            width.max(1) as usize,
        ))
    }

    /// File header as loaded or created.
    pub fn file_header(&self) -> Result<&FileHeader, BitmapError> {
        Ok(&self.ready()?.file_header)
    }

    /// DIB header as loaded or created.
    pub fn info_header(&self) -> Result<&InfoHeader, BitmapError> {
        Ok(&self.ready()?.info_header)
    }

    // ── Reserved header bytes ───────────────────────────────────────

    /// The file header's two reserved fields, in file order.
    pub fn read_reserved(&self) -> Result<[u8; 4], BitmapError> {
        Ok(self.ready()?.file_header.reserved())
    }

    /// Copy the reserved bytes into `out`, which must be exactly 4 bytes.
    pub fn read_reserved_into(&self, out: &mut [u8]) -> Result<(), BitmapError> {
        let reserved = self.read_reserved()?;
        let len = out.len();
        let out: &mut [u8; 4] = out.try_into().map_err(|_| reserved_len_error(len))?;
        *out = reserved;
        Ok(())
    }

    /// Replace the reserved fields from exactly 4 bytes.
    pub fn write_reserved(&mut self, data: &[u8]) -> Result<(), BitmapError> {
        let image = self.ready_mut()?;
        let data: [u8; 4] = data
            .try_into()
            .map_err(|_| reserved_len_error(data.len()))?;
        image.file_header.set_reserved(data);
        Ok(())
    }
}

fn reserved_len_error(len: usize) -> BitmapError {
    BitmapError::InvalidArgument(alloc::format!(
        "reserved header data must be 4 bytes, got {len}"
    ))
}

/// Raw pixel size and total file size (without tail padding) for the
/// given dimensions, if they fit the 32-bit header fields.
fn sizes<P: BmpPixel>(width: u32, height: u32) -> Result<(u32, u32), BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: u64::from(width),
        height: u64::from(height),
    };
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(too_large());
    }
    let raw = u64::from(width) * u64::from(height) * P::BYTES as u64;
    let file = raw + (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u64;
    let raw = u32::try_from(raw).map_err(|_| too_large())?;
    let file = u32::try_from(file).map_err(|_| too_large())?;
    Ok((raw, file))
}
