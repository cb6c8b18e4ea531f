//! The 40-byte BITMAPINFOHEADER and the checks that gate which files load.

use super::{FILE_HEADER_SIZE, INFO_HEADER_SIZE, PIXEL_DATA_OFFSET, le_i32, le_u16, le_u32};
use crate::error::BitmapError;

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly a file is validated on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Also reject files whose headers are internally inconsistent:
    /// declared file size larger than the input, pixel offset other than
    /// 54, horizontal/vertical resolution mismatch, non-zero palette counts.
    Strict,

    /// Default behavior. Reject a pixel payload shorter than
    /// `width * height * pixel size`.
    #[default]
    Standard,

    /// Zero-fill a truncated pixel payload instead of failing.
    Permissive,
}

// ── Compression ─────────────────────────────────────────────────────

/// DIB compression method. Only [`Compression::Rgb`] loads.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Compression {
    /// BI_RGB, uncompressed.
    Rgb,
    Rle8,
    Rle4,
    Bitfields,
    Jpeg,
    Png,
    AlphaBitfields,
    Cmyk,
    CmykRle8,
    CmykRle4,
    Unknown(u32),
}

impl Compression {
    pub fn from_u32(num: u32) -> Self {
        match num {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::Bitfields,
            4 => Self::Jpeg,
            5 => Self::Png,
            6 => Self::AlphaBitfields,
            11 => Self::Cmyk,
            12 => Self::CmykRle8,
            13 => Self::CmykRle4,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Bitfields => 3,
            Self::Jpeg => 4,
            Self::Png => 5,
            Self::AlphaBitfields => 6,
            Self::Cmyk => 11,
            Self::CmykRle8 => 12,
            Self::CmykRle4 => 13,
            Self::Unknown(other) => other,
        }
    }
}

// ── Resolution ──────────────────────────────────────────────────────

/// DPI to pixels per metre, rounded to nearest (1 inch = 0.0254 m).
pub fn dpi_to_ppm(dpi: u32) -> Result<i32, BitmapError> {
    let ppm = (u64::from(dpi) * 10_000 + 127) / 254;
    i32::try_from(ppm).map_err(|_| {
        BitmapError::InvalidArgument(alloc::format!("{dpi} DPI overflows the resolution field"))
    })
}

/// Pixels per metre to DPI, rounded to nearest. Negative resolutions map to 0.
pub fn ppm_to_dpi(ppm: i32) -> u32 {
    let Ok(ppm) = u64::try_from(ppm) else {
        return 0;
    };
    // i32::MAX * 254 / 10_000 fits in u32
    ((ppm * 254 + 5_000) / 10_000) as u32
}

// ── Header ──────────────────────────────────────────────────────────

/// BITMAPINFOHEADER fields in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    /// Header size tag; always 40 here.
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub color_planes: u16,
    pub bits_per_pixel: u16,
    pub compression: Compression,
    /// Raw pixel payload size in bytes.
    pub raw_size: u32,
    /// Horizontal resolution, pixels per metre.
    pub hres: i32,
    /// Vertical resolution, pixels per metre.
    pub vres: i32,
    pub palette_colors: u32,
    pub important_colors: u32,
}

impl InfoHeader {
    /// Synthesize a header for an uncompressed image at `dpi`.
    ///
    /// Width, height, and raw size must already have been range-checked.
    pub(crate) fn new(
        width: i32,
        height: i32,
        bits_per_pixel: u16,
        raw_size: u32,
        dpi: u32,
    ) -> Result<Self, BitmapError> {
        let resolution = dpi_to_ppm(dpi)?;
        Ok(Self {
            size: INFO_HEADER_SIZE as u32,
            width,
            height,
            color_planes: 1,
            bits_per_pixel,
            compression: Compression::Rgb,
            raw_size,
            hres: resolution,
            vres: resolution,
            palette_colors: 0,
            important_colors: 0,
        })
    }

    /// Decode the DIB header that follows the file header in `data` and check
    /// it describes an uncompressed image of `expected_bits` per pixel.
    pub(crate) fn decode(
        data: &[u8],
        expected_bits: u16,
        permissiveness: Permissiveness,
    ) -> Result<Self, BitmapError> {
        let bytes = data
            .get(FILE_HEADER_SIZE..PIXEL_DATA_OFFSET)
            .ok_or(BitmapError::UnexpectedEof {
                needed: PIXEL_DATA_OFFSET as u64,
                actual: data.len() as u64,
            })?;

        let header = Self {
            size: le_u32(bytes, 0x00),
            width: le_i32(bytes, 0x04),
            height: le_i32(bytes, 0x08),
            color_planes: le_u16(bytes, 0x0C),
            bits_per_pixel: le_u16(bytes, 0x0E),
            compression: Compression::from_u32(le_u32(bytes, 0x10)),
            raw_size: le_u32(bytes, 0x14),
            hres: le_i32(bytes, 0x18),
            vres: le_i32(bytes, 0x1C),
            palette_colors: le_u32(bytes, 0x20),
            important_colors: le_u32(bytes, 0x24),
        };

        if header.size != INFO_HEADER_SIZE as u32 {
            return Err(BitmapError::UnsupportedFormat(alloc::format!(
                "DIB header size {} (only the 40-byte BITMAPINFOHEADER is supported)",
                header.size
            )));
        }
        if header.bits_per_pixel != expected_bits {
            return Err(BitmapError::UnsupportedFormat(alloc::format!(
                "{} bits per pixel, expected {expected_bits}",
                header.bits_per_pixel
            )));
        }
        if header.compression != Compression::Rgb {
            return Err(BitmapError::UnsupportedFormat(alloc::format!(
                "compression {:?}",
                header.compression
            )));
        }
        if header.color_planes != 1 {
            return Err(BitmapError::InvalidDibHeader(alloc::format!(
                "{} color planes, must be 1",
                header.color_planes
            )));
        }
        if header.width < 0 || header.height < 0 {
            return Err(BitmapError::InvalidDibHeader(alloc::format!(
                "negative dimensions {}x{}",
                header.width,
                header.height
            )));
        }

        if permissiveness == Permissiveness::Strict {
            if header.hres != header.vres {
                return Err(BitmapError::InvalidDibHeader(alloc::format!(
                    "horizontal resolution {} differs from vertical {}",
                    header.hres,
                    header.vres
                )));
            }
            if header.palette_colors != 0 || header.important_colors != 0 {
                return Err(BitmapError::InvalidDibHeader(alloc::format!(
                    "palette counts {}/{} on a true-color image",
                    header.palette_colors,
                    header.important_colors
                )));
            }
        }

        Ok(header)
    }

    /// Serialize as the exact 40-byte layout.
    pub(crate) fn encode(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut out = [0u8; INFO_HEADER_SIZE];
        out[0x00..0x04].copy_from_slice(&self.size.to_le_bytes());
        out[0x04..0x08].copy_from_slice(&self.width.to_le_bytes());
        out[0x08..0x0C].copy_from_slice(&self.height.to_le_bytes());
        out[0x0C..0x0E].copy_from_slice(&self.color_planes.to_le_bytes());
        out[0x0E..0x10].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[0x10..0x14].copy_from_slice(&self.compression.to_u32().to_le_bytes());
        out[0x14..0x18].copy_from_slice(&self.raw_size.to_le_bytes());
        out[0x18..0x1C].copy_from_slice(&self.hres.to_le_bytes());
        out[0x1C..0x20].copy_from_slice(&self.vres.to_le_bytes());
        out[0x20..0x24].copy_from_slice(&self.palette_colors.to_le_bytes());
        out[0x24..0x28].copy_from_slice(&self.important_colors.to_le_bytes());
        out
    }

    /// Width and height as unsigned pixel counts.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width.max(0) as u32, self.height.max(0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn file_with(header: &InfoHeader) -> Vec<u8> {
        let mut data = alloc::vec![0u8; FILE_HEADER_SIZE];
        data.extend_from_slice(&header.encode());
        data
    }

    fn sample() -> InfoHeader {
        InfoHeader::new(3, 2, 24, 18, 72).unwrap()
    }

    #[test]
    fn seventy_two_dpi_is_2835_ppm() {
        assert_eq!(dpi_to_ppm(72).unwrap(), 2835);
        assert_eq!(ppm_to_dpi(2835), 72);
        assert_eq!(dpi_to_ppm(96).unwrap(), 3780);
        assert_eq!(ppm_to_dpi(3780), 96);
        assert_eq!(dpi_to_ppm(0).unwrap(), 0);
        assert_eq!(ppm_to_dpi(-1), 0);
    }

    #[test]
    fn huge_dpi_is_rejected() {
        assert!(matches!(
            dpi_to_ppm(u32::MAX),
            Err(BitmapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn encodes_fields_at_file_offsets() {
        let data = file_with(&sample());
        // Offsets below are relative to the start of the file.
        assert_eq!(&data[0x0E..0x12], &40u32.to_le_bytes());
        assert_eq!(&data[0x12..0x16], &3i32.to_le_bytes());
        assert_eq!(&data[0x16..0x1A], &2i32.to_le_bytes());
        assert_eq!(&data[0x1A..0x1C], &1u16.to_le_bytes());
        assert_eq!(&data[0x1C..0x1E], &24u16.to_le_bytes());
        assert_eq!(&data[0x1E..0x22], &0u32.to_le_bytes());
        assert_eq!(&data[0x22..0x26], &18u32.to_le_bytes());
        assert_eq!(&data[0x26..0x2A], &2835i32.to_le_bytes());
        assert_eq!(&data[0x2A..0x2E], &2835i32.to_le_bytes());
        assert_eq!(data.len(), PIXEL_DATA_OFFSET);

        let decoded = InfoHeader::decode(&data, 24, Permissiveness::Strict).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn unsupported_variants() {
        let mut v5 = sample();
        v5.size = 124;
        let mut bpp = sample();
        bpp.bits_per_pixel = 32;
        let mut rle = sample();
        rle.compression = Compression::Rle8;

        for header in [v5, bpp, rle] {
            assert!(matches!(
                InfoHeader::decode(&file_with(&header), 24, Permissiveness::Standard),
                Err(BitmapError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn planes_must_be_one() {
        let mut header = sample();
        header.color_planes = 2;
        assert!(matches!(
            InfoHeader::decode(&file_with(&header), 24, Permissiveness::Permissive),
            Err(BitmapError::InvalidDibHeader(_))
        ));
    }

    #[test]
    fn negative_height_is_invalid() {
        let mut header = sample();
        header.height = -2;
        assert!(matches!(
            InfoHeader::decode(&file_with(&header), 24, Permissiveness::Standard),
            Err(BitmapError::InvalidDibHeader(_))
        ));
    }

    #[test]
    fn strict_checks_resolution_and_palette() {
        let mut skewed = sample();
        skewed.vres = 1000;
        let data = file_with(&skewed);
        assert!(InfoHeader::decode(&data, 24, Permissiveness::Standard).is_ok());
        assert!(InfoHeader::decode(&data, 24, Permissiveness::Strict).is_err());

        let mut palette = sample();
        palette.palette_colors = 16;
        let data = file_with(&palette);
        assert!(InfoHeader::decode(&data, 24, Permissiveness::Standard).is_ok());
        assert!(InfoHeader::decode(&data, 24, Permissiveness::Strict).is_err());
    }

    #[test]
    fn truncated_header_is_eof() {
        let data = [0u8; 30];
        assert!(matches!(
            InfoHeader::decode(&data, 24, Permissiveness::Permissive),
            Err(BitmapError::UnexpectedEof {
                needed: 54,
                actual: 30
            })
        ));
    }
}
