//! # zenbmp
//!
//! Load, create, edit and write uncompressed BMP images with a
//! BITMAPINFOHEADER DIB header.
//!
//! ## Supported Format
//!
//! - `BM` file header (Windows 3.1x and later)
//! - 40-byte BITMAPINFOHEADER, one color plane, `BI_RGB` (no compression)
//! - 24-bit [`Bgr24`] and 32-bit [`Bgr32`] pixels, matched against the
//!   header's bit depth
//! - Pixel payload stored as `width * height` contiguous pixels right after
//!   the 54 header bytes, file padded with zeros to a multiple of 4 bytes
//!
//! ## Non-Goals
//!
//! - RLE, JPEG, PNG or bitfield payloads
//! - Palettes and indexed color
//! - BITMAPCOREHEADER, OS/2 and V2–V5 DIB headers
//! - Streaming or multi-threaded I/O
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{Bgr24, Bitmap24};
//!
//! let mut bmp = Bitmap24::new();
//! bmp.load("input.bmp")?;
//!
//! for row in 0..bmp.width()? {
//!     for col in 0..bmp.height()? {
//!         let mut px = bmp.get(row, col)?;
//!         px.r = 0;
//!         bmp.set(row, col, px)?;
//!     }
//! }
//! bmp.write("output.bmp")?;
//!
//! let mut blank = Bitmap24::new().with_dpi(96);
//! blank.create(1024, 1024)?;
//! blank.set(0, 0, Bgr24 { b: 255, g: 255, r: 255 })?;
//! blank.write("blank.bmp")?;
//! # Ok::<(), zenbmp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod error;
mod limits;
mod pixel;

pub mod bmp;

// Re-exports
pub use bitmap::{Bitmap, Bitmap24, Bitmap32, DEFAULT_DPI};
pub use bmp::file_header::{FileHeader, MAGIC};
pub use bmp::info_header::{Compression, InfoHeader, Permissiveness, dpi_to_ppm, ppm_to_dpi};
pub use error::BitmapError;
pub use limits::Limits;
pub use pixel::{Bgr24, Bgr32, BmpPixel, PixelLayout};
