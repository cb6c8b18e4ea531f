//! Byte-exact codecs for the BMP file header, the BITMAPINFOHEADER DIB
//! header, and the flat pixel buffer they describe.
//!
//! Use [`crate::Bitmap`] for the load/create/write lifecycle.

pub(crate) mod buffer;
pub(crate) mod file_header;
pub(crate) mod info_header;

/// Size of the outer file header.
pub const FILE_HEADER_SIZE: usize = 14;

/// Size of the only supported DIB header variant (BITMAPINFOHEADER).
pub const INFO_HEADER_SIZE: usize = 40;

/// Byte offset of the pixel payload in every file this crate reads or writes.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

#[inline]
fn le_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[inline]
fn le_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
