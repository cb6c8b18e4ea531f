//! The 14-byte BMP file header.

use super::{FILE_HEADER_SIZE, le_u32};
use crate::error::BitmapError;

/// `BM`, the Windows 3.1x+ tag. The OS/2 tags (BA, CI, CP, IC, PT) are rejected.
pub const MAGIC: [u8; 2] = *b"BM";

/// Outer BMP file header.
///
/// The two reserved fields are opaque and round-tripped verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FileHeader {
    /// Total file size in bytes, as declared.
    pub size: u32,
    pub reserved1: [u8; 2],
    pub reserved2: [u8; 2],
    /// Byte offset of the pixel payload.
    pub offset: u32,
}

impl FileHeader {
    /// Decode the first 14 bytes of `data`.
    pub(crate) fn decode(data: &[u8]) -> Result<Self, BitmapError> {
        let bytes = data
            .get(..FILE_HEADER_SIZE)
            .ok_or(BitmapError::UnexpectedEof {
                needed: FILE_HEADER_SIZE as u64,
                actual: data.len() as u64,
            })?;

        if bytes[0..2] != MAGIC {
            return Err(BitmapError::InvalidFileHeader(alloc::format!(
                "magic {:02X} {:02X} is not \"BM\"",
                bytes[0],
                bytes[1]
            )));
        }

        Ok(Self {
            size: le_u32(bytes, 0x02),
            reserved1: [bytes[0x06], bytes[0x07]],
            reserved2: [bytes[0x08], bytes[0x09]],
            offset: le_u32(bytes, 0x0A),
        })
    }

    /// Serialize as the exact 14-byte layout.
    pub(crate) fn encode(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        out[0x00..0x02].copy_from_slice(&MAGIC);
        out[0x02..0x06].copy_from_slice(&self.size.to_le_bytes());
        out[0x06..0x08].copy_from_slice(&self.reserved1);
        out[0x08..0x0A].copy_from_slice(&self.reserved2);
        out[0x0A..0x0E].copy_from_slice(&self.offset.to_le_bytes());
        out
    }

    /// Both reserved fields in file order.
    pub fn reserved(&self) -> [u8; 4] {
        [
            self.reserved1[0],
            self.reserved1[1],
            self.reserved2[0],
            self.reserved2[1],
        ]
    }

    pub(crate) fn set_reserved(&mut self, data: [u8; 4]) {
        self.reserved1 = [data[0], data[1]];
        self.reserved2 = [data[2], data[3]];
    }

    /// Zero bytes needed after the payload so the file length is a multiple of 4.
    pub fn tail_padding(&self) -> usize {
        ((4 - self.size % 4) % 4) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u8; 14] = [
        b'B', b'M', 0x46, 0x00, 0x00, 0x00, 0xAA, 0xBB, 0xCC, 0xDD, 0x36, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn decodes_fields_at_fixed_offsets() {
        let header = FileHeader::decode(&SAMPLE).unwrap();
        assert_eq!(header.size, 0x46);
        assert_eq!(header.reserved(), [0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(header.offset, 54);
        assert_eq!(header.encode(), SAMPLE);
    }

    #[test]
    fn rejects_os2_tags() {
        for tag in [b"BA", b"CI", b"CP", b"IC", b"PT"] {
            let mut bytes = SAMPLE;
            bytes[0..2].copy_from_slice(tag);
            assert!(matches!(
                FileHeader::decode(&bytes),
                Err(BitmapError::InvalidFileHeader(_))
            ));
        }
    }

    #[test]
    fn short_input_is_eof() {
        assert!(matches!(
            FileHeader::decode(b"BM\x00\x00"),
            Err(BitmapError::UnexpectedEof {
                needed: 14,
                actual: 4
            })
        ));
    }

    #[test]
    fn tail_padding_rounds_to_four() {
        let mut header = FileHeader::default();
        for (size, pad) in [(54, 2), (56, 0), (57, 3), (58, 2), (59, 1)] {
            header.size = size;
            assert_eq!(header.tail_padding(), pad, "size {size}");
        }
    }
}
