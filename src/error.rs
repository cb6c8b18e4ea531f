use alloc::boxed::Box;
use alloc::string::String;

/// Errors from BMP loading, creation, pixel access, and writing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("out of memory allocating pixel buffer")]
    OutOfMemory,

    /// Opening, reading or writing a file failed. Holds the `std::io::Error`.
    #[error("file access error: {0}")]
    FileAccess(#[source] Box<dyn core::error::Error + Send + Sync>),

    #[error("pixel ({row}, {col}) maps to index {index}, outside buffer of {len} pixels")]
    OutOfBounds {
        row: u32,
        col: u32,
        index: u64,
        len: u64,
    },

    #[error("bitmap has not been loaded or created")]
    NotInitialized,

    #[error("bitmap is already loaded or created")]
    AlreadyInitialized,

    #[error("invalid file header: {0}")]
    InvalidFileHeader(String),

    #[error("invalid DIB header: {0}")]
    InvalidDibHeader(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unexpected end of input: need {needed} bytes, got {actual}")]
    UnexpectedEof { needed: u64, actual: u64 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for BitmapError {
    fn from(e: std::io::Error) -> Self {
        BitmapError::FileAccess(Box::new(e))
    }
}
