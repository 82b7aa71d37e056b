use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RasterError {
    #[error("unsupported channel count {0}, expected 3 or 4")]
    Channels(u8),

    #[error("invalid pixel buffer len {len} for {width}x{height}x{channels}")]
    Len {
        len: usize,
        width: u32,
        height: u32,
        channels: u8,
    },

    #[error("tile is {width}x{height}, expected {expected}x{expected}")]
    Dimensions { width: u32, height: u32, expected: u32 },

    #[error("pixel ({x}, {y}) outside {width}x{height} tile")]
    OutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },
}
