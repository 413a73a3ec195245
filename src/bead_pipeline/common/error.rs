use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid color format: {0:?} (expected #RRGGBB)")]
    InvalidColorFormat(String),

    #[error("Duplicate color id in palette: {0}")]
    DuplicateColorId(String),

    #[error(
        "Invalid crop rectangle: x={x}, y={y}, width={width}, height={height} for image {image_width}x{image_height}"
    )]
    InvalidCropRect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Cannot match colors against an empty palette")]
    EmptyPalette,

    #[error("Bead at row={row}, col={col} lies outside the {plate_width}x{plate_height} plate grid")]
    OutOfBoundsBead {
        row: u32,
        col: u32,
        plate_width: u32,
        plate_height: u32,
    },

    #[error("Invalid dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Input is {size} bytes, exceeds limit of {max} bytes")]
    InputTooLarge { size: usize, max: usize },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Render failed: {0}")]
    RenderFailure(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PatternError>;
