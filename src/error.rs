use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum TiangeError {
    #[error(
        "invalid grid: {columns} columns x {rows} rows (both must be between 1 and {})",
        crate::grid::MAX_CELLS_PER_SIDE
    )]
    /// The grid has no cells or too many to draw; raised before any layout happens
    InvalidGridSpec { columns: i128, rows: i128 },

    #[error(transparent)]
    /// An I/O error occurred while writing an artifact or the final document
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("artifact does not refer to a page of the document")]
    /// An artifact handle passed to the assembler is not a page of its document
    PageMissing,

    #[error("unknown colour `{0}`")]
    /// A colour name or hex code could not be parsed
    UnknownColour(String),
}
