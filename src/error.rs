use crate::style::{FontFamily, FontVariant};
use crate::units::Pt;
use thiserror::Error;

/// Invalid values caught while constructing styles, pages, images or tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{what} must not be negative (got {value})")]
    NegativeLength { what: &'static str, value: Pt },

    #[error("{what} must be greater than zero (got {value})")]
    NonPositiveLength { what: &'static str, value: Pt },

    #[error("line spacing ratio must not be negative (got {0})")]
    NegativeLineSpacing(f32),

    #[error("colour channel {0} is outside of 0..=255")]
    ColourChannelOutOfRange(i32),

    #[error("page margins leave no room for content on a {width} x {height} page")]
    NoContentArea { width: Pt, height: Pt },

    #[error("row and column spans must be at least 1")]
    ZeroSpan,

    #[error("cell at row {row} spans {row_span} rows but the table only has {rows} rows")]
    RowSpanOutOfBounds {
        row: usize,
        row_span: usize,
        rows: usize,
    },

    #[error("cell at row {row}, column {column} spans past the table's {columns} columns")]
    ColumnSpanOutOfBounds {
        row: usize,
        column: usize,
        columns: usize,
    },

    #[error("cell at row {row}, column {column} overlaps a cell spanning from an earlier row")]
    OverlappingSpan { row: usize, column: usize },

    #[error("image is {width} x {height} pixels; images need at least one pixel each way")]
    EmptyImage { width: u32, height: u32 },

    #[error("a width was set for column {column} but the table only has {columns} columns")]
    ColumnWidthOutOfBounds { column: usize, columns: usize },
}

/// Failures while laying content out onto pages
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("table row {row} is {height} tall but a page only fits {available}")]
    RowTooTall { row: usize, height: Pt, available: Pt },

    #[error("image is {height} tall but a page only fits {available}")]
    ImageTooTall { height: Pt, available: Pt },

    #[error("word {word:?} is {width} wide but only {available} is available")]
    WordTooWide {
        word: String,
        width: Pt,
        available: Pt,
    },

    #[error("a line {height} tall does not fit into a page content height of {available}")]
    LineTooTall { height: Pt, available: Pt },

    #[error("no font metrics are available for {family:?} {variant:?}")]
    MissingFont {
        family: FontFamily,
        variant: FontVariant,
    },

    #[error("image handle {0} does not belong to this document")]
    UnknownImage(usize),
}

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// The document could not be laid out onto pages
    Layout(#[from] LayoutError),
}

impl From<ConfigError> for PDFError {
    fn from(err: ConfigError) -> Self {
        PDFError::Layout(err.into())
    }
}
