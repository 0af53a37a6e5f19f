//! Chinese handwriting practice sheets ("tián grid" copybooks).
//!
//! Text is laid out one character per cell on sheets of square cells, each cell
//! split into quadrants by a dashed cross, and written out as a PDF.
//!
//! The layout is split in two: [paginate] decides purely from a character count
//! which row of which page every run of characters lands on, and the
//! [SheetBuilder] feeds those rows to a [Canvas], flushing a sheet whenever its
//! last row has been drawn. [PdfCanvas] and [PdfAssembler] draw the sheets as PDF
//! pages and write them out; [Copybook] ties everything together.

mod assemble;
pub use assemble::*;

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod content;

mod copybook;
pub use copybook::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

/// Tián grid geometry: cell positions and grid lines
pub mod grid;
pub use grid::{GridSpec, GridStyle};

mod info;
pub use info::*;

mod page;
pub use page::*;

mod paginate;
pub use paginate::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod sheet;
pub use sheet::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
