//! Drawing surfaces that paginated rows are rendered onto.
//!
//! A [Canvas] hands out one sheet at a time. The sheet is drawn on row by row
//! and then handed back to [Canvas::flush], which consumes it and produces the
//! finished page (the artifact). A sheet can therefore never be drawn on after
//! it has been flushed.

use crate::document::Document;
use crate::font::Font;
use crate::grid::{cell_rect, grid_strokes, sheet_size, GridSpec, GridStyle};
use crate::page::{Page, SpanFont, SpanLayout};
use crate::rect::Rect;
use crate::units::Pt;
use crate::TiangeError;
use id_arena::Id;
use tracing::debug;

/// Something a [SheetBuilder](crate::SheetBuilder) can draw pages onto
pub trait Canvas {
    /// A page being drawn
    type Sheet;
    /// A finished page
    type Artifact;

    /// Start a blank sheet with an empty grid
    fn new_sheet(&mut self, grid: &GridSpec) -> Result<Self::Sheet, TiangeError>;

    /// Draw `chars` into row `row` of the sheet, one per cell from the left.
    /// Called at most once per row of a sheet.
    fn render_row(
        &mut self,
        sheet: &mut Self::Sheet,
        row: usize,
        chars: &[char],
    ) -> Result<(), TiangeError>;

    /// Finish the sheet as page `page_index` of the output
    fn flush(&mut self, sheet: Self::Sheet, page_index: usize)
        -> Result<Self::Artifact, TiangeError>;
}

/// A sheet of a [PdfCanvas]
#[derive(Debug)]
pub struct PdfSheet {
    grid: GridSpec,
    page: Page,
}

impl PdfSheet {
    pub fn page(&self) -> &Page {
        &self.page
    }
}

/// Draws tián grid sheets as vector pages of a [Document]. Flushing a sheet adds
/// its page to the document; the artifact is the page's id.
pub struct PdfCanvas<'a> {
    document: &'a mut Document,
    font: Id<Font>,
    style: GridStyle,
}

impl<'a> PdfCanvas<'a> {
    /// Draw with `font` (which must have been added to `document`) in the given style
    pub fn new(document: &'a mut Document, font: Id<Font>, style: GridStyle) -> PdfCanvas<'a> {
        PdfCanvas {
            document,
            font,
            style,
        }
    }

    pub fn style(&self) -> &GridStyle {
        &self.style
    }
}

impl Canvas for PdfCanvas<'_> {
    type Sheet = PdfSheet;
    type Artifact = Id<Page>;

    fn new_sheet(&mut self, grid: &GridSpec) -> Result<PdfSheet, TiangeError> {
        let (width, height) = sheet_size(grid, &self.style);
        let mut page = Page::new(width, height);
        if !self.style.background.is_white() {
            page.add_fill(page.media_box, self.style.background);
        }
        page.add_strokes(grid_strokes(grid, &self.style));

        Ok(PdfSheet { grid: *grid, page })
    }

    fn render_row(
        &mut self,
        sheet: &mut PdfSheet,
        row: usize,
        chars: &[char],
    ) -> Result<(), TiangeError> {
        debug_assert!(row < sheet.grid.rows());
        debug_assert!(chars.len() <= sheet.grid.columns());

        let font = &self.document.fonts[self.font];
        let size = self.style.font_size;
        for (column, &ch) in chars.iter().enumerate() {
            // header padding
            if ch.is_whitespace() {
                continue;
            }

            let cell = cell_rect(&sheet.grid, &self.style, row, column);
            sheet.page.add_span(SpanLayout {
                text: ch.to_string(),
                font: SpanFont {
                    id: self.font,
                    size,
                },
                colour: self.style.ink_colour,
                coords: glyph_origin(
                    &cell,
                    font.advance(ch, size),
                    font.ascent(size),
                    font.descent(size),
                ),
            });
        }

        Ok(())
    }

    fn flush(&mut self, sheet: PdfSheet, page_index: usize) -> Result<Id<Page>, TiangeError> {
        let glyphs = sheet.page.span_count();
        let id = self.document.add_page(sheet.page);
        debug!(page = page_index, glyphs, "flushed sheet");
        Ok(id)
    }
}

/// Where to start a glyph's baseline so that its advance box is centred
/// horizontally and its ascent-descent box vertically in `cell`
pub fn glyph_origin(cell: &Rect, advance: Pt, ascent: Pt, descent: Pt) -> (Pt, Pt) {
    let (cx, cy) = cell.centre();
    (cx - advance * 0.5, cy - (ascent + descent) * 0.5)
}
