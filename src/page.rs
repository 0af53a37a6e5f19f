use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::grid::Stroke;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::TiangeError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

/// The font a span is set in
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text starting at a baseline position
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Baseline start, in page coordinates
    pub coords: (Pt, Pt),
}

/// Everything that can be drawn on a page, in painting order
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    /// A filled rectangle without an outline
    Fill(Rect, Colour),
    /// Straight lines, e.g. a grid
    Strokes(Vec<Stroke>),
    Text(Vec<SpanLayout>),
}

/// A single page of a document. Pages start out empty and are drawn on by
/// appending contents, which are painted in the order they were added.
#[derive(Clone, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// The drawing
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create an empty page of the given size
    pub fn new(width: Pt, height: Pt) -> Page {
        Page {
            media_box: Rect::sized(width, height),
            contents: Vec::default(),
        }
    }

    pub fn add_fill(&mut self, rect: Rect, colour: Colour) {
        self.contents.push(PageContents::Fill(rect, colour));
    }

    pub fn add_strokes(&mut self, strokes: Vec<Stroke>) {
        if !strokes.is_empty() {
            self.contents.push(PageContents::Strokes(strokes));
        }
    }

    /// Add a span of text. Consecutive spans are grouped into one text block.
    pub fn add_span(&mut self, span: SpanLayout) {
        match self.contents.last_mut() {
            Some(PageContents::Text(spans)) => spans.push(span),
            _ => self.contents.push(PageContents::Text(vec![span])),
        }
    }

    /// Number of glyph spans on the page
    pub fn span_count(&self) -> usize {
        self.contents
            .iter()
            .map(|c| match c {
                PageContents::Text(spans) => spans.len(),
                _ => 0,
            })
            .sum()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), TiangeError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(TiangeError::PageMissing)?;
        let page_tree = refs
            .get(RefType::PageTree)
            .ok_or(TiangeError::PageMissing)?;

        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(page_tree);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        writer.stream(content_id, rendered.as_slice());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;

    #[test]
    fn page_is_sized_from_the_origin() {
        let page = Page::new(Pt(100.0), Pt(200.0));
        assert_eq!(page.media_box.width(), Pt(100.0));
        assert_eq!(page.media_box.height(), Pt(200.0));
        assert!(page.contents.is_empty());
    }

    #[test]
    fn empty_strokes_are_dropped() {
        let mut page = Page::new(Pt(10.0), Pt(10.0));
        page.add_strokes(Vec::new());
        page.add_fill(page.media_box, colours::GREY);
        assert_eq!(page.contents.len(), 1);
        assert_eq!(page.span_count(), 0);
    }
}
