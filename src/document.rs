use crate::{
    font::Font,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    TiangeError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document stores all the pages and fonts of the PDF, then renders them
/// out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Replace the page order. Every id must belong to this document; pages left
    /// out are not written.
    pub fn set_page_order(&mut self, order: Vec<Id<Page>>) -> Result<(), TiangeError> {
        if order.iter().any(|id| self.pages.get(*id).is_none()) {
            return Err(TiangeError::PageMissing);
        }
        self.page_order = order;
        Ok(())
    }

    /// Add a font to the document. Fonts are shared by every page of the document.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Write the entire document to the writer, pages in [Document::page_order].
    /// The whole document is rendered in memory first; copybooks embed their font,
    /// so expect the output to be at least as large as the font file.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), TiangeError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the document, not by arena index
        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(TiangeError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Pt;

    #[test]
    fn writes_a_pdf_without_fonts() {
        let mut doc = Document::default();
        doc.add_page(Page::new(Pt(100.0), Pt(100.0)));
        doc.set_info(Info::new().title("子鱼论战").clone());

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).unwrap();
        assert!(out.starts_with(b"%PDF-"));
        assert!(out.windows(5).any(|w| w == b"/Page"));
    }

    #[test]
    fn page_order_is_validated() {
        let mut doc = Document::default();
        let a = doc.add_page(Page::new(Pt(1.0), Pt(1.0)));
        let b = doc.add_page(Page::new(Pt(2.0), Pt(2.0)));

        doc.set_page_order(vec![b, a]).unwrap();
        assert_eq!(doc.page_order, vec![b, a]);

        let mut other = Document::default();
        other.add_page(Page::new(Pt(1.0), Pt(1.0)));
        let foreign = {
            let mut arena: Arena<Page> = Arena::new();
            arena.alloc(Page::new(Pt(1.0), Pt(1.0)));
            arena.alloc(Page::new(Pt(1.0), Pt(1.0)))
        };
        assert!(matches!(
            other.set_page_order(vec![foreign]),
            Err(TiangeError::PageMissing)
        ));
    }
}
