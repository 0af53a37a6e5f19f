//! Joins finished pages into the output document.

use crate::document::Document;
use crate::page::Page;
use crate::TiangeError;
use id_arena::Id;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Combines the artifacts of a build into one document. The artifacts are in
/// page order and that order must be kept exactly.
pub trait DocumentAssembler<A> {
    /// Write the document, returning where it was written
    fn merge(self, artifacts: &[A]) -> Result<PathBuf, TiangeError>;
}

/// Writes the pages of a [Document] to `<directory>/<name>.pdf`
pub struct PdfAssembler {
    document: Document,
    directory: PathBuf,
    name: String,
}

impl PdfAssembler {
    pub fn new<P: AsRef<Path>, S: ToString>(document: Document, directory: P, name: S) -> Self {
        PdfAssembler {
            document,
            directory: directory.as_ref().to_path_buf(),
            name: name.to_string(),
        }
    }

    /// The document pages are drawn into before merging
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Where [DocumentAssembler::merge] will write to
    pub fn output_path(&self) -> PathBuf {
        self.directory.join(format!("{}.pdf", self.name))
    }
}

impl DocumentAssembler<Id<Page>> for PdfAssembler {
    fn merge(self, artifacts: &[Id<Page>]) -> Result<PathBuf, TiangeError> {
        let path = self.output_path();
        let PdfAssembler {
            mut document,
            directory,
            ..
        } = self;

        document.set_page_order(artifacts.to_vec())?;

        std::fs::create_dir_all(&directory)?;
        let mut out = BufWriter::new(File::create(&path)?);
        document.write(&mut out)?;
        out.flush()?;

        info!(path = %path.display(), pages = artifacts.len(), "wrote copybook");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Pt;

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("pdf").join("out");

        let mut assembler = PdfAssembler::new(Document::default(), &nested, "子鱼论战");
        let page = assembler
            .document_mut()
            .add_page(Page::new(Pt(100.0), Pt(100.0)));

        let path = assembler.merge(&[page]).unwrap();
        assert_eq!(path, nested.join("子鱼论战.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn unknown_pages_are_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut other = Document::default();
        let foreign = other.add_page(Page::new(Pt(1.0), Pt(1.0)));

        let assembler = PdfAssembler::new(Document::default(), dir.path(), "x");
        let path = assembler.output_path();
        assert!(matches!(
            assembler.merge(&[foreign]),
            Err(TiangeError::PageMissing)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_location_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let mut assembler = PdfAssembler::new(Document::default(), blocker.join("sub"), "x");
        let page = assembler
            .document_mut()
            .add_page(Page::new(Pt(1.0), Pt(1.0)));
        assert!(matches!(
            assembler.merge(&[page]),
            Err(TiangeError::Io(_))
        ));
    }
}
