//! One-call rendering of a text into a copybook PDF.
//!
//! ```no_run
//! use tiange::{Copybook, CopybookConfig};
//!
//! let config = CopybookConfig::new().font_path("fonts/tk.ttf").clone();
//! let path = Copybook::new(config)
//!     .title("子鱼论战")
//!     .render("楚人伐宋以救郑。宋公将战。")
//!     .expect("can write copybook");
//! println!("{}", path.display());
//! ```

use crate::assemble::{DocumentAssembler, PdfAssembler};
use crate::canvas::PdfCanvas;
use crate::config::CopybookConfig;
use crate::document::Document;
use crate::font::Font;
use crate::info::Info;
use crate::sheet::SheetBuilder;
use crate::TiangeError;
use std::path::PathBuf;
use tracing::info;

/// A text's worth of practice sheets
#[derive(Debug, Clone, Default)]
pub struct Copybook {
    config: CopybookConfig,
    title: String,
    author: String,
}

impl Copybook {
    pub fn new(config: CopybookConfig) -> Copybook {
        Copybook {
            config,
            ..Default::default()
        }
    }

    /// Title row of the first sheet; also names the output file
    pub fn title<S: ToString>(mut self, title: S) -> Copybook {
        self.title = title.to_string();
        self
    }

    /// Author row of the first sheet, below the title
    pub fn author<S: ToString>(mut self, author: S) -> Copybook {
        self.author = author.to_string();
        self
    }

    /// The file name (without extension) the copybook is written under
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .title
            .trim()
            .chars()
            .map(|ch| match ch {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                ch => ch,
            })
            .collect();
        if stem.is_empty() {
            "copybook".to_string()
        } else {
            stem
        }
    }

    /// Render `text` with the font at the configured font path
    pub fn render(&self, text: &str) -> Result<PathBuf, TiangeError> {
        info!(font = %self.config.font_path.display(), "loading font");
        let font = Font::load_file(&self.config.font_path)?;
        self.render_with_font(font, text)
    }

    /// Render `text` with an already loaded font, returning the path of the PDF
    pub fn render_with_font(&self, font: Font, text: &str) -> Result<PathBuf, TiangeError> {
        let mut document = Document::default();
        let mut info = Info::new();
        info.subject("tián grid copybook");
        if !self.title.is_empty() {
            info.title(&self.title);
        }
        if !self.author.is_empty() {
            info.author(&self.author);
        }
        document.set_info(info);
        let font = document.add_font(font);

        let mut assembler = PdfAssembler::new(document, &self.config.output_dir, self.file_stem());

        let builder = SheetBuilder::new(self.config.sheet_options())
            .with_header(&self.author, &self.title);
        let pages = {
            let mut canvas =
                PdfCanvas::new(assembler.document_mut(), font, self.config.grid_style());
            builder.build(text, &mut canvas)?
        };

        assembler.merge(&pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_comes_from_the_title() {
        let book = Copybook::default().title(" 子鱼论战 ");
        assert_eq!(book.file_stem(), "子鱼论战");
        assert_eq!(Copybook::default().file_stem(), "copybook");
        assert_eq!(Copybook::default().title("a/b:c").file_stem(), "a_b_c");
    }

    #[test]
    fn missing_font_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = CopybookConfig::new()
            .font_path(dir.path().join("missing.ttf"))
            .output_dir(dir.path().join("pdf"))
            .clone();
        let result = Copybook::new(config).title("t").render("子");
        assert!(matches!(result, Err(TiangeError::Io(_))));
        assert!(!dir.path().join("pdf").exists());
    }
}
