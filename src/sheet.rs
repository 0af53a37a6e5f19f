//! Turns text into a stack of finished sheets.
//!
//! The [SheetBuilder] cleans up the text, puts the title and author rows in front
//! of it, lets [paginate] decide where every row goes, and drives a [Canvas]
//! through the resulting pages.

use crate::canvas::Canvas;
use crate::grid::GridSpec;
use crate::paginate::paginate;
use crate::TiangeError;
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// The CJK Unified Ideographs block as commonly matched, `[一-龥]`
pub const CJK_IDEOGRAPHS: RangeInclusive<char> = '\u{4e00}'..='\u{9fa5}';

/// The character injected after a header to finish its last row
pub const FILLER: char = ' ';

/// Options for laying text out on sheets. These are fixed for the duration of a
/// build.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetOptions {
    pub grid: GridSpec,
    /// Drop every character of the body outside of `script`
    pub filter: bool,
    /// Characters kept when filtering
    pub script: RangeInclusive<char>,
}

impl Default for SheetOptions {
    fn default() -> Self {
        SheetOptions {
            grid: GridSpec::default(),
            filter: true,
            script: CJK_IDEOGRAPHS,
        }
    }
}

impl SheetOptions {
    pub fn new(grid: GridSpec) -> SheetOptions {
        SheetOptions {
            grid,
            ..Default::default()
        }
    }

    /// Enable or disable the script filter, modifying `self`
    pub fn filter(&mut self, filter: bool) -> &mut Self {
        self.filter = filter;
        self
    }

    /// Keep a different range of characters when filtering, modifying `self`
    pub fn script(&mut self, script: RangeInclusive<char>) -> &mut Self {
        self.script = script;
        self
    }
}

/// Lays text out on sheets and collects the finished pages
#[derive(Debug, Clone, Default)]
pub struct SheetBuilder {
    options: SheetOptions,
    author: String,
    title: String,
}

impl SheetBuilder {
    pub fn new(options: SheetOptions) -> SheetBuilder {
        SheetBuilder {
            options,
            author: String::new(),
            title: String::new(),
        }
    }

    /// Put author and title rows in front of the text. Empty values are skipped.
    pub fn with_header<A: ToString, T: ToString>(mut self, author: A, title: T) -> SheetBuilder {
        self.author = author.to_string();
        self.title = title.to_string();
        self
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    /// The characters that end up on the sheets, in order: header rows first,
    /// then the (optionally filtered) body
    pub fn prepare(&self, text: &str) -> Vec<char> {
        let mut stream: Vec<char> = if self.options.filter {
            text.chars()
                .filter(|ch| self.options.script.contains(ch))
                .collect()
        } else {
            text.chars().collect()
        };

        if stream.is_empty() && !text.is_empty() {
            warn!(
                input = text.chars().count(),
                "no characters left in the text after filtering"
            );
        }

        // each header is put in front of everything before it, so the author is
        // handled first and ends up below the title
        let columns = self.options.grid.columns();
        for header in [&self.author, &self.title] {
            if header.is_empty() {
                continue;
            }
            let mut prefixed: Vec<char> = header.chars().collect();
            let padding = header_padding(prefixed.len(), columns);
            prefixed.extend(std::iter::repeat(FILLER).take(padding));
            prefixed.append(&mut stream);
            stream = prefixed;
        }

        stream
    }

    /// Lay `text` out on sheets of `canvas`, returning the finished pages in page
    /// order. At least one page is always produced, even for empty text.
    ///
    /// A failing canvas aborts the build. Pages flushed before the failure are
    /// left wherever the canvas put them.
    pub fn build<C: Canvas>(
        &self,
        text: &str,
        canvas: &mut C,
    ) -> Result<Vec<C::Artifact>, TiangeError> {
        let stream = self.prepare(text);
        let grid = self.options.grid;

        let mut artifacts: Vec<C::Artifact> = Vec::new();
        // the sheet being drawn on; a new one is only started once the previous
        // one has been flushed
        let mut sheet: Option<C::Sheet> = None;

        for record in paginate(stream.len(), grid) {
            let current = match sheet.take() {
                Some(current) => current,
                None => canvas.new_sheet(&grid)?,
            };
            let current = sheet.insert(current);
            canvas.render_row(current, record.row, &stream[record.range()])?;

            if record.closes_page(&grid) {
                if let Some(full) = sheet.take() {
                    artifacts.push(canvas.flush(full, record.page)?);
                }
            }
        }

        match sheet.take() {
            Some(partial) => {
                let page = artifacts.len();
                artifacts.push(canvas.flush(partial, page)?);
            }
            None if artifacts.is_empty() => {
                let blank = canvas.new_sheet(&grid)?;
                artifacts.push(canvas.flush(blank, 0)?);
            }
            None => {}
        }

        debug!(
            characters = stream.len(),
            pages = artifacts.len(),
            "laid out sheets"
        );

        Ok(artifacts)
    }
}

/// How many filler cells follow a header of `len` characters so the body starts
/// on a fresh row. A header that exactly fills its rows is followed by a whole
/// blank row.
pub fn header_padding(len: usize, columns: usize) -> usize {
    columns - len % columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(columns: usize, rows: usize) -> SheetBuilder {
        SheetBuilder::new(SheetOptions::new(GridSpec::new(columns, rows).unwrap()))
    }

    #[test]
    fn padding_finishes_the_row() {
        assert_eq!(header_padding("子鱼论战".chars().count(), 10), 6);
        assert_eq!(header_padding(13, 10), 7);
        assert_eq!(header_padding(10, 10), 10);
        assert_eq!(header_padding(0, 4), 4);
    }

    #[test]
    fn filter_keeps_only_the_script() {
        let prepared = builder(10, 10).prepare("　　楚人伐宋以救郑。A b,“宋公”");
        assert_eq!(prepared.iter().collect::<String>(), "楚人伐宋以救郑宋公");
    }

    #[test]
    fn filter_can_be_disabled() {
        let mut options = SheetOptions::new(GridSpec::new(4, 4).unwrap());
        options.filter(false);
        let prepared = SheetBuilder::new(options).prepare("a 子.");
        assert_eq!(prepared, vec!['a', ' ', '子', '.']);
    }

    #[test]
    fn title_row_comes_before_author_row() {
        let prepared = builder(4, 4)
            .with_header("左丘明", "子鱼论战")
            .prepare("宋公");
        let text: String = prepared.iter().collect();
        assert_eq!(text, "子鱼论战    左丘明 宋公");
        assert_eq!(prepared.len(), 4 + 4 + 3 + 1 + 2);
    }

    #[test]
    fn headers_are_not_filtered() {
        let prepared = builder(10, 10).with_header("", "Chapter 1").prepare("abc");
        let text: String = prepared.iter().collect();
        assert_eq!(text, "Chapter 1 ");
    }

    #[test]
    fn empty_header_parts_are_skipped() {
        let prepared = builder(10, 10).with_header("", "").prepare("宋");
        assert_eq!(prepared, vec!['宋']);
    }
}
