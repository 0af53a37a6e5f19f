#![allow(dead_code)]

use std::path::PathBuf;
use tiange::{Canvas, GridSpec, TiangeError};

/// One call made against a [RecordingCanvas]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    NewSheet,
    Row { row: usize, text: String },
    Flush { page: usize },
}

/// A sheet of a [RecordingCanvas]: the rows drawn on it, indexed by row
#[derive(Debug, Default)]
pub struct RecordedSheet {
    pub rows: Vec<Option<String>>,
}

/// A finished page of a [RecordingCanvas]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPage {
    pub page: usize,
    pub rows: Vec<Option<String>>,
}

/// A canvas that remembers everything it was asked to do, optionally failing on
/// the n-th flush
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<Call>,
    pub fail_on_flush: Option<usize>,
    flushes: usize,
    open_sheets: usize,
}

impl RecordingCanvas {
    pub fn failing_on_flush(n: usize) -> RecordingCanvas {
        RecordingCanvas {
            fail_on_flush: Some(n),
            ..Default::default()
        }
    }

    pub fn rows(&self) -> Vec<(usize, String)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Row { row, text } => Some((*row, text.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    type Sheet = RecordedSheet;
    type Artifact = RecordedPage;

    fn new_sheet(&mut self, grid: &GridSpec) -> Result<RecordedSheet, TiangeError> {
        assert_eq!(self.open_sheets, 0, "previous sheet was not flushed");
        self.open_sheets += 1;
        self.calls.push(Call::NewSheet);
        Ok(RecordedSheet {
            rows: vec![None; grid.rows()],
        })
    }

    fn render_row(
        &mut self,
        sheet: &mut RecordedSheet,
        row: usize,
        chars: &[char],
    ) -> Result<(), TiangeError> {
        let text: String = chars.iter().collect();
        assert!(sheet.rows[row].is_none(), "row {row} drawn twice");
        sheet.rows[row] = Some(text.clone());
        self.calls.push(Call::Row { row, text });
        Ok(())
    }

    fn flush(&mut self, sheet: RecordedSheet, page: usize) -> Result<RecordedPage, TiangeError> {
        self.open_sheets -= 1;
        self.flushes += 1;
        if self.fail_on_flush == Some(self.flushes) {
            return Err(TiangeError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "cannot create output location",
            )));
        }
        self.calls.push(Call::Flush { page });
        Ok(RecordedPage {
            page,
            rows: sheet.rows,
        })
    }
}

/// `n` distinct-enough CJK ideographs
pub fn ideographs(n: usize) -> String {
    (0..n)
        .map(|i| char::from_u32(0x4e00 + (i as u32 % 0x1000)).expect("valid ideograph"))
        .collect()
}

/// A font to render real PDFs with: `TIANGE_TEST_FONT` if set, otherwise the
/// first common system font found
pub fn test_font() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TIANGE_TEST_FONT") {
        return Some(PathBuf::from(path));
    }
    [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/Library/Fonts/Arial Unicode.ttf",
        "C:\\Windows\\Fonts\\simsun.ttc",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
}
