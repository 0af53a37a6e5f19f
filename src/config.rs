use crate::colour::{colours, Colour};
use crate::grid::{GridSpec, GridStyle};
use crate::sheet::SheetOptions;
use crate::units::{Mm, Pt};
use std::path::{Path, PathBuf};

/// Everything needed to turn a text into a copybook PDF. The defaults produce
/// 10 x 10 grids of 15 mm red cells with black glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct CopybookConfig {
    pub grid: GridSpec,
    /// Side length of one cell
    pub cell_size: Pt,
    /// Glyph size; five sixths of the cell when not set
    pub font_size: Option<Pt>,
    pub grid_colour: Colour,
    pub ink_colour: Colour,
    pub background: Colour,
    /// Keep only CJK ideographs of the text
    pub only_cjk: bool,
    /// Font file glyphs are drawn with
    pub font_path: PathBuf,
    /// Directory the PDF is written to
    pub output_dir: PathBuf,
}

impl Default for CopybookConfig {
    fn default() -> Self {
        CopybookConfig {
            grid: GridSpec::default(),
            cell_size: Mm(15.0).into(),
            font_size: None,
            grid_colour: colours::RED,
            ink_colour: colours::BLACK,
            background: colours::WHITE,
            only_cjk: true,
            font_path: PathBuf::from("./fonts/tk.ttf"),
            output_dir: PathBuf::from("./pdf"),
        }
    }
}

impl CopybookConfig {
    pub fn new() -> CopybookConfig {
        CopybookConfig::default()
    }

    pub fn grid(&mut self, grid: GridSpec) -> &mut Self {
        self.grid = grid;
        self
    }

    pub fn cell_size<P: Into<Pt>>(&mut self, cell_size: P) -> &mut Self {
        self.cell_size = cell_size.into();
        self
    }

    pub fn font_size<P: Into<Pt>>(&mut self, font_size: P) -> &mut Self {
        self.font_size = Some(font_size.into());
        self
    }

    pub fn grid_colour(&mut self, colour: Colour) -> &mut Self {
        self.grid_colour = colour;
        self
    }

    pub fn ink_colour(&mut self, colour: Colour) -> &mut Self {
        self.ink_colour = colour;
        self
    }

    pub fn background(&mut self, colour: Colour) -> &mut Self {
        self.background = colour;
        self
    }

    pub fn only_cjk(&mut self, only_cjk: bool) -> &mut Self {
        self.only_cjk = only_cjk;
        self
    }

    pub fn font_path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self {
        self.font_path = path.as_ref().to_path_buf();
        self
    }

    pub fn output_dir<P: AsRef<Path>>(&mut self, path: P) -> &mut Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    /// The layout half of the configuration
    pub fn sheet_options(&self) -> SheetOptions {
        let mut options = SheetOptions::new(self.grid);
        options.filter(self.only_cjk);
        options
    }

    /// The drawing half of the configuration
    pub fn grid_style(&self) -> GridStyle {
        let mut style = GridStyle::with_cell_size(self.cell_size);
        if let Some(font_size) = self.font_size {
            style.font_size = font_size;
        }
        style.grid_colour = self.grid_colour;
        style.ink_colour = self.ink_colour;
        style.background = self.background;
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_ten_by_ten_copybook() {
        let config = CopybookConfig::default();
        assert_eq!(config.grid.columns(), 10);
        assert_eq!(config.grid.rows(), 10);
        assert!(config.sheet_options().filter);

        let style = config.grid_style();
        assert_eq!(style.grid_colour, colours::RED);
        assert!((style.font_size / style.cell_size - 100.0 / 120.0).abs() < 1e-6);
    }

    #[test]
    fn setters_flow_into_options_and_style() {
        let config = CopybookConfig::new()
            .grid(GridSpec::new(8, 12).unwrap())
            .cell_size(Pt(50.0))
            .font_size(Pt(40.0))
            .ink_colour(colours::BLUE)
            .only_cjk(false)
            .output_dir("out")
            .clone();

        let options = config.sheet_options();
        assert_eq!(options.grid.columns(), 8);
        assert!(!options.filter);

        let style = config.grid_style();
        assert_eq!(style.cell_size, Pt(50.0));
        assert_eq!(style.font_size, Pt(40.0));
        assert_eq!(style.ink_colour, colours::BLUE);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
