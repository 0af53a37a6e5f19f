//! Command line front end: renders a text into a tián grid copybook PDF.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tiange::{Colour, Copybook, CopybookConfig, GridSpec, Mm};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Copybook command line arguments.
#[derive(Parser, Debug)]
#[command(name = "tiange")]
#[command(about = "Lay text out on tián grid practice sheets and save them as a PDF")]
#[command(version)]
struct Args {
    /// Title of the text; also names the output file
    #[arg(short, long, default_value = "")]
    title: String,

    /// Author of the text
    #[arg(short, long, default_value = "")]
    author: String,

    /// The text itself
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file (stdin when neither --text nor --file is given)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// TrueType / OpenType font to draw glyphs with
    #[arg(long, value_name = "PATH", default_value = "./fonts/tk.ttf")]
    font: PathBuf,

    /// Cells per row
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    columns: i64,

    /// Rows per page
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    rows: i64,

    /// Side length of a cell in millimetres
    #[arg(long, default_value_t = 15.0)]
    cell_mm: f32,

    /// Colour of the grid lines (name or #rrggbb)
    #[arg(long, default_value = "red")]
    grid_colour: Colour,

    /// Colour of the glyphs (name or #rrggbb)
    #[arg(long, default_value = "black")]
    ink_colour: Colour,

    /// Keep every character instead of only CJK ideographs
    #[arg(long)]
    keep_all: bool,

    /// Directory to write the PDF to
    #[arg(short, long, value_name = "DIR", default_value = "./pdf")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let grid = GridSpec::new(args.columns, args.rows)?;
    let text = read_text(&args)?;

    let config = CopybookConfig::new()
        .grid(grid)
        .cell_size(Mm(args.cell_mm))
        .grid_colour(args.grid_colour)
        .ink_colour(args.ink_colour)
        .only_cjk(!args.keep_all)
        .font_path(&args.font)
        .output_dir(&args.out_dir)
        .clone();

    let path = Copybook::new(config)
        .title(&args.title)
        .author(&args.author)
        .render(&text)
        .with_context(|| format!("failed to render copybook with font {}", args.font.display()))?;

    info!(path = %path.display(), "done");
    Ok(())
}

fn read_text(args: &Args) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read text from stdin")?;
    Ok(text)
}
