use tiange::colours;
use tiange::{DocumentAssembler, PdfAssembler, PdfCanvas, SheetBuilder, SheetOptions};
use tiange::{Document, Font, GridSpec, GridStyle, Info, Mm};

fn main() {
    // the font to draw glyphs with: pass a path, or drop a CJK font at fonts/tk.ttf
    let font_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fonts/tk.ttf".to_string());
    let font = Font::load_file(&font_path).expect("can load font");

    // start a document, describe it, and add the font to it
    let mut info = Info::new();
    info.title("子鱼论战").author("左丘明");
    let mut doc = Document::default();
    doc.set_info(info);
    let font = doc.add_font(font);

    // the assembler owns the document until it is written out as pdf/子鱼论战.pdf
    let mut assembler = PdfAssembler::new(doc, "pdf", "子鱼论战");

    // 8 cells per row, 6 rows per page, with 20 mm cells in blue
    let grid = GridSpec::new(8, 6).expect("valid grid");
    let mut style = GridStyle::with_cell_size(Mm(20.0));
    style.grid_colour = colours::BLUE;

    // a title and author row go in front of the text; punctuation is filtered out
    let builder = SheetBuilder::new(SheetOptions::new(grid)).with_header("左丘明", "子鱼论战");
    let text = "楚人伐宋以救郑。宋公将战。大司马固谏曰：“天之弃商久矣，君将兴之，弗可赦也已。”弗听。";

    // draw every sheet; each finished sheet becomes a page of the document
    let pages = {
        let mut canvas = PdfCanvas::new(assembler.document_mut(), font, style);
        builder.build(text, &mut canvas).expect("can lay out text")
    };

    // write the pages out in the order they were flushed
    let path = assembler.merge(&pages).expect("can write copybook");
    println!("wrote {}", path.display());
}
