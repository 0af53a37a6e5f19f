//! Turns page contents into a PDF content stream.

use crate::colour::Colour;
use crate::font::Font;
use crate::grid::{LineStyle, Stroke};
use crate::page::{PageContents, SpanFont, SpanLayout};
use crate::rect::Rect;
use id_arena::Arena;
use std::io::Write;

/// Renders page contents to a PDF content stream, converting high-level
/// content items into low-level PDF operators.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Fill(rect, colour) => render_fill(&mut content, rect, *colour)?,
            PageContents::Strokes(strokes) => render_strokes(&mut content, strokes)?,
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_fill(content: &mut Vec<u8>, rect: &Rect, colour: Colour) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write_fill_colour(content, colour)?;
    write!(
        content,
        "{} {} {} {} re\nf\n",
        rect.x1,
        rect.y1,
        rect.width(),
        rect.height()
    )?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_strokes(content: &mut Vec<u8>, strokes: &[Stroke]) -> Result<(), std::io::Error> {
    if strokes.is_empty() {
        return Ok(());
    }

    write!(content, "q\n")?;

    // only emit graphics state when it changes between lines
    let mut current: Option<(f32, LineStyle, Colour)> = None;
    for stroke in strokes.iter() {
        let state = (*stroke.width, stroke.style, stroke.colour);
        if current != Some(state) {
            write!(content, "{} w\n", stroke.width)?;
            match stroke.style {
                LineStyle::Solid => write!(content, "[] 0 d\n")?,
                LineStyle::Dashed(dash) => write!(content, "[{dash} {dash}] 0 d\n")?,
            }
            write_stroke_colour(content, stroke.colour)?;
            current = Some(state);
        }

        write!(
            content,
            "{} {} m\n{} {} l\nS\n",
            stroke.from.0, stroke.from.1, stroke.to.0, stroke.to.1
        )?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;
    write_fill_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_fill_colour(content, current_colour)?;
        }

        let font = &fonts[current_font.id];
        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        for ch in span.text.chars() {
            write!(content, "{:04x}", font.glyph_id_or_replacement(ch))?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} K\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::grid::{grid_strokes, GridSpec, GridStyle};
    use crate::units::Pt;

    fn render(contents: &[PageContents]) -> String {
        let fonts: Arena<Font> = Arena::new();
        String::from_utf8(render_contents(contents, &fonts).unwrap()).unwrap()
    }

    #[test]
    fn nothing_to_draw() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn fills_rectangles() {
        let out = render(&[PageContents::Fill(
            Rect::sized(Pt(10.0), Pt(20.0)),
            colours::GREY,
        )]);
        assert_eq!(out, "q\n0.5 g\n0 0 10 20 re\nf\nQ\n");
    }

    #[test]
    fn emits_line_state_when_it_changes() {
        let grid = GridSpec::new(1, 1).unwrap();
        let strokes = grid_strokes(&grid, &GridStyle::with_cell_size(Pt(120.0)));
        let out = render(&[PageContents::Strokes(strokes)]);

        // border, guide, border in each direction: every line differs from the one
        // before it
        assert_eq!(out.matches(" m\n").count(), 6);
        assert_eq!(out.matches("[] 0 d\n").count(), 4);
        assert_eq!(out.matches(" RG\n").count(), 6);
        assert!(out.starts_with("q\n") && out.ends_with("Q\n"));
        assert!(out.contains("120 240 m\n120 120 l\nS\n"));
    }
}
