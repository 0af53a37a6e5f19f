use crate::{
    refs::{ObjectReferences, RefType},
    TiangeError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed TrueType / OpenType font that glyphs are drawn with. The font is
/// embedded in the generated PDF in its entirety, which for CJK fonts easily
/// runs to several megabytes.
///
/// Glyphs are addressed by glyph id (Identity-H encoding), so every character
/// the font covers can be drawn without any encoding tables of our own.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, TiangeError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Read and parse a font file
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Font, TiangeError> {
        Font::load(std::fs::read(path)?)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn lookup_name(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, falling back to its family and then to a
    /// placeholder when the font carries no names
    pub fn name(&self) -> String {
        self.lookup_name(owned_ttf_parser::name_id::FULL_NAME)
            .or_else(|| self.lookup_name(owned_ttf_parser::name_id::FAMILY))
            .unwrap_or_else(|| "Unnamed".to_string())
    }

    /// The family name of the font, falling back to [Font::name]
    pub fn family(&self) -> String {
        self.lookup_name(owned_ttf_parser::name_id::FAMILY)
            .unwrap_or_else(|| self.name())
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    /// Horizontal advance of the glyph drawn for `ch` at the given size
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let gid = GlyphId(self.glyph_id_or_replacement(ch));
        self.scaling(size) * self.face().glyph_hor_advance(gid).unwrap_or_default() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}')
    }

    /// The glyph drawn for `ch`: its own glyph if the font has one, otherwise the
    /// replacement character, a question mark, or finally `.notdef`
    pub fn glyph_id_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let sizing = self.glyphs_sizing(&self.glyph_ids());
        let scaling = 1000.0 / self.face().units_per_em() as f32;

        let mut id_widths: Vec<(u16, f32)> = sizing
            .iter()
            .map(|(&cid, &(_, (width, _)))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);
        for (start, run) in width_runs(&id_widths) {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.default_width(most_common_width(&id_widths).unwrap_or(1000.0));
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let sizing = self.glyphs_sizing(&self.glyph_ids());

        let max_width = sizing.values().map(|&(_, (w, _))| w).max().unwrap_or_default();
        let max_height = sizing.values().map(|&(_, (_, h))| h).max().unwrap_or_default();
        let sum_width: usize = sizing.values().map(|&(_, (w, _))| w as usize).sum();
        let avg_width = sum_width as f32 / sizing.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(self.name().as_bytes()));
        descriptor.family(Str(self.family().as_bytes()));
        descriptor.weight(face.weight().to_number());

        // CJK faces carry glyphs outside the Adobe standard Latin set
        let mut flags = FontFlags::SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: (bbox.y_max as f32).max(max_height as f32) * scaling,
        });
        // copybooks are set in upright faces
        descriptor.italic_angle(0.0);
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .unwrap_or_else(|| face.capital_height().unwrap_or_default())
                as f32
                * scaling,
        );
        // TODO: derive stem_v from the weight class instead of a fixed value
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    /// glyph id -> the first character mapped onto it by a unicode cmap subtable
    fn glyph_ids(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();

        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    /// glyph id -> (char, (advance, height))
    fn glyphs_sizing(&self, ids: &HashMap<u16, char>) -> HashMap<u16, (char, (u16, i16))> {
        let face = self.face();
        let mut sizing: HashMap<u16, (char, (u16, i16))> = HashMap::new();
        for (&id, &ch) in ids.iter() {
            let gid = GlyphId(id);
            if let Some(h_advance) = face.glyph_hor_advance(gid) {
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| (bbox.y_max - bbox.y_min).saturating_sub(face.descender()))
                    .unwrap_or(1000);
                sizing.insert(id, (ch, (h_advance, height)));
            }
        }
        sizing
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut ids: Vec<(u16, char)> = self.glyph_ids().into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);
        let map = to_unicode_cmap(&ids);

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

/// Groups sorted (cid, width) pairs into runs of consecutive cids, the shape
/// the `W` array of a CID font wants
fn width_runs(id_widths: &[(u16, f32)]) -> Vec<(u16, Vec<f32>)> {
    let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
    for &(cid, width) in id_widths {
        match runs.last_mut() {
            Some((start, widths)) if *start as usize + widths.len() == cid as usize => {
                widths.push(width)
            }
            _ => runs.push((cid, vec![width])),
        }
    }
    runs
}

/// The width shared by the most glyphs; CJK fonts are nearly all full-width
fn most_common_width(id_widths: &[(u16, f32)]) -> Option<f32> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for &(_, width) in id_widths {
        *counts.entry(width.to_bits()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by_key(|&(bits, count)| (count, bits))
        .map(|(bits, _)| f32::from_bits(bits))
}

/// Builds a ToUnicode CMap for sorted (glyph id, char) pairs. Entries are split
/// into `bfchar` blocks of at most 100 that share the high byte of the glyph id.
fn to_unicode_cmap(ids: &[(u16, char)]) -> String {
    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo\n\
         << /Registry (Adobe)\n\
         /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let mut blocks: Vec<&[(u16, char)]> = Vec::new();
    let mut block_start = 0;
    for i in 1..=ids.len() {
        let split = i == ids.len()
            || ids[i].0 >> 8 != ids[block_start].0 >> 8
            || i - block_start >= 100;
        if split {
            blocks.push(&ids[block_start..i]);
            block_start = i;
        }
    }

    for block in blocks.into_iter().filter(|b| !b.is_empty()) {
        map.push_str(&format!("{} beginbfchar\n", block.len()));
        for &(id, ch) in block {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{u:04x}"))
                .collect();
            map.push_str(&format!("<{id:04x}> <{hex}>\n"));
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_not_a_font() {
        assert!(matches!(
            Font::load(b"definitely not a font".to_vec()),
            Err(TiangeError::FaceParsing(_))
        ));
    }

    #[test]
    fn missing_font_file_is_io() {
        assert!(matches!(
            Font::load_file("/nonexistent/tk.ttf"),
            Err(TiangeError::Io(_))
        ));
    }

    #[test]
    fn widths_group_into_consecutive_runs() {
        let runs = width_runs(&[(1, 500.0), (2, 500.0), (3, 1000.0), (7, 250.0), (8, 250.0)]);
        assert_eq!(
            runs,
            vec![(1, vec![500.0, 500.0, 1000.0]), (7, vec![250.0, 250.0])]
        );
        assert!(width_runs(&[]).is_empty());
    }

    #[test]
    fn default_width_is_the_most_common() {
        let widths = [(1, 1000.0), (2, 500.0), (3, 1000.0)];
        assert_eq!(most_common_width(&widths), Some(1000.0));
        assert_eq!(most_common_width(&[]), None);
    }

    #[test]
    fn cmap_blocks_share_a_high_byte() {
        let ids = [(0x0041, '子'), (0x0042, '鱼'), (0x0101, '论')];
        let cmap = to_unicode_cmap(&ids);
        assert_eq!(cmap.matches("beginbfchar").count(), 2);
        assert!(cmap.contains("2 beginbfchar\n<0041> <5b50>\n<0042> <9c7c>\nendbfchar\n"));
        assert!(cmap.contains("1 beginbfchar\n<0101> <8bba>\n"));
    }

    #[test]
    fn cmap_blocks_hold_at_most_100() {
        let ids: Vec<(u16, char)> = (0..150u16).map(|i| (i, 'a')).collect();
        let cmap = to_unicode_cmap(&ids);
        assert!(cmap.contains("100 beginbfchar"));
        assert!(cmap.contains("50 beginbfchar"));
    }

    #[test]
    fn cmap_encodes_astral_chars_as_surrogates() {
        let cmap = to_unicode_cmap(&[(5, '𠀀')]);
        assert!(cmap.contains("<0005> <d840dc00>"));
    }
}
