//! Shared builders for the integration tests.
//!
//! Fonts are created programmatically with lopdf, saved to bytes and loaded
//! back so that the tests see what a reader of the file would see.

#![allow(dead_code)]

use std::sync::Arc;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use pdfcmap::{FontProgramKind, GlyphTable, SharedFontProgram};

/// A ToUnicode program for a two-byte font: `<0003>` space, `<0024>`-`<003D>`
/// A-Z, `<0044>`-`<005D>` a-z and `<01B0>` the fi ligature.
pub const TWO_BYTE_TO_UNICODE: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
2 beginbfchar
<0003> <0020>
<01B0> <00660069>
endbfchar
2 beginbfrange
<0024> <003D> <0041>
<0044> <005D> <0061>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

/// An embedded CID CMap mapping one- and two-byte codes to CIDs.
pub const MIXED_WIDTH_CMAP: &str = "%!PS-Adobe-3.0 Resource-CMap
/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Test) /Ordering (Mixed) /Supplement 0 >> def
/CMapName /Test-Mixed-H def
/CMapType 1 def
2 begincodespacerange
<00> <80>
<8140> <FEFE>
endcodespacerange
1 begincidrange
<20> <7E> 1
endcidrange
2 begincidrange
<8140> <817E> 633
<8180> <81AC> 696
endcidrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

/// A TrueType-like glyph table covering ASCII letters, space and the fi ligature.
pub fn latin_program() -> SharedFontProgram {
    Arc::new(
        GlyphTable::new(FontProgramKind::TrueType)
            .with_unicode(0x20, 3)
            .with_text("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 36)
            .with_text("abcdefghijklmnopqrstuvwxyz", 68)
            .with_unicode(0x4E2D, 1200)
            .with_unicode(0x6587, 1201)
            .with_ligature(&[73, 76], 432),
    )
}

/// Add a stream object with `content` and no filter.
pub fn add_stream(doc: &mut Document, dict: Dictionary, content: &str) -> ObjectId {
    doc.add_object(Stream::new(dict, content.as_bytes().to_vec()))
}

/// Add a Type0 font named `name` with an Identity descendant and return the
/// ids of the font and its descendant.
pub fn add_type0_font(doc: &mut Document, name: &str, encoding: Object) -> (ObjectId, ObjectId) {
    let descendant = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => name,
        "CIDToGIDMap" => "Identity",
    });
    let font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => name,
        "Encoding" => encoding,
        "DescendantFonts" => vec![Object::Reference(descendant)],
    });
    (font, descendant)
}

/// Add a simple font of `subtype` with the given `/Encoding` value.
pub fn add_simple_font(doc: &mut Document, subtype: &str, encoding: Option<Object>) -> ObjectId {
    let mut dict = dictionary! {
        "Type" => "Font",
        "Subtype" => subtype,
        "BaseFont" => "Demo",
    };
    if let Some(encoding) = encoding {
        dict.set("Encoding", encoding);
    }
    doc.add_object(dict)
}

/// Save `doc` to bytes and parse them again.
pub fn reload(doc: &mut Document) -> Document {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    Document::load_mem(&buf).expect("failed to reload test PDF")
}

/// Wrap `doc` objects in a minimal one-page catalog so lopdf can save it.
pub fn finish_document(doc: &mut Document) {
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => Object::Integer(0),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
}
