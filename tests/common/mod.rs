//! Synthetic OOXML packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

fn package(entries: &[(String, String)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, body) in entries {
        zip.start_file(name.as_str(), options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    buffer
}

fn package_rels(target: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="{REL_OFFICE_DOCUMENT}" Target="{target}"/>
</Relationships>"#
    )
}

/// A `.docx` whose body holds one single-run paragraph per entry, followed by
/// body-level section properties.
pub fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| format!("\n    <w:p><w:r><w:t>{text}</w:t></w:r></w:p>"))
        .collect();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}">
  <w:body>{body}
    <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
  </w:body>
</w:document>"#
    );

    package(&[
        (
            "[Content_Types].xml".to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#
                .to_string(),
        ),
        ("_rels/.rels".to_string(), package_rels("word/document.xml")),
        ("word/document.xml".to_string(), document),
    ])
}

/// A `.docx` package whose document part has no body element.
pub fn docx_without_body() -> Vec<u8> {
    package(&[
        ("_rels/.rels".to_string(), package_rels("word/document.xml")),
        (
            "word/document.xml".to_string(),
            format!(r#"<w:document xmlns:w="{W_NS}"></w:document>"#),
        ),
    ])
}

fn slide_xml(texts: &[&str]) -> String {
    let shapes: String = texts
        .iter()
        .map(|text| {
            format!(
                r#"
      <p:sp><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>"#
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{A_NS}" xmlns:r="{R_NS}" xmlns:p="{P_NS}">
  <p:cSld>
    <p:spTree>{shapes}
    </p:spTree>
  </p:cSld>
</p:sld>"#
    )
}

/// A `.pptx` with one slide per entry; each slide has one shape per text.
///
/// Slides are listed in `sldIdLst` in the given order, but their part names
/// are numbered in reverse so that order must come from the slide-ID list.
pub fn pptx(slides: &[Vec<&str>]) -> Vec<u8> {
    let count = slides.len();
    let mut entries = vec![("_rels/.rels".to_string(), package_rels("ppt/presentation.xml"))];

    let mut ids = String::new();
    let mut rels = String::new();
    for (idx, texts) in slides.iter().enumerate() {
        let part_no = count - idx;
        let rel_id = format!("rId{}", idx + 10);
        ids.push_str(&format!(
            r#"<p:sldId id="{}" r:id="{}"/>"#,
            256 + idx,
            rel_id
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="{rel_id}" Type="{REL_SLIDE}" Target="slides/slide{part_no}.xml"/>"#
        ));
        entries.push((format!("ppt/slides/slide{part_no}.xml"), slide_xml(texts)));
    }

    entries.push((
        "ppt/presentation.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{A_NS}" xmlns:r="{R_NS}" xmlns:p="{P_NS}"><p:sldIdLst>{ids}</p:sldIdLst></p:presentation>"#
        ),
    ));
    entries.push((
        "ppt/_rels/presentation.xml.rels".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
        ),
    ));

    package(&entries)
}

/// A valid ZIP package that contains no presentation part at all.
pub fn pptx_without_presentation() -> Vec<u8> {
    package(&[(
        "[Content_Types].xml".to_string(),
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#
            .to_string(),
    )])
}
