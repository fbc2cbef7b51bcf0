//! Slide enumeration and text extraction.

use super::DEFAULT_MAIN_PART;
use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

/// Content reported for a package without a presentation part.
pub const EMPTY_PRESENTATION: &str = "Presentation is empty.";

/// DrawingML main namespace, transitional and strict.
const DRAWINGML_NS: [&[u8]; 2] = [
    b"http://schemas.openxmlformats.org/drawingml/2006/main",
    b"http://purl.oclc.org/ooxml/drawingml/main",
];

/// Slide reference from the presentation's `sldIdLst`.
#[derive(Debug, Clone)]
struct SlideRef {
    rel_id: String,
}

/// Extract the text of every slide, one block per slide.
///
/// Within a slide, the DrawingML text leaves are joined with `\n`; every
/// block is terminated by `\n`, so two slides "S1" and "S2" produce
/// `"S1\nS2\n"`.
pub fn extract_text(container: &OoxmlContainer) -> Result<String> {
    let Some(presentation) = container.main_part(DEFAULT_MAIN_PART)? else {
        return Ok(EMPTY_PRESENTATION.to_string());
    };

    let mut content = String::new();
    for slide_path in slide_parts(container, &presentation)? {
        let xml = container.read_xml(&slide_path)?;
        content.push_str(&slide_texts(&xml)?.join("\n"));
        content.push('\n');
    }

    Ok(content)
}

/// Part names of all slides, in slide-ID list order.
pub fn slide_parts(container: &OoxmlContainer, presentation: &str) -> Result<Vec<String>> {
    let xml = container.read_xml(presentation)?;
    let rels = container.read_relationships(presentation)?;

    parse_slide_list(&xml)?
        .into_iter()
        .map(|slide| {
            let rel = rels.get(&slide.rel_id).ok_or_else(|| {
                Error::MissingComponent(format!("slide relationship {}", slide.rel_id))
            })?;
            let path = OoxmlContainer::resolve_path(presentation, &rel.target);
            if container.exists(&path) {
                Ok(path)
            } else {
                Err(Error::MissingComponent(path))
            }
        })
        .collect()
}

/// Parse `p:sldId` entries; the relationship id is the `r:id` attribute.
fn parse_slide_list(xml: &str) -> Result<Vec<SlideRef>> {
    let mut slides = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sldId" => {
                let rel_id = e
                    .attributes()
                    .flatten()
                    .find(|attr| {
                        let key = attr.key;
                        key.local_name().as_ref() == b"id" && key.prefix().is_some()
                    })
                    .map(|attr| String::from_utf8_lossy(&attr.value).into_owned());

                if let Some(rel_id) = rel_id.filter(|id| !id.is_empty()) {
                    slides.push(SlideRef { rel_id });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(slides)
}

/// All DrawingML text leaves (`a:t`) of a slide, in document order.
pub fn slide_texts(xml: &str) -> Result<Vec<String>> {
    let mut reader = NsReader::from_str(xml);
    let mut texts = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((ResolveResult::Bound(Namespace(ns)), Event::Start(e)))
                if DRAWINGML_NS.contains(&ns) && e.local_name().as_ref() == b"t" =>
            {
                current = Some(String::new());
            }
            Ok((ResolveResult::Bound(Namespace(ns)), Event::Empty(e)))
                if DRAWINGML_NS.contains(&ns) && e.local_name().as_ref() == b"t" =>
            {
                texts.push(String::new());
            }
            Ok((_, Event::Text(e))) => {
                if let Some(text) = current.as_mut() {
                    let unescaped = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Ok((_, Event::CData(e))) => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok((_, Event::End(_))) => {
                if let Some(text) = current.take() {
                    texts.push(text);
                }
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    Ok(texts)
}
