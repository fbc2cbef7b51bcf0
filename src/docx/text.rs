//! Inner-text extraction for the main document body.

use super::DEFAULT_MAIN_PART;
use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use quick_xml::events::Event;

/// Leaf elements whose character data makes up the body's inner text.
///
/// `t` covers `w:t` as well as DrawingML and math text nested in the body.
const TEXT_LEAVES: [&[u8]; 4] = [b"t", b"delText", b"instrText", b"delInstrText"];

/// Extract the inner text of a Word package's main document body.
///
/// All text leaves are concatenated in document order without separators,
/// so paragraphs "A" and "B" yield `"AB"`.
pub fn extract_text(container: &OoxmlContainer) -> Result<String> {
    let part = container
        .main_part(DEFAULT_MAIN_PART)?
        .ok_or_else(|| Error::MissingComponent("Word main document part".to_string()))?;
    let xml = container.read_xml(&part)?;
    body_text(&xml)
}

/// Inner text of the `body` element of a `document.xml` part.
pub fn body_text(xml: &str) -> Result<String> {
    let mut reader = quick_xml::Reader::from_str(xml);

    let mut text = String::new();
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    let mut in_leaf = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = e.local_name();
                match body_depth {
                    None if name.as_ref() == b"body" => body_depth = Some(depth),
                    Some(_) if TEXT_LEAVES.contains(&name.as_ref()) => in_leaf = true,
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) if body_depth.is_none() && e.local_name().as_ref() == b"body" => {
                return Ok(String::new());
            }
            Ok(Event::Text(e)) if in_leaf => {
                let unescaped = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(e)) if in_leaf => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::End(_)) => {
                if body_depth == Some(depth) {
                    return Ok(text);
                }
                in_leaf = false;
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    Err(Error::MissingComponent("Word document body".to_string()))
}
