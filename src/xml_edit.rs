//! Splicing new child elements into an existing XML part.
//!
//! Edits are made on the raw text: the reader only locates byte offsets, and
//! everything outside the inserted fragment is kept byte-for-byte.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

/// Which matching container element receives the new child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Occurrence {
    First,
    Last,
}

#[derive(Debug)]
enum Splice {
    /// Insert the fragment at this byte offset.
    Insert(usize),
    /// Replace a self-closing container `<x/>` spanning `start..end`.
    Expand {
        start: usize,
        end: usize,
        open_tag: String,
        qname: String,
    },
}

#[derive(Debug)]
struct Slot {
    splice: Splice,
    prefix: String,
    child_prefix: Option<String>,
}

#[derive(Debug)]
struct Open {
    depth: usize,
    prefix: String,
    child_prefix: Option<String>,
    before: Option<usize>,
}

/// Offset of the `<` opening the tag that ends just before `end`.
///
/// `<` cannot appear unescaped inside a tag, so the last one before the
/// reader position is the start of the tag just read.
fn tag_start(xml: &str, end: usize) -> usize {
    xml[..end].rfind('<').unwrap_or(0)
}

fn prefix_of(e: &BytesStart<'_>) -> String {
    e.name()
        .prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
        .unwrap_or_default()
}

/// Append a child to a container element identified by its local name.
///
/// When `before_child` names a direct child of the container, the fragment
/// goes in front of the first such child instead of at the end. `build`
/// receives the namespace prefix to use for the new elements (the prefix of
/// the container's first child, or of the container itself) and returns the
/// XML fragment to insert.
///
/// Returns `Ok(None)` when no matching container exists. An error from
/// `build` is returned as is.
pub(crate) fn append_child(
    xml: &str,
    container: &[u8],
    which: Occurrence,
    before_child: Option<&[u8]>,
    build: impl Fn(&str) -> Result<String>,
) -> Result<Option<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut depth = 0usize;
    let mut open: Option<Open> = None;
    let mut slot: Option<Slot> = None;

    loop {
        let event = reader.read_event().map_err(|e| Error::XmlParse(e.to_string()))?;
        let end = reader.buffer_position() as usize;
        match event {
            Event::Start(e) => {
                depth += 1;
                if let Some(current) = open.as_mut() {
                    if depth == current.depth + 1 {
                        if current.child_prefix.is_none() {
                            current.child_prefix = Some(prefix_of(&e));
                        }
                        if current.before.is_none()
                            && before_child.is_some_and(|c| e.local_name().as_ref() == c)
                        {
                            current.before = Some(tag_start(xml, end));
                        }
                    }
                } else if e.local_name().as_ref() == container {
                    open = Some(Open {
                        depth,
                        prefix: prefix_of(&e),
                        child_prefix: None,
                        before: None,
                    });
                }
            }
            Event::Empty(e) => {
                if let Some(current) = open.as_mut() {
                    if depth == current.depth {
                        if current.child_prefix.is_none() {
                            current.child_prefix = Some(prefix_of(&e));
                        }
                        if current.before.is_none()
                            && before_child.is_some_and(|c| e.local_name().as_ref() == c)
                        {
                            current.before = Some(tag_start(xml, end));
                        }
                    }
                } else if e.local_name().as_ref() == container {
                    slot = Some(Slot {
                        splice: Splice::Expand {
                            start: tag_start(xml, end),
                            end,
                            open_tag: String::from_utf8_lossy(&e).into_owned(),
                            qname: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        },
                        prefix: prefix_of(&e),
                        child_prefix: None,
                    });
                    if which == Occurrence::First {
                        break;
                    }
                }
            }
            Event::End(_) => {
                if open.as_ref().is_some_and(|o| o.depth == depth) {
                    if let Some(done) = open.take() {
                        slot = Some(Slot {
                            splice: Splice::Insert(
                                done.before.unwrap_or_else(|| tag_start(xml, end)),
                            ),
                            prefix: done.prefix,
                            child_prefix: done.child_prefix,
                        });
                    }
                    if which == Occurrence::First {
                        break;
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let Some(slot) = slot else {
        return Ok(None);
    };

    let prefix = slot.child_prefix.as_deref().unwrap_or(&slot.prefix);
    let fragment = build(prefix)?;

    let edited = match slot.splice {
        Splice::Insert(offset) => {
            let mut out = String::with_capacity(xml.len() + fragment.len());
            out.push_str(&xml[..offset]);
            out.push_str(&fragment);
            out.push_str(&xml[offset..]);
            out
        }
        Splice::Expand {
            start,
            end,
            open_tag,
            qname,
        } => {
            let open_tag = open_tag.trim_end();
            format!(
                "{}<{}>{}</{}>{}",
                &xml[..start],
                open_tag,
                fragment,
                qname,
                &xml[end..]
            )
        }
    };

    Ok(Some(edited))
}

/// Qualify a local name with `prefix`, e.g. `("w", "p")` -> `"w:p"`.
pub(crate) fn qualify<'a>(prefix: &str, local: &'a str) -> Cow<'a, str> {
    if prefix.is_empty() {
        Cow::Borrowed(local)
    } else {
        Cow::Owned(format!("{}:{}", prefix, local))
    }
}

/// Whether `c` may appear in XML 1.0 character data.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// A single-run paragraph `<p><r><t>text</t></r></p>` in the given prefix.
///
/// Used for both WordprocessingML (`w:`) and DrawingML (`a:`) text, whose
/// paragraph/run/text element names coincide. Fails with
/// [`Error::InvalidData`] if `text` holds a character XML 1.0 cannot
/// represent, such as NUL or another C0 control.
pub(crate) fn text_paragraph(prefix: &str, text: &str, preserve_space: bool) -> Result<String> {
    if let Some(bad) = text.chars().find(|&c| !is_xml_char(c)) {
        return Err(Error::InvalidData(format!(
            "character U+{:04X} is not allowed in XML text",
            bad as u32
        )));
    }

    let p = qualify(prefix, "p");
    let r = qualify(prefix, "r");
    let t = qualify(prefix, "t");
    let space = if preserve_space {
        " xml:space=\"preserve\""
    } else {
        ""
    };
    Ok(format!(
        "<{p}><{r}><{t}{space}>{text}</{t}></{r}></{p}>",
        text = quick_xml::escape::escape(text)
    ))
}
