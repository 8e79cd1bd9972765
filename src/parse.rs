//! SVG parsing from XML.
//!
//! This is the markup-parser collaborator: raw SVG text in, element tree
//! out. Malformed input surfaces as [`TinySvgError::InvalidInput`]; the
//! codec itself never sees broken XML.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::ast::{Attribute, Element};
use crate::error::TinySvgError;

/// Parse an SVG string into its root element.
pub fn parse_markup(svg: &str) -> Result<Element, TinySvgError> {
    let mut reader = Reader::from_str(svg);
    let mut root = None;

    loop {
        match reader
            .read_event()
            .map_err(|e| TinySvgError::InvalidInput(format!("invalid SVG: {e}")))?
        {
            Event::Start(start) => {
                root = Some(parse_element(&mut reader, &start)?);
                break;
            }
            Event::Empty(start) => {
                root = Some(parse_element_start(&start)?);
                break;
            }
            Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::Text(_)
            | Event::PI(_) => {
                // Skip prolog material before the root element
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.ok_or_else(|| TinySvgError::InvalidInput("no root element found".into()))
}

fn parse_element(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
) -> Result<Element, TinySvgError> {
    let mut element = parse_element_start(start)?;

    loop {
        match reader
            .read_event()
            .map_err(|e| TinySvgError::InvalidInput(format!("invalid SVG: {e}")))?
        {
            Event::Start(start) => {
                element.children.push(parse_element(reader, &start)?);
            }
            Event::Empty(start) => {
                element.children.push(parse_element_start(&start)?);
            }
            Event::End(_) => break,
            Event::Text(_) | Event::Comment(_) | Event::CData(_) | Event::PI(_) => {
                // The compact encoding only keeps elements
            }
            Event::Eof => {
                return Err(TinySvgError::InvalidInput("unexpected end of file".into()));
            }
            _ => {}
        }
    }

    Ok(element)
}

fn parse_element_start(start: &BytesStart) -> Result<Element, TinySvgError> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?;

    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| TinySvgError::InvalidInput(format!("invalid attribute: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| TinySvgError::InvalidInput(format!("invalid attribute value: {e}")))?;
        element
            .attributes
            .push(Attribute::new(key, value.into_owned()));
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_svg() {
        let svg = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
    <rect x="10" y="10" width="80" height="80" fill="red"/>
</svg>"#;

        let root = parse_markup(svg).unwrap();
        assert!(root.is("svg"));
        assert_eq!(root.get_attr("viewBox"), Some("0 0 100 100"));
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].is("rect"));
    }

    #[test]
    fn test_parse_drops_text_and_comments() {
        let svg = r#"<svg><!-- a comment --><g>some text<path d="M0 0"/></g></svg>"#;

        let root = parse_markup(svg).unwrap();
        assert_eq!(root.children.len(), 1);
        let g = &root.children[0];
        assert_eq!(g.children.len(), 1);
        assert!(g.children[0].is("path"));
    }

    #[test]
    fn test_parse_namespaced_attribute() {
        let svg = r##"<svg><linearGradient xlink:href="#grad"/></svg>"##;

        let root = parse_markup(svg).unwrap();
        assert_eq!(root.children[0].get_attr("xlink:href"), Some("#grad"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_markup("<svg><path></svg>").is_err());
        assert!(parse_markup("").is_err());
    }
}
