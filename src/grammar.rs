//! The compact tinySVG grammar.
//!
//! Wire format: `/<code>[<name>$<value>|...]&<code>[end]&<code>[...|start]&...`
//! Property names and values are percent-encoded after stripping characters
//! that could reopen markup (`" ' / \ < >` and backtick) and substituting
//! `:` with `~` so embedded style text survives the reserved separators.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::compress;
use crate::error::TinySvgError;
use crate::event::Event;

/// Characters left raw by the grammar's percent-encoding. The reserved
/// separators `$ | & ~` and `%` itself stay escaped, unlike the original
/// encodeURI-based encoder, so values containing them cannot corrupt the
/// token stream.
const GRAMMAR_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b',')
    .remove(b';')
    .remove(b'#')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b'=')
    .remove(b'?')
    .remove(b'@')
    .remove(b'!')
    .remove(b'+');

/// Serialize an event sequence into grammar text.
pub fn encode(events: &[Event]) -> String {
    let mut out = String::from("/");

    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        out.push_str(if event.tag.is_empty() { "u" } else { &event.tag });
        out.push('[');
        if event.end_tag {
            out.push_str("end");
        } else {
            encode_properties(&mut out, event);
            if event.start_tag {
                out.push_str("|start");
            }
        }
        out.push(']');
    }

    out
}

fn encode_properties(out: &mut String, event: &Event) {
    for (i, property) in event.properties.iter().enumerate() {
        if i > 0 {
            out.push('|');
        }
        if property.name.is_empty() {
            out.push_str(&i.to_string());
        } else {
            out.push_str(&escape(&property.name));
        }
        out.push('$');
        match &property.value {
            Some(value) => out.push_str(&escape(value)),
            None => out.push('*'),
        }
    }
}

fn escape(s: &str) -> String {
    let stripped: String = s
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '/' | '\\' | '<' | '>' | '`'))
        .map(|c| if c == ':' { '~' } else { c })
        .collect();
    utf8_percent_encode(&stripped, GRAMMAR_ESCAPE).to_string()
}

/// A malformed percent sequence degrades to an empty string rather than
/// failing the whole decode.
fn unescape(s: &str) -> String {
    percent_decode_str(s)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .unwrap_or_default()
}

/// Parse grammar text back into an event sequence.
///
/// Accepts the compressed `<payload>` form as well; raw SVG markup is
/// rejected as the wrong input kind.
pub fn decode(input: &str) -> Result<Vec<Event>, TinySvgError> {
    if input.contains("<svg") {
        return Err(TinySvgError::InvalidInput(
            "expected tinySVG, got SVG markup".into(),
        ));
    }

    let decompressed;
    let input = if input.starts_with('<') {
        decompressed = compress::decompress(input)?;
        &decompressed
    } else {
        input
    };

    let Some(body) = input.strip_prefix('/') else {
        return Err(TinySvgError::InvalidInput(
            "tinySVG text must start with '/'".into(),
        ));
    };

    let mut events = Vec::new();

    for token in body.split('&') {
        if token.is_empty() {
            continue;
        }

        let (code, props) = match token.split_once('[') {
            Some((code, rest)) => (code, rest.strip_suffix(']').unwrap_or(rest)),
            None => (token, ""),
        };

        let mut event = Event::new(code);

        for part in props.split('|') {
            match part {
                "" => {}
                "end" => event.end_tag = true,
                "start" => event.start_tag = true,
                _ => match part.split_once('$') {
                    None => event.properties.push_positional(unescape(part)),
                    Some((name, value)) => {
                        let name = unescape(name).replace('~', ":");
                        let value = unescape(value);
                        let value = if value.is_empty() || value == "*" {
                            None
                        } else {
                            Some(value.replace('~', ":"))
                        };
                        event.properties.set(name, value);
                    }
                },
            }
        }

        events.push(event);
    }

    Ok(events)
}
