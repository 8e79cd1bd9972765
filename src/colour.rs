//! Fill colour extraction and conversion.
//!
//! Colours are pulled out of a `fill` attribute or inline `style` text at
//! flatten time, stored alongside the event stream, and re-injected from a
//! palette at emit time. Depending on the conversion settings a colour is
//! kept as a raw `#`-string or parsed into a number.

use std::fmt;
use std::str::FromStr;

use crate::event::Properties;

/// A fill colour as carried through the event stream and palettes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Colour {
    /// No colour could be derived (the "none" sentinel).
    None,
    /// Numeric colour, parsed from hex digits.
    Number(u32),
    /// Raw colour text, normally a `#`-prefixed token.
    Raw(String),
}

impl Colour {
    pub fn is_none(&self) -> bool {
        matches!(self, Colour::None)
    }

    /// Render this colour as a fill attribute value. Numeric colours (and
    /// raw strings that are plain decimal numbers) become `#`-hex tokens.
    pub fn to_fill(&self) -> String {
        match self {
            Colour::None => "none".into(),
            Colour::Number(n) => hex_from_decimal(*n),
            Colour::Raw(s) => match s.parse::<u32>() {
                Ok(n) => hex_from_decimal(n),
                Err(_) => s.clone(),
            },
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::None => f.write_str("none"),
            Colour::Number(n) => write!(f, "{n}"),
            Colour::Raw(s) => f.write_str(s),
        }
    }
}

impl FromStr for Colour {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" => Colour::None,
            _ => match s.parse::<u32>() {
                Ok(n) => Colour::Number(n),
                Err(_) => Colour::Raw(s.to_string()),
            },
        })
    }
}

/// Derive a fill colour from an element's properties.
///
/// A `#`-prefixed `fill` attribute wins. Otherwise the inline `style` text is
/// split on `;` and searched for a `#` token: first segment, then the last,
/// then the second-to-last (covers a trailing `;`). No token anywhere means
/// [`Colour::None`].
pub fn extract(properties: &Properties, convert_to_number: bool) -> Colour {
    if let Some(fill) = properties.get("fill") {
        if let Some(rest) = fill.strip_prefix('#') {
            return if convert_to_number {
                parse_hex(rest).map(Colour::Number).unwrap_or(Colour::None)
            } else {
                Colour::Raw(fill.to_string())
            };
        }
    }

    let Some(style) = properties.get("style") else {
        return Colour::None;
    };

    let segments: Vec<&str> = style.split(';').collect();
    let mut tail = segments[segments.len() - 1];
    if tail.is_empty() && segments.len() >= 2 {
        tail = segments[segments.len() - 2];
    }

    for segment in [segments[0], tail] {
        if let Some((_, rest)) = segment.split_once('#') {
            return if convert_to_number {
                parse_hex(rest).map(Colour::Number).unwrap_or(Colour::None)
            } else {
                Colour::Raw(format!("#{rest}"))
            };
        }
    }

    Colour::None
}

/// Parse the leading hex digits of a colour token.
pub(crate) fn parse_hex(token: &str) -> Option<u32> {
    let digits: &str = match token.find(|c: char| !c.is_ascii_hexdigit()) {
        Some(end) => &token[..end],
        None => token,
    };
    u32::from_str_radix(digits, 16).ok()
}

/// Render a numeric colour as a `#`-hex token.
///
/// Keeps the original encoder's padding rule: pad a leading zero when the
/// digit count is neither a multiple of three, nor 4, nor at least 6, then
/// truncate to six digits.
pub fn hex_from_decimal(n: u32) -> String {
    let mut hex = format!("{n:x}");
    if hex.len() % 3 != 0 && hex.len() < 6 && hex.len() != 4 {
        hex.insert(0, '0');
    }
    hex.truncate(6);
    format!("#{hex}")
}
