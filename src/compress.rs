//! Compression adapter for URL transport.
//!
//! Wraps grammar text as `<payload>` where the payload is lz-string's
//! URL-component encoding, the same scheme the original JS tool used, so
//! compressed strings are interchangeable. The adapter only wraps/unwraps
//! the delimiter; the compression itself is lz-str's.

use crate::error::TinySvgError;

/// Compress grammar text into its `<payload>` wire form.
pub fn compress(grammar: &str) -> String {
    format!("<{}>", lz_str::compress_to_encoded_uri_component(grammar))
}

/// Expand a `<payload>` string back into grammar text.
///
/// Rejects raw SVG markup (wrong input kind) and payloads that do not expand
/// to grammar text starting with `/`.
pub fn decompress(compressed: &str) -> Result<String, TinySvgError> {
    if compressed.contains("<svg") {
        return Err(TinySvgError::InvalidInput(
            "expected compressed tinySVG, got SVG markup".into(),
        ));
    }

    let payload = compressed
        .split_once('<')
        .and_then(|(_, rest)| rest.split_once('>'))
        .map(|(payload, _)| payload)
        .ok_or_else(|| {
            TinySvgError::InvalidInput("compressed tinySVG must be wrapped in <>".into())
        })?;

    let grammar = lz_str::decompress_from_encoded_uri_component(payload)
        .and_then(|wide| String::from_utf16(&wide).ok())
        .ok_or_else(|| TinySvgError::InvalidInput("payload did not decompress".into()))?;

    if !grammar.starts_with('/') {
        return Err(TinySvgError::InvalidInput(
            "decompressed payload is not tinySVG grammar".into(),
        ));
    }

    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let grammar = "/h[viewbox$0%200%2010%2010|start]&p[d$M0%200]&h[end]";
        let compressed = compress(grammar);
        assert!(compressed.starts_with('<') && compressed.ends_with('>'));
        assert_eq!(decompress(&compressed).unwrap(), grammar);
    }

    #[test]
    fn test_rejects_markup() {
        assert!(decompress("<svg xmlns=\"x\"/>").is_err());
    }

    #[test]
    fn test_rejects_unwrapped_input() {
        assert!(decompress("not wrapped").is_err());
    }

    #[test]
    fn test_rejects_non_grammar_payload() {
        // valid lz payload, but the text inside is not grammar
        let wrapped = format!("<{}>", lz_str::compress_to_encoded_uri_component("hello"));
        assert!(decompress(&wrapped).is_err());
    }
}
