//! End-to-end properties of the tinySVG codec: SVG → events → grammar →
//! compressed string and all the way back.

use pretty_assertions::assert_eq;
use tinysvg::{
    Colour, EmitOptions, Event, FlattenOptions, TinySvg, Warning, compress, decode, decompress,
    encode,
};

fn codec() -> TinySvg {
    TinySvg::new()
}

#[test]
fn svg_roundtrips_up_to_whitelist() {
    let tiny = codec();
    let svg = r#"<svg viewBox="0 0 24 24"><g id="layer"><path d="M0 0L10 10"/><circle cx="5" cy="5" r="2"/></g></svg>"#;

    let conversion = tiny
        .parse_to_events(svg, &FlattenOptions::default())
        .unwrap();
    let emitted = tiny.emit(&conversion.events, &EmitOptions::default());

    // attribute names are lowercased and non-whitelisted attributes drop,
    // everything else survives
    assert_eq!(
        emitted.svg,
        r#"<svg viewbox="0 0 24 24"><g id="layer"><path d="M0 0L10 10"/><circle cx="5" cy="5" r="2"/></g></svg>"#
    );
    assert_eq!(emitted.shape_count, 2);
}

#[test]
fn grammar_decode_encode_is_idempotent() {
    let tiny = codec();
    let svg = r#"<svg viewBox="0 0 8 8"><path d="M1 1" transform="scale(2)"/><rect x="1" y="2"/></svg>"#;
    let conversion = tiny
        .parse_to_events(svg, &FlattenOptions::default())
        .unwrap();

    let decoded = decode(&conversion.grammar).unwrap();
    assert_eq!(encode(&decoded), conversion.grammar);
    assert_eq!(decode(&encode(&decoded)).unwrap(), decoded);
}

#[test]
fn tilde_values_survive_the_grammar_unchanged() {
    let tiny = codec();
    let conversion = tiny
        .parse_to_events(
            r#"<svg><path d="a~b" style="fill:#ff0000"/></svg>"#,
            &FlattenOptions::default(),
        )
        .unwrap();

    // flattening folds the tilde into a colon, and the grammar's `:`↔`~`
    // substitution hands the same value back on decode
    assert_eq!(conversion.events[1].properties.get("d"), Some("a:b"));
    let decoded = decode(&conversion.grammar).unwrap();
    assert_eq!(decoded[1].properties.get("d"), Some("a:b"));
    assert_eq!(
        decoded[1].properties.get("style"),
        Some("fill:#ff0000")
    );
    assert_eq!(decoded[1].properties, conversion.events[1].properties);
}

#[test]
fn compression_roundtrips() {
    let grammar = "/h[viewbox$0%200%2010%2010|start]&p[d$M0%200|transform$*|style$*]&h[end]";
    assert_eq!(decompress(&compress(grammar)).unwrap(), grammar);
}

#[test]
fn compressed_form_feeds_straight_into_emit() {
    let tiny = codec();
    let conversion = tiny
        .parse_to_events(
            r#"<svg viewBox="0 0 4 4"><path d="M0 0"/></svg>"#,
            &FlattenOptions::default(),
        )
        .unwrap();

    let from_grammar = tiny
        .emit_str(&conversion.grammar, &EmitOptions::default())
        .unwrap();
    let from_compressed = tiny
        .emit_str(&conversion.compressed, &EmitOptions::default())
        .unwrap();
    assert_eq!(from_grammar.svg, from_compressed.svg);
}

#[test]
fn start_and_end_markers_balance() {
    let tiny = codec();
    let svg = r#"<svg><defs><linearGradient id="a"><stop offset="0"/></linearGradient></defs><g><path/></g></svg>"#;
    let conversion = tiny
        .parse_to_events(svg, &FlattenOptions::default())
        .unwrap();

    let open = conversion.events.iter().filter(|e| e.start_tag).count();
    let close = conversion.events.iter().filter(|e| e.end_tag).count();
    assert_eq!(open, close);
    assert!(conversion.warnings.is_empty());
}

#[test]
fn shape_counting() {
    let tiny = codec();
    let conversion = tiny
        .parse_to_events(
            "<svg><path/><circle/><rect/></svg>",
            &FlattenOptions::default(),
        )
        .unwrap();
    assert_eq!(conversion.shape_count, 3);
    assert_eq!(conversion.colours.len(), 3);
}

#[test]
fn unsupported_tags_are_skipped_not_fatal() {
    let tiny = codec();
    let conversion = tiny
        .parse_to_events("<svg><bogus/></svg>", &FlattenOptions::default())
        .unwrap();
    assert_eq!(conversion.shape_count, 0);
    assert_eq!(
        conversion.warnings,
        vec![Warning::UnsupportedTag {
            tag: "bogus".into()
        }]
    );
}

#[test]
fn colour_extraction_modes() {
    let tiny = codec();
    let svg = r#"<svg><path style="fill:#ff0000"/><path/></svg>"#;

    let numeric = tiny
        .parse_to_events(svg, &FlattenOptions::default())
        .unwrap();
    assert_eq!(numeric.colours, vec![Colour::Number(16711680), Colour::None]);

    let raw = tiny
        .parse_to_events(
            svg,
            &FlattenOptions {
                convert_colours_to_number: false,
            },
        )
        .unwrap();
    assert_eq!(
        raw.colours,
        vec![Colour::Raw("#ff0000".into()), Colour::None]
    );
}

#[test]
fn palette_applies_in_order_and_drains() {
    let tiny = codec();
    let conversion = tiny
        .parse_to_events(
            r#"<svg><path d="M0 0"/><path d="M1 1"/></svg>"#,
            &FlattenOptions::default(),
        )
        .unwrap();

    let emitted = tiny.emit(
        &conversion.events,
        &EmitOptions {
            palette: vec![Colour::Number(255), Colour::Raw("#f0f".into())],
            ..EmitOptions::default()
        },
    );
    assert_eq!(
        emitted.svg,
        r##"<svg><path d="M0 0" fill="#0ff"/><path d="M1 1" fill="#f0f"/></svg>"##
    );
    assert!(emitted.remaining_palette.is_empty());
}

#[test]
fn one_palette_chains_across_emits() {
    let tiny = codec();
    let first = tiny
        .parse_to_events(r#"<svg><path d="M0 0"/></svg>"#, &FlattenOptions::default())
        .unwrap();
    let second = tiny
        .parse_to_events(r#"<svg><circle cx="1"/></svg>"#, &FlattenOptions::default())
        .unwrap();

    let palette = vec![Colour::Number(255), Colour::Raw("#abc".into())];
    let emitted = tiny.emit(
        &first.events,
        &EmitOptions {
            palette,
            ..EmitOptions::default()
        },
    );
    assert_eq!(emitted.remaining_palette, vec![Colour::Raw("#abc".into())]);

    let emitted = tiny.emit(
        &second.events,
        &EmitOptions {
            palette: emitted.remaining_palette,
            ..EmitOptions::default()
        },
    );
    assert!(emitted.svg.contains(r##"fill="#abc""##));
    assert!(emitted.remaining_palette.is_empty());
}

#[test]
fn malformed_svg_is_invalid_input() {
    let tiny = codec();
    assert!(
        tiny.parse_to_events("<svg><path></svg>", &FlattenOptions::default())
            .is_err()
    );
    assert!(
        tiny.parse_to_events("", &FlattenOptions::default())
            .is_err()
    );
}

#[test]
fn decode_rejects_wrong_input_kind() {
    assert!(decode("<svg><path/></svg>").is_err());
    assert!(decode("no leading slash").is_err());
    assert!(decompress("<svg/>").is_err());
}

#[test]
fn synthetic_events_emit_like_parsed_ones() {
    let tiny = codec();
    let mut events = vec![];

    let mut root = tiny
        .create_element("h", tinysvg::Properties::new())
        .unwrap();
    root.start_tag = true;
    events.push(root);

    let mut props = tinysvg::Properties::new();
    props.set("d", Some("M2 2".into()));
    events.push(tiny.create_element("p", props).unwrap());
    events.push(Event::close("h"));

    let emitted = tiny.emit(&events, &EmitOptions::default());
    assert_eq!(emitted.svg, r#"<svg><path d="M2 2"/></svg>"#);
}
