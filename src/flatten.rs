//! Tree flattening: element tree → linear event sequence.
//!
//! Depth-first pre-order with an explicit frame stack, so deeply nested
//! documents cannot blow the call stack. A container produces an open event,
//! its descendants, then a close event; a leaf produces a single event.
//! Unsupported tags are skipped together with their subtrees.

use tracing::warn;

use crate::FlattenOptions;
use crate::ast::Element;
use crate::error::Warning;
use crate::event::{Event, Properties};
use crate::registry::TagRegistry;

/// The flattener's output: events in document order plus any non-fatal
/// diagnostics raised along the way.
pub struct Flattened {
    pub events: Vec<Event>,
    pub warnings: Vec<Warning>,
}

struct Frame<'a> {
    children: &'a [Element],
    index: usize,
    /// Code to emit a close marker for when this frame is exhausted.
    close: Option<String>,
}

/// Flatten an element tree into its event sequence.
pub fn flatten(root: &Element, registry: &TagRegistry, options: &FlattenOptions) -> Flattened {
    let mut events = Vec::new();
    let mut warnings = Vec::new();

    let mut stack = vec![Frame {
        children: std::slice::from_ref(root),
        index: 0,
        close: None,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.index >= frame.children.len() {
            let frame = stack.pop().unwrap();
            if let Some(code) = frame.close {
                events.push(Event::close(code));
            }
            continue;
        }

        let node = &frame.children[frame.index];
        frame.index += 1;

        if node.name.is_empty() {
            continue;
        }

        let tag = node.name.to_lowercase();
        let Some(forward) = registry.forward_fn(&tag) else {
            warn!(tag = %tag, "unsupported tag, skipping subtree");
            warnings.push(Warning::UnsupportedTag { tag });
            continue;
        };

        let properties = normalize(node);
        let mut event = forward(&properties, options);

        if node.children.is_empty() {
            events.push(event);
        } else {
            event.start_tag = true;
            let code = event.tag.clone();
            events.push(event);
            stack.push(Frame {
                children: &node.children,
                index: 0,
                close: Some(code),
            });
        }
    }

    let open = events.iter().filter(|e| e.start_tag).count();
    let close = events.iter().filter(|e| e.end_tag).count();
    if open != close {
        warn!(open, close, "open/close markers out of balance");
        warnings.push(Warning::UnbalancedStructure { open, close });
    }

    Flattened { events, warnings }
}

/// Normalize attributes before forward mapping: lowercase names, fold `~`
/// back into `:` and strip the grammar's `|` separator out of names and
/// values. The grammar layer substitutes `:` with `~` on the wire and
/// restores `:` on decode, so a stray `~` in the input would otherwise come
/// back as a colon and break event round-trips.
fn normalize(node: &Element) -> Properties {
    node.attributes
        .iter()
        .map(|attr| {
            let name = attr.name.to_lowercase().replace('~', ":").replace('|', "");
            let value = attr.value.replace('~', ":").replace('|', "");
            (name, Some(value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_markup;

    fn flat(svg: &str) -> Flattened {
        let root = parse_markup(svg).unwrap();
        flatten(&root, &TagRegistry::new(), &FlattenOptions::default())
    }

    #[test]
    fn test_leaf_produces_single_event() {
        let result = flat(r#"<svg viewBox="0 0 1 1"><path d="M0 0"/></svg>"#);
        let tags: Vec<_> = result.events.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, ["h", "p", "h"]);

        assert!(result.events[0].start_tag);
        assert!(!result.events[1].start_tag && !result.events[1].end_tag);
        assert!(result.events[2].end_tag);
        assert!(result.events[2].properties.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_nested_groups_bracket_descendants() {
        let result = flat(r#"<svg><g id="a"><g id="b"><circle/></g><rect/></g></svg>"#);
        let tags: Vec<_> = result
            .events
            .iter()
            .map(|e| {
                let marker = if e.start_tag {
                    "+"
                } else if e.end_tag {
                    "-"
                } else {
                    ""
                };
                format!("{}{}", e.tag, marker)
            })
            .collect();
        assert_eq!(tags, ["h+", "g+", "g+", "c", "g-", "r", "g-", "h-"]);
    }

    #[test]
    fn test_unsupported_subtree_skipped() {
        let result = flat(r#"<svg><bogus><path d="M0 0"/></bogus><circle/></svg>"#);
        let tags: Vec<_> = result.events.iter().map(|e| e.tag.as_str()).collect();
        // the path inside <bogus> is never visited
        assert_eq!(tags, ["h", "c", "h"]);
        assert_eq!(
            result.warnings,
            vec![Warning::UnsupportedTag {
                tag: "bogus".into()
            }]
        );
    }

    #[test]
    fn test_attribute_names_lowercased() {
        let result = flat(r#"<svg viewBox="0 0 10 10"/>"#);
        assert_eq!(result.events[0].properties.get("viewbox"), Some("0 0 10 10"));
    }

    #[test]
    fn test_tildes_fold_into_colons() {
        let result = flat(r#"<svg><path d="a~b" id="x~y"/></svg>"#);
        assert_eq!(result.events[1].properties.get("d"), Some("a:b"));
        assert_eq!(result.events[1].properties.get("id"), Some("x:y"));
    }

    #[test]
    fn test_pipes_stripped() {
        let result = flat(r#"<svg><path id="a|b"/></svg>"#);
        assert_eq!(result.events[1].properties.get("id"), Some("ab"));
    }

    #[test]
    fn test_markers_balance() {
        let result = flat(r#"<svg><g><g><g><path/></g></g></g></svg>"#);
        let open = result.events.iter().filter(|e| e.start_tag).count();
        let close = result.events.iter().filter(|e| e.end_tag).count();
        assert_eq!(open, close);
        assert!(result.warnings.is_empty());
    }
}
