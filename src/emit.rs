//! Markup emission: event sequence → SVG text.
//!
//! Events are processed in document order. Colour-bearing tags can have
//! their fill re-injected from a caller-supplied palette, consumed front to
//! back; whatever is left is handed back so several emits can share one
//! palette.

use tracing::warn;

use crate::colour::Colour;
use crate::error::Warning;
use crate::event::{Event, Properties};
use crate::registry::{ROOT_CODE, TagRegistry, is_colour_tag, is_shape_tag};

/// Options for a single emit call.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Keep the root tag's recorded properties. When false the root is
    /// emitted bare.
    pub header_has_properties: bool,
    /// Fill colours to apply to colour-bearing tags, in document order.
    pub palette: Vec<Colour>,
    /// Omit the root tag's open/close markup entirely, still emitting its
    /// children.
    pub skip_root_tag: bool,
    /// Force absent/none fills to black.
    pub none_to_black: bool,
    /// Apply palette entries even over an explicit fill.
    pub force_colours: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            header_has_properties: true,
            palette: Vec::new(),
            skip_root_tag: false,
            none_to_black: false,
            force_colours: true,
        }
    }
}

/// The result of one emit call.
#[derive(Debug)]
pub struct Emitted {
    pub svg: String,
    /// Number of colour-bearing shape events encountered.
    pub shape_count: usize,
    /// Unconsumed palette entries, in their original order.
    pub remaining_palette: Vec<Colour>,
    /// Non-fatal diagnostics raised during emission.
    pub warnings: Vec<Warning>,
}

/// Emit SVG markup from an event sequence.
pub fn emit(events: &[Event], registry: &TagRegistry, options: &EmitOptions) -> Emitted {
    // Consumed as a stack from the back, so reverse once up front.
    let mut palette: Vec<Colour> = options.palette.iter().rev().cloned().collect();
    let mut out = String::new();
    let mut shape_count = 0;
    let mut warnings = Vec::new();

    for event in events {
        let Some(backward) = registry.backward_fn(&event.tag) else {
            warn!(code = %event.tag, "unknown tag code, skipping event");
            warnings.push(Warning::UnknownCode {
                code: event.tag.clone(),
            });
            continue;
        };

        if event.tag == ROOT_CODE && options.skip_root_tag {
            continue;
        }

        if event.end_tag {
            let parsed = backward(&Properties::new());
            out.push_str("</");
            out.push_str(&parsed.tag);
            out.push('>');
            continue;
        }

        let mut properties = event.properties.clone();

        if is_colour_tag(&event.tag)
            && (options.force_colours || properties.get("fill").is_none())
            && palette.last().is_some_and(|c| !c.is_none())
        {
            // Guard above makes the pop infallible
            let colour = palette.pop().unwrap();
            properties.set("fill", Some(colour.to_fill()));
        }

        if is_shape_tag(&event.tag) {
            shape_count += 1;
        }

        if options.none_to_black
            && is_colour_tag(&event.tag)
            && properties.get("fill").is_none_or(|f| f == "none")
        {
            properties.set("fill", Some("black".into()));
        }

        if event.tag == ROOT_CODE && !options.header_has_properties {
            properties.clear();
        }

        let parsed = backward(&properties);
        out.push('<');
        out.push_str(&parsed.tag);
        out.push_str(&parsed.attributes);
        match &parsed.content {
            Some(content) => {
                out.push('>');
                out.push_str(content);
                if !event.start_tag {
                    out.push_str("</");
                    out.push_str(&parsed.tag);
                    out.push('>');
                }
            }
            None => {
                if !event.start_tag {
                    out.push('/');
                }
                out.push('>');
            }
        }
    }

    palette.reverse();
    Emitted {
        svg: out,
        shape_count,
        remaining_palette: palette,
        warnings,
    }
}
