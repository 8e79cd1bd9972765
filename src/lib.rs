//! tinysvg - a compact, URL-embeddable encoding for SVG documents.
//!
//! An SVG tree is flattened into a linear event stream with per-tag
//! attribute whitelists, serialized into a compact delimiter grammar, and
//! optionally lz-compressed for transport in URLs. The reverse direction
//! re-emits SVG markup, optionally re-applying a supplied colour palette.
//!
//! The encoding is deliberately lossy: only a curated attribute whitelist
//! per tag survives the round trip.

mod ast;
mod colour;
mod compress;
mod emit;
mod error;
mod event;
mod flatten;
mod grammar;
mod parse;
mod registry;

pub use ast::{Attribute, Element};
pub use colour::{Colour, extract as extract_colour, hex_from_decimal};
pub use compress::{compress, decompress};
pub use emit::{EmitOptions, Emitted};
pub use error::{TinySvgError, Warning};
pub use event::{Event, Properties, Property, insert_events};
pub use grammar::{decode, encode};
pub use parse::parse_markup;
pub use registry::{
    BackwardFn, ForwardFn, Parsed, TagRegistry, collapse_properties, is_colour_tag, is_shape_tag,
};

/// Options for flattening SVG into events.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Store derived colours as numbers rather than raw `#`-strings.
    pub convert_colours_to_number: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            convert_colours_to_number: true,
        }
    }
}

/// Everything produced by one conversion of SVG into tinySVG.
#[derive(Debug)]
pub struct Conversion {
    /// The flattened event sequence in document order.
    pub events: Vec<Event>,
    /// Number of colour-bearing shape events.
    pub shape_count: usize,
    /// Derived colour per colour-bearing event, in document order.
    pub colours: Vec<Colour>,
    /// The uncompressed grammar text.
    pub grammar: String,
    /// The `<payload>` compressed form for URL embedding.
    pub compressed: String,
    /// Non-fatal diagnostics raised during conversion.
    pub warnings: Vec<Warning>,
}

/// The tinySVG codec.
///
/// Holds only the tag registry; all per-call state is scoped to the call, so
/// a shared `&TinySvg` is safe to use from multiple threads. Registering
/// tags requires exclusive access.
#[derive(Default)]
pub struct TinySvg {
    registry: TagRegistry,
}

impl TinySvg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Register a new tag pair at runtime. See [`TagRegistry::register`].
    pub fn register_tag<F, B>(
        &mut self,
        tag: &str,
        code: &str,
        forward: F,
        backward: B,
    ) -> Result<(), TinySvgError>
    where
        F: Fn(&Properties, &FlattenOptions) -> Event + Send + Sync + 'static,
        B: Fn(&Properties) -> Parsed + Send + Sync + 'static,
    {
        self.registry.register(tag, code, forward, backward)
    }

    /// Convert SVG markup into its tinySVG representation: the event
    /// sequence plus the derived colours, grammar text and compressed form.
    pub fn parse_to_events(
        &self,
        svg: &str,
        options: &FlattenOptions,
    ) -> Result<Conversion, TinySvgError> {
        let root = parse::parse_markup(svg)?;
        let flattened = flatten::flatten(&root, &self.registry, options);

        let shape_count = flattened
            .events
            .iter()
            .filter(|e| !e.end_tag && registry::is_shape_tag(&e.tag))
            .count();
        let colours = flattened
            .events
            .iter()
            .filter(|e| !e.end_tag && registry::is_colour_tag(&e.tag))
            .map(|e| e.colour.clone().unwrap_or(Colour::None))
            .collect();
        let grammar = grammar::encode(&flattened.events);
        let compressed = compress::compress(&grammar);

        Ok(Conversion {
            events: flattened.events,
            shape_count,
            colours,
            grammar,
            compressed,
            warnings: flattened.warnings,
        })
    }

    /// Emit SVG markup from an event sequence.
    pub fn emit(&self, events: &[Event], options: &EmitOptions) -> Emitted {
        emit::emit(events, &self.registry, options)
    }

    /// Emit SVG markup from grammar text or its compressed `<payload>` form.
    pub fn emit_str(&self, tiny: &str, options: &EmitOptions) -> Result<Emitted, TinySvgError> {
        let events = grammar::decode(tiny)?;
        Ok(self.emit(&events, options))
    }

    /// Build a synthetic event for a registered code, ready to feed into
    /// [`TinySvg::emit`]. The colour is derived in raw-string mode.
    pub fn create_element(
        &self,
        code: &str,
        properties: Properties,
    ) -> Result<Event, TinySvgError> {
        let code = code.to_lowercase();
        if self.registry.backward_fn(&code).is_none() {
            return Err(TinySvgError::InvalidInput(format!(
                "tinySVG tag is not defined: {code}"
            )));
        }
        let mut event = Event::new(code);
        event.colour = Some(colour::extract(&properties, false));
        event.properties = properties;
        Ok(event)
    }
}
