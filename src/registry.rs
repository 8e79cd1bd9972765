//! Tag registry: source tags ↔ compact codes.
//!
//! Each supported source tag has a forward mapping that selects a compact
//! code and copies a whitelist of attributes (absent entries are still
//! recorded, without a value), and a backward mapping that resolves the code
//! to its source tag name and a serialized attribute string. New tag pairs
//! can be registered at runtime; duplicate keys fail registration.

use std::collections::HashMap;

use crate::FlattenOptions;
use crate::colour::{self, Colour};
use crate::error::TinySvgError;
use crate::event::{Event, Properties};

/// Forward mapping: source-tag properties to a compact event.
pub type ForwardFn = Box<dyn Fn(&Properties, &FlattenOptions) -> Event + Send + Sync>;

/// Backward mapping: event properties to emittable markup pieces.
pub type BackwardFn = Box<dyn Fn(&Properties) -> Parsed + Send + Sync>;

/// The backward mapping's output for one event.
pub struct Parsed {
    /// Source tag name (e.g. "linearGradient" for code "lg").
    pub tag: String,
    /// Serialized attribute string, leading space included, empty when there
    /// are no attributes to write.
    pub attributes: String,
    /// Inline content for content-capable tags. Builtin tags carry none;
    /// whether a tag wraps content is declared here, never inferred.
    pub content: Option<String>,
}

/// Tags that carry a fill colour through the encoding.
const COLOUR_TAGS: &[&str] = &["path", "circle", "rect", "p", "c", "r"];

/// Whether this tag (code or source name) is colour-bearing.
pub fn is_colour_tag(tag: &str) -> bool {
    COLOUR_TAGS.contains(&tag)
}

/// Whether this tag (code or source name) counts as a shape.
pub fn is_shape_tag(tag: &str) -> bool {
    COLOUR_TAGS.contains(&tag)
}

/// Compact code of the document root.
pub const ROOT_CODE: &str = "h";

pub struct TagRegistry {
    forward: HashMap<String, ForwardFn>,
    backward: HashMap<String, BackwardFn>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TagRegistry {
    /// A registry pre-populated with the builtin tag set.
    pub fn new() -> Self {
        let mut registry = Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
        };
        registry.builtin("svg", forward_svg, "h", "svg");
        registry.builtin("path", forward_path, "p", "path");
        registry.builtin("circle", forward_circle, "c", "circle");
        registry.builtin("ellipse", forward_ellipse, "e", "ellipse");
        registry.builtin("rect", forward_rect, "r", "rect");
        registry.builtin("g", forward_g, "g", "g");
        registry.builtin("defs", forward_defs, "defs", "defs");
        registry.builtin("lineargradient", forward_linear_gradient, "lg", "linearGradient");
        registry.builtin("radialgradient", forward_radial_gradient, "rg", "radialGradient");
        registry.builtin("stop", forward_stop, "s", "stop");
        registry.builtin("clippath", forward_clip_path, "cp", "clipPath");
        registry
    }

    fn builtin(
        &mut self,
        tag: &str,
        forward: fn(&Properties, &FlattenOptions) -> Event,
        code: &str,
        name: &'static str,
    ) {
        self.forward.insert(tag.to_string(), Box::new(forward));
        self.backward.insert(
            code.to_string(),
            Box::new(move |properties| Parsed {
                tag: name.to_string(),
                attributes: collapse_properties(properties),
                content: None,
            }),
        );
    }

    /// Register a new tag pair at runtime.
    ///
    /// `tag` is the lowercased source tag name, `code` the compact code it
    /// maps to. Fails on empty or already-registered keys.
    pub fn register<F, B>(
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
        if tag.is_empty() || code.is_empty() {
            return Err(TinySvgError::Registration(
                "tag and code must be non-empty".into(),
            ));
        }
        let tag = tag.to_lowercase();
        if self.forward.contains_key(&tag) {
            return Err(TinySvgError::Registration(format!(
                "tag already registered: {tag}"
            )));
        }
        if self.backward.contains_key(code) {
            return Err(TinySvgError::Registration(format!(
                "code already registered: {code}"
            )));
        }
        self.forward.insert(tag, Box::new(forward));
        self.backward.insert(code.to_string(), Box::new(backward));
        Ok(())
    }

    pub fn forward_fn(&self, tag: &str) -> Option<&ForwardFn> {
        self.forward.get(tag)
    }

    pub fn backward_fn(&self, code: &str) -> Option<&BackwardFn> {
        self.backward.get(code)
    }
}

/// Copy a whitelist of attributes into event properties. Lookup is by
/// lowercased name; the whitelist entry's spelling is what gets stored, so
/// camelCase attributes survive emission. Absent attributes are recorded
/// without a value.
fn whitelisted(properties: &Properties, names: &[&str]) -> Properties {
    let mut out = Properties::new();
    for name in names {
        let value = properties.get(&name.to_lowercase()).map(str::to_string);
        out.set(*name, value);
    }
    out
}

/// Copy optional attributes only when present and non-empty.
fn insert_if_present(event: &mut Event, properties: &Properties, names: &[&str]) {
    for name in names {
        if let Some(value) = properties.get(&name.to_lowercase()) {
            if !value.is_empty() {
                event.properties.set(*name, Some(value.to_string()));
            }
        }
    }
}

/// Serialize event properties as an attribute string. Valueless properties
/// and the `*` sentinel are skipped.
pub fn collapse_properties(properties: &Properties) -> String {
    let mut out = String::new();
    for property in properties.iter() {
        let Some(value) = &property.value else {
            continue;
        };
        if value == "*" {
            continue;
        }
        out.push(' ');
        out.push_str(&property.name);
        out.push_str("=\"");
        push_escaped_attr(&mut out, value);
        out.push('"');
    }
    out
}

fn push_escaped_attr(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn forward_svg(properties: &Properties, _options: &FlattenOptions) -> Event {
    let mut event = Event::new("h");
    event.properties = whitelisted(properties, &["viewbox"]);
    insert_if_present(&mut event, properties, &["id"]);
    event
}

fn forward_path(properties: &Properties, options: &FlattenOptions) -> Event {
    let derived = colour::extract(properties, options.convert_colours_to_number);

    let mut event = Event::new("p");
    event.properties = whitelisted(properties, &["d", "transform", "style"]);
    insert_if_present(
        &mut event,
        properties,
        &["fill-rule", "stroke", "clip-rule", "id"],
    );

    // An explicit fill:none in the style can hide the whole path once a
    // palette colour is applied, so drop it.
    if let Some(style) = event.properties.get("style") {
        let cleaned = style.replacen("fill:none;", "", 1);
        event.properties.set("style", Some(cleaned));
    }

    // Keep an explicit fill only when it isn't just the derived colour again.
    if let Some(fill) = properties.get("fill") {
        let parsed = fill.strip_prefix('#').and_then(colour::parse_hex);
        let redundant = match (&derived, parsed) {
            (Colour::Number(n), Some(m)) => *n == m,
            (Colour::Raw(raw), _) => raw == fill,
            _ => false,
        };
        if !redundant {
            event.properties.set("fill", Some(fill.to_string()));
        }
    }

    event.colour = Some(derived);
    event
}

fn forward_circle(properties: &Properties, options: &FlattenOptions) -> Event {
    let mut event = Event::new("c");
    event.colour = Some(colour::extract(properties, options.convert_colours_to_number));
    event.properties = whitelisted(properties, &["cx", "cy", "r"]);
    insert_if_present(&mut event, properties, &["style", "id"]);
    event
}

fn forward_ellipse(properties: &Properties, options: &FlattenOptions) -> Event {
    let mut event = Event::new("e");
    event.colour = Some(colour::extract(properties, options.convert_colours_to_number));
    event.properties = whitelisted(properties, &["cx", "cy", "rx", "ry"]);
    insert_if_present(&mut event, properties, &["style", "id"]);
    event
}

fn forward_rect(properties: &Properties, options: &FlattenOptions) -> Event {
    let mut event = Event::new("r");
    event.colour = Some(colour::extract(properties, options.convert_colours_to_number));
    event.properties = whitelisted(properties, &["w", "h", "x", "y"]);
    insert_if_present(&mut event, properties, &["style", "id"]);
    event
}

fn forward_g(properties: &Properties, options: &FlattenOptions) -> Event {
    let mut event = Event::new("g");
    event.colour = Some(colour::extract(properties, options.convert_colours_to_number));
    event.properties = whitelisted(properties, &["transform", "id"]);
    insert_if_present(
        &mut event,
        properties,
        &[
            "fill-rule",
            "stroke",
            "clip-path",
            "clip-rule",
            "stroke-miterlimit",
            "style",
        ],
    );
    event
}

fn forward_defs(properties: &Properties, _options: &FlattenOptions) -> Event {
    let mut event = Event::new("defs");
    event.properties = whitelisted(properties, &["id"]);
    event
}

fn forward_linear_gradient(properties: &Properties, _options: &FlattenOptions) -> Event {
    let mut event = Event::new("lg");
    event.properties = whitelisted(
        properties,
        &["id", "gradientUnits", "x1", "x2", "y1", "y2", "xlink:href"],
    );
    event
}

fn forward_radial_gradient(properties: &Properties, _options: &FlattenOptions) -> Event {
    let mut event = Event::new("rg");
    event.properties = whitelisted(
        properties,
        &[
            "id",
            "gradientUnits",
            "cy",
            "cx",
            "r",
            "gradientTransform",
            "xlink:href",
        ],
    );
    event
}

fn forward_stop(properties: &Properties, _options: &FlattenOptions) -> Event {
    let mut event = Event::new("s");
    event.properties = whitelisted(properties, &["offset", "style"]);
    insert_if_present(&mut event, properties, &["id", "stop-colour"]);
    event
}

fn forward_clip_path(properties: &Properties, options: &FlattenOptions) -> Event {
    let mut event = Event::new("cp");
    event.colour = Some(colour::extract(properties, options.convert_colours_to_number));
    event.properties = whitelisted(properties, &["d"]);
    insert_if_present(&mut event, properties, &["id", "clipPathUnits"]);
    event
}
