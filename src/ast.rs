//! Input tree model.
//!
//! The codec reads a tree of elements produced by the XML parser. Text,
//! comments and processing instructions carry nothing the compact encoding
//! keeps, so the tree holds elements only.

/// An SVG/XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element name as written, including any namespace prefix
    /// (e.g. "svg", "linearGradient", "xlink:href" style names).
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

/// An attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute value, replacing any existing attribute of that name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name == name) {
            attr.value = value.into();
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    /// Check if this element has a specific name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}
