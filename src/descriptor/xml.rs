//! Owned XML element tree for project descriptors
//!
//! Documents are parsed with `roxmltree` and copied into [`Element`] so
//! they can be edited in place. Whitespace-only text is dropped on read and
//! regenerated with two-space indentation on write; elements, text,
//! comments and attributes survive a read/write cycle unchanged.

/// A node inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// The element held by this node, turning any other node into an empty `name` element
    fn as_element_or(&mut self, name: &str) -> &mut Element {
        match self {
            Node::Element(element) => element,
            other => {
                *other = Node::Element(Element::new(name));
                other.as_element_or(name)
            }
        }
    }
}

/// An XML element with its attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf element holding only text
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.children.push(Node::Text(text.into()));
        element
    }

    /// Parse a whole document and return its root element
    pub fn parse_document(content: &str) -> std::result::Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(content)?;
        let root = doc.root_element();
        let mut element = convert(root);

        // Namespace declarations are only carried on the root element
        let mut declarations: Vec<(String, String)> = root
            .namespaces()
            .filter(|ns| ns.name() != Some("xml"))
            .map(|ns| {
                let name = ns
                    .name()
                    .map_or_else(|| "xmlns".to_string(), |p| format!("xmlns:{p}"));
                (name, ns.uri().to_string())
            })
            .collect();
        declarations.sort_by(|a, b| (a.0 != "xmlns", &a.0).cmp(&(b.0 != "xmlns", &b.0)));
        element.attributes.splice(0..0, declarations);

        Ok(element)
    }

    /// Serialize this element as a complete document
    pub fn to_document(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        write_element(&mut out, self, 0);
        out
    }

    /// Iterate over child elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }

    /// Follow a slash separated path of child names
    pub fn find(&self, path: &str) -> Option<&Element> {
        split_path(path).try_fold(self, |element, segment| element.child(segment))
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut Element> {
        let mut current = self;
        for segment in split_path(path) {
            current = current.child_mut(segment)?;
        }
        Some(current)
    }

    /// Follow a path, creating any missing elements along the way
    pub fn find_or_create(&mut self, path: &str) -> &mut Element {
        let mut current = self;
        for segment in split_path(path) {
            current = current.child_or_create(segment);
        }
        current
    }

    pub fn child_or_create(&mut self, name: &str) -> &mut Element {
        let index = match self.child_index(name) {
            Some(index) => index,
            None => {
                self.children.push(Node::Element(Element::new(name)));
                self.children.len() - 1
            }
        };
        self.children[index].as_element_or(name)
    }

    fn child_index(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, Node::Element(e) if e.name == name))
    }

    /// Concatenated, trimmed text content of this element
    pub fn text(&self) -> Option<String> {
        let mut text = String::new();
        for node in &self.children {
            if let Node::Text(t) = node {
                text.push_str(t);
            }
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Text of a direct child element
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).and_then(Element::text)
    }

    /// Replace all text of this element
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.retain(|node| !matches!(node, Node::Text(_)));
        self.children.push(Node::Text(text.into()));
    }

    /// Set the text of a child element, creating it when missing
    pub fn set_child_text(&mut self, name: &str, text: impl Into<String>) {
        self.child_or_create(name).set_text(text);
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Position of the first child element matching a predicate
    pub fn position(&self, predicate: impl Fn(&Element) -> bool) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, Node::Element(e) if predicate(e)))
    }

    /// Replace the node at `index` with an element
    pub fn replace(&mut self, index: usize, element: Element) {
        self.children[index] = Node::Element(element);
    }

    /// Remove the node at `index`
    pub fn remove(&mut self, index: usize) -> Node {
        self.children.remove(index)
    }

    pub fn has_elements(&self) -> bool {
        self.elements().next().is_some()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());

    for attr in node.attributes() {
        let name = match attr.namespace().and_then(|uri| node.lookup_prefix(uri)) {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", attr.name()),
            _ => attr.name().to_string(),
        };
        element.attributes.push((name, attr.value().to_string()));
    }

    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(convert(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                if !text.trim().is_empty() {
                    element.children.push(Node::Text(text.to_string()));
                }
            }
        } else if child.is_comment() {
            if let Some(text) = child.text() {
                element.children.push(Node::Comment(text.to_string()));
            }
        }
    }

    element
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}<{}", element.name));
    for (name, value) in &element.attributes {
        out.push_str(&format!(" {name}=\"{}\"", escape(value, true)));
    }

    if element.children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    let text_only = element
        .children
        .iter()
        .all(|node| matches!(node, Node::Text(_)));
    if text_only {
        out.push('>');
        for node in &element.children {
            if let Node::Text(text) = node {
                out.push_str(&escape(text.trim(), false));
            }
        }
        out.push_str(&format!("</{}>\n", element.name));
        return;
    }

    out.push_str(">\n");
    let child_indent = "  ".repeat(depth + 1);
    for node in &element.children {
        match node {
            Node::Element(child) => write_element(out, child, depth + 1),
            Node::Text(text) => {
                out.push_str(&format!("{child_indent}{}\n", escape(text.trim(), false)));
            }
            Node::Comment(text) => {
                out.push_str(&format!("{child_indent}<!--{text}-->\n"));
            }
        }
    }
    out.push_str(&format!("{indent}</{}>\n", element.name));
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
