//! Namespace-free node arena and its compact serializer.
//!
//! Elements are stored with local names only and without `xmlns`
//! declarations, so serializing any subtree can never reintroduce a
//! namespace binding.

/// Index of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeId>,
    },
    /// Text exactly as it appeared in the source (entities left escaped).
    Text(String),
    Comment(String),
    CData(String),
}

#[derive(Debug, Default)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Attach `child` as the last child of `parent`. No-op for non-elements.
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Node::Element { children, .. } = &mut self.nodes[parent.0] {
            children.push(child);
        }
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Serialize every child of `id`, concatenated, without formatting.
    pub(crate) fn inner_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(&mut out, child);
        }
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        match self.get(id) {
            Node::Text(text) => out.push_str(text),
            Node::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            Node::CData(text) => {
                out.push_str("<![CDATA[");
                out.push_str(text);
                out.push_str("]]>");
            }
            Node::Element {
                name,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }

                if children.is_empty() {
                    out.push_str(" />");
                    return;
                }

                out.push('>');
                for &child in children {
                    self.write_node(out, child);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

/// Escape an unescaped attribute value for a double-quoted attribute.
pub(crate) fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            '\t' => escaped.push_str("&#x9;"),
            other => escaped.push(other),
        }
    }
    escaped
}
