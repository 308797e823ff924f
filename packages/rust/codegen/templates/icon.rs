// Generated by `iconforge support`. Safe to edit; regenerating overwrites it.

use std::fmt;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// An SVG icon declared by generated code.
///
/// `attributes` holds the source root element's attributes in source order,
/// without namespace declarations or `class`. `inner` is the root's
/// children serialized without namespace prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Icon {
    pub name: &'static str,
    pub attributes: &'static [(&'static str, &'static str)],
    pub inner: &'static str,
}

impl Icon {
    /// Value of a root attribute, matched case-sensitively.
    pub fn attribute(&self, key: &str) -> Option<&'static str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Render a standalone `<svg>` element.
    pub fn to_svg(&self) -> String {
        self.to_svg_with(&[])
    }

    /// Render a standalone `<svg>` element, replacing or appending the given
    /// attributes (e.g. `("class", "icon")` or `("width", "16")`).
    pub fn to_svg_with(&self, overrides: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.inner.len() + 128);
        out.push_str("<svg xmlns=\"");
        out.push_str(SVG_NAMESPACE);
        out.push('"');

        for (key, value) in self.attributes {
            let value = overrides
                .iter()
                .find(|(k, _)| k == key)
                .map_or(*value, |(_, v)| *v);
            push_attribute(&mut out, key, value);
        }
        for (key, value) in overrides {
            if key.is_empty() || self.attribute(key).is_some() {
                continue;
            }
            push_attribute(&mut out, key, value);
        }

        out.push('>');
        out.push_str(self.inner);
        out.push_str("</svg>");
        out
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg())
    }
}

fn push_attribute(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out.push('"');
}
