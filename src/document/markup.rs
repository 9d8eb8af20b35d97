//! HTML-like serialization of a document tree.

use std::fmt::Write;

use indextree::{NodeEdge, NodeId};

use super::tree::{DocumentTree, NodeData};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl DocumentTree {
    /// Serialize the whole document.
    pub fn to_markup(&self) -> String {
        self.subtree_markup(self.root())
    }

    /// Serialize `id` and everything below it.
    ///
    /// Wrappers render as `<tag style="...">`. Document and fragment nodes
    /// contribute only their children.
    pub fn subtree_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        if !self.contains(id) {
            return out;
        }
        for edge in id.traverse(self.arena()) {
            match edge {
                NodeEdge::Start(node) => self.open_tag(node, &mut out),
                NodeEdge::End(node) => self.close_tag(node, &mut out),
            }
        }
        out
    }

    fn open_tag(&self, id: NodeId, out: &mut String) {
        let Some(data) = self.get(id) else {
            return;
        };
        match data {
            NodeData::Document | NodeData::Fragment => {}
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
                }
                out.push('>');
            }
            NodeData::Container(wrapper) => {
                out.push('<');
                out.push_str(wrapper.tag.tag_name());
                if !wrapper.style.is_empty() {
                    let _ = write!(out, " style=\"{}\"", escape_attr(&wrapper.style.to_css()));
                }
                out.push('>');
            }
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Other(data) => {
                let _ = write!(out, "<!--{data}-->");
            }
        }
    }

    fn close_tag(&self, id: NodeId, out: &mut String) {
        match self.get(id) {
            Some(NodeData::Element(el)) if !VOID_ELEMENTS.contains(&el.tag.as_str()) => {
                let _ = write!(out, "</{}>", el.tag);
            }
            Some(NodeData::Container(wrapper)) => {
                let _ = write!(out, "</{}>", wrapper.tag.tag_name());
            }
            _ => {}
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{StyleSpec, WrapperTag};

    #[test]
    fn test_markup_nests_elements_and_escapes_text() {
        let mut tree = DocumentTree::new();
        let p = tree.create_element("p");
        tree.append(tree.root(), p).unwrap();
        tree.set_attr(p, "title", "say \"hi\"").unwrap();
        let t = tree.create_text("a < b & c");
        tree.append(p, t).unwrap();
        let br = tree.create_element("br");
        tree.append(p, br).unwrap();
        let c = tree.create_other(" note ");
        tree.append(p, c).unwrap();

        assert_eq!(
            tree.to_markup(),
            "<p title=\"say &quot;hi&quot;\">a &lt; b &amp; c<br><!-- note --></p>"
        );
    }

    #[test]
    fn test_markup_renders_wrapper_style() {
        let mut tree = DocumentTree::new();
        let t = tree.create_text("hi");
        tree.append(tree.root(), t).unwrap();
        let w = tree.create_wrapper(WrapperTag::Highlight, StyleSpec::highlight("yellow"));
        tree.enclose(t, w).unwrap();
        assert_eq!(
            tree.to_markup(),
            "<mark style=\"background-color: yellow;\">hi</mark>"
        );
    }
}
